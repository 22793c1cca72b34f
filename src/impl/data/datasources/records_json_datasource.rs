use std::fs;

use fractic_server_error::ServerError;

use crate::{
    data::models::{
        bill_of_lading_model::BillOfLadingModel, transaction_model::TransactionModel,
    },
    entities::{BillOfLadingRecord, TransactionRecord},
    errors::{InvalidJson, ReadError},
};

/// Decodes records from the JSON bodies returned by the application API.
pub(crate) trait RecordsJsonDatasource {
    fn transaction_from_string(&self, s: &str) -> Result<TransactionRecord, ServerError>;

    fn transactions_from_string(&self, s: &str) -> Result<Vec<TransactionRecord>, ServerError>;

    fn bill_of_lading_from_string(&self, s: &str) -> Result<BillOfLadingRecord, ServerError>;

    fn transactions_from_file<P>(&self, path: P) -> Result<Vec<TransactionRecord>, ServerError>
    where
        P: AsRef<std::path::Path>;

    fn bill_of_lading_from_file<P>(&self, path: P) -> Result<BillOfLadingRecord, ServerError>
    where
        P: AsRef<std::path::Path>;
}

pub(crate) struct RecordsJsonDatasourceImpl;

impl RecordsJsonDatasourceImpl {
    pub(crate) fn new() -> Self {
        Self
    }
}

impl RecordsJsonDatasource for RecordsJsonDatasourceImpl {
    fn transaction_from_string(&self, s: &str) -> Result<TransactionRecord, ServerError> {
        let model: TransactionModel =
            serde_json::from_str(s).map_err(|e| InvalidJson::with_debug("Transaction", &e))?;
        Ok(model.into())
    }

    fn transactions_from_string(&self, s: &str) -> Result<Vec<TransactionRecord>, ServerError> {
        let models: Vec<TransactionModel> =
            serde_json::from_str(s).map_err(|e| InvalidJson::with_debug("Transaction list", &e))?;
        Ok(models.into_iter().map(Into::into).collect())
    }

    fn bill_of_lading_from_string(&self, s: &str) -> Result<BillOfLadingRecord, ServerError> {
        let model: BillOfLadingModel =
            serde_json::from_str(s).map_err(|e| InvalidJson::with_debug("BillOfLading", &e))?;
        Ok(model.into())
    }

    fn transactions_from_file<P>(&self, path: P) -> Result<Vec<TransactionRecord>, ServerError>
    where
        P: AsRef<std::path::Path>,
    {
        self.transactions_from_string(
            &fs::read_to_string(path).map_err(|e| ReadError::with_debug(&e))?,
        )
    }

    fn bill_of_lading_from_file<P>(&self, path: P) -> Result<BillOfLadingRecord, ServerError>
    where
        P: AsRef<std::path::Path>,
    {
        self.bill_of_lading_from_string(
            &fs::read_to_string(path).map_err(|e| ReadError::with_debug(&e))?,
        )
    }
}

use chrono::{DateTime, NaiveDate, Utc};
use fractic_server_error::ServerError;

use crate::{
    data::{
        datasources::records_json_datasource::{RecordsJsonDatasource as _, RecordsJsonDatasourceImpl},
        repositories::directory_sink::DirectorySink,
    },
    domain::{
        logic::{
            history_export::HistoryExportBuilder,
            receipt_composer::{ReceiptComposer, ReceiptOptions},
            voucher_template::VoucherTemplate,
        },
        repositories::download_sink::DownloadSink,
        usecases::documents_usecase::{DocumentsUsecase as _, DocumentsUsecaseImpl},
    },
    entities::{
        BillOfLadingRecord, DocumentFormat, DocumentTheme, PrintableDocument, Sheet, SheetFormat,
        TransactionRecord,
    },
};

/// Entry point of the library.
///
/// The `render_*` / `build_*` methods only produce the document structure.
/// The other methods also serialize it in the requested format and deliver
/// the file to the sink, returning the delivered file name. Methods without
/// an explicit time use the current time.
pub struct TransitDocumentsUtil<S = DirectorySink>
where
    S: DownloadSink,
{
    documents_usecase: DocumentsUsecaseImpl<S>,
    records_datasource: RecordsJsonDatasourceImpl,
}

impl<S> TransitDocumentsUtil<S>
where
    S: DownloadSink,
{
    pub fn new(theme: DocumentTheme, sink: S) -> Self {
        Self {
            documents_usecase: DocumentsUsecaseImpl::new(theme, sink),
            records_datasource: RecordsJsonDatasourceImpl::new(),
        }
    }

    pub fn theme(&self) -> &DocumentTheme {
        self.documents_usecase.theme()
    }

    pub fn sink(&self) -> &S {
        self.documents_usecase.sink()
    }

    // Structure only.
    // ---

    pub fn render_withdrawal_voucher(&self, tx: &TransactionRecord) -> PrintableDocument {
        VoucherTemplate::new(self.theme()).render_withdrawal(tx)
    }

    pub fn render_deposit_voucher(&self, tx: &TransactionRecord) -> PrintableDocument {
        VoucherTemplate::new(self.theme()).render_deposit(tx)
    }

    /// Withdrawal or deposit voucher, according to `tx.kind`.
    pub fn render_voucher(&self, tx: &TransactionRecord) -> PrintableDocument {
        VoucherTemplate::new(self.theme()).render_for_kind(tx)
    }

    pub fn compose_bill_of_lading_receipt(
        &self,
        bl: &BillOfLadingRecord,
        options: ReceiptOptions,
        rendered_at: DateTime<Utc>,
    ) -> Result<PrintableDocument, ServerError> {
        ReceiptComposer::new(self.theme(), options).compose(bl, rendered_at)
    }

    pub fn build_history_sheet(&self, transactions: &[TransactionRecord]) -> Sheet {
        HistoryExportBuilder::new(self.theme()).build(transactions)
    }

    // Delivered to the sink.
    // ---

    pub async fn withdrawal_voucher(
        &self,
        tx: &TransactionRecord,
        format: DocumentFormat,
    ) -> Result<String, ServerError> {
        self.documents_usecase.withdrawal_voucher(tx, format).await
    }

    pub async fn deposit_voucher(
        &self,
        tx: &TransactionRecord,
        format: DocumentFormat,
    ) -> Result<String, ServerError> {
        self.documents_usecase.deposit_voucher(tx, format).await
    }

    pub async fn bill_of_lading_receipt(
        &self,
        bl: &BillOfLadingRecord,
        options: ReceiptOptions,
        format: DocumentFormat,
    ) -> Result<String, ServerError> {
        self.bill_of_lading_receipt_at(bl, options, format, Utc::now())
            .await
    }

    pub async fn bill_of_lading_receipt_at(
        &self,
        bl: &BillOfLadingRecord,
        options: ReceiptOptions,
        format: DocumentFormat,
        rendered_at: DateTime<Utc>,
    ) -> Result<String, ServerError> {
        self.documents_usecase
            .bill_of_lading_receipt(bl, options, format, rendered_at)
            .await
    }

    /// `today` is taken in the theme's display offset.
    pub async fn history_export(
        &self,
        transactions: &[TransactionRecord],
        label: &str,
        format: SheetFormat,
    ) -> Result<String, ServerError> {
        let today = Utc::now()
            .with_timezone(&self.theme().locale.offset)
            .date_naive();
        self.history_export_on(transactions, label, format, today)
            .await
    }

    pub async fn history_export_on(
        &self,
        transactions: &[TransactionRecord],
        label: &str,
        format: SheetFormat,
        today: NaiveDate,
    ) -> Result<String, ServerError> {
        self.documents_usecase
            .history_export(transactions, label, format, today)
            .await
    }

    // JSON records, as returned by the application API.
    // ---

    pub fn transaction_from_json(&self, json: &str) -> Result<TransactionRecord, ServerError> {
        self.records_datasource.transaction_from_string(json)
    }

    pub fn transactions_from_json(
        &self,
        json: &str,
    ) -> Result<Vec<TransactionRecord>, ServerError> {
        self.records_datasource.transactions_from_string(json)
    }

    pub fn bill_of_lading_from_json(&self, json: &str) -> Result<BillOfLadingRecord, ServerError> {
        self.records_datasource.bill_of_lading_from_string(json)
    }

    pub async fn withdrawal_voucher_from_json(
        &self,
        json: &str,
        format: DocumentFormat,
    ) -> Result<String, ServerError> {
        let tx = self.transaction_from_json(json)?;
        self.withdrawal_voucher(&tx, format).await
    }

    pub async fn deposit_voucher_from_json(
        &self,
        json: &str,
        format: DocumentFormat,
    ) -> Result<String, ServerError> {
        let tx = self.transaction_from_json(json)?;
        self.deposit_voucher(&tx, format).await
    }

    pub async fn bill_of_lading_receipt_from_json(
        &self,
        json: &str,
        options: ReceiptOptions,
        format: DocumentFormat,
    ) -> Result<String, ServerError> {
        let bl = self.bill_of_lading_from_json(json)?;
        self.bill_of_lading_receipt(&bl, options, format).await
    }

    pub async fn bill_of_lading_receipt_from_file<P>(
        &self,
        path: P,
        options: ReceiptOptions,
        format: DocumentFormat,
    ) -> Result<String, ServerError>
    where
        P: AsRef<std::path::Path> + Send,
    {
        let bl = self.records_datasource.bill_of_lading_from_file(path)?;
        self.bill_of_lading_receipt(&bl, options, format).await
    }

    pub async fn history_export_from_json(
        &self,
        json: &str,
        label: &str,
        format: SheetFormat,
    ) -> Result<String, ServerError> {
        let transactions = self.transactions_from_json(json)?;
        self.history_export(&transactions, label, format).await
    }

    pub async fn history_export_from_file<P>(
        &self,
        path: P,
        label: &str,
        format: SheetFormat,
    ) -> Result<String, ServerError>
    where
        P: AsRef<std::path::Path> + Send,
    {
        let transactions = self.records_datasource.transactions_from_file(path)?;
        self.history_export(&transactions, label, format).await
    }
}

use crate::entities::{ClientRef, TransactionKind, TransactionRecord};

use super::{amount_model::AmountModel, iso_datetime_model::ISODateTimeModel};

#[derive(Debug, serde_derive::Deserialize)]
pub(crate) enum TransactionKindModel {
    #[serde(rename = "DEPOSIT", alias = "DEPOT", alias = "deposit", alias = "depot")]
    Deposit,
    #[serde(
        rename = "WITHDRAWAL",
        alias = "RETRAIT",
        alias = "withdrawal",
        alias = "retrait"
    )]
    Withdrawal,
}

#[derive(Debug, serde_derive::Deserialize)]
pub(crate) struct ClientRefModel {
    #[serde(default)]
    nom: Option<String>,
    #[serde(default, alias = "telephone")]
    contact: Option<String>,
}

/// An unpopulated client reference carries only an id, which has nothing to
/// display.
#[derive(Debug, serde_derive::Deserialize)]
#[serde(untagged)]
pub(crate) enum ClientFieldModel {
    Id(String),
    Populated(ClientRefModel),
}

/// The API sends the linked bill of lading either populated or as its number.
#[derive(Debug, serde_derive::Deserialize)]
#[serde(untagged)]
pub(crate) enum BillOfLadingRefModel {
    Number(String),
    Populated {
        #[serde(rename = "numeroBL", alias = "numero", alias = "number")]
        number: String,
    },
}

#[derive(Debug, serde_derive::Deserialize)]
pub(crate) struct TransactionModel {
    #[serde(rename = "_id", alias = "id")]
    id: String,
    reference: String,
    date: ISODateTimeModel,
    #[serde(rename = "type")]
    kind: TransactionKindModel,
    #[serde(default)]
    description: Option<String>,
    #[serde(alias = "amount")]
    montant: AmountModel,
    #[serde(default, rename = "soldeApres", alias = "runningBalanceAfter")]
    balance_after: Option<AmountModel>,
    #[serde(default, rename = "idBL", alias = "relatedBillOfLadingRef")]
    bill_of_lading: Option<BillOfLadingRefModel>,
    #[serde(default, rename = "idClient", alias = "relatedClientRef", alias = "client")]
    client: Option<ClientFieldModel>,
}

impl Into<TransactionKind> for TransactionKindModel {
    fn into(self) -> TransactionKind {
        match self {
            TransactionKindModel::Deposit => TransactionKind::Deposit,
            TransactionKindModel::Withdrawal => TransactionKind::Withdrawal,
        }
    }
}

impl Into<ClientRef> for ClientRefModel {
    fn into(self) -> ClientRef {
        ClientRef {
            name: self.nom,
            contact: self.contact,
        }
    }
}

impl Into<ClientRef> for ClientFieldModel {
    fn into(self) -> ClientRef {
        match self {
            ClientFieldModel::Id(_) => ClientRef::default(),
            ClientFieldModel::Populated(model) => model.into(),
        }
    }
}

impl Into<String> for BillOfLadingRefModel {
    fn into(self) -> String {
        match self {
            BillOfLadingRefModel::Number(n) => n,
            BillOfLadingRefModel::Populated { number } => number,
        }
    }
}

impl Into<TransactionRecord> for TransactionModel {
    fn into(self) -> TransactionRecord {
        TransactionRecord {
            id: self.id,
            reference: self.reference,
            date: self.date.into(),
            kind: self.kind.into(),
            description: self.description,
            amount: self.montant.into(),
            balance_after: self.balance_after.map(Into::into),
            bill_of_lading_number: self.bill_of_lading.map(Into::into),
            client: self.client.map(Into::into),
        }
    }
}

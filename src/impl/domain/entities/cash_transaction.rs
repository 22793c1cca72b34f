use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransactionKind {
    Deposit,
    Withdrawal,
}

/// Display snapshot of the client linked to a record. Both fields are
/// optional; see `fallbacks` for what is shown when they are missing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientRef {
    pub name: Option<String>,
    pub contact: Option<String>,
}

/// A cash-register movement, as produced by the upstream ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionRecord {
    pub id: String,
    pub reference: String,
    pub date: DateTime<Utc>,
    pub kind: TransactionKind,
    pub description: Option<String>,
    pub amount: Decimal,
    pub balance_after: Option<Decimal>,
    pub bill_of_lading_number: Option<String>,
    pub client: Option<ClientRef>,
}

// --

impl ClientRef {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            contact: None,
        }
    }
}

impl TransactionRecord {
    pub fn new(
        id: impl Into<String>,
        reference: impl Into<String>,
        date: DateTime<Utc>,
        kind: TransactionKind,
        amount: Decimal,
    ) -> Self {
        Self {
            id: id.into(),
            reference: reference.into(),
            date,
            kind,
            description: None,
            amount,
            balance_after: None,
            bill_of_lading_number: None,
            client: None,
        }
    }
}

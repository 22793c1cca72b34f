use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use super::cash_transaction::ClientRef;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Charge {
    /// Identifier referenced by `Payment::charge_id`. A charge without an id
    /// can never be matched to a payment.
    pub id: Option<String>,
    pub designation: Option<String>,
    pub amount: Option<Decimal>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Payment {
    pub charge_id: String,
    pub paid_at: DateTime<Utc>,
}

/// A shipment record with the pass-through charges billed to the client, the
/// payments made against them, and the service margin.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BillOfLadingRecord {
    pub number: String,
    pub client: Option<ClientRef>,
    pub charges: Vec<Charge>,
    pub payments: Vec<Payment>,
    pub margin: Option<Decimal>,
    pub total: Option<Decimal>,
}

// --

impl Charge {
    pub fn new(id: impl Into<String>, designation: impl Into<String>, amount: Decimal) -> Self {
        Self {
            id: Some(id.into()),
            designation: Some(designation.into()),
            amount: Some(amount),
        }
    }
}

impl Payment {
    pub fn new(charge_id: impl Into<String>, paid_at: DateTime<Utc>) -> Self {
        Self {
            charge_id: charge_id.into(),
            paid_at,
        }
    }
}

impl BillOfLadingRecord {
    /// First payment recorded against the given charge, if any.
    pub fn payment_for(&self, charge: &Charge) -> Option<&Payment> {
        let id = charge.id.as_deref()?;
        self.payments.iter().find(|p| p.charge_id == id)
    }
}

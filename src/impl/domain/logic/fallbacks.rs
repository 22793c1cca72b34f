//! What is displayed when an optional field of a record is missing.
//!
//! Every default lives here; templates never substitute values inline. A
//! blank string counts as missing. None of these substitutions change the
//! source record.

use rust_decimal::Decimal;

use crate::entities::{BillOfLadingRecord, Charge, ClientRef, TransactionRecord};

pub(crate) const UNSPECIFIED_CLIENT: &str = "Client non spécifié";
pub(crate) const WITHDRAWAL_DESCRIPTION: &str = "Retrait de fonds";
pub(crate) const DEPOSIT_DESCRIPTION: &str = "Aucune description";
pub(crate) const UNSPECIFIED_CHARGE: &str = "Frais non désigné";
pub(crate) const UNPAID: &str = "---";
pub(crate) const NO_BILL_OF_LADING: &str = "N/A";
pub(crate) const NO_CONTACT: &str = "-";
pub(crate) const NO_VALUE: &str = "";

fn present(s: Option<&str>) -> Option<&str> {
    s.filter(|s| !s.trim().is_empty())
}

pub(crate) fn client_name(client: Option<&ClientRef>) -> &str {
    present(client.and_then(|c| c.name.as_deref())).unwrap_or(UNSPECIFIED_CLIENT)
}

pub(crate) fn client_contact(client: Option<&ClientRef>) -> &str {
    present(client.and_then(|c| c.contact.as_deref())).unwrap_or(NO_CONTACT)
}

pub(crate) fn withdrawal_description(tx: &TransactionRecord) -> &str {
    present(tx.description.as_deref()).unwrap_or(WITHDRAWAL_DESCRIPTION)
}

pub(crate) fn deposit_description(tx: &TransactionRecord) -> &str {
    present(tx.description.as_deref()).unwrap_or(DEPOSIT_DESCRIPTION)
}

/// Description shown in tabular exports, where an empty cell is preferred
/// over a placeholder sentence.
pub(crate) fn export_description(tx: &TransactionRecord) -> &str {
    present(tx.description.as_deref()).unwrap_or(NO_VALUE)
}

pub(crate) fn bill_of_lading_number(tx: &TransactionRecord) -> &str {
    present(tx.bill_of_lading_number.as_deref()).unwrap_or(NO_BILL_OF_LADING)
}

pub(crate) fn charge_designation(charge: &Charge) -> &str {
    present(charge.designation.as_deref()).unwrap_or(UNSPECIFIED_CHARGE)
}

// Numeric fields default to zero, for display only.

pub(crate) fn charge_amount(charge: &Charge) -> Decimal {
    charge.amount.unwrap_or(Decimal::ZERO)
}

pub(crate) fn margin(bl: &BillOfLadingRecord) -> Decimal {
    bl.margin.unwrap_or(Decimal::ZERO)
}

pub(crate) fn declared_total(bl: &BillOfLadingRecord) -> Decimal {
    bl.total.unwrap_or(Decimal::ZERO)
}

use rust_decimal::Decimal;

use crate::{
    entities::{Cell, DocumentTheme, Sheet, SheetColumn, TransactionKind, TransactionRecord},
    presentation::formatting::{format_amount, format_date, format_time},
};

use super::fallbacks;

pub(crate) const SHEET_NAME: &str = "Historique";

/// Header and width of each exported column, in order. Widths do not adapt
/// to content.
const COLUMNS: [(&str, f64); 7] = [
    ("Date", 12.0),
    ("Heure", 8.0),
    ("Description", 40.0),
    ("Type", 10.0),
    ("N° BL", 16.0),
    ("Montant", 16.0),
    ("Solde après", 16.0),
];

fn kind_label(kind: TransactionKind) -> &'static str {
    match kind {
        TransactionKind::Deposit => "Dépôt",
        TransactionKind::Withdrawal => "Retrait",
    }
}

/// Builds the "Historique" sheet: one row per transaction, in the order
/// given.
pub(crate) struct HistoryExportBuilder<'a> {
    theme: &'a DocumentTheme,
}

impl<'a> HistoryExportBuilder<'a> {
    pub(crate) fn new(theme: &'a DocumentTheme) -> Self {
        Self { theme }
    }

    pub(crate) fn build(&self, transactions: &[TransactionRecord]) -> Sheet {
        tracing::debug!(rows = transactions.len(), "building history sheet");
        Sheet {
            name: SHEET_NAME.to_string(),
            columns: COLUMNS
                .iter()
                .map(|(header, width)| SheetColumn {
                    header: header.to_string(),
                    width: *width,
                })
                .collect(),
            rows: transactions.iter().map(|tx| self.row(tx)).collect(),
        }
    }

    fn row(&self, tx: &TransactionRecord) -> Vec<Cell> {
        let locale = &self.theme.locale;
        vec![
            Cell::text(format_date(tx.date, locale)),
            Cell::text(format_time(tx.date, locale)),
            Cell::text(fallbacks::export_description(tx)),
            Cell::text(kind_label(tx.kind)),
            Cell::text(fallbacks::bill_of_lading_number(tx)),
            self.amount(tx.amount),
            tx.balance_after
                .map(|b| self.amount(b))
                .unwrap_or_else(|| Cell::text(fallbacks::NO_VALUE)),
        ]
    }

    fn amount(&self, value: Decimal) -> Cell {
        Cell::Amount {
            value,
            display: format_amount(value, self.theme.currency, &self.theme.locale),
        }
    }
}

use chrono::{DateTime, Utc};
use fractic_server_error::ServerError;
use rust_decimal::Decimal;

use crate::{
    entities::{
        BillOfLadingRecord, ColumnAlign, DocumentBuilder, DocumentTheme, Field, PrintableDocument,
        RowKind, Section, TableColumn, TableRow,
    },
    errors::BillOfLadingTotalMismatch,
    presentation::formatting::{format_amount, format_date},
};

use super::fallbacks;

pub(crate) const TITLE: &str = "REÇU DE PAIEMENT";
pub(crate) const MARGIN_DESIGNATION: &str = "Marge de service";
pub(crate) const LABEL_TOTAL: &str = "TOTAL";
pub(crate) const LABEL_BILL_OF_LADING: &str = "N° BL";
pub(crate) const LABEL_ISSUED_AT: &str = "Émis le";
pub(crate) const LABEL_CLIENT: &str = "Client";
pub(crate) const LABEL_CONTACT: &str = "Contact";

/// What to do when a bill of lading's declared total differs from the sum of
/// its charges and margin. The displayed total is `total` as given in every
/// mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TotalReconciliation {
    #[default]
    PassThrough,
    /// Log a warning and render anyway.
    Warn,
    /// Refuse to render.
    Strict,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReceiptOptions {
    pub reconciliation: TotalReconciliation,
}

/// Paginated payment receipt for a bill of lading: one row per charge, in
/// input order, then one margin row.
pub(crate) struct ReceiptComposer<'a> {
    theme: &'a DocumentTheme,
    options: ReceiptOptions,
}

impl<'a> ReceiptComposer<'a> {
    pub(crate) fn new(theme: &'a DocumentTheme, options: ReceiptOptions) -> Self {
        Self { theme, options }
    }

    /// `rendered_at` is the payment date printed on the margin row.
    pub(crate) fn compose(
        &self,
        bl: &BillOfLadingRecord,
        rendered_at: DateTime<Utc>,
    ) -> Result<PrintableDocument, ServerError> {
        tracing::debug!(
            number = %bl.number,
            charges = bl.charges.len(),
            payments = bl.payments.len(),
            "composing bill of lading receipt"
        );
        self.check_total(bl)?;

        let theme = self.theme;
        let locale = &theme.locale;
        let amount = |a: Decimal| format_amount(a, theme.currency, locale);

        let mut rows: Vec<TableRow> = bl
            .charges
            .iter()
            .map(|charge| TableRow {
                kind: RowKind::Item,
                cells: vec![
                    fallbacks::charge_designation(charge).to_string(),
                    amount(fallbacks::charge_amount(charge)),
                    bl.payment_for(charge)
                        .map(|p| format_date(p.paid_at, locale))
                        .unwrap_or_else(|| fallbacks::UNPAID.to_string()),
                ],
            })
            .collect();
        rows.push(TableRow {
            kind: RowKind::Synthetic,
            cells: vec![
                MARGIN_DESIGNATION.to_string(),
                amount(fallbacks::margin(bl)),
                format_date(rendered_at, locale),
            ],
        });

        let pages: Vec<&[TableRow]> = rows.chunks(theme.receipt_rows_per_page.max(1)).collect();
        let page_count = pages.len();
        let org = &theme.organization;

        let mut builder = DocumentBuilder::new(format!("{} {}", TITLE, bl.number), theme.receipt_page);
        for (i, page_rows) in pages.into_iter().enumerate() {
            if i == 0 {
                builder = builder
                    .section(Section::Header {
                        organization: org.name.clone(),
                        tagline: org.tagline.clone(),
                        title: TITLE.to_string(),
                        fields: vec![
                            Field::new(LABEL_BILL_OF_LADING, bl.number.as_str()),
                            Field::new(LABEL_ISSUED_AT, format_date(rendered_at, locale)),
                        ],
                    })
                    .section(Section::Block {
                        heading: LABEL_CLIENT.to_string(),
                        fields: vec![
                            Field::new(LABEL_CLIENT, fallbacks::client_name(bl.client.as_ref())),
                            Field::new(LABEL_CONTACT, fallbacks::client_contact(bl.client.as_ref())),
                        ],
                    });
            } else {
                builder = builder.page_break();
            }
            builder = builder.section(Section::Table {
                columns: Self::columns(),
                rows: page_rows.to_vec(),
            });
            if i + 1 == page_count {
                builder = builder
                    .section(Section::Highlight {
                        label: LABEL_TOTAL.to_string(),
                        value: amount(fallbacks::declared_total(bl)),
                    })
                    .section(Section::Signatures {
                        zones: vec!["Le caissier".to_string(), "Le client".to_string()],
                    });
            }
            builder = builder.section(Section::Footer {
                lines: vec![
                    format!("{} - {} - Tél : {}", org.name, org.address, org.phone),
                    format!("Page {}/{}", i + 1, page_count),
                ],
            });
        }
        Ok(builder.build())
    }

    fn columns() -> Vec<TableColumn> {
        vec![
            TableColumn::new("Désignation", 50, ColumnAlign::Left),
            TableColumn::new("Montant", 25, ColumnAlign::Right),
            TableColumn::new("Date de paiement", 25, ColumnAlign::Right),
        ]
    }

    fn check_total(&self, bl: &BillOfLadingRecord) -> Result<(), ServerError> {
        if self.options.reconciliation == TotalReconciliation::PassThrough {
            return Ok(());
        }
        let declared = fallbacks::declared_total(bl);
        let computed = bl
            .charges
            .iter()
            .map(fallbacks::charge_amount)
            .sum::<Decimal>()
            + fallbacks::margin(bl);
        if declared == computed {
            return Ok(());
        }
        match self.options.reconciliation {
            TotalReconciliation::Strict => Err(BillOfLadingTotalMismatch::new(
                &bl.number, &declared, &computed,
            )),
            _ => {
                tracing::warn!(
                    number = %bl.number,
                    %declared,
                    %computed,
                    "bill of lading total does not match its charges and margin"
                );
                Ok(())
            }
        }
    }
}

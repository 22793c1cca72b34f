use crate::{
    entities::{
        DocumentBuilder, DocumentTheme, Field, PrintableDocument, Section, TransactionKind,
        TransactionRecord,
    },
    presentation::formatting::{format_amount, format_date_time},
};

use super::fallbacks;

/// Wording that differs between the two voucher variants.
struct VoucherVariant {
    title: &'static str,
    counterpart_heading: &'static str,
    kind_label: &'static str,
    signatures: [&'static str; 2],
    description: fn(&TransactionRecord) -> &str,
    /// Print the record id in the footer.
    trace_id: bool,
}

const WITHDRAWAL: VoucherVariant = VoucherVariant {
    title: "BORDEREAU DE RETRAIT",
    counterpart_heading: "Bénéficiaire",
    kind_label: "Retrait",
    signatures: ["Signature du caissier", "Signature du bénéficiaire"],
    description: fallbacks::withdrawal_description,
    trace_id: false,
};

const DEPOSIT: VoucherVariant = VoucherVariant {
    title: "BORDEREAU DE DÉPÔT",
    counterpart_heading: "Déposant",
    kind_label: "Dépôt",
    signatures: ["Signature du déposant", "Signature du caissier"],
    description: fallbacks::deposit_description,
    trace_id: true,
};

pub(crate) const LABEL_REFERENCE: &str = "Référence";
pub(crate) const LABEL_DATE: &str = "Date";
pub(crate) const LABEL_NAME: &str = "Nom";
pub(crate) const LABEL_CONTACT: &str = "Contact";
pub(crate) const LABEL_DESCRIPTION: &str = "Motif";
pub(crate) const LABEL_OPERATION: &str = "Opération";
pub(crate) const LABEL_BILL_OF_LADING: &str = "N° BL";
pub(crate) const LABEL_AMOUNT: &str = "MONTANT";

/// Single-page cash voucher ("bordereau") for one transaction.
pub(crate) struct VoucherTemplate<'a> {
    theme: &'a DocumentTheme,
}

impl<'a> VoucherTemplate<'a> {
    pub(crate) fn new(theme: &'a DocumentTheme) -> Self {
        Self { theme }
    }

    pub(crate) fn render_withdrawal(&self, tx: &TransactionRecord) -> PrintableDocument {
        self.render(tx, &WITHDRAWAL)
    }

    pub(crate) fn render_deposit(&self, tx: &TransactionRecord) -> PrintableDocument {
        self.render(tx, &DEPOSIT)
    }

    /// Renders the variant matching `tx.kind`.
    pub(crate) fn render_for_kind(&self, tx: &TransactionRecord) -> PrintableDocument {
        match tx.kind {
            TransactionKind::Withdrawal => self.render_withdrawal(tx),
            TransactionKind::Deposit => self.render_deposit(tx),
        }
    }

    fn render(&self, tx: &TransactionRecord, variant: &VoucherVariant) -> PrintableDocument {
        tracing::debug!(
            reference = %tx.reference,
            variant = variant.title,
            "rendering voucher"
        );
        let theme = self.theme;
        let org = &theme.organization;

        let mut details = vec![
            Field::new(LABEL_OPERATION, variant.kind_label),
            Field::new(LABEL_DESCRIPTION, (variant.description)(tx)),
        ];
        if let Some(bl) = &tx.bill_of_lading_number {
            details.push(Field::new(LABEL_BILL_OF_LADING, bl.as_str()));
        }

        let mut footer = vec![
            org.name.clone(),
            format!("{} - Tél : {}", org.address, org.phone),
        ];
        if variant.trace_id {
            footer.push(format!("ID : {}", tx.id));
        }

        DocumentBuilder::new(format!("{} {}", variant.title, tx.reference), theme.voucher_page)
            .section(Section::Header {
                organization: org.name.clone(),
                tagline: org.tagline.clone(),
                title: variant.title.to_string(),
                fields: vec![
                    Field::new(LABEL_REFERENCE, tx.reference.as_str()),
                    Field::new(LABEL_DATE, format_date_time(tx.date, &theme.locale)),
                ],
            })
            .section(Section::Block {
                heading: variant.counterpart_heading.to_string(),
                fields: vec![
                    Field::new(LABEL_NAME, fallbacks::client_name(tx.client.as_ref())),
                    Field::new(LABEL_CONTACT, fallbacks::client_contact(tx.client.as_ref())),
                ],
            })
            .section(Section::Block {
                heading: "Détails de l'opération".to_string(),
                fields: details,
            })
            .section(Section::Highlight {
                label: LABEL_AMOUNT.to_string(),
                value: format_amount(tx.amount, theme.currency, &theme.locale),
            })
            .section(Section::Signatures {
                zones: variant.signatures.iter().map(|s| s.to_string()).collect(),
            })
            .section(Section::Footer { lines: footer })
            .build()
    }
}

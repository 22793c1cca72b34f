use crate::entities::{BillOfLadingRecord, Charge, Payment};

use super::{
    amount_model::AmountModel, iso_datetime_model::ISODateTimeModel,
    transaction_model::ClientFieldModel,
};

#[derive(Debug, serde_derive::Deserialize)]
pub(crate) struct ChargeModel {
    #[serde(default, rename = "_id", alias = "id")]
    id: Option<String>,
    #[serde(default)]
    designation: Option<String>,
    #[serde(default, alias = "amount")]
    montant: Option<AmountModel>,
}

#[derive(Debug, serde_derive::Deserialize)]
pub(crate) struct PaymentModel {
    #[serde(rename = "chargeId")]
    charge_id: String,
    #[serde(rename = "paidAt", alias = "datePaiement")]
    paid_at: ISODateTimeModel,
}

/// Absent or null `charges`/`paiements` decode as empty lists.
#[derive(Debug, serde_derive::Deserialize)]
pub(crate) struct BillOfLadingModel {
    #[serde(rename = "numeroBL", alias = "numero", alias = "number")]
    number: String,
    #[serde(default, rename = "idClient", alias = "client")]
    client: Option<ClientFieldModel>,
    #[serde(default)]
    charges: Option<Vec<ChargeModel>>,
    #[serde(default, rename = "paiements", alias = "payments")]
    payments: Option<Vec<PaymentModel>>,
    #[serde(default, rename = "marge", alias = "margin")]
    margin: Option<AmountModel>,
    #[serde(default)]
    total: Option<AmountModel>,
}

impl Into<Charge> for ChargeModel {
    fn into(self) -> Charge {
        Charge {
            id: self.id,
            designation: self.designation,
            amount: self.montant.map(Into::into),
        }
    }
}

impl Into<Payment> for PaymentModel {
    fn into(self) -> Payment {
        Payment {
            charge_id: self.charge_id,
            paid_at: self.paid_at.into(),
        }
    }
}

impl Into<BillOfLadingRecord> for BillOfLadingModel {
    fn into(self) -> BillOfLadingRecord {
        BillOfLadingRecord {
            number: self.number,
            client: self.client.map(Into::into),
            charges: self
                .charges
                .unwrap_or_default()
                .into_iter()
                .map(Into::into)
                .collect(),
            payments: self
                .payments
                .unwrap_or_default()
                .into_iter()
                .map(Into::into)
                .collect(),
            margin: self.margin.map(Into::into),
            total: self.total.map(Into::into),
        }
    }
}

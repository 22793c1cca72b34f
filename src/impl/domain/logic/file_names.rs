use std::{collections::HashMap, sync::OnceLock};

use chrono::NaiveDate;
use fractic_server_error::ServerError;
use regex::Regex;

use crate::{
    entities::{BillOfLadingRecord, DocumentTheme, TransactionKind, TransactionRecord},
    errors::UnreplacedPlaceholdersRemain,
};

fn placeholder_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\{\{(\w+)\}\}").expect("hardcoded regex should be valid"))
}

/// Replace every `{{Key}}` in `template`. Unknown keys are an error, so a
/// typo in a configured template never reaches a file name.
pub(crate) fn replace_all_placeholders(
    template: &str,
    placeholders: &HashMap<&str, String>,
) -> Result<String, ServerError> {
    let mut unknown_keys = Vec::new();
    let result = placeholder_pattern().replace_all(template, |caps: &regex::Captures| {
        let key = &caps[1];
        if let Some(value) = placeholders.get(key) {
            value.clone()
        } else {
            unknown_keys.push(key.to_string());
            caps[0].to_string()
        }
    });
    let replaced = result.into_owned();

    if !unknown_keys.is_empty() {
        return Err(UnreplacedPlaceholdersRemain::new(&unknown_keys));
    }
    Ok(replaced)
}

pub(crate) const VOUCHER_PLACEHOLDERS: &[&str] = &["reference", "id"];
pub(crate) const RECEIPT_PLACEHOLDERS: &[&str] = &["number"];
pub(crate) const HISTORY_PLACEHOLDERS: &[&str] = &["label", "date"];

/// Fails when `template` uses a placeholder outside `keys`.
pub(crate) fn check_template(template: &str, keys: &[&str]) -> Result<(), ServerError> {
    let placeholders: HashMap<&str, String> = keys.iter().map(|k| (*k, String::new())).collect();
    replace_all_placeholders(template, &placeholders).map(|_| ())
}

/// Path separators and control characters in record values would change
/// where a file lands.
fn sanitize(value: &str) -> String {
    value
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' => '-',
            c if c.is_control() => '-',
            c => c,
        })
        .collect()
}

fn with_extension(stem: String, extension: &str) -> String {
    format!("{}.{}", stem, extension)
}

/// `kind` picks the template; it is the voucher variant being saved, which
/// need not match `tx.kind`.
pub(crate) fn voucher_file_name(
    theme: &DocumentTheme,
    kind: TransactionKind,
    tx: &TransactionRecord,
    extension: &str,
) -> Result<String, ServerError> {
    let template = match kind {
        TransactionKind::Withdrawal => &theme.file_names.withdrawal_voucher,
        TransactionKind::Deposit => &theme.file_names.deposit_voucher,
    };
    let placeholders = HashMap::from([
        ("reference", sanitize(&tx.reference)),
        ("id", sanitize(&tx.id)),
    ]);
    replace_all_placeholders(template, &placeholders).map(|s| with_extension(s, extension))
}

pub(crate) fn receipt_file_name(
    theme: &DocumentTheme,
    bl: &BillOfLadingRecord,
    extension: &str,
) -> Result<String, ServerError> {
    let placeholders = HashMap::from([("number", sanitize(&bl.number))]);
    replace_all_placeholders(&theme.file_names.receipt, &placeholders)
        .map(|s| with_extension(s, extension))
}

/// `Historique_<label>_<YYYY-MM-DD>.<ext>` with the default template. Two
/// exports with the same label on the same day share a name.
pub(crate) fn history_file_name(
    theme: &DocumentTheme,
    label: &str,
    today: NaiveDate,
    extension: &str,
) -> Result<String, ServerError> {
    let placeholders = HashMap::from([
        ("label", sanitize(label)),
        ("date", today.format("%Y-%m-%d").to_string()),
    ]);
    replace_all_placeholders(&theme.file_names.history, &placeholders)
        .map(|s| with_extension(s, extension))
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone as _, Utc};
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn history_name_is_deterministic_per_day() {
        let theme = DocumentTheme::default();
        let day = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let a = history_file_name(&theme, "Caisse", day, "xlsx").unwrap();
        let b = history_file_name(&theme, "Caisse", day, "xlsx").unwrap();
        assert_eq!(a, "Historique_Caisse_2024-01-01.xlsx");
        assert_eq!(a, b);
    }

    #[test]
    fn separators_in_values_are_neutralized() {
        let theme = DocumentTheme::default();
        let day = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let name = history_file_name(&theme, "../x/y", day, "csv").unwrap();
        assert_eq!(name, "Historique_..-x-y_2024-01-01.csv");
    }

    #[test]
    fn voucher_template_depends_on_kind() {
        let theme = DocumentTheme::default();
        let date = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let tx = TransactionRecord::new("1", "R/1", date, TransactionKind::Withdrawal, dec!(1));
        assert_eq!(
            voucher_file_name(&theme, TransactionKind::Withdrawal, &tx, "pdf").unwrap(),
            "Bordereau_Retrait_R-1.pdf"
        );
        assert_eq!(
            voucher_file_name(&theme, TransactionKind::Deposit, &tx, "pdf").unwrap(),
            "Bordereau_Depot_R-1.pdf"
        );
    }

    #[test]
    fn unknown_placeholder_is_an_error() {
        let placeholders = HashMap::from([("label", "x".to_string())]);
        assert!(replace_all_placeholders("{{label}}_{{lable}}", &placeholders).is_err());
    }
}

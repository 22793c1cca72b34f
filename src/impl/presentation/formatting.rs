use chrono::{DateTime, Utc};
use iso_currency::Currency;
use num_format::ToFormattedString as _;
use rust_decimal::{prelude::ToPrimitive as _, Decimal};

use crate::entities::DisplayLocale;

/// Format an amount with grouped thousands and the currency code as suffix
/// (ex. "15 000 MRU", "1 250,5 MRU").
///
/// The value is never rounded: every significant fractional digit is kept,
/// trailing zeros are dropped.
pub fn format_amount(amount: Decimal, currency: Currency, locale: &DisplayLocale) -> String {
    format!("{} {}", format_number(amount, locale), currency.code())
}

/// Same as `format_amount`, without the currency suffix.
pub fn format_number(amount: Decimal, locale: &DisplayLocale) -> String {
    let normalized = amount.normalize();
    let sign = if normalized.is_sign_negative() && !normalized.is_zero() {
        "-"
    } else {
        ""
    };
    // A Decimal mantissa is 96 bits, so the integer part always fits.
    let integer_part = normalized
        .trunc()
        .abs()
        .to_i128()
        .unwrap_or_default()
        .to_formatted_string(&locale.grouping);
    let fractional_part = normalized.fract().abs().to_string();
    match fractional_part.split_once('.') {
        Some((_, digits)) => format!(
            "{}{}{}{}",
            sign, integer_part, locale.decimal_separator, digits
        ),
        None => format!("{}{}", sign, integer_part),
    }
}

pub fn format_date(ts: DateTime<Utc>, locale: &DisplayLocale) -> String {
    ts.with_timezone(&locale.offset)
        .format(&locale.date_format)
        .to_string()
}

pub fn format_time(ts: DateTime<Utc>, locale: &DisplayLocale) -> String {
    ts.with_timezone(&locale.offset)
        .format(&locale.time_format)
        .to_string()
}

pub fn format_date_time(ts: DateTime<Utc>, locale: &DisplayLocale) -> String {
    format!("{} {}", format_date(ts, locale), format_time(ts, locale))
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone as _;
    use rust_decimal_macros::dec;

    use crate::entities::DocumentTheme;

    use super::*;

    fn locale() -> DisplayLocale {
        DocumentTheme::default().locale
    }

    #[test]
    fn groups_thousands_with_spaces() {
        let l = locale();
        assert_eq!(format_amount(dec!(15000), Currency::MRU, &l), "15 000 MRU");
        assert_eq!(format_amount(dec!(1234567), Currency::MRU, &l), "1 234 567 MRU");
        assert_eq!(format_amount(dec!(999), Currency::MRU, &l), "999 MRU");
        assert_eq!(format_amount(dec!(0), Currency::MRU, &l), "0 MRU");
    }

    #[test]
    fn keeps_fractional_digits_without_rounding() {
        let l = locale();
        assert_eq!(format_number(dec!(1250.5), &l), "1 250,5");
        assert_eq!(format_number(dec!(0.125), &l), "0,125");
        assert_eq!(format_number(dec!(15000.00), &l), "15 000");
    }

    #[test]
    fn negative_amounts_keep_their_sign() {
        let l = locale();
        assert_eq!(format_number(dec!(-2500.75), &l), "-2 500,75");
        assert_eq!(format_number(dec!(-0.5), &l), "-0,5");
    }

    #[test]
    fn formats_dates_in_fixed_locale() {
        let l = locale();
        let ts = Utc.with_ymd_and_hms(2024, 1, 5, 9, 7, 0).unwrap();
        assert_eq!(format_date(ts, &l), "05/01/2024");
        assert_eq!(format_time(ts, &l), "09:07");
        assert_eq!(format_date_time(ts, &l), "05/01/2024 09:07");
    }
}

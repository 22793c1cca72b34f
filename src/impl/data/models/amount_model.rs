use std::str::FromStr;

use fractic_server_error::ServerError;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::errors::InvalidAmount;

/// Amount as sent by the API: a JSON number, or a string such as
/// "1 250,5", "15,000.50", "1.250,50" or the accounting negative "(300)".
#[derive(Debug)]
pub(crate) struct AmountModel(pub Decimal);
impl FromStr for AmountModel {
    type Err = ServerError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let (is_negative, inner) = match trimmed
            .strip_prefix('(')
            .and_then(|t| t.strip_suffix(')'))
        {
            Some(inner) => (true, inner),
            None => (false, trimmed),
        };
        let amount = parse_amount(inner).ok_or_else(|| InvalidAmount::new(s))?;
        Ok(AmountModel(if is_negative { -amount } else { amount }))
    }
}

/// Either `,` or `.` may be the decimal mark: when both appear, the last one
/// is. Whitespace only ever groups thousands. A single `,` followed by exactly
/// three digits ("1,250") reads both ways and is rejected, unless whitespace
/// grouping already marks it as decimal ("1 250,500").
fn parse_amount(s: &str) -> Option<Decimal> {
    let space_grouped = s.trim().chars().any(char::is_whitespace);
    let compact: String = s.chars().filter(|c| !c.is_whitespace()).collect();
    let (sign, unsigned) = match compact.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", compact.strip_prefix('+').unwrap_or(&compact)),
    };
    if unsigned.contains(['e', 'E']) {
        return Decimal::from_scientific(&compact).ok();
    }

    let commas = unsigned.matches(',').count();
    let dots = unsigned.matches('.').count();
    let (group_mark, decimal_mark) = match (commas, dots) {
        (0, 0) => (None, None),
        (0, 1) => (None, Some('.')),
        (0, _) => (Some('.'), None),
        (1, 0) => {
            let fraction_len = unsigned.rsplit(',').next().map_or(0, str::len);
            if fraction_len == 3 && !space_grouped {
                return None;
            }
            (None, Some(','))
        }
        (_, 0) => (Some(','), None),
        _ if unsigned.rfind(',') > unsigned.rfind('.') => (Some('.'), Some(',')),
        _ => (Some(','), Some('.')),
    };

    let (integer, fraction) = match decimal_mark {
        Some(mark) => unsigned.split_once(mark)?,
        None => (unsigned, ""),
    };
    let integer = match group_mark {
        Some(mark) => grouped_digits(integer, mark)?,
        None => integer.to_string(),
    };
    let all_digits = |p: &str| p.chars().all(|c| c.is_ascii_digit());
    if !all_digits(&integer) || !all_digits(fraction) || (integer.is_empty() && fraction.is_empty())
    {
        return None;
    }
    let integer = if integer.is_empty() { "0" } else { integer.as_str() };
    if fraction.is_empty() {
        Decimal::from_str(&format!("{}{}", sign, integer)).ok()
    } else {
        Decimal::from_str(&format!("{}{}.{}", sign, integer, fraction)).ok()
    }
}

/// Joins "1,250,000"-style groups. Every group after the first has exactly
/// three digits.
fn grouped_digits(integer: &str, mark: char) -> Option<String> {
    let mut groups = integer.split(mark);
    let first = groups.next()?;
    if first.is_empty() || first.len() > 3 {
        return None;
    }
    let mut digits = first.to_string();
    for group in groups {
        if group.len() != 3 {
            return None;
        }
        digits.push_str(group);
    }
    Some(digits)
}

#[derive(serde_derive::Deserialize)]
#[serde(untagged)]
enum RawAmount {
    Number(serde_json::Number),
    Text(String),
}

impl<'de> Deserialize<'de> for AmountModel {
    fn deserialize<D>(deserializer: D) -> Result<AmountModel, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = match RawAmount::deserialize(deserializer)? {
            RawAmount::Number(n) => n.to_string(),
            RawAmount::Text(s) => s,
        };
        AmountModel::from_str(&s).map_err(serde::de::Error::custom)
    }
}

impl Into<Decimal> for AmountModel {
    fn into(self) -> Decimal {
        self.0
    }
}

use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use fractic_server_error::ServerError;
use serde::Deserialize;

use crate::errors::InvalidIsoDateTime;

/// RFC 3339 timestamp, or a bare `YYYY-MM-DD` date taken as midnight UTC.
#[derive(Debug)]
pub(crate) struct ISODateTimeModel(DateTime<Utc>);
impl FromStr for ISODateTimeModel {
    type Err = ServerError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Ok(ISODateTimeModel(dt.with_timezone(&Utc)));
        }
        let d = NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map_err(|e| InvalidIsoDateTime::with_debug(s, &e))?;
        Ok(ISODateTimeModel(d.and_time(chrono::NaiveTime::MIN).and_utc()))
    }
}
impl<'de> Deserialize<'de> for ISODateTimeModel {
    fn deserialize<D>(deserializer: D) -> Result<ISODateTimeModel, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        ISODateTimeModel::from_str(&s).map_err(serde::de::Error::custom)
    }
}
impl Into<DateTime<Utc>> for ISODateTimeModel {
    fn into(self) -> DateTime<Utc> {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone as _;

    use super::*;

    #[test]
    fn parses_rfc3339_with_offset_into_utc() {
        let m = ISODateTimeModel::from_str("2024-01-01T11:00:00+01:00").unwrap();
        assert_eq!(m.0, Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap());
    }

    #[test]
    fn parses_bare_date_as_midnight_utc() {
        let m = ISODateTimeModel::from_str("2024-03-05").unwrap();
        assert_eq!(m.0, Utc.with_ymd_and_hms(2024, 3, 5, 0, 0, 0).unwrap());
    }

    #[test]
    fn rejects_garbage() {
        assert!(ISODateTimeModel::from_str("05/03/2024").is_err());
    }
}

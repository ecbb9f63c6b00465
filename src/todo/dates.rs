//! Calendar-day handling for todo dates.
//!
//! Clients send either plain `YYYY-MM-DD` dates or full RFC 3339
//! timestamps. Everything is reduced to the calendar day in the offset it
//! was written in, so two timestamps on the same day always compare equal.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::internal_error::{InternalError, InternalResult};

pub const DATE_FORMAT: &str = "%Y-%m-%d";

pub fn parse_calendar_day(raw: &str) -> InternalResult<NaiveDate> {
    let raw = raw.trim();

    if let Ok(date) = NaiveDate::parse_from_str(raw, DATE_FORMAT) {
        return Ok(date);
    }

    if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
        return Ok(timestamp.date_naive());
    }

    if let Ok(timestamp) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(timestamp.date());
    }

    Err(InternalError::Validation(format!("Invalid date '{}'", raw)))
}

pub fn format_calendar_day(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

pub mod calendar_day {
    use chrono::NaiveDate;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::format_calendar_day(*date))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_calendar_day(&raw).map_err(de::Error::custom)
    }
}

pub mod optional_calendar_day {
    use chrono::NaiveDate;
    use serde::{de, Deserialize, Deserializer};

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<NaiveDate>, D::Error> {
        match Option::<String>::deserialize(deserializer)? {
            Some(raw) => super::parse_calendar_day(&raw)
                .map(Some)
                .map_err(de::Error::custom),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn plain_dates_parse() {
        assert_eq!(parse_calendar_day("2024-01-05").unwrap(), day(2024, 1, 5));
        assert_eq!(parse_calendar_day(" 2024-01-05 ").unwrap(), day(2024, 1, 5));
    }

    #[test]
    fn time_of_day_is_dropped() {
        assert_eq!(
            parse_calendar_day("2024-01-05T00:00:00.000Z").unwrap(),
            day(2024, 1, 5)
        );
        assert_eq!(
            parse_calendar_day("2024-01-05T23:59:59Z").unwrap(),
            day(2024, 1, 5)
        );
        assert_eq!(
            parse_calendar_day("2024-01-05T08:30:00").unwrap(),
            day(2024, 1, 5)
        );
    }

    #[test]
    fn offsets_keep_the_written_day() {
        assert_eq!(
            parse_calendar_day("2024-01-05T23:30:00-05:00").unwrap(),
            day(2024, 1, 5)
        );
        assert_eq!(
            parse_calendar_day("2024-01-05T00:15:00+05:30").unwrap(),
            day(2024, 1, 5)
        );
    }

    #[test]
    fn garbage_is_a_validation_error() {
        match parse_calendar_day("next tuesday") {
            Err(InternalError::Validation(message)) => assert!(message.contains("next tuesday")),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn formats_as_iso_day() {
        assert_eq!(format_calendar_day(day(2024, 3, 9)), "2024-03-09");
    }
}

//! Date/time parsing for backend values.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// Parse an RFC 3339 timestamp or a `YYYY-MM-DD HH:MM:SS` one (assumed UTC).
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, fmt) {
            return Some(naive.and_utc());
        }
    }
    None
}

/// Parse the date part of a `YYYY-MM-DD[...]` value.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let date_part = value.trim().get(..10)?;
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_parse_timestamp_formats() {
        let a = parse_timestamp("2024-03-15T14:02:26Z").unwrap();
        let b = parse_timestamp("2024-03-15 14:02:26").unwrap();
        assert_eq!(a, b);
        let c = parse_timestamp("2024-03-15T09:02:26-05:00").unwrap();
        assert_eq!(a, c);
        assert_eq!(a.hour(), 14);
        assert!(parse_timestamp("ayer").is_none());
    }

    #[test]
    fn test_parse_date() {
        let d = parse_date("2024-03-15T14:02:26.123Z").unwrap();
        assert_eq!((d.year(), d.month(), d.day()), (2024, 3, 15));
        assert!(parse_date("15/03/2024").is_none());
        assert!(parse_date("2024").is_none());
    }
}

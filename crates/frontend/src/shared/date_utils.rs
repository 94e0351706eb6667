/// Utilities for date and time formatting
///
/// The backend sends ISO dates; the UI shows them day-first (es-CO).
use chrono::{DateTime, Local, NaiveDate, Utc};
use contracts::shared::dates::{parse_date, parse_timestamp};

/// Format ISO datetime string to DD/MM/YYYY HH:MM format
/// Example: "2024-03-15T14:02:26.123Z" -> "15/03/2024 14:02"
pub fn format_datetime(datetime_str: &str) -> String {
    match parse_timestamp(datetime_str) {
        Some(ts) => ts.format("%d/%m/%Y %H:%M").to_string(),
        None => datetime_str.to_string(),
    }
}

/// Format ISO date string to DD/MM/YYYY format
/// Example: "2024-03-15" or "2024-03-15T14:02:26Z" -> "15/03/2024"
pub fn format_date(date_str: &str) -> String {
    match parse_date(date_str) {
        Some(date) => date.format("%d/%m/%Y").to_string(),
        None => date_str.to_string(),
    }
}

/// Optional date for table cells; empty values render as a dash.
pub fn format_opt_date(date_str: Option<&str>) -> String {
    match date_str {
        Some(s) if !s.trim().is_empty() => format_date(s),
        _ => "—".to_string(),
    }
}

/// Short "hace N min" label for the last position update.
pub fn format_elapsed(since: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let secs = (now - since).num_seconds();
    match secs {
        s if s < 60 => "hace un momento".to_string(),
        s if s < 3_600 => format!("hace {} min", s / 60),
        s if s < 86_400 => format!("hace {} h", s / 3_600),
        s => format!("hace {} d", s / 86_400),
    }
}

/// Today's date in the browser's local time zone.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// `YYYY-MM-DD`, the format of `<input type="date">` and of the backend.
pub fn to_iso(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Value for `<input type="date">`; unparseable dates become empty.
pub fn date_input_value(value: Option<&str>) -> String {
    value.and_then(parse_date).map(to_iso).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_datetime() {
        assert_eq!(
            format_datetime("2024-03-15T14:02:26.123Z"),
            "15/03/2024 14:02"
        );
        assert_eq!(format_datetime("2024-12-31 23:59:59"), "31/12/2024 23:59");
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date("2024-03-15"), "15/03/2024");
        assert_eq!(format_date("2024-03-15T14:02:26.123Z"), "15/03/2024");
        assert_eq!(format_opt_date(None), "—");
        assert_eq!(format_opt_date(Some(" ")), "—");
    }

    #[test]
    fn test_invalid_format() {
        assert_eq!(format_datetime("invalid"), "invalid");
        assert_eq!(format_date("invalid"), "invalid");
    }

    #[test]
    fn test_format_elapsed() {
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        assert_eq!(format_elapsed(now, now), "hace un momento");
        assert_eq!(
            format_elapsed(now - chrono::Duration::minutes(7), now),
            "hace 7 min"
        );
        assert_eq!(
            format_elapsed(now - chrono::Duration::hours(3), now),
            "hace 3 h"
        );
    }

    #[test]
    fn test_to_iso() {
        let d = NaiveDate::from_ymd_opt(2024, 1, 9).unwrap();
        assert_eq!(to_iso(d), "2024-01-09");
    }

    #[test]
    fn test_date_input_value_strips_time() {
        assert_eq!(date_input_value(Some("2024-03-15T00:00:00.000Z")), "2024-03-15");
        assert_eq!(date_input_value(Some("15/03/2024")), "");
        assert_eq!(date_input_value(None), "");
    }
}

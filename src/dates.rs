//! Flexible calendar-date parsing.
//!
//! Date inputs arrive as free text from callers that historically accepted
//! several shapes. A handful of common formats are tried in order; the first
//! match wins.

use crate::error::{StoreError, StoreResult};
use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};

/// Date-only formats tried after ISO.
const DATE_FORMATS: &[&str] = &["%Y/%m/%d", "%m/%d/%Y", "%d.%m.%Y", "%B %d, %Y", "%b %d, %Y"];

/// Datetime formats whose date part is taken.
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Parse a textual date, trying ISO-8601 first, then RFC 3339 datetimes,
/// then a few common regional formats. Returns None when nothing matches.
pub fn parse_flexible(input: &str) -> Option<NaiveDate> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        return Some(date);
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(dt.date_naive());
    }

    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(input, fmt) {
            return Some(dt.date());
        }
    }

    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(input, fmt) {
            return Some(date);
        }
    }

    None
}

/// Parse an optional date field: absent input yields no date, present but
/// unparsable input is an error.
pub fn parse_date_field(field: &str, value: Option<&str>) -> StoreResult<Option<NaiveDate>> {
    match value {
        None => Ok(None),
        Some(raw) => parse_flexible(raw)
            .map(Some)
            .ok_or_else(|| StoreError::invalid_date(field, raw)),
    }
}

/// The current calendar date in local time.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_iso_date() {
        assert_eq!(
            parse_flexible("2026-03-14"),
            NaiveDate::from_ymd_opt(2026, 3, 14)
        );
    }

    #[test]
    fn parses_rfc3339_datetime() {
        assert_eq!(
            parse_flexible("2026-03-14T09:30:00+02:00"),
            NaiveDate::from_ymd_opt(2026, 3, 14)
        );
    }

    #[test]
    fn parses_naive_datetime() {
        assert_eq!(
            parse_flexible("2026-03-14 09:30:00"),
            NaiveDate::from_ymd_opt(2026, 3, 14)
        );
    }

    #[test]
    fn parses_us_and_dotted_forms() {
        assert_eq!(
            parse_flexible("03/14/2026"),
            NaiveDate::from_ymd_opt(2026, 3, 14)
        );
        assert_eq!(
            parse_flexible("14.03.2026"),
            NaiveDate::from_ymd_opt(2026, 3, 14)
        );
        assert_eq!(
            parse_flexible("March 14, 2026"),
            NaiveDate::from_ymd_opt(2026, 3, 14)
        );
    }

    #[test]
    fn rejects_garbage_and_blank() {
        assert_eq!(parse_flexible("not a date"), None);
        assert_eq!(parse_flexible(""), None);
        assert_eq!(parse_flexible("   "), None);
    }

    #[test]
    fn field_helper_distinguishes_absent_from_unparsable() {
        assert_eq!(parse_date_field("due_date", None).unwrap(), None);
        assert!(parse_date_field("due_date", Some("2026-01-02")).unwrap().is_some());

        let err = parse_date_field("due_date", Some("soonish")).unwrap_err();
        assert_eq!(err.code, crate::error::ErrorCode::InvalidDate);
        assert_eq!(err.field.as_deref(), Some("due_date"));
    }
}

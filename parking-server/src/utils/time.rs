//! Date helpers
//!
//! Request dates travel as `YYYY-MM-DD` strings and are stored as given.

use chrono::NaiveDate;

use super::{AppError, AppResult};

/// Parse a date string (YYYY-MM-DD)
pub fn parse_date(date: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
        .map_err(|_| AppError::validation(format!("Invalid date format: {}", date)))
}

/// Parse a required date field, naming the field when it is missing
pub fn require_date(value: Option<&str>, field: &str) -> AppResult<NaiveDate> {
    match value {
        Some(v) if !v.trim().is_empty() => parse_date(v).map_err(|e| e.with_detail("field", field)),
        _ => Err(AppError::validation(format!("{field} is required")).with_detail("field", field)),
    }
}

/// Parse an optional date field; blank counts as absent
pub fn optional_date(value: Option<&str>, field: &str) -> AppResult<Option<NaiveDate>> {
    match value {
        Some(v) if !v.trim().is_empty() => parse_date(v)
            .map(Some)
            .map_err(|e| e.with_detail("field", field)),
        _ => Ok(None),
    }
}

/// `start <= end`
pub fn validate_date_order(start: NaiveDate, end: NaiveDate) -> AppResult<()> {
    if start > end {
        return Err(AppError::validation(format!(
            "start_date {} is after end_date {}",
            start, end
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date("2026-11-02").unwrap(),
            NaiveDate::from_ymd_opt(2026, 11, 2).unwrap()
        );
        assert!(parse_date("02/11/2026").is_err());
        assert!(parse_date("2026-02-30").is_err());
    }

    #[test]
    fn test_require_and_optional() {
        assert!(require_date(None, "parking_date").is_err());
        assert!(require_date(Some("  "), "parking_date").is_err());
        assert!(optional_date(None, "start_date").unwrap().is_none());
        assert!(optional_date(Some(""), "start_date").unwrap().is_none());
        assert!(optional_date(Some("not-a-date"), "start_date").is_err());
    }

    #[test]
    fn test_date_order() {
        let a = NaiveDate::from_ymd_opt(2026, 11, 2).unwrap();
        let b = NaiveDate::from_ymd_opt(2026, 11, 5).unwrap();
        assert!(validate_date_order(a, b).is_ok());
        assert!(validate_date_order(a, a).is_ok());
        assert!(validate_date_order(b, a).is_err());
    }
}

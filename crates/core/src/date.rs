//! Expiry date formatting and parsing.
//!
//! Dates are shown in French long form with a two-digit day
//! (`29 décembre 2024`). The editor's date control exchanges ISO
//! `YYYY-MM-DD` strings, which is what `<input type="date">` submits.

use chrono::{Locale, NaiveDate, NaiveTime, TimeZone, Utc};

use crate::error::CoreError;

/// strftime pattern for the French display form.
const FRENCH_DATE_FORMAT: &str = "%d %B %Y";

/// strftime pattern exchanged with the date control.
pub const FORM_DATE_FORMAT: &str = "%Y-%m-%d";

/// Format `date` for display, e.g. `05 janvier 2025`.
pub fn format_french_date(date: NaiveDate) -> String {
    Utc.from_utc_datetime(&date.and_time(NaiveTime::default()))
        .format_localized(FRENCH_DATE_FORMAT, Locale::fr_FR)
        .to_string()
}

/// Format `date` as the value of the date control.
pub fn format_form_date(date: NaiveDate) -> String {
    date.format(FORM_DATE_FORMAT).to_string()
}

/// Parse the date control's value. An empty value means "no date selected".
pub fn parse_form_date(raw: &str) -> Result<Option<NaiveDate>, CoreError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(raw, FORM_DATE_FORMAT)
        .map(Some)
        .map_err(|_| CoreError::Validation(format!("Date invalide : {raw}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn french_long_form() {
        assert_eq!(format_french_date(date(2024, 12, 29)), "29 décembre 2024");
        assert_eq!(format_french_date(date(2024, 8, 15)), "15 août 2024");
    }

    #[test]
    fn french_day_is_two_digits() {
        assert_eq!(format_french_date(date(2025, 1, 5)), "05 janvier 2025");
    }

    #[test]
    fn form_value_is_iso() {
        assert_eq!(format_form_date(date(2024, 12, 30)), "2024-12-30");
    }

    #[test]
    fn parse_form_value() {
        assert_eq!(parse_form_date("2024-12-30").unwrap(), Some(date(2024, 12, 30)));
        assert_eq!(parse_form_date(" 2025-01-05 ").unwrap(), Some(date(2025, 1, 5)));
    }

    #[test]
    fn empty_form_value_is_no_date() {
        assert_eq!(parse_form_date("").unwrap(), None);
        assert_eq!(parse_form_date("   ").unwrap(), None);
    }

    #[test]
    fn malformed_form_value_is_rejected() {
        assert_matches!(parse_form_date("29/12/2024"), Err(CoreError::Validation(_)));
        assert_matches!(parse_form_date("2024-02-30"), Err(CoreError::Validation(_)));
    }
}

//! Date windows for observation queries.

use chrono::{Duration, NaiveDate, Utc};

/// Date format used for Hub'Eau query parameters: "YYYY-MM-DD".
pub const YEAR_FORMAT: &str = "%Y-%m-%d";

/// ISO bounds for the `days` ending at `end` (inclusive).
pub fn window_ending(end: NaiveDate, days: i64) -> (String, String) {
    let start = end - Duration::days(days);
    (
        start.format(YEAR_FORMAT).to_string(),
        end.format(YEAR_FORMAT).to_string(),
    )
}

/// ISO bounds for the last `days` ending today.
pub fn observation_window(days: i64) -> (String, String) {
    window_ending(Utc::now().date_naive(), days)
}

/// Parse a date string in "YYYY-MM-DD" format.
pub fn parse_date(s: &str) -> anyhow::Result<NaiveDate> {
    Ok(NaiveDate::parse_from_str(s, YEAR_FORMAT)?)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_window_ending() {
        let end = NaiveDate::from_ymd_opt(2026, 8, 6).unwrap();
        let (from, to) = window_ending(end, 7);
        assert_eq!(from, "2026-07-30");
        assert_eq!(to, "2026-08-06");
    }

    #[test]
    fn test_window_crosses_month_boundary() {
        let end = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
        let (from, to) = window_ending(end, 7);
        assert_eq!(from, "2026-02-23");
        assert_eq!(to, "2026-03-02");
    }

    #[test]
    fn test_parse_round_trip() {
        let date = NaiveDate::from_ymd_opt(2026, 6, 15).unwrap();
        let formatted = date.format(YEAR_FORMAT).to_string();
        assert_eq!(parse_date(&formatted).unwrap(), date);
        assert!(parse_date("15/06/2026").is_err());
    }
}

//! Urgency classification by inspection due date

use chrono::{Datelike, NaiveDate};

use inspekt_types::{Error, Result};

use crate::model::{UrgencyTier, DATE_FORMAT};

/// Whole months from `target` to `reference`, ignoring the day of month
pub fn months_diff(reference: NaiveDate, target: NaiveDate) -> i32 {
    (reference.year() - target.year()) * 12 + (reference.month() as i32 - target.month() as i32)
}

/// Tier of a target date relative to the reference date
pub fn classify(reference: NaiveDate, target: NaiveDate) -> UrgencyTier {
    match months_diff(reference, target) {
        d if d <= 3 => UrgencyTier::Critical,
        d if d <= 12 => UrgencyTier::Warning,
        _ => UrgencyTier::Normal,
    }
}

/// Parse an inspection date in strict `YYYY-MM-DD` form.
///
/// `row` is the 1-based data row, used in the error.
pub fn parse_due_date(value: &str, row: usize) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|_| Error::Render {
        row,
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_months_diff() {
        assert_eq!(months_diff(date(2024, 2, 1), date(2024, 1, 1)), 1);
        assert_eq!(months_diff(date(2024, 2, 1), date(2023, 1, 1)), 13);
        assert_eq!(months_diff(date(2024, 2, 1), date(2020, 1, 1)), 49);
        assert_eq!(months_diff(date(2024, 2, 1), date(2025, 2, 1)), -12);
    }

    #[test]
    fn test_day_of_month_is_ignored() {
        assert_eq!(
            classify(date(2024, 6, 15), date(2024, 6, 1)),
            classify(date(2024, 6, 30), date(2024, 6, 1))
        );
        assert_eq!(classify(date(2024, 6, 1), date(2024, 6, 30)), UrgencyTier::Critical);
    }

    #[test]
    fn test_tiers() {
        let now = date(2024, 2, 1);
        assert_eq!(classify(now, date(2024, 1, 1)), UrgencyTier::Critical);
        assert_eq!(classify(now, date(2023, 2, 1)), UrgencyTier::Warning);
        // 13 months is past the warning window
        assert_eq!(months_diff(now, date(2023, 1, 1)), 13);
        assert_eq!(classify(now, date(2023, 1, 1)), UrgencyTier::Normal);
        assert_eq!(classify(now, date(2020, 1, 1)), UrgencyTier::Normal);
    }

    #[test]
    fn test_tier_boundaries() {
        let now = date(2024, 12, 10);
        assert_eq!(classify(now, date(2024, 9, 1)), UrgencyTier::Critical);
        assert_eq!(classify(now, date(2024, 8, 31)), UrgencyTier::Warning);
        assert_eq!(classify(now, date(2023, 12, 1)), UrgencyTier::Warning);
        assert_eq!(classify(now, date(2023, 11, 30)), UrgencyTier::Normal);
        // future dates have a negative difference
        assert_eq!(classify(now, date(2026, 1, 1)), UrgencyTier::Critical);
    }

    #[test]
    fn test_parse_due_date_strict() {
        assert_eq!(parse_due_date("2024-01-15", 1).unwrap(), date(2024, 1, 15));
        assert!(matches!(
            parse_due_date("15.01.2024", 7),
            Err(Error::Render { row: 7, .. })
        ));
        assert!(parse_due_date("", 1).is_err());
    }
}

//! Settlement holiday calendar

use crate::currency::Currency;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A settlement holiday for one currency region
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HolidayEntry {
    pub region: Currency,
    pub date: NaiveDate,
    pub name: String,
}

/// Map a three-letter month abbreviation (`JAN`..`DEC`, any casing) to its
/// 1-based month number.
pub fn month_from_abbr(abbr: &str) -> Option<u32> {
    const MONTHS: [&str; 12] = [
        "JAN", "FEB", "MAR", "APR", "MAY", "JUN", "JUL", "AUG", "SEP", "OCT", "NOV", "DEC",
    ];
    let upper = abbr.to_uppercase();
    MONTHS
        .iter()
        .position(|m| *m == upper)
        .map(|i| i as u32 + 1)
}

/// Restrict holidays to those on or after `today`, sorted ascending by date,
/// truncated to `limit`.
pub fn upcoming(mut holidays: Vec<HolidayEntry>, today: NaiveDate, limit: usize) -> Vec<HolidayEntry> {
    holidays.retain(|h| h.date >= today);
    holidays.sort_by_key(|h| h.date);
    holidays.truncate(limit);
    holidays
}

#[cfg(test)]
mod tests {
    use super::*;

    fn holiday(region: Currency, y: i32, m: u32, d: u32, name: &str) -> HolidayEntry {
        HolidayEntry {
            region,
            date: NaiveDate::from_ymd_opt(y, m, d).unwrap(),
            name: name.to_string(),
        }
    }

    #[test]
    fn test_month_from_abbr() {
        assert_eq!(month_from_abbr("JAN"), Some(1));
        assert_eq!(month_from_abbr("nov"), Some(11));
        assert_eq!(month_from_abbr("Dec"), Some(12));
        assert_eq!(month_from_abbr("XXX"), None);
        assert_eq!(month_from_abbr(""), None);
    }

    #[test]
    fn test_upcoming_filters_and_sorts() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        let holidays = vec![
            holiday(Currency::USD, 2025, 12, 25, "Christmas Day"),
            holiday(Currency::EUR, 2025, 1, 1, "New Year's Day"), // in the past
            holiday(Currency::USD, 2025, 7, 4, "Independence Day"),
            holiday(Currency::EUR, 2025, 6, 1, "Same Day"), // today counts
        ];

        let upcoming = upcoming(holidays, today, 5);
        assert_eq!(upcoming.len(), 3);
        assert_eq!(upcoming[0].name, "Same Day");
        assert_eq!(upcoming[1].name, "Independence Day");
        assert_eq!(upcoming[2].name, "Christmas Day");
    }

    #[test]
    fn test_upcoming_truncates() {
        let today = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let holidays: Vec<HolidayEntry> = (1..=8)
            .map(|d| holiday(Currency::USD, 2025, 3, d, "H"))
            .collect();
        assert_eq!(upcoming(holidays, today, 5).len(), 5);
    }

    #[test]
    fn test_upcoming_empty() {
        let today = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        let holidays = vec![holiday(Currency::USD, 2025, 7, 4, "Past")];
        assert!(upcoming(holidays, today, 5).is_empty());
    }
}

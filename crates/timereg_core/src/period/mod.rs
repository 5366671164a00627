//! Symbolic period tokens and inclusive calendar ranges.
//!
//! # Responsibility
//! - Parse period tokens such as `THIS_WEEK` or `MONTH:3`.
//! - Resolve tokens to inclusive `[start, end]` date ranges relative to an
//!   explicit reference date.
//!
//! # Invariants
//! - Resolution is pure: the reference date is the only time input.
//! - Week arithmetic follows ISO-8601 (Monday start, week 1 holds the
//!   year's first Thursday).

pub mod resolver;

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

pub use resolver::{resolve_period, PeriodError, PeriodToken};

/// Inclusive calendar-date interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Returns whether `date` falls inside the range, both ends included.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Overlap of two ranges, `None` when they share no day.
    pub fn intersection(&self, other: &DateRange) -> Option<DateRange> {
        let start = self.start.max(other.start);
        let end = self.end.min(other.end);
        (start <= end).then(|| DateRange::new(start, end))
    }

    /// Number of days covered, counting both ends.
    pub fn len_days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}

/// Current local calendar date, read fresh on every call.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

#[cfg(test)]
mod tests {
    use super::DateRange;
    use chrono::NaiveDate;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn intersection_keeps_shared_days() {
        let march = DateRange::new(date(2024, 3, 1), date(2024, 3, 31));
        let straddle = DateRange::new(date(2024, 2, 20), date(2024, 3, 5));

        assert_eq!(
            march.intersection(&straddle),
            Some(DateRange::new(date(2024, 3, 1), date(2024, 3, 5)))
        );
        assert_eq!(march.intersection(&march), Some(march));
    }

    #[test]
    fn disjoint_or_inverted_ranges_share_nothing() {
        let march = DateRange::new(date(2024, 3, 1), date(2024, 3, 31));
        let april = DateRange::new(date(2024, 4, 1), date(2024, 4, 30));
        let inverted = DateRange::new(date(2024, 3, 31), date(2024, 3, 1));

        assert_eq!(march.intersection(&april), None);
        assert_eq!(march.intersection(&inverted), None);
    }
}

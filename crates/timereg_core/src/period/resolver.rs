//! Period token parsing and resolution.
//!
//! # Invariants
//! - `WEEK_NUMBER:<n>` and `MONTH:<n>` anchor to the reference date's
//!   calendar year.
//! - Week numbers that do not exist in that ISO year and months outside
//!   1-12 are rejected, never clamped or wrapped.

use crate::period::DateRange;
use chrono::{Datelike, Days, Months, NaiveDate, Weekday};
use log::debug;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

const WEEK_NUMBER_PREFIX: &str = "WEEK_NUMBER:";
const MONTH_PREFIX: &str = "MONTH:";

/// Error raised when a period token cannot be resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PeriodError {
    /// `WEEK_NUMBER:` suffix is not an integer.
    InvalidWeekNumberFormat(String),
    /// `MONTH:` suffix is not an integer.
    InvalidMonthFormat(String),
    /// ISO year has no such week.
    WeekOutOfRange {
        week: i32,
        year: i32,
        weeks_in_year: u32,
    },
    /// Month number outside 1-12.
    MonthOutOfRange(i32),
    /// Range falls outside the representable calendar.
    DateOverflow(NaiveDate),
    /// Token matches none of the known forms.
    UnrecognizedToken(String),
}

impl Display for PeriodError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidWeekNumberFormat(_) => {
                write!(f, "Invalid week number format. Use WEEK_NUMBER:<number>.")
            }
            Self::InvalidMonthFormat(_) => write!(f, "Invalid month format. Use MONTH:<number>."),
            Self::WeekOutOfRange {
                week,
                year,
                weeks_in_year,
            } => write!(
                f,
                "Invalid week number {week}: ISO year {year} has weeks 1-{weeks_in_year}. Use WEEK_NUMBER:<number>."
            ),
            Self::MonthOutOfRange(month) => write!(
                f,
                "Invalid month {month}: expected a value between 1 and 12. Use MONTH:<number>."
            ),
            Self::DateOverflow(reference) => write!(
                f,
                "Period cannot be resolved relative to {reference}: date out of range."
            ),
            Self::UnrecognizedToken(_) => write!(
                f,
                "Invalid period format. Allowed values: THIS_WEEK, LAST_WEEK, WEEK_NUMBER:<number>, THIS_MONTH, LAST_MONTH, or MONTH:<number>."
            ),
        }
    }
}

impl Error for PeriodError {}

/// Parsed period token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PeriodToken {
    ThisWeek,
    LastWeek,
    /// ISO week number in the reference date's year.
    WeekNumber(i32),
    ThisMonth,
    LastMonth,
    /// Month number in the reference date's year.
    Month(i32),
}

impl FromStr for PeriodToken {
    type Err = PeriodError;

    /// Parses a token case-insensitively, ignoring surrounding whitespace.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        // ASCII upper-casing keeps byte offsets, so suffixes slice `trimmed`.
        let upper = trimmed.to_ascii_uppercase();

        if upper.starts_with(WEEK_NUMBER_PREFIX) {
            let suffix = &trimmed[WEEK_NUMBER_PREFIX.len()..];
            return suffix
                .parse::<i32>()
                .map(Self::WeekNumber)
                .map_err(|_| PeriodError::InvalidWeekNumberFormat(suffix.to_string()));
        }
        if upper.starts_with(MONTH_PREFIX) {
            let suffix = &trimmed[MONTH_PREFIX.len()..];
            return suffix
                .parse::<i32>()
                .map(Self::Month)
                .map_err(|_| PeriodError::InvalidMonthFormat(suffix.to_string()));
        }

        match upper.as_str() {
            "THIS_WEEK" => Ok(Self::ThisWeek),
            "LAST_WEEK" => Ok(Self::LastWeek),
            "THIS_MONTH" => Ok(Self::ThisMonth),
            "LAST_MONTH" => Ok(Self::LastMonth),
            _ => Err(PeriodError::UnrecognizedToken(trimmed.to_string())),
        }
    }
}

impl PeriodToken {
    /// Resolves this token to an inclusive range relative to `reference`.
    pub fn resolve(self, reference: NaiveDate) -> Result<DateRange, PeriodError> {
        let overflow = || PeriodError::DateOverflow(reference);
        match self {
            Self::ThisWeek => iso_week_containing(reference).ok_or_else(overflow),
            Self::LastWeek => reference
                .checked_sub_days(Days::new(7))
                .and_then(iso_week_containing)
                .ok_or_else(overflow),
            Self::WeekNumber(week) => iso_week_of_year(reference.year(), week)?.ok_or_else(overflow),
            Self::ThisMonth => {
                calendar_month(reference.year(), reference.month()).ok_or_else(overflow)
            }
            Self::LastMonth => reference
                .with_day(1)
                .and_then(|first| first.checked_sub_months(Months::new(1)))
                .and_then(|previous| calendar_month(previous.year(), previous.month()))
                .ok_or_else(overflow),
            Self::Month(month) => {
                let month = u32::try_from(month)
                    .ok()
                    .filter(|value| (1..=12).contains(value))
                    .ok_or(PeriodError::MonthOutOfRange(month))?;
                calendar_month(reference.year(), month).ok_or_else(overflow)
            }
        }
    }
}

/// Parses and resolves `token` relative to `reference`.
///
/// # Errors
/// - [`PeriodError`] for malformed numeric suffixes, unknown tokens, and
///   week/month numbers that do not exist in the reference year.
pub fn resolve_period(token: &str, reference: NaiveDate) -> Result<DateRange, PeriodError> {
    let resolved = token
        .parse::<PeriodToken>()
        .and_then(|parsed| parsed.resolve(reference));
    match &resolved {
        Ok(range) => debug!(
            "event=period_resolve module=period status=ok reference={} start={} end={}",
            reference, range.start, range.end
        ),
        Err(err) => debug!(
            "event=period_resolve module=period status=error reference={} error={}",
            reference, err
        ),
    }
    resolved
}

/// Monday through Sunday of the ISO week containing `date`.
fn iso_week_containing(date: NaiveDate) -> Option<DateRange> {
    let monday = date.checked_sub_days(Days::new(u64::from(
        date.weekday().num_days_from_monday(),
    )))?;
    let sunday = monday.checked_add_days(Days::new(6))?;
    Some(DateRange::new(monday, sunday))
}

fn iso_week_of_year(year: i32, week: i32) -> Result<Option<DateRange>, PeriodError> {
    // Dec 28 always falls in the last ISO week of its year.
    let weeks_in_year = NaiveDate::from_ymd_opt(year, 12, 28)
        .map(|date| date.iso_week().week())
        .unwrap_or(52);
    let out_of_range = PeriodError::WeekOutOfRange {
        week,
        year,
        weeks_in_year,
    };

    let week = match u32::try_from(week) {
        Ok(value) if (1..=weeks_in_year).contains(&value) => value,
        _ => return Err(out_of_range),
    };

    let Some(monday) = NaiveDate::from_isoywd_opt(year, week, Weekday::Mon) else {
        return Ok(None);
    };
    Ok(monday
        .checked_add_days(Days::new(6))
        .map(|sunday| DateRange::new(monday, sunday)))
}

/// First through last day of `month` in `year`.
fn calendar_month(year: i32, month: u32) -> Option<DateRange> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let last = first.checked_add_months(Months::new(1))?.pred_opt()?;
    Some(DateRange::new(first, last))
}

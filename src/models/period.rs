//! Calendar periods
//!
//! `Period` is a "since X" window used for filtering: every bound is an
//! inclusive lower bound computed from today, with no upper bound.
//! `MonthKey` identifies a calendar month for month-over-month statistics and
//! the trend series.

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Filtering window relative to today
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    /// No bound
    #[default]
    All,
    Today,
    Week,
    Month,
    Quarter,
    Year,
}

impl Period {
    /// Inclusive lower bound for this period, or `None` when unbounded.
    ///
    /// `week_start` is the first day of the week (Sunday unless configured).
    pub fn start_date(&self, today: NaiveDate, week_start: Weekday) -> Option<NaiveDate> {
        match self {
            Self::All => None,
            Self::Today => Some(today),
            Self::Week => {
                let offset = (7 + today.weekday().num_days_from_sunday()
                    - week_start.num_days_from_sunday())
                    % 7;
                Some(today - Duration::days(i64::from(offset)))
            }
            Self::Month => today.with_day(1),
            Self::Quarter => {
                let first_month = (today.month0() / 3) * 3 + 1;
                NaiveDate::from_ymd_opt(today.year(), first_month, 1)
            }
            Self::Year => NaiveDate::from_ymd_opt(today.year(), 1, 1),
        }
    }

    /// Check if a date falls within this period
    pub fn contains(&self, date: NaiveDate, today: NaiveDate, week_start: Weekday) -> bool {
        match self.start_date(today, week_start) {
            Some(start) => date >= start,
            None => true,
        }
    }

    /// Parse a period name. "none" and "" are accepted as `All`.
    pub fn parse(s: &str) -> Result<Self, PeriodParseError> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "all" | "none" => Ok(Self::All),
            "today" => Ok(Self::Today),
            "week" => Ok(Self::Week),
            "month" => Ok(Self::Month),
            "quarter" => Ok(Self::Quarter),
            "year" => Ok(Self::Year),
            other => Err(PeriodParseError::InvalidFormat(other.to_string())),
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::All => "all",
            Self::Today => "today",
            Self::Week => "week",
            Self::Month => "month",
            Self::Quarter => "quarter",
            Self::Year => "year",
        };
        f.write_str(name)
    }
}

impl std::str::FromStr for Period {
    type Err = PeriodParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// A calendar month
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MonthKey {
    pub year: i32,
    pub month: u32,
}

impl MonthKey {
    pub fn new(year: i32, month: u32) -> Self {
        Self { year, month }
    }

    /// The month containing `date`
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    /// Previous month, rolling January back to December of the prior year
    pub fn prev(&self) -> Self {
        if self.month == 1 {
            Self::new(self.year - 1, 12)
        } else {
            Self::new(self.year, self.month - 1)
        }
    }

    pub fn next(&self) -> Self {
        if self.month == 12 {
            Self::new(self.year + 1, 1)
        } else {
            Self::new(self.year, self.month + 1)
        }
    }

    /// The month `n` months before this one
    pub fn back(&self, n: u32) -> Self {
        (0..n).fold(*self, |m, _| m.prev())
    }

    /// First day of the month
    pub fn first_day(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
    }

    /// Chart label, e.g. "Jan 25"
    pub fn short_label(&self) -> String {
        format!("{} {:02}", MONTH_ABBREVIATIONS[self.index()], self.year.rem_euclid(100))
    }

    /// Report label, e.g. "January 2025"
    pub fn long_label(&self) -> String {
        format!("{} {}", MONTH_NAMES[self.index()], self.year)
    }

    fn index(&self) -> usize {
        (self.month.clamp(1, 12) - 1) as usize
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

const MONTH_ABBREVIATIONS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Error type for period parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PeriodParseError {
    InvalidFormat(String),
}

impl fmt::Display for PeriodParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PeriodParseError::InvalidFormat(s) => write!(
                f,
                "Invalid period '{}': expected all, today, week, month, quarter or year",
                s
            ),
        }
    }
}

impl std::error::Error for PeriodParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_week_starts_on_sunday() {
        // 2025-03-12 is a Wednesday
        let today = date(2025, 3, 12);
        assert_eq!(
            Period::Week.start_date(today, Weekday::Sun),
            Some(date(2025, 3, 9))
        );
        // On a Sunday the week starts that same day
        assert_eq!(
            Period::Week.start_date(date(2025, 3, 9), Weekday::Sun),
            Some(date(2025, 3, 9))
        );
    }

    #[test]
    fn test_week_start_configurable() {
        let today = date(2025, 3, 12);
        assert_eq!(
            Period::Week.start_date(today, Weekday::Mon),
            Some(date(2025, 3, 10))
        );
        // Sunday with a Monday week start belongs to the week that began six days earlier
        assert_eq!(
            Period::Week.start_date(date(2025, 3, 16), Weekday::Mon),
            Some(date(2025, 3, 10))
        );
    }

    #[test]
    fn test_month_quarter_year_bounds() {
        let today = date(2025, 8, 20);
        assert_eq!(
            Period::Month.start_date(today, Weekday::Sun),
            Some(date(2025, 8, 1))
        );
        assert_eq!(
            Period::Quarter.start_date(today, Weekday::Sun),
            Some(date(2025, 7, 1))
        );
        assert_eq!(
            Period::Quarter.start_date(date(2025, 3, 31), Weekday::Sun),
            Some(date(2025, 1, 1))
        );
        assert_eq!(
            Period::Year.start_date(today, Weekday::Sun),
            Some(date(2025, 1, 1))
        );
        assert_eq!(Period::All.start_date(today, Weekday::Sun), None);
    }

    #[test]
    fn test_contains_has_no_upper_bound() {
        let today = date(2025, 8, 20);
        assert!(Period::Today.contains(date(2025, 9, 1), today, Weekday::Sun));
        assert!(!Period::Today.contains(date(2025, 8, 19), today, Weekday::Sun));
    }

    #[test]
    fn test_parse() {
        assert_eq!(Period::parse("Month").unwrap(), Period::Month);
        assert_eq!(Period::parse("none").unwrap(), Period::All);
        assert_eq!(Period::parse("").unwrap(), Period::All);
        assert!(Period::parse("fortnight").is_err());
    }

    #[test]
    fn test_month_navigation() {
        let jan = MonthKey::new(2025, 1);
        assert_eq!(jan.prev(), MonthKey::new(2024, 12));
        assert_eq!(MonthKey::new(2024, 12).next(), jan);
        assert_eq!(jan.back(11), MonthKey::new(2024, 2));
        assert_eq!(jan.back(0), jan);
    }

    #[test]
    fn test_month_labels() {
        let m = MonthKey::new(2025, 1);
        assert_eq!(m.short_label(), "Jan 25");
        assert_eq!(m.long_label(), "January 2025");
        assert_eq!(m.to_string(), "2025-01");
        assert_eq!(MonthKey::new(2009, 12).short_label(), "Dec 09");
    }
}

//! The payroll period key.
//!
//! A [`MonthYear`] identifies a calendar month by its first day. It is
//! exchanged as a `YYYY-MM` string at every outer boundary.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// A calendar month, stored as its first day.
///
/// # Example
///
/// ```
/// use payslip_engine::models::MonthYear;
/// use chrono::NaiveDate;
///
/// let month: MonthYear = "2026-02".parse().unwrap();
/// assert_eq!(month.first_day(), NaiveDate::from_ymd_opt(2026, 2, 1).unwrap());
/// assert_eq!(month.last_day(), NaiveDate::from_ymd_opt(2026, 2, 28).unwrap());
/// assert_eq!(month.to_string(), "2026-02");
/// assert_eq!(month.long_label(), "February 2026");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MonthYear(NaiveDate);

impl MonthYear {
    /// Creates the month containing `year`/`month`, or `None` if out of range.
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(Self)
    }

    /// The calendar year.
    pub fn year(&self) -> i32 {
        self.0.year()
    }

    /// The calendar month, 1 to 12.
    pub fn month(&self) -> u32 {
        self.0.month()
    }

    /// The first day of the month.
    pub fn first_day(&self) -> NaiveDate {
        self.0
    }

    /// The last day of the month.
    pub fn last_day(&self) -> NaiveDate {
        self.0
            .checked_add_months(Months::new(1))
            .and_then(|next| next.pred_opt())
            .unwrap_or(NaiveDate::MAX)
    }

    /// Checks whether `date` falls within this month (inclusive on both ends).
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.first_day() && date <= self.last_day()
    }

    /// The month name and year, e.g. `January 2026`.
    pub fn long_label(&self) -> String {
        self.0.format("%B %Y").to_string()
    }
}

impl fmt::Display for MonthYear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year(), self.month())
    }
}

impl FromStr for MonthYear {
    type Err = EngineError;

    /// Parses exactly `YYYY-MM`: four year digits, a dash, two month digits.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let invalid = || EngineError::InvalidMonthFormat {
            value: value.to_string(),
        };

        let bytes = value.as_bytes();
        let well_formed = bytes.len() == 7
            && bytes[4] == b'-'
            && bytes
                .iter()
                .enumerate()
                .all(|(i, b)| i == 4 || b.is_ascii_digit());
        if !well_formed {
            return Err(invalid());
        }

        let year: i32 = value[..4].parse().map_err(|_| invalid())?;
        let month: u32 = value[5..].parse().map_err(|_| invalid())?;
        Self::new(year, month).ok_or_else(invalid)
    }
}

impl TryFrom<String> for MonthYear {
    type Error = EngineError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<MonthYear> for String {
    fn from(month: MonthYear) -> Self {
        month.to_string()
    }
}

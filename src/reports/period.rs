//! Month bucket keys used to group transactions into time series.
//!
//! A key renders as `"<Mon> <YYYY>"`, e.g. `"Apr 2024"`, and orders by
//! calendar time (year first, then month).

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Month, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::errors::FinanceError;

/// Calendar month bucket. Field order gives the chronological `Ord`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MonthKey {
    pub year: i32,
    pub month: u32,
}

impl MonthKey {
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// First calendar day of the bucket.
    pub fn first_day(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.first_day() {
            Some(day) => write!(f, "{}", day.format("%b %Y")),
            None => write!(f, "{:02} {}", self.month, self.year),
        }
    }
}

impl FromStr for MonthKey {
    type Err = FinanceError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let invalid = || FinanceError::Validation(format!("invalid month key `{value}`"));
        let mut parts = value.split_whitespace();
        let (Some(month), Some(year), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(invalid());
        };
        let month = month.parse::<Month>().map_err(|_| invalid())?;
        let year = year.parse::<i32>().map_err(|_| invalid())?;
        let key = MonthKey {
            year,
            month: month.number_from_month(),
        };
        // day = 1 keeps the check independent of month length
        key.first_day().map(|_| key).ok_or_else(invalid)
    }
}

/// Formats the bucket key for a transaction date.
pub fn bucket_key(date: NaiveDate) -> String {
    MonthKey::from_date(date).to_string()
}

/// Chronological comparison of two rendered bucket keys.
///
/// Keys that do not parse sort after every valid key, and by text among
/// themselves, so the order stays total.
pub fn compare_keys(a: &str, b: &str) -> Ordering {
    match (a.parse::<MonthKey>(), b.parse::<MonthKey>()) {
        (Ok(left), Ok(right)) => left.cmp(&right),
        (Ok(_), Err(_)) => Ordering::Less,
        (Err(_), Ok(_)) => Ordering::Greater,
        (Err(_), Err(_)) => a.cmp(b),
    }
}

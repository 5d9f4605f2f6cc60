//! Traits and enums shared by the domain records.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::FinanceError;

/// Direction of money flow for transactions and categories.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Income,
    Expense,
}

impl EntryKind {
    pub fn is_income(self) -> bool {
        matches!(self, EntryKind::Income)
    }

    pub fn is_expense(self) -> bool {
        matches!(self, EntryKind::Expense)
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            EntryKind::Income => "Income",
            EntryKind::Expense => "Expense",
        };
        f.write_str(label)
    }
}

impl FromStr for EntryKind {
    type Err = FinanceError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "income" => Ok(EntryKind::Income),
            "expense" => Ok(EntryKind::Expense),
            other => Err(FinanceError::Validation(format!(
                "unknown entry kind `{other}` (expected income or expense)"
            ))),
        }
    }
}

pub trait Identifiable {
    fn id(&self) -> &str;
}

pub trait NamedEntity {
    fn name(&self) -> &str;
}

pub fn find_by_id<'a, T: Identifiable>(items: &'a [T], id: &str) -> Option<&'a T> {
    items.iter().find(|item| item.id() == id)
}

pub fn position_by_id<T: Identifiable>(items: &[T], id: &str) -> Option<usize> {
    items.iter().position(|item| item.id() == id)
}

/// Case-insensitive match on the display name; the first match wins.
pub fn find_by_name<'a, T: NamedEntity>(items: &'a [T], name: &str) -> Option<&'a T> {
    let wanted = name.trim();
    items
        .iter()
        .find(|item| item.name().eq_ignore_ascii_case(wanted))
}

/// Parses an ISO `YYYY-MM-DD` date string.
pub fn parse_date(value: &str) -> Result<NaiveDate, FinanceError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|err| FinanceError::Validation(format!("invalid date `{value}`: {err}")))
}

/// Rejects negative, NaN and infinite amounts. Zero is accepted.
pub fn validate_amount(amount: f64) -> Result<f64, FinanceError> {
    if !amount.is_finite() {
        return Err(FinanceError::Validation(format!(
            "amount must be a finite number, got {amount}"
        )));
    }
    if amount < 0.0 {
        return Err(FinanceError::Validation(format!(
            "amount must not be negative, got {amount}"
        )));
    }
    Ok(amount)
}

/// Parses user text into an amount and applies [`validate_amount`].
pub fn parse_amount(value: &str) -> Result<f64, FinanceError> {
    let amount = value
        .trim()
        .parse::<f64>()
        .map_err(|_| FinanceError::Validation(format!("invalid amount `{value}`")))?;
    validate_amount(amount)
}

pub(crate) fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

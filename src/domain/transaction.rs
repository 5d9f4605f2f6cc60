use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::common::{new_id, EntryKind, Identifiable};

/// A recorded income or expense.
///
/// `kind` is the transaction's own declared direction. It is not checked
/// against the referenced category's kind, and reports always trust it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub amount: f64,
    pub category_id: String,
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub kind: EntryKind,
}

impl Transaction {
    pub fn new(
        kind: EntryKind,
        amount: f64,
        category_id: impl Into<String>,
        date: NaiveDate,
    ) -> Self {
        Self {
            id: new_id(),
            amount,
            category_id: category_id.into(),
            date,
            description: None,
            kind,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn is_income(&self) -> bool {
        self.kind.is_income()
    }

    pub fn is_expense(&self) -> bool {
        self.kind.is_expense()
    }
}

impl Identifiable for Transaction {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Input for recording a transaction; the store assigns the id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    pub kind: EntryKind,
    pub amount: f64,
    pub category_id: String,
    pub date: NaiveDate,
    pub description: Option<String>,
}

impl NewTransaction {
    pub fn into_transaction(self) -> Transaction {
        Transaction {
            id: new_id(),
            amount: self.amount,
            category_id: self.category_id,
            date: self.date,
            description: self.description,
            kind: self.kind,
        }
    }
}

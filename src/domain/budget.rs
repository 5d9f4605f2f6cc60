use serde::{Deserialize, Serialize};

use crate::domain::common::{new_id, Identifiable};

/// A standing spending ceiling for one category.
///
/// Budgets have no period. Several budgets may point at the same category;
/// reports add them together.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Budget {
    pub id: String,
    pub category_id: String,
    pub amount: f64,
}

impl Budget {
    pub fn new(category_id: impl Into<String>, amount: f64) -> Self {
        Self {
            id: new_id(),
            category_id: category_id.into(),
            amount,
        }
    }
}

impl Identifiable for Budget {
    fn id(&self) -> &str {
        &self.id
    }
}

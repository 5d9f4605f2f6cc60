//! Domain types representing budget categories.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::common::*;

/// Groups transactions for budgeting and reporting.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Category {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: EntryKind,
}

impl Category {
    pub fn new(name: impl Into<String>, kind: EntryKind) -> Self {
        Self {
            id: new_id(),
            name: name.into(),
            kind,
        }
    }

    pub fn with_id(id: impl Into<String>, name: impl Into<String>, kind: EntryKind) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind,
        }
    }
}

impl Identifiable for Category {
    fn id(&self) -> &str {
        &self.id
    }
}

impl NamedEntity for Category {
    fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.kind)
    }
}

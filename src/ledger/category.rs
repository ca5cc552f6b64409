use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Categorises cash flow for treasury aggregation.
///
/// Nesting is one level deep: a parent has no parent, a child has exactly
/// one. Transactions without a category (transfers, uncategorized entries)
/// stay out of category aggregation entirely.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    pub kind: CategoryKind,
    pub parent_id: Option<Uuid>,
}

impl Category {
    pub fn new(name: impl Into<String>, kind: CategoryKind) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            kind,
            parent_id: None,
        }
    }

    pub fn child_of(mut self, parent_id: Uuid) -> Self {
        self.parent_id = Some(parent_id);
        self
    }

    pub fn is_parent(&self) -> bool {
        self.parent_id.is_none()
    }
}

/// Supported category types.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CategoryKind {
    Income,
    Expense,
}

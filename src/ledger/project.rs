use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A savings goal transactions can allocate to.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Project {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub target_amount: Option<f64>,
    #[serde(default)]
    pub target_date: Option<NaiveDate>,
}

impl Project {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            target_amount: None,
            target_date: None,
        }
    }

    pub fn with_target(mut self, amount: f64) -> Self {
        self.target_amount = Some(amount);
        self
    }

    pub fn due_by(mut self, date: NaiveDate) -> Self {
        self.target_date = Some(date);
        self
    }
}

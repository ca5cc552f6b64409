use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A financial account transactions belong to.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Account {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub opening_balance: f64,
}

impl Account {
    /// Creates a new account with a zero opening balance.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            opening_balance: 0.0,
        }
    }

    pub fn with_opening_balance(mut self, opening_balance: f64) -> Self {
        self.opening_balance = opening_balance;
        self
    }
}

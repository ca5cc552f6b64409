use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::PlanError;

use super::{
    account::Account,
    category::Category,
    month::MonthKey,
    overrides::{OverrideChange, OverrideStore},
    project::Project,
    recurrence::contribution,
    transaction::Transaction,
};

const CURRENT_SCHEMA_VERSION: u8 = 1;

/// The in-memory dataset every projection runs against: accounts, categories,
/// savings projects, transactions, and month overrides.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Book {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub accounts: Vec<Account>,
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    #[serde(default)]
    pub overrides: OverrideStore,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default = "Book::schema_version_default")]
    pub schema_version: u8,
}

impl Book {
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            accounts: Vec::new(),
            categories: Vec::new(),
            projects: Vec::new(),
            transactions: Vec::new(),
            overrides: OverrideStore::new(),
            created_at: now,
            updated_at: now,
            schema_version: CURRENT_SCHEMA_VERSION,
        }
    }

    pub fn add_account(&mut self, account: Account) -> Uuid {
        let id = account.id;
        self.accounts.push(account);
        self.touch();
        id
    }

    pub fn add_category(&mut self, category: Category) -> Uuid {
        let id = category.id;
        self.categories.push(category);
        self.touch();
        id
    }

    pub fn add_project(&mut self, project: Project) -> Uuid {
        let id = project.id;
        self.projects.push(project);
        self.touch();
        id
    }

    pub fn add_transaction(&mut self, transaction: Transaction) -> Uuid {
        let id = transaction.id;
        self.transactions.push(transaction);
        self.touch();
        id
    }

    /// Removes a transaction and any overrides recorded against it.
    pub fn remove_transaction(&mut self, id: Uuid) -> bool {
        let before = self.transactions.len();
        self.transactions.retain(|txn| txn.id != id);
        if self.transactions.len() == before {
            return false;
        }
        self.overrides.remove_transaction(id);
        self.touch();
        true
    }

    pub fn account(&self, id: Uuid) -> Option<&Account> {
        self.accounts.iter().find(|account| account.id == id)
    }

    pub fn category(&self, id: Uuid) -> Option<&Category> {
        self.categories.iter().find(|category| category.id == id)
    }

    pub fn project(&self, id: Uuid) -> Option<&Project> {
        self.projects.iter().find(|project| project.id == id)
    }

    pub fn transaction(&self, id: Uuid) -> Option<&Transaction> {
        self.transactions.iter().find(|txn| txn.id == id)
    }

    /// Records a user edit of one projected month figure. The computed value
    /// for that month decides whether this stores an override or clears one
    /// (a value within epsilon of the original resets it).
    pub fn set_override(
        &mut self,
        transaction_id: Uuid,
        month: MonthKey,
        amount: f64,
        as_of: NaiveDate,
    ) -> Result<OverrideChange, PlanError> {
        let txn = self
            .transaction(transaction_id)
            .ok_or_else(|| PlanError::InvalidRef(format!("unknown transaction {}", transaction_id)))?;
        if txn.rule().is_none() {
            return Err(PlanError::InvalidRef(format!(
                "transaction {} is not recurring",
                transaction_id
            )));
        }
        let computed = contribution(txn, month, as_of);
        let change = self.overrides.set(transaction_id, month, amount, computed);
        self.touch();
        Ok(change)
    }

    /// The override-resolved amount of a recurring transaction for one month.
    pub fn resolve_amount(
        &self,
        transaction_id: Uuid,
        month: MonthKey,
        as_of: NaiveDate,
    ) -> Option<f64> {
        let txn = self.transaction(transaction_id)?;
        let computed = contribution(txn, month, as_of);
        Some(self.overrides.resolve(transaction_id, month, computed))
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    pub fn schema_version_default() -> u8 {
        CURRENT_SCHEMA_VERSION
    }
}

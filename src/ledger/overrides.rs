use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::month::MonthKey;

/// Tolerance under which a new override value is considered equal to the
/// computed original. Setting a value inside this band deletes the override
/// instead of storing a no-op.
pub const OVERRIDE_EPSILON: f64 = 0.01;

/// One user-entered replacement amount for a single month occurrence of a
/// recurring transaction. The flat record form used for serialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthOverride {
    pub transaction_id: Uuid,
    pub month: MonthKey,
    pub amount: f64,
}

/// Outcome of [`OverrideStore::set`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverrideChange {
    /// The override was created or updated.
    Set,
    /// An existing override was removed because the value matched the
    /// computed original.
    Cleared,
    /// Nothing was stored: the value matched the original and no override
    /// existed.
    Unchanged,
}

/// Replacement amounts keyed by `(transaction, month)` with upsert semantics.
/// At most one override exists per key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(into = "Vec<MonthOverride>", from = "Vec<MonthOverride>")]
pub struct OverrideStore {
    entries: BTreeMap<(Uuid, MonthKey), f64>,
}

impl OverrideStore {
    pub fn new() -> OverrideStore {
        OverrideStore::default()
    }

    /// The override amount for this exact key, else the computed fallback.
    pub fn resolve(&self, transaction_id: Uuid, month: MonthKey, computed: f64) -> f64 {
        self.get(transaction_id, month).unwrap_or(computed)
    }

    pub fn get(&self, transaction_id: Uuid, month: MonthKey) -> Option<f64> {
        self.entries.get(&(transaction_id, month)).copied()
    }

    /// Upserts an override, normalizing resets: a value within
    /// [`OVERRIDE_EPSILON`] of the computed original clears the entry.
    pub fn set(
        &mut self,
        transaction_id: Uuid,
        month: MonthKey,
        amount: f64,
        computed: f64,
    ) -> OverrideChange {
        if (amount - computed).abs() <= OVERRIDE_EPSILON {
            if self.entries.remove(&(transaction_id, month)).is_some() {
                OverrideChange::Cleared
            } else {
                OverrideChange::Unchanged
            }
        } else {
            self.entries.insert((transaction_id, month), amount);
            OverrideChange::Set
        }
    }

    pub fn clear(&mut self, transaction_id: Uuid, month: MonthKey) -> bool {
        self.entries.remove(&(transaction_id, month)).is_some()
    }

    /// Drops every override of one transaction. Returns how many were removed.
    pub fn remove_transaction(&mut self, transaction_id: Uuid) -> usize {
        let before = self.entries.len();
        self.entries.retain(|(txn, _), _| *txn != transaction_id);
        before - self.entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = MonthOverride> + '_ {
        self.entries.iter().map(|((txn, month), amount)| MonthOverride {
            transaction_id: *txn,
            month: *month,
            amount: *amount,
        })
    }
}

impl From<Vec<MonthOverride>> for OverrideStore {
    fn from(records: Vec<MonthOverride>) -> Self {
        let mut store = OverrideStore::new();
        for record in records {
            store
                .entries
                .insert((record.transaction_id, record.month), record.amount);
        }
        store
    }
}

impl From<OverrideStore> for Vec<MonthOverride> {
    fn from(store: OverrideStore) -> Self {
        store.iter().collect()
    }
}

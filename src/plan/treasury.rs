use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::ledger::{
    contribution, Book, Category, CategoryKind, MonthKey, MonthWindow,
};

pub const INCOME_TOTAL_LABEL: &str = "TOTAL RECETTES";
pub const EXPENSE_TOTAL_LABEL: &str = "TOTAL DÉPENSES";
pub const MONTHLY_BALANCE_LABEL: &str = "Solde du mois";
pub const CUMULATIVE_BALANCE_LABEL: &str = "Solde cumulé";

/// One projected month figure for one transaction: computed from the
/// recurrence rule (override-resolved) or taken literally from a dated entry.
/// Derived on every read, never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectedOccurrence {
    pub transaction_id: Uuid,
    pub category_id: Option<Uuid>,
    pub project_id: Option<Uuid>,
    pub month: MonthKey,
    pub amount: f64,
}

/// Expands every transaction of the book over the window.
///
/// This is the single expansion path shared by the treasury plan, account
/// listings, and project progress. Literal transactions land in exactly the
/// month of their own date; recurring ones land in every window month where
/// their rule fires, with overrides applied per month.
pub fn projected_occurrences(
    book: &Book,
    window: &MonthWindow,
    as_of: NaiveDate,
) -> Vec<ProjectedOccurrence> {
    let mut occurrences = Vec::new();
    for txn in &book.transactions {
        if txn.rule().is_some() {
            for month in window.iter() {
                let computed = contribution(txn, month, as_of);
                if computed == 0.0 {
                    continue;
                }
                occurrences.push(ProjectedOccurrence {
                    transaction_id: txn.id,
                    category_id: txn.category_id,
                    project_id: txn.project_id,
                    month,
                    amount: book.overrides.resolve(txn.id, month, computed),
                });
            }
        } else {
            let month = MonthKey::from_date(txn.date);
            if window.contains(month) {
                occurrences.push(ProjectedOccurrence {
                    transaction_id: txn.id,
                    category_id: txn.category_id,
                    project_id: txn.project_id,
                    month,
                    amount: txn.amount,
                });
            }
        }
    }
    occurrences
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanRowKind {
    /// A category holding its own transactions.
    Category,
    /// A parent category rolled up from its children.
    ParentCategory,
    /// `TOTAL RECETTES` / `TOTAL DÉPENSES`.
    SectionTotal,
    MonthlyBalance,
    CumulativeBalance,
}

/// One display row: a label and signed totals aligned with the window months.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanRow {
    pub kind: PlanRowKind,
    pub category_id: Option<Uuid>,
    pub label: String,
    pub values: Vec<f64>,
}

/// The aggregated treasury view over one window. All amounts are signed, so
/// the expense section total is normally negative and the monthly balance is
/// the plain sum of the two section totals.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreasuryPlan {
    pub window: MonthWindow,
    pub rows: Vec<PlanRow>,
    pub income_totals: Vec<f64>,
    pub expense_totals: Vec<f64>,
    pub monthly_balance: Vec<f64>,
    pub cumulative_balance: Vec<f64>,
}

impl TreasuryPlan {
    pub fn row_for_category(&self, category_id: Uuid) -> Option<&PlanRow> {
        self.rows
            .iter()
            .find(|row| row.category_id == Some(category_id))
    }

    pub fn value(&self, row: &PlanRow, month: MonthKey) -> Option<f64> {
        self.window.position(month).map(|index| row.values[index])
    }
}

/// Builds the treasury plan: per-category rows (children under their parent),
/// section totals per type, and monthly plus cumulative balances.
///
/// Parent rows sum their children's direct totals. Section totals sum the
/// direct totals of every category of that type independently of the rollup,
/// so categories without a parent still count. The cumulative balance is a
/// running sum reset only at the window start, never at a year boundary.
pub fn treasury_plan(book: &Book, window: &MonthWindow, as_of: NaiveDate) -> TreasuryPlan {
    let months = window.len();
    let occurrences = projected_occurrences(book, window, as_of);

    // Direct totals per category; the "none" bucket stays out of every row.
    let mut direct: HashMap<Uuid, Vec<f64>> = HashMap::new();
    for occurrence in &occurrences {
        let Some(category_id) = occurrence.category_id else {
            continue;
        };
        if book.category(category_id).is_none() {
            tracing::debug!(%category_id, "occurrence references an unknown category, skipped");
            continue;
        }
        let Some(index) = window.position(occurrence.month) else {
            continue;
        };
        direct.entry(category_id).or_insert_with(|| vec![0.0; months])[index] +=
            occurrence.amount;
    }

    let zeroes = vec![0.0; months];
    let direct_of = |category: &Category| direct.get(&category.id).unwrap_or(&zeroes).clone();

    let mut rows = Vec::new();
    let mut income_totals = vec![0.0; months];
    let mut expense_totals = vec![0.0; months];

    for kind in [CategoryKind::Income, CategoryKind::Expense] {
        let section_totals = match kind {
            CategoryKind::Income => &mut income_totals,
            CategoryKind::Expense => &mut expense_totals,
        };
        for category in book.categories.iter().filter(|c| c.kind == kind) {
            let values = direct_of(category);
            for (total, value) in section_totals.iter_mut().zip(&values) {
                *total += value;
            }
        }

        let mut parents: Vec<&Category> = book
            .categories
            .iter()
            .filter(|c| c.kind == kind && c.is_parent())
            .collect();
        parents.sort_by(|a, b| a.name.cmp(&b.name));

        for parent in parents {
            let mut children: Vec<&Category> = book
                .categories
                .iter()
                .filter(|c| c.parent_id == Some(parent.id))
                .collect();
            children.sort_by(|a, b| a.name.cmp(&b.name));

            if children.is_empty() {
                rows.push(PlanRow {
                    kind: PlanRowKind::Category,
                    category_id: Some(parent.id),
                    label: parent.name.clone(),
                    values: direct_of(parent),
                });
                continue;
            }

            let mut rolled = direct_of(parent);
            for child in &children {
                for (total, value) in rolled.iter_mut().zip(direct_of(child)) {
                    *total += value;
                }
            }
            rows.push(PlanRow {
                kind: PlanRowKind::ParentCategory,
                category_id: Some(parent.id),
                label: parent.name.clone(),
                values: rolled,
            });
            for child in children {
                rows.push(PlanRow {
                    kind: PlanRowKind::Category,
                    category_id: Some(child.id),
                    label: child.name.clone(),
                    values: direct_of(child),
                });
            }
        }

        let (label, values) = match kind {
            CategoryKind::Income => (INCOME_TOTAL_LABEL, income_totals.clone()),
            CategoryKind::Expense => (EXPENSE_TOTAL_LABEL, expense_totals.clone()),
        };
        rows.push(PlanRow {
            kind: PlanRowKind::SectionTotal,
            category_id: None,
            label: label.into(),
            values,
        });
    }

    let monthly_balance: Vec<f64> = income_totals
        .iter()
        .zip(&expense_totals)
        .map(|(income, expense)| income + expense)
        .collect();
    let mut cumulative_balance = Vec::with_capacity(months);
    let mut running = 0.0;
    for balance in &monthly_balance {
        running += balance;
        cumulative_balance.push(running);
    }

    rows.push(PlanRow {
        kind: PlanRowKind::MonthlyBalance,
        category_id: None,
        label: MONTHLY_BALANCE_LABEL.into(),
        values: monthly_balance.clone(),
    });
    rows.push(PlanRow {
        kind: PlanRowKind::CumulativeBalance,
        category_id: None,
        label: CUMULATIVE_BALANCE_LABEL.into(),
        values: cumulative_balance.clone(),
    });

    tracing::debug!(
        months,
        occurrences = occurrences.len(),
        rows = rows.len(),
        "treasury plan built"
    );

    TreasuryPlan {
        window: window.clone(),
        rows,
        income_totals,
        expense_totals,
        monthly_balance,
        cumulative_balance,
    }
}

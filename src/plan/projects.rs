use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::ledger::{Book, MonthWindow};

use super::treasury::projected_occurrences;

/// Progress figures for one savings project over a window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectProgress {
    pub project_id: Uuid,
    pub name: String,
    pub target_amount: Option<f64>,
    /// Sum of literal allocations dated on or before the evaluation date.
    pub saved: f64,
    /// Projected allocations per window month, recurring entries included.
    pub projected: Vec<f64>,
    /// Percentage of the target reached so far, when a target is set.
    pub percent: Option<f64>,
}

/// Computes per-project saved and projected allocation figures.
pub fn project_progress(
    book: &Book,
    window: &MonthWindow,
    as_of: NaiveDate,
) -> Vec<ProjectProgress> {
    let occurrences = projected_occurrences(book, window, as_of);

    book.projects
        .iter()
        .map(|project| {
            let saved: f64 = book
                .transactions
                .iter()
                .filter(|txn| txn.project_id == Some(project.id))
                .filter(|txn| txn.rule().is_none() && txn.date <= as_of)
                .map(|txn| txn.amount)
                .sum();

            let mut projected = vec![0.0; window.len()];
            for occurrence in &occurrences {
                if occurrence.project_id != Some(project.id) {
                    continue;
                }
                if let Some(index) = window.position(occurrence.month) {
                    projected[index] += occurrence.amount;
                }
            }

            let percent = project.target_amount.and_then(|target| {
                if target.abs() > f64::EPSILON {
                    Some((saved / target) * 100.0)
                } else {
                    None
                }
            });

            ProjectProgress {
                project_id: project.id,
                name: project.name.clone(),
                target_amount: project.target_amount,
                saved,
                projected,
                percent,
            }
        })
        .collect()
}

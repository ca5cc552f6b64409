//! Window-scoped aggregation: treasury rows, account history, project progress.

pub mod projects;
pub mod transfers;
pub mod treasury;

pub use projects::{project_progress, ProjectProgress};
pub use transfers::{
    account_history, is_transfer_like, HistoryEntry, TransferDirection, TransferLeg,
    FALLBACK_ACCOUNT_LABEL, TRANSFER_NOTE_EXACT, TRANSFER_NOTE_PREFIX,
};
pub use treasury::{
    projected_occurrences, treasury_plan, PlanRow, PlanRowKind, ProjectedOccurrence, TreasuryPlan,
    CUMULATIVE_BALANCE_LABEL, EXPENSE_TOTAL_LABEL, INCOME_TOTAL_LABEL, MONTHLY_BALANCE_LABEL,
};

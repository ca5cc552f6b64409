//! Dataset domain models, month arithmetic, and recurrence expansion.

pub mod account;
pub mod book;
pub mod category;
pub mod month;
pub mod overrides;
pub mod project;
pub mod recurrence;
pub mod transaction;

pub use account::Account;
pub use book::Book;
pub use category::{Category, CategoryKind};
pub use month::{MonthKey, MonthWindow};
pub use overrides::{MonthOverride, OverrideChange, OverrideStore, OVERRIDE_EPSILON};
pub use project::Project;
pub use recurrence::{contribution, PROJECTION_HORIZON_MONTHS};
pub use transaction::{RecurrenceRule, Transaction};

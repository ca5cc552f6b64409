pub mod json_backend;

use std::path::Path;

use crate::{errors::PlanError, ledger::Book};

pub type Result<T> = std::result::Result<T, PlanError>;

/// Abstraction over persistence backends capable of storing book snapshots.
pub trait StorageBackend: Send + Sync {
    fn save(&self, book: &Book, name: &str) -> Result<()>;
    fn load(&self, name: &str) -> Result<Book>;
    fn backup(&self, book: &Book, name: &str, note: Option<&str>) -> Result<String>;
    fn list_backups(&self, name: &str) -> Result<Vec<String>>;

    /// Optional helpers for ad-hoc file operations. Default implementations
    /// forward to the JSON codec.
    fn save_to_path(&self, book: &Book, path: &Path) -> Result<()> {
        json_backend::save_book_to_path(book, path)
    }

    fn load_from_path(&self, path: &Path) -> Result<Book> {
        json_backend::load_book_from_path(path)
    }
}

pub use json_backend::JsonStorage;

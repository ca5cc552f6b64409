use chrono::Utc;
use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use crate::{errors::PlanError, ledger::Book, utils::paths};

use super::{Result, StorageBackend};

const SNAPSHOT_EXTENSION: &str = "json";
const BACKUP_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";
const TMP_SUFFIX: &str = "tmp";
const DEFAULT_RETENTION: usize = 5;

/// JSON snapshot storage for books under a managed directory tree, with
/// timestamped backups pruned to a bounded retention.
#[derive(Clone)]
pub struct JsonStorage {
    books_dir: PathBuf,
    backups_dir: PathBuf,
    retention: usize,
}

impl JsonStorage {
    pub fn new(root: Option<PathBuf>, retention: Option<usize>) -> Result<Self> {
        let root = root.unwrap_or_else(paths::app_data_dir);
        let books_dir = paths::books_dir_in(&root);
        let backups_dir = paths::backups_dir_in(&root);
        ensure_dir(&books_dir)?;
        ensure_dir(&backups_dir)?;
        Ok(Self {
            books_dir,
            backups_dir,
            retention: retention.unwrap_or(DEFAULT_RETENTION).max(1),
        })
    }

    pub fn new_default() -> Result<Self> {
        Self::new(None, None)
    }

    pub fn book_path(&self, name: &str) -> PathBuf {
        self.books_dir
            .join(format!("{}.{}", canonical_name(name), SNAPSHOT_EXTENSION))
    }

    fn backup_dir(&self, name: &str) -> PathBuf {
        self.backups_dir.join(canonical_name(name))
    }

    fn prune_backups(&self, name: &str) -> Result<()> {
        let mut backups = self.list_backups_inner(name)?;
        while backups.len() > self.retention {
            if let Some(oldest) = backups.pop() {
                fs::remove_file(self.backup_dir(name).join(oldest))?;
            }
        }
        Ok(())
    }

    fn list_backups_inner(&self, name: &str) -> Result<Vec<String>> {
        let dir = self.backup_dir(name);
        if !dir.exists() {
            return Ok(Vec::new());
        }
        let mut entries = Vec::new();
        for entry in fs::read_dir(&dir)? {
            let path = entry?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(SNAPSHOT_EXTENSION) {
                continue;
            }
            if let Some(file_name) = path.file_name().and_then(|n| n.to_str()) {
                entries.push(file_name.to_string());
            }
        }
        // Timestamped names sort chronologically; newest first.
        entries.sort_by(|a, b| b.cmp(a));
        Ok(entries)
    }
}

impl StorageBackend for JsonStorage {
    fn save(&self, book: &Book, name: &str) -> Result<()> {
        let path = self.book_path(name);
        save_book_to_path(book, &path)?;
        tracing::info!(book = %book.name, path = %path.display(), "book saved");
        Ok(())
    }

    fn load(&self, name: &str) -> Result<Book> {
        let path = self.book_path(name);
        if !path.exists() {
            return Err(PlanError::InvalidRef(format!(
                "book `{}` not found in storage",
                name
            )));
        }
        load_book_from_path(&path)
    }

    fn backup(&self, book: &Book, name: &str, note: Option<&str>) -> Result<String> {
        let dir = self.backup_dir(name);
        ensure_dir(&dir)?;
        let timestamp = Utc::now().format(BACKUP_TIMESTAMP_FORMAT).to_string();
        let mut file_name = format!("{}_{}", canonical_name(name), timestamp);
        if let Some(label) = sanitize_note(note) {
            file_name.push('_');
            file_name.push_str(&label);
        }
        file_name.push('.');
        file_name.push_str(SNAPSHOT_EXTENSION);
        save_book_to_path(book, &dir.join(&file_name))?;
        self.prune_backups(name)?;
        Ok(file_name)
    }

    fn list_backups(&self, name: &str) -> Result<Vec<String>> {
        self.list_backups_inner(name)
    }
}

/// Serializes a book to pretty JSON, writing through a temporary file and
/// renaming so a crash cannot leave a truncated snapshot behind.
pub fn save_book_to_path(book: &Book, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    let json = serde_json::to_string_pretty(book)?;
    let tmp = tmp_path(path);
    let mut file = File::create(&tmp)?;
    file.write_all(json.as_bytes())?;
    file.flush()?;
    fs::rename(&tmp, path)?;
    Ok(())
}

pub fn load_book_from_path(path: &Path) -> Result<Book> {
    let data = fs::read_to_string(path)?;
    let book = serde_json::from_str(&data)?;
    Ok(book)
}

/// Lowercased file-system-safe form of a book name.
fn canonical_name(name: &str) -> String {
    let mut canonical = String::new();
    let mut last_dash = false;
    for ch in name.trim().chars() {
        if ch.is_ascii_alphanumeric() {
            canonical.push(ch.to_ascii_lowercase());
            last_dash = false;
        } else if !canonical.is_empty() && !last_dash {
            canonical.push('-');
            last_dash = true;
        }
    }
    let trimmed = canonical.trim_matches('-');
    if trimmed.is_empty() {
        "book".to_string()
    } else {
        trimmed.to_string()
    }
}

fn sanitize_note(note: Option<&str>) -> Option<String> {
    let raw = note?.trim();
    if raw.is_empty() {
        return None;
    }
    let canonical = canonical_name(raw);
    if canonical == "book" {
        None
    } else {
        Some(canonical)
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    }
    Ok(())
}

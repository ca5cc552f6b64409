use dirs::home_dir;
use std::{
    env,
    path::{Path, PathBuf},
};

const DEFAULT_DIR_NAME: &str = ".treasury_core";
const BOOKS_DIR: &str = "books";
const BACKUP_DIR: &str = "backups";
const CONFIG_FILE: &str = "config.json";

/// Returns the application data directory, defaulting to `~/.treasury_core`.
pub fn app_data_dir() -> PathBuf {
    if let Some(custom) = env::var_os("TREASURY_CORE_HOME") {
        return PathBuf::from(custom);
    }
    home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}

/// The managed books directory under a base directory.
pub fn books_dir_in(base: &Path) -> PathBuf {
    base.join(BOOKS_DIR)
}

/// The backup snapshots directory under a base directory.
pub fn backups_dir_in(base: &Path) -> PathBuf {
    base.join(BACKUP_DIR)
}

/// The configuration file under a base directory.
pub fn config_file_in(base: &Path) -> PathBuf {
    base.join(CONFIG_FILE)
}

/// Absolute path to the managed books directory.
pub fn books_dir() -> PathBuf {
    books_dir_in(&app_data_dir())
}

/// Base directory for backup snapshots.
pub fn backups_root() -> PathBuf {
    backups_dir_in(&app_data_dir())
}

/// Path to the local configuration file.
pub fn config_file() -> PathBuf {
    config_file_in(&app_data_dir())
}

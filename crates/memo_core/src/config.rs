//! Store configuration.
//!
//! # Responsibility
//! - Resolve where the local database lives and how long autosave waits.
//!
//! # Invariants
//! - The database file name is fixed; only its directory is configurable.
//! - Unparseable or blank environment values fall back to defaults.

use std::path::{Path, PathBuf};
use std::time::Duration;

/// Fixed database file name inside the data directory.
pub const DB_FILE_NAME: &str = "memo_app.sqlite3";
/// Quiescence window before buffered memo edits are flushed.
pub const DEFAULT_AUTOSAVE_DELAY: Duration = Duration::from_millis(1000);

const DATA_DIR_ENV: &str = "MEMO_APP_DATA_DIR";
const AUTOSAVE_MS_ENV: &str = "MEMO_APP_AUTOSAVE_MS";

/// Where the local database is kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreLocation {
    /// `DB_FILE_NAME` inside the given directory.
    File(PathBuf),
    /// Process-private database discarded when the handle closes.
    InMemory,
}

/// Local store and editor configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub location: StoreLocation,
    pub autosave_delay: Duration,
}

impl StoreConfig {
    /// File-backed configuration rooted at `data_dir`.
    pub fn file(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            location: StoreLocation::File(data_dir.into()),
            autosave_delay: DEFAULT_AUTOSAVE_DELAY,
        }
    }

    /// In-memory configuration, used by tests and smoke runs.
    pub fn in_memory() -> Self {
        Self {
            location: StoreLocation::InMemory,
            autosave_delay: DEFAULT_AUTOSAVE_DELAY,
        }
    }

    /// Resolves configuration from `MEMO_APP_DATA_DIR` and
    /// `MEMO_APP_AUTOSAVE_MS`, defaulting to the OS temp dir and one second.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let data_dir = lookup(DATA_DIR_ENV)
            .map(|raw| raw.trim().to_string())
            .filter(|value| !value.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(std::env::temp_dir);

        let autosave_delay = lookup(AUTOSAVE_MS_ENV)
            .and_then(|raw| raw.trim().parse::<u64>().ok())
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_AUTOSAVE_DELAY);

        Self {
            location: StoreLocation::File(data_dir),
            autosave_delay,
        }
    }

    /// Overrides the autosave quiescence window.
    pub fn with_autosave_delay(mut self, delay: Duration) -> Self {
        self.autosave_delay = delay;
        self
    }

    /// Full database path for file-backed stores.
    pub fn db_path(&self) -> Option<PathBuf> {
        match &self.location {
            StoreLocation::File(dir) => Some(dir.join(DB_FILE_NAME)),
            StoreLocation::InMemory => None,
        }
    }

    /// Data directory for file-backed stores.
    pub fn data_dir(&self) -> Option<&Path> {
        match &self.location {
            StoreLocation::File(dir) => Some(dir.as_path()),
            StoreLocation::InMemory => None,
        }
    }
}

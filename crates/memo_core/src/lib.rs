//! Core persistence layer for the memo app.
//! Folders group memos; both live in one local SQLite database owned by
//! `LocalStore`, and every service call goes through it.

pub mod autosave;
pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod store;

pub use autosave::{AutosaveScheduler, ContentSink};
pub use config::{StoreConfig, StoreLocation, DB_FILE_NAME, DEFAULT_AUTOSAVE_DELAY};
pub use error::{RecordKind, StoreError, StoreResult};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::folder::{Folder, FolderId};
pub use model::memo::{Memo, MemoId};
pub use repo::folder_repo::{FolderRepository, SqliteFolderRepository};
pub use repo::memo_repo::{MemoRepository, SqliteMemoRepository};
pub use service::data_service::{DataService, WipeReport};
pub use service::folder_service::{
    FolderDeleteMode, FolderDeleteReport, FolderService, DEFAULT_FOLDER_NAME,
};
pub use service::memo_service::{MemoService, DEFAULT_MEMO_TITLE};
pub use service::{ensure_rename_target, ServiceError};
pub use store::{global_store, init_global_store, LocalStore};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

//! Domain model for folders and the memos filed under them.
//!
//! # Responsibility
//! - Define the record shapes persisted in the `folders` and `memos` tables.
//! - Provide the wall-clock source used for creation/update timestamps.
//!
//! # Invariants
//! - Ids are assigned by the store and never reused within a database.
//! - `created_at` is set once and never mutated.
//! - Deletion is a hard delete; there are no tombstones.

pub mod folder;
pub mod memo;

use std::time::{SystemTime, UNIX_EPOCH};

/// Current wall-clock time in Unix epoch milliseconds.
pub(crate) fn now_epoch_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as i64)
        .unwrap_or_default()
}

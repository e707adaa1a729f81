//! Memo domain model.
//!
//! # Invariants
//! - `folder_id` should reference an existing folder, but the store does not
//!   enforce it; orphaned memos remain readable by folder id.
//! - `updated_at` never moves backwards for a given memo.

use super::folder::FolderId;
use serde::{Deserialize, Serialize};

/// Store-assigned memo identifier.
pub type MemoId = i64;

/// A text memo filed under one folder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Memo {
    pub id: MemoId,
    pub title: String,
    /// Free-form text body. May be empty.
    pub content: String,
    /// Owning folder. Not a storage-level foreign key.
    pub folder_id: FolderId,
    /// Unix epoch milliseconds. Immutable after creation.
    pub created_at: i64,
    /// Unix epoch milliseconds. Refreshed on every title/content write.
    pub updated_at: i64,
}

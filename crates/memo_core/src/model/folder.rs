//! Folder domain model.

use serde::{Deserialize, Serialize};

/// Store-assigned folder identifier.
pub type FolderId = i64;

/// A named group of memos.
///
/// Folder names are display strings and are not required to be unique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Folder {
    pub id: FolderId,
    pub name: String,
    /// Unix epoch milliseconds. Immutable after creation.
    pub created_at: i64,
}

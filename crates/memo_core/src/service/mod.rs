//! Core use-case services.
//!
//! # Responsibility
//! - Route every call through the local store so it is opened and its schema
//!   verified before the repository runs.
//! - Reject blank rename targets; names are otherwise stored as given.
//! - Map storage errors onto use-case errors.

pub mod data_service;
pub mod folder_service;
pub mod memo_service;

use crate::error::{RecordKind, StoreError};
use crate::model::folder::FolderId;
use crate::model::memo::MemoId;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Errors from folder/memo service operations.
#[derive(Debug)]
pub enum ServiceError {
    /// Name or title is blank after trim.
    InvalidDisplayName,
    /// Target folder does not exist.
    FolderNotFound(FolderId),
    /// Target memo does not exist.
    MemoNotFound(MemoId),
    /// Store or repository failure.
    Store(StoreError),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidDisplayName => write!(f, "display name must not be blank"),
            Self::FolderNotFound(id) => write!(f, "folder not found: {id}"),
            Self::MemoNotFound(id) => write!(f, "memo not found: {id}"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            _ => None,
        }
    }
}

impl From<StoreError> for ServiceError {
    fn from(value: StoreError) -> Self {
        match value {
            StoreError::NotFound {
                kind: RecordKind::Folder,
                id,
            } => Self::FolderNotFound(id),
            StoreError::NotFound {
                kind: RecordKind::Memo,
                id,
            } => Self::MemoNotFound(id),
            other => Self::Store(other),
        }
    }
}

/// Rejects a rename target that is blank after trim.
///
/// The accepted value is stored verbatim, surrounding whitespace included.
pub fn ensure_rename_target(value: &str) -> Result<(), ServiceError> {
    if value.trim().is_empty() {
        return Err(ServiceError::InvalidDisplayName);
    }
    Ok(())
}

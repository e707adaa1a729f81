//! Error taxonomy shared by the local store, repositories and services.
//!
//! # Invariants
//! - Schema corruption is repaired by the store and never surfaces here;
//!   only a failed repair (`Reset`) does.
//! - `NotFound` is returned for rename/update of absent records only; deletes
//!   of absent records succeed and reads return `None`.

use crate::db::DbError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type StoreResult<T> = Result<T, StoreError>;

/// Record collection an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Folder,
    Memo,
}

impl Display for RecordKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Folder => write!(f, "folder"),
            Self::Memo => write!(f, "memo"),
        }
    }
}

/// Failures surfaced by store and repository operations.
#[derive(Debug)]
pub enum StoreError {
    /// The local database could not be opened or bootstrapped.
    Open(DbError),
    /// Destroying and recreating the database failed.
    Reset(DbError),
    /// A read query failed in the storage engine.
    Query(rusqlite::Error),
    /// An insert, update or delete failed in the storage engine.
    Write(rusqlite::Error),
    /// The referenced record does not exist.
    NotFound { kind: RecordKind, id: i64 },
    /// Required table is missing from a connection handed to a repository.
    MissingRequiredTable(&'static str),
    /// Required column is missing from an expected table.
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl StoreError {
    /// Returns whether this error reports an absent record.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Open(err) => write!(f, "failed to open local database: {err}"),
            Self::Reset(err) => write!(f, "failed to reset local database: {err}"),
            Self::Query(err) => write!(f, "query failed: {err}"),
            Self::Write(err) => write!(f, "write failed: {err}"),
            Self::NotFound { kind, id } => write!(f, "{kind} not found: {id}"),
            Self::MissingRequiredTable(table) => {
                write!(f, "local store requires table `{table}`")
            }
            Self::MissingRequiredColumn { table, column } => write!(
                f,
                "local store requires column `{column}` in table `{table}`"
            ),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Open(err) | Self::Reset(err) => Some(err),
            Self::Query(err) | Self::Write(err) => Some(err),
            Self::NotFound { .. }
            | Self::MissingRequiredTable(_)
            | Self::MissingRequiredColumn { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Query(value)
    }
}

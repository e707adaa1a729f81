//! Repository layer contracts and SQLite implementations.
//!
//! # Responsibility
//! - Define collection-oriented data access contracts for folders and memos.
//! - Isolate SQL details from service orchestration.
//!
//! # Invariants
//! - Every repository call touches exactly one table in one implicit
//!   transaction; there is no cross-collection atomicity.
//! - Repository constructors reject connections missing required tables or
//!   columns.

pub mod folder_repo;
pub mod memo_repo;

use crate::error::{StoreError, StoreResult};
use rusqlite::Connection;

pub(crate) fn ensure_table_ready(
    conn: &Connection,
    table: &'static str,
    columns: &[&'static str],
) -> StoreResult<()> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;
    let mut present = Vec::new();
    while let Some(row) = rows.next()? {
        let name: String = row.get(1)?;
        present.push(name);
    }

    if present.is_empty() {
        return Err(StoreError::MissingRequiredTable(table));
    }

    for &column in columns {
        if !present.iter().any(|name| name == column) {
            return Err(StoreError::MissingRequiredColumn { table, column });
        }
    }

    Ok(())
}

//! Folder repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD over the `folders` table.
//!
//! # Invariants
//! - Listing is in insertion order (`id ASC`).
//! - `rename` never touches `id` or `created_at`.
//! - Deleting a folder never touches `memos`.

use crate::error::{RecordKind, StoreError, StoreResult};
use crate::model::folder::{Folder, FolderId};
use crate::model::now_epoch_ms;
use crate::repo::ensure_table_ready;
use rusqlite::{params, Connection, OptionalExtension, Row};

const FOLDER_SELECT_SQL: &str = "SELECT id, name, created_at FROM folders";

/// Repository interface for folder operations.
pub trait FolderRepository {
    /// Lists every folder in insertion order.
    fn list_all(&self) -> StoreResult<Vec<Folder>>;
    /// Loads one folder by id.
    fn get(&self, id: FolderId) -> StoreResult<Option<Folder>>;
    /// Inserts a folder stamped with the current time and returns its id.
    fn create(&self, name: &str) -> StoreResult<FolderId>;
    /// Replaces the folder name.
    fn rename(&self, id: FolderId, name: &str) -> StoreResult<()>;
    /// Removes one folder. Returns `false` when nothing was removed.
    fn delete(&self, id: FolderId) -> StoreResult<bool>;
}

/// SQLite-backed folder repository.
pub struct SqliteFolderRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteFolderRepository<'conn> {
    /// Constructs a repository from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> StoreResult<Self> {
        ensure_table_ready(conn, "folders", &["id", "name", "created_at"])?;
        Ok(Self { conn })
    }
}

impl FolderRepository for SqliteFolderRepository<'_> {
    fn list_all(&self) -> StoreResult<Vec<Folder>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{FOLDER_SELECT_SQL} ORDER BY id ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut folders = Vec::new();
        while let Some(row) = rows.next()? {
            folders.push(parse_folder_row(row)?);
        }
        Ok(folders)
    }

    fn get(&self, id: FolderId) -> StoreResult<Option<Folder>> {
        let folder = self
            .conn
            .query_row(
                &format!("{FOLDER_SELECT_SQL} WHERE id = ?1;"),
                [id],
                parse_folder_row,
            )
            .optional()?;
        Ok(folder)
    }

    fn create(&self, name: &str) -> StoreResult<FolderId> {
        self.conn
            .execute(
                "INSERT INTO folders (name, created_at) VALUES (?1, ?2);",
                params![name, now_epoch_ms()],
            )
            .map_err(StoreError::Write)?;
        Ok(self.conn.last_insert_rowid())
    }

    fn rename(&self, id: FolderId, name: &str) -> StoreResult<()> {
        let changed = self
            .conn
            .execute(
                "UPDATE folders SET name = ?2 WHERE id = ?1;",
                params![id, name],
            )
            .map_err(StoreError::Write)?;

        if changed == 0 {
            return Err(StoreError::NotFound {
                kind: RecordKind::Folder,
                id,
            });
        }

        Ok(())
    }

    fn delete(&self, id: FolderId) -> StoreResult<bool> {
        let changed = self
            .conn
            .execute("DELETE FROM folders WHERE id = ?1;", [id])
            .map_err(StoreError::Write)?;
        Ok(changed > 0)
    }
}

fn parse_folder_row(row: &Row<'_>) -> rusqlite::Result<Folder> {
    Ok(Folder {
        id: row.get("id")?,
        name: row.get("name")?,
        created_at: row.get("created_at")?,
    })
}

//! Memo repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD over the `memos` table plus lookup by owning folder.
//!
//! # Invariants
//! - Listing is in insertion order (`id ASC`).
//! - Every successful title/content write refreshes `updated_at`, even when
//!   the stored value is unchanged; `updated_at` never decreases.
//! - `folder_id` is stored as given; folder existence is not checked.

use crate::error::{RecordKind, StoreError, StoreResult};
use crate::model::folder::FolderId;
use crate::model::memo::{Memo, MemoId};
use crate::model::now_epoch_ms;
use crate::repo::ensure_table_ready;
use rusqlite::{params, Connection, OptionalExtension, Row};

const MEMO_SELECT_SQL: &str = "SELECT
    id,
    title,
    content,
    folder_id,
    created_at,
    updated_at
FROM memos";

const MEMO_COLUMNS: [&str; 6] = [
    "id",
    "title",
    "content",
    "folder_id",
    "created_at",
    "updated_at",
];

/// Repository interface for memo operations.
pub trait MemoRepository {
    /// Lists every memo in insertion order.
    fn list_all(&self) -> StoreResult<Vec<Memo>>;
    /// Lists memos whose `folder_id` equals `folder_id`.
    fn list_by_folder(&self, folder_id: FolderId) -> StoreResult<Vec<Memo>>;
    /// Loads one memo by id.
    fn get(&self, id: MemoId) -> StoreResult<Option<Memo>>;
    /// Inserts a memo with `created_at = updated_at = now` and returns its id.
    fn create(&self, folder_id: FolderId, title: &str, content: &str) -> StoreResult<MemoId>;
    /// Replaces the title and refreshes `updated_at`.
    fn rename(&self, id: MemoId, title: &str) -> StoreResult<()>;
    /// Replaces the content body and refreshes `updated_at`.
    fn update_content(&self, id: MemoId, content: &str) -> StoreResult<()>;
    /// Removes one memo. Returns `false` when nothing was removed.
    fn delete(&self, id: MemoId) -> StoreResult<bool>;
    /// Removes every memo owned by `folder_id` and returns the count.
    fn delete_by_folder(&self, folder_id: FolderId) -> StoreResult<usize>;
}

/// SQLite-backed memo repository.
pub struct SqliteMemoRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteMemoRepository<'conn> {
    /// Constructs a repository from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> StoreResult<Self> {
        ensure_table_ready(conn, "memos", &MEMO_COLUMNS)?;
        Ok(Self { conn })
    }

    fn query_memos(&self, sql: &str, folder_id: Option<FolderId>) -> StoreResult<Vec<Memo>> {
        let mut stmt = self.conn.prepare(sql)?;
        let mut rows = match folder_id {
            Some(folder_id) => stmt.query([folder_id])?,
            None => stmt.query([])?,
        };
        let mut memos = Vec::new();
        while let Some(row) = rows.next()? {
            memos.push(parse_memo_row(row)?);
        }
        Ok(memos)
    }

    fn touch_column(&self, id: MemoId, column: &'static str, value: &str) -> StoreResult<()> {
        let changed = self
            .conn
            .execute(
                &format!(
                    "UPDATE memos
                     SET
                        {column} = ?2,
                        updated_at = MAX(?3, updated_at)
                     WHERE id = ?1;"
                ),
                params![id, value, now_epoch_ms()],
            )
            .map_err(StoreError::Write)?;

        if changed == 0 {
            return Err(StoreError::NotFound {
                kind: RecordKind::Memo,
                id,
            });
        }

        Ok(())
    }
}

impl MemoRepository for SqliteMemoRepository<'_> {
    fn list_all(&self) -> StoreResult<Vec<Memo>> {
        self.query_memos(&format!("{MEMO_SELECT_SQL} ORDER BY id ASC;"), None)
    }

    fn list_by_folder(&self, folder_id: FolderId) -> StoreResult<Vec<Memo>> {
        self.query_memos(
            &format!("{MEMO_SELECT_SQL} WHERE folder_id = ?1 ORDER BY id ASC;"),
            Some(folder_id),
        )
    }

    fn get(&self, id: MemoId) -> StoreResult<Option<Memo>> {
        let memo = self
            .conn
            .query_row(
                &format!("{MEMO_SELECT_SQL} WHERE id = ?1;"),
                [id],
                parse_memo_row,
            )
            .optional()?;
        Ok(memo)
    }

    fn create(&self, folder_id: FolderId, title: &str, content: &str) -> StoreResult<MemoId> {
        let now = now_epoch_ms();
        self.conn
            .execute(
                "INSERT INTO memos (
                    title,
                    content,
                    folder_id,
                    created_at,
                    updated_at
                ) VALUES (?1, ?2, ?3, ?4, ?4);",
                params![title, content, folder_id, now],
            )
            .map_err(StoreError::Write)?;
        Ok(self.conn.last_insert_rowid())
    }

    fn rename(&self, id: MemoId, title: &str) -> StoreResult<()> {
        self.touch_column(id, "title", title)
    }

    fn update_content(&self, id: MemoId, content: &str) -> StoreResult<()> {
        self.touch_column(id, "content", content)
    }

    fn delete(&self, id: MemoId) -> StoreResult<bool> {
        let changed = self
            .conn
            .execute("DELETE FROM memos WHERE id = ?1;", [id])
            .map_err(StoreError::Write)?;
        Ok(changed > 0)
    }

    fn delete_by_folder(&self, folder_id: FolderId) -> StoreResult<usize> {
        self.conn
            .execute("DELETE FROM memos WHERE folder_id = ?1;", [folder_id])
            .map_err(StoreError::Write)
    }
}

fn parse_memo_row(row: &Row<'_>) -> rusqlite::Result<Memo> {
    Ok(Memo {
        id: row.get("id")?,
        title: row.get("title")?,
        content: row.get("content")?,
        folder_id: row.get("folder_id")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}

//! Memo use-case service.
//!
//! # Responsibility
//! - Provide memo list/get/create/rename/update/delete APIs over the local
//!   store.
//! - Serve as the autosave sink for the memo editor.
//!
//! # Invariants
//! - `update_content` has no dirty check: identical content still refreshes
//!   `updated_at`.
//! - `create` does not verify that the folder exists and accepts any title.
//! - `get` reports absence as `Ok(None)`, never as an error.

use crate::autosave::ContentSink;
use crate::model::folder::FolderId;
use crate::model::memo::{Memo, MemoId};
use crate::repo::memo_repo::{MemoRepository, SqliteMemoRepository};
use crate::service::{ensure_rename_target, ServiceError};
use crate::store::LocalStore;
use log::{debug, info};
use std::sync::Arc;

/// Title given to memos created from the memo list's "add" action.
pub const DEFAULT_MEMO_TITLE: &str = "New memo";

/// Memo service over the shared local store.
pub struct MemoService {
    store: Arc<LocalStore>,
}

impl MemoService {
    pub fn new(store: Arc<LocalStore>) -> Self {
        Self { store }
    }

    /// Lists every memo in insertion order.
    pub fn list_all(&self) -> Result<Vec<Memo>, ServiceError> {
        let memos = self
            .store
            .with_connection(|conn| SqliteMemoRepository::try_new(conn)?.list_all())?;
        Ok(memos)
    }

    /// Lists memos filed under `folder_id`.
    ///
    /// Returns an empty list when nothing matches, including when the folder
    /// itself does not exist.
    pub fn list_by_folder(&self, folder_id: FolderId) -> Result<Vec<Memo>, ServiceError> {
        let memos = self.store.with_connection(|conn| {
            SqliteMemoRepository::try_new(conn)?.list_by_folder(folder_id)
        })?;
        Ok(memos)
    }

    /// Loads one memo, or `None` when absent.
    pub fn get(&self, id: MemoId) -> Result<Option<Memo>, ServiceError> {
        let memo = self
            .store
            .with_connection(|conn| SqliteMemoRepository::try_new(conn)?.get(id))?;
        Ok(memo)
    }

    /// Creates a memo and returns its assigned id.
    pub fn create(
        &self,
        folder_id: FolderId,
        title: &str,
        content: &str,
    ) -> Result<MemoId, ServiceError> {
        let id = self.store.with_connection(|conn| {
            SqliteMemoRepository::try_new(conn)?.create(folder_id, title, content)
        })?;
        info!(
            "event=memo_create module=service status=ok memo_id={} folder_id={}",
            id, folder_id
        );
        Ok(id)
    }

    /// Creates an empty memo titled `DEFAULT_MEMO_TITLE`.
    pub fn create_default(&self, folder_id: FolderId) -> Result<MemoId, ServiceError> {
        self.create(folder_id, DEFAULT_MEMO_TITLE, "")
    }

    /// Replaces a memo title verbatim. Blank titles are rejected.
    pub fn rename(&self, id: MemoId, title: &str) -> Result<(), ServiceError> {
        ensure_rename_target(title)?;
        self.store
            .with_connection(|conn| SqliteMemoRepository::try_new(conn)?.rename(id, title))?;
        info!("event=memo_rename module=service status=ok memo_id={id}");
        Ok(())
    }

    /// Replaces a memo body verbatim.
    pub fn update_content(&self, id: MemoId, content: &str) -> Result<(), ServiceError> {
        self.store.with_connection(|conn| {
            SqliteMemoRepository::try_new(conn)?.update_content(id, content)
        })?;
        debug!(
            "event=memo_update module=service status=ok memo_id={} content_chars={}",
            id,
            content.chars().count()
        );
        Ok(())
    }

    /// Deletes a memo. Deleting an absent memo is a no-op.
    pub fn delete(&self, id: MemoId) -> Result<(), ServiceError> {
        let removed = self
            .store
            .with_connection(|conn| SqliteMemoRepository::try_new(conn)?.delete(id))?;
        info!("event=memo_delete module=service status=ok memo_id={id} removed={removed}");
        Ok(())
    }
}

impl ContentSink for MemoService {
    type Error = ServiceError;

    fn save_content(&self, memo_id: MemoId, content: &str) -> Result<(), Self::Error> {
        self.update_content(memo_id, content)
    }
}

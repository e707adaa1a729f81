//! Folder use-case service.
//!
//! # Responsibility
//! - Provide folder list/create/rename/delete APIs over the local store.
//! - Apply the configured cascade policy when a folder is deleted.
//!
//! # Invariants
//! - Names are stored exactly as given; only a blank rename is rejected.
//! - `rename` preserves `id` and `created_at`.
//! - Deleting an absent folder is a no-op.
//! - `FolderDeleteMode::KeepMemos` leaves owned memos in place (orphaned).

use crate::model::folder::{Folder, FolderId};
use crate::repo::folder_repo::{FolderRepository, SqliteFolderRepository};
use crate::repo::memo_repo::{MemoRepository, SqliteMemoRepository};
use crate::service::{ensure_rename_target, ServiceError};
use crate::store::LocalStore;
use log::info;
use std::sync::Arc;

/// Name given to folders created from the folder list's "add" action.
pub const DEFAULT_FOLDER_NAME: &str = "New folder";

/// Cascade policy applied when deleting a folder.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FolderDeleteMode {
    /// Remove only the folder record; its memos stay, still listable by id.
    #[default]
    KeepMemos,
    /// Remove the folder's memos first, then the folder.
    DeleteMemos,
}

/// Outcome of one folder deletion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FolderDeleteReport {
    /// Whether a folder record was actually removed.
    pub folder_removed: bool,
    /// Number of memos removed by the cascade (0 for `KeepMemos`).
    pub memos_removed: usize,
}

/// Folder service over the shared local store.
pub struct FolderService {
    store: Arc<LocalStore>,
}

impl FolderService {
    pub fn new(store: Arc<LocalStore>) -> Self {
        Self { store }
    }

    /// Lists all folders in insertion order.
    pub fn list_all(&self) -> Result<Vec<Folder>, ServiceError> {
        let folders = self
            .store
            .with_connection(|conn| SqliteFolderRepository::try_new(conn)?.list_all())?;
        Ok(folders)
    }

    /// Loads one folder, or `None` when absent.
    pub fn get(&self, id: FolderId) -> Result<Option<Folder>, ServiceError> {
        let folder = self
            .store
            .with_connection(|conn| SqliteFolderRepository::try_new(conn)?.get(id))?;
        Ok(folder)
    }

    /// Creates a folder and returns its assigned id.
    pub fn create(&self, name: &str) -> Result<FolderId, ServiceError> {
        let id = self
            .store
            .with_connection(|conn| SqliteFolderRepository::try_new(conn)?.create(name))?;
        info!("event=folder_create module=service status=ok folder_id={id}");
        Ok(id)
    }

    /// Creates a folder named `DEFAULT_FOLDER_NAME`.
    pub fn create_default(&self) -> Result<FolderId, ServiceError> {
        self.create(DEFAULT_FOLDER_NAME)
    }

    /// Renames an existing folder. Blank names are rejected.
    pub fn rename(&self, id: FolderId, name: &str) -> Result<(), ServiceError> {
        ensure_rename_target(name)?;
        self.store
            .with_connection(|conn| SqliteFolderRepository::try_new(conn)?.rename(id, name))?;
        info!("event=folder_rename module=service status=ok folder_id={id}");
        Ok(())
    }

    /// Deletes a folder using the given cascade policy.
    ///
    /// With `DeleteMemos`, memos are removed in a separate store call before
    /// the folder; a failure between the two leaves the folder in place.
    pub fn delete(
        &self,
        id: FolderId,
        mode: FolderDeleteMode,
    ) -> Result<FolderDeleteReport, ServiceError> {
        let memos_removed = match mode {
            FolderDeleteMode::KeepMemos => 0,
            FolderDeleteMode::DeleteMemos => self.store.with_connection(|conn| {
                SqliteMemoRepository::try_new(conn)?.delete_by_folder(id)
            })?,
        };

        let folder_removed = self
            .store
            .with_connection(|conn| SqliteFolderRepository::try_new(conn)?.delete(id))?;

        info!(
            "event=folder_delete module=service status=ok folder_id={} removed={} memos_removed={}",
            id, folder_removed, memos_removed
        );
        Ok(FolderDeleteReport {
            folder_removed,
            memos_removed,
        })
    }
}

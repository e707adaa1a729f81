//! Whole-database maintenance for the settings screen.
//!
//! # Invariants
//! - Wiping deletes records one by one (memos first, then folders); it never
//!   drops tables or the database file.
//! - A failure stops the wipe and leaves already-deleted records deleted.

use crate::service::folder_service::{FolderDeleteMode, FolderService};
use crate::service::memo_service::MemoService;
use crate::service::ServiceError;
use crate::store::LocalStore;
use log::{error, info};
use std::sync::Arc;

/// Counts of records removed by `DataService::wipe_all`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WipeReport {
    pub memos_deleted: usize,
    pub folders_deleted: usize,
}

/// Destructive data-management actions.
pub struct DataService {
    folders: FolderService,
    memos: MemoService,
}

impl DataService {
    pub fn new(store: Arc<LocalStore>) -> Self {
        Self {
            folders: FolderService::new(Arc::clone(&store)),
            memos: MemoService::new(store),
        }
    }

    /// Deletes every memo, then every folder.
    pub fn wipe_all(&self) -> Result<WipeReport, ServiceError> {
        let result = self.wipe_records();
        match &result {
            Ok(report) => info!(
                "event=data_wipe module=service status=ok memos_deleted={} folders_deleted={}",
                report.memos_deleted, report.folders_deleted
            ),
            Err(err) => error!("event=data_wipe module=service status=error error={err}"),
        }
        result
    }

    fn wipe_records(&self) -> Result<WipeReport, ServiceError> {
        let mut report = WipeReport::default();

        for memo in self.memos.list_all()? {
            self.memos.delete(memo.id)?;
            report.memos_deleted += 1;
        }

        for folder in self.folders.list_all()? {
            self.folders.delete(folder.id, FolderDeleteMode::KeepMemos)?;
            report.folders_deleted += 1;
        }

        Ok(report)
    }
}

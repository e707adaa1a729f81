//! Local store: owner of the single database handle.
//!
//! # Responsibility
//! - Open (or create) the local database lazily and keep the handle for the
//!   store's lifetime.
//! - Guarantee the `folders` and `memos` tables exist before any repository
//!   operation runs.
//! - Recover from a partial schema by destroying and recreating the database.
//!
//! # Invariants
//! - At most one live connection per store; callers are serialized by a mutex.
//! - Missing tables are repaired by `reset()`; every other open failure is
//!   surfaced as `StoreError::Open` without retry.
//! - `reset()` is destructive: all records are lost.

use crate::config::{StoreConfig, StoreLocation, DB_FILE_NAME};
use crate::db::{missing_required_tables, open_db, open_db_in_memory, DbError};
use crate::error::{StoreError, StoreResult};
use log::{error, info, warn};
use once_cell::sync::OnceCell;
use rusqlite::Connection;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Instant;

const SIDECAR_SUFFIXES: [&str; 3] = ["-wal", "-shm", "-journal"];

static GLOBAL_STORE: OnceCell<Arc<LocalStore>> = OnceCell::new();

/// Lazily opened, self-repairing handle over the local database.
#[derive(Debug)]
pub struct LocalStore {
    config: StoreConfig,
    conn: Mutex<Option<Connection>>,
}

impl LocalStore {
    /// Creates an unopened store. Nothing touches disk until first use.
    pub fn new(config: StoreConfig) -> Self {
        Self {
            config,
            conn: Mutex::new(None),
        }
    }

    /// Creates an unopened in-memory store.
    pub fn in_memory() -> Self {
        Self::new(StoreConfig::in_memory())
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Opens the database if needed and verifies its schema.
    ///
    /// # Errors
    /// - `Open` when the engine cannot open or migrate the database.
    /// - `Reset` when a schema repair was needed and deletion failed.
    pub fn open(&self) -> StoreResult<()> {
        let mut slot = self.lock();
        self.ready_connection(&mut slot)?;
        Ok(())
    }

    /// Checks that both required tables exist, resetting the database when
    /// either is missing.
    ///
    /// Returns `true` when a reset was performed.
    pub fn ensure_schema(&self) -> StoreResult<bool> {
        let mut slot = self.lock();
        self.repair_schema(&mut slot)
    }

    /// Irrecoverably deletes the database, then opens a fresh empty one.
    pub fn reset(&self) -> StoreResult<()> {
        let mut slot = self.lock();
        self.reset_locked(&mut slot)
    }

    /// Runs `op` against a ready connection.
    ///
    /// The store is opened and its schema verified first, so `op` always sees
    /// both required tables. The store lock is held for the duration of `op`.
    pub fn with_connection<T>(
        &self,
        op: impl FnOnce(&Connection) -> StoreResult<T>,
    ) -> StoreResult<T> {
        let mut slot = self.lock();
        let conn = self.ready_connection(&mut slot)?;
        op(conn)
    }

    /// Releases the live handle. The next operation reopens it.
    pub fn close(&self) {
        let mut slot = self.lock();
        if slot.take().is_some() {
            info!("event=store_close module=store status=ok");
        }
    }

    /// Returns whether a connection is currently held.
    pub fn is_open(&self) -> bool {
        self.lock().is_some()
    }

    fn lock(&self) -> MutexGuard<'_, Option<Connection>> {
        self.conn
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn ready_connection<'slot>(
        &self,
        slot: &'slot mut Option<Connection>,
    ) -> StoreResult<&'slot Connection> {
        self.repair_schema(slot)?;
        Ok(&*self.open_if_needed(slot)?)
    }

    fn open_if_needed<'slot>(
        &self,
        slot: &'slot mut Option<Connection>,
    ) -> StoreResult<&'slot mut Connection> {
        let conn = match slot.take() {
            Some(conn) => conn,
            None => self.connect().map_err(StoreError::Open)?,
        };
        Ok(slot.insert(conn))
    }

    fn repair_schema(&self, slot: &mut Option<Connection>) -> StoreResult<bool> {
        let conn = self.open_if_needed(slot)?;
        let missing = missing_required_tables(conn).map_err(StoreError::Open)?;
        if missing.is_empty() {
            return Ok(false);
        }

        warn!(
            "event=schema_check module=store status=corrupt missing_tables={}",
            missing.join(",")
        );
        self.reset_locked(slot)?;
        Ok(true)
    }

    fn reset_locked(&self, slot: &mut Option<Connection>) -> StoreResult<()> {
        let started_at = Instant::now();
        info!(
            "event=store_reset module=store status=start mode={}",
            self.mode()
        );

        if let Some(conn) = slot.take() {
            if let Err((conn, err)) = conn.close() {
                *slot = Some(conn);
                error!(
                    "event=store_reset module=store status=error error_code=close_failed error={}",
                    err
                );
                return Err(StoreError::Reset(err.into()));
            }
        }

        if let Some(path) = self.config.db_path() {
            if let Err(err) = delete_database_files(&path) {
                error!(
                    "event=store_reset module=store status=error error_code=delete_failed error={}",
                    err
                );
                return Err(StoreError::Reset(err));
            }
        }

        *slot = Some(self.connect().map_err(StoreError::Open)?);
        info!(
            "event=store_reset module=store status=ok duration_ms={}",
            started_at.elapsed().as_millis()
        );
        Ok(())
    }

    fn connect(&self) -> Result<Connection, DbError> {
        match &self.config.location {
            StoreLocation::InMemory => open_db_in_memory(),
            StoreLocation::File(dir) => {
                std::fs::create_dir_all(dir)?;
                open_db(dir.join(DB_FILE_NAME))
            }
        }
    }

    fn mode(&self) -> &'static str {
        match self.config.location {
            StoreLocation::InMemory => "memory",
            StoreLocation::File(_) => "file",
        }
    }
}

impl Drop for LocalStore {
    fn drop(&mut self) {
        self.close();
    }
}

/// Installs the process-wide store.
///
/// Calling this repeatedly with the same configuration is idempotent;
/// a different configuration is rejected.
pub fn init_global_store(config: StoreConfig) -> Result<Arc<LocalStore>, String> {
    let store = GLOBAL_STORE.get_or_init(|| Arc::new(LocalStore::new(config.clone())));
    if store.config() != &config {
        return Err(format!(
            "store already initialized with {:?}; refusing to switch to {:?}",
            store.config().location,
            config.location
        ));
    }
    Ok(Arc::clone(store))
}

/// Returns the process-wide store, if installed.
pub fn global_store() -> Option<Arc<LocalStore>> {
    GLOBAL_STORE.get().cloned()
}

fn delete_database_files(path: &Path) -> Result<(), DbError> {
    let mut targets = vec![path.to_path_buf()];
    for suffix in SIDECAR_SUFFIXES {
        let mut sidecar = path.as_os_str().to_owned();
        sidecar.push(suffix);
        targets.push(PathBuf::from(sidecar));
    }

    for target in targets {
        match std::fs::remove_file(&target) {
            Ok(()) => {}
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
            Err(err) => return Err(err.into()),
        }
    }
    Ok(())
}

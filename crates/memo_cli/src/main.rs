//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `memo_core` linkage and that the configured store opens.
//! - Print a deterministic status summary for quick local sanity checks.

use memo_core::{
    default_log_level, init_global_store, init_logging, FolderService, MemoService, StoreConfig,
};
use std::process::ExitCode;

fn main() -> ExitCode {
    println!("memo_core ping={}", memo_core::ping());
    println!("memo_core version={}", memo_core::core_version());

    let config = StoreConfig::from_env();
    if let Some(data_dir) = config.data_dir() {
        let log_dir = data_dir.join("logs");
        if let Err(err) = init_logging(default_log_level(), &log_dir.to_string_lossy()) {
            eprintln!("logging disabled: {err}");
        }
    }

    match print_store_status(config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("event=cli_status module=cli status=error error={err}");
            eprintln!("store check failed: {err}");
            ExitCode::FAILURE
        }
    }
}

fn print_store_status(config: StoreConfig) -> Result<(), Box<dyn std::error::Error>> {
    let db_path = config.db_path();
    let store = init_global_store(config)?;
    store.open()?;

    let folders = FolderService::new(store.clone()).list_all()?;
    let memos = MemoService::new(store).list_all()?;

    if let Some(path) = db_path {
        println!("store path={}", path.display());
    }
    println!("store folders={} memos={}", folders.len(), memos.len());
    Ok(())
}

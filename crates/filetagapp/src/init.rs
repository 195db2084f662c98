//! # Store Resolution
//!
//! [`initialize`] turns a loaded [`FiletagConfig`] into a ready [`FiletagContext`].
//!
//! The record file is chosen in this order:
//! 1. `store_override` (the CLI `--store` flag).
//! 2. `store_path` from the configuration (which already includes `FILETAG_STORE`).
//! 3. `records.json` in the OS data directory (via the `directories` crate).
//!
//! A path naming an existing directory means `records.json` inside it. Nothing is
//! created here: the file and its directory appear on the first write, so
//! read-only commands against a fresh location see an empty store.

use crate::api::FiletagApi;
use crate::config::{default_data_dir, FiletagConfig};
use crate::error::Result;
use crate::store::fs_backend::{FileStore, FsBackend, RECORDS_FILENAME};
use crate::store::RecordStore;
use log::debug;
use std::path::PathBuf;

pub struct FiletagContext {
    pub api: FiletagApi<FileStore>,
    pub config: FiletagConfig,
    pub store_path: PathBuf,
}

/// Resolve the record file for `config`, honoring an explicit override.
pub fn resolve_store_path(
    config: &FiletagConfig,
    store_override: Option<PathBuf>,
) -> Result<PathBuf> {
    let path = match store_override.or_else(|| config.store_path.clone()) {
        Some(path) => path,
        None => default_data_dir()?.join(RECORDS_FILENAME),
    };
    if path.is_dir() {
        return Ok(path.join(RECORDS_FILENAME));
    }
    Ok(path)
}

pub fn initialize(config: FiletagConfig, store_override: Option<PathBuf>) -> Result<FiletagContext> {
    let store_path = resolve_store_path(&config, store_override)?;
    debug!(
        "using store {} (read-only: {})",
        store_path.display(),
        config.read_only
    );

    let store = RecordStore::with_backend(FsBackend::new(store_path.clone()))
        .read_only(config.read_only);
    let api = FiletagApi::new(store).with_walk_options(config.walk_options());

    Ok(FiletagContext {
        api,
        config,
        store_path,
    })
}

//! # Storage Layer
//!
//! This module defines the storage abstraction for filetag. The [`MetadataStore`]
//! trait is what the query engine and commands talk to; it is keyed by canonical
//! path and stores one [`Record`] per tracked file.
//!
//! ## Store vs Backend
//!
//! Storage is split in two layers:
//! 1. **[`StorageBackend`]**: raw I/O. Loads and saves the full ordered record
//!    list. Knows *where* and *how* bytes are kept, nothing about merging.
//! 2. **[`RecordStore`]**: the [`MetadataStore`] implementation. Owns the merge
//!    rules, ordering guarantees and the read-only switch, over any backend.
//!
//! ## Merge-Upsert
//!
//! `upsert(path, new)` creates a record holding exactly `new`, or merges into
//! the existing record: keys in `new` overwrite, keys absent from `new` are
//! kept. A write that changes nothing leaves the record (including
//! `updated_at`) untouched, so repeating an `add` is idempotent.
//!
//! ## Ordering
//!
//! Records are kept in creation order. `scan` yields them in that order, which
//! makes `find_one` deterministic: the first match is the oldest matching record.
//!
//! ## Implementations
//!
//! - [`fs_backend::FsBackend`]: production JSON file with atomic writes.
//! - [`mem_backend::MemBackend`]: in-memory, for tests, with failure injection.
//!
//! ## Storage Layout
//!
//! ```text
//! <data_dir>/
//! └── records.json   # JSON array of records, creation order
//! ```
//!
//! Each record looks like:
//!
//! ```json
//! {
//!   "path": "/data/a.csv",
//!   "metadata": { "group": "train", "count": 12 },
//!   "created_at": "2024-05-01T10:00:00Z",
//!   "updated_at": "2024-05-01T10:00:00Z"
//! }
//! ```
//!
//! The store expects at most one writer process at a time; there is no locking.

use crate::attributes::Metadata;
use crate::error::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub mod backend;
pub mod fs_backend;
pub mod mem_backend;
pub mod record_store;

pub use backend::StorageBackend;
pub use record_store::RecordStore;

/// One tracked file as persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub path: PathBuf,
    pub metadata: Metadata,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Record {
    pub fn new(path: PathBuf, metadata: Metadata) -> Self {
        let now = Utc::now();
        Self {
            path,
            metadata,
            created_at: now,
            updated_at: now,
        }
    }
}

/// What an upsert did to the stored record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    Created,
    Updated,
    Unchanged,
}

/// Findings of a consistency check over the stored records.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DoctorReport {
    /// Records whose file no longer exists on disk.
    pub missing_files: Vec<PathBuf>,
    /// Records sharing a path with an earlier record.
    pub duplicate_records: usize,
    /// Records whose path is not absolute.
    pub relative_paths: Vec<PathBuf>,
    /// Whether the findings were repaired.
    pub fixed: bool,
}

impl DoctorReport {
    pub fn is_clean(&self) -> bool {
        self.missing_files.is_empty()
            && self.duplicate_records == 0
            && self.relative_paths.is_empty()
    }
}

/// Durable path → metadata persistence.
///
/// Paths are opaque keys here: callers canonicalize before calling in.
///
/// A hand-edited or merged store file can hold several records for one path.
/// The first is authoritative: writes merge into it, and later duplicates only
/// supply fields it lacks. Lookups see that folded view, removals apply to
/// every duplicate, and `doctor --fix` persists the fold.
pub trait MetadataStore {
    /// Create or merge-update the record for `path`.
    fn upsert(&mut self, path: &Path, metadata: &Metadata) -> Result<UpsertOutcome>;

    /// Upsert several records with a single load/save cycle.
    fn upsert_many(&mut self, items: &[(&Path, Metadata)]) -> Result<Vec<UpsertOutcome>> {
        items
            .iter()
            .map(|(path, metadata)| self.upsert(path, metadata))
            .collect()
    }

    /// Exact lookup.
    fn get(&self, path: &Path) -> Result<Option<Metadata>> {
        Ok(self.get_record(path)?.map(|r| r.metadata))
    }

    /// Exact lookup, including timestamps.
    fn get_record(&self, path: &Path) -> Result<Option<Record>>;

    /// All records satisfying `predicate`, in creation order.
    fn scan(&self, predicate: &dyn Fn(&Record) -> bool) -> Result<Vec<Record>>;

    /// Delete the record for `path`. Returns false if there was none.
    fn remove(&mut self, path: &Path) -> Result<bool>;

    /// Delete several records with a single load/save cycle. One flag per
    /// input path, true where a record existed.
    fn remove_many(&mut self, paths: &[&Path]) -> Result<Vec<bool>> {
        paths.iter().map(|path| self.remove(path)).collect()
    }

    /// Drop `fields` from the record for `path`. Returns true if any were present.
    fn remove_fields(&mut self, path: &Path, fields: &[String]) -> Result<bool>;

    /// Drop `fields` from several records with a single load/save cycle.
    /// One entry per input path: the remaining metadata where a field was
    /// removed, `None` where nothing changed.
    fn remove_fields_many(
        &mut self,
        paths: &[&Path],
        fields: &[String],
    ) -> Result<Vec<Option<Metadata>>> {
        let mut remaining = Vec::with_capacity(paths.len());
        for path in paths {
            if self.remove_fields(path, fields)? {
                remaining.push(Some(self.get(path)?.unwrap_or_default()));
            } else {
                remaining.push(None);
            }
        }
        Ok(remaining)
    }

    /// Number of stored records.
    fn len(&self) -> Result<usize> {
        Ok(self.scan(&|_| true)?.len())
    }

    fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }

    /// Check stored records against the filesystem. With `fix`, drop
    /// missing and relative records and fold duplicates into the first.
    fn doctor(&mut self, fix: bool) -> Result<DoctorReport>;

    /// Human-readable location of the underlying storage.
    fn location(&self) -> PathBuf;

    fn is_read_only(&self) -> bool;
}

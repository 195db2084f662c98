//! # Command Layer
//!
//! This module contains the **core business logic** of filetag. Each command lives in
//! its own submodule and implements plain Rust functions over a [`MetadataStore`].
//!
//! ## Role and Responsibilities
//!
//! Commands are where the real work happens:
//! - Resolve targets (files, walked directories, tracked records)
//! - Apply merge rules through the store
//! - Return structured [`CmdResult`] values with affected files and messages
//! - Stay completely UI-agnostic
//!
//! ## What Commands Do NOT Do
//!
//! - **Terminal I/O**: no stdout, stderr or formatting
//! - **Argument parsing**: that is the CLI layer's job
//! - **Exit codes**: return `Result`, let the caller decide
//!
//! ## Testing Strategy
//!
//! Command tests use [`InMemoryStore`](crate::store::mem_backend::InMemoryStore)
//! so they run without touching a record file. Tests that need real files on
//! disk (directory walks, doctor) use `tempfile`.
//!
//! ## Command Modules
//!
//! - [`add`]: start tracking files, merging their metadata
//! - [`tag`]: set a field on a group of files and store it
//! - [`untag`]: remove fields from stored records
//! - [`delete`]: stop tracking files
//! - [`find`]: query stored records
//! - [`list`]: tracked files under a path, or one file's record
//! - [`status`]: configuration and store health
//! - [`doctor`]: detect and repair records for vanished files
//! - [`helpers`]: target resolution shared by the commands above
//!
//! [`MetadataStore`]: crate::store::MetadataStore

use crate::model::File;
use crate::store::{DoctorReport, Record};
use serde::Serialize;

pub mod add;
pub mod delete;
pub mod doctor;
pub mod find;
pub mod helpers;
pub mod list;
pub mod status;
pub mod tag;
pub mod untag;

pub use status::StoreStatus;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, Serialize)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    /// Files whose stored record was created, changed or removed.
    pub affected: Vec<File>,
    /// Files to display (find, list).
    pub listed: Vec<File>,
    /// Full records, with timestamps, when a single file is inspected.
    pub records: Vec<Record>,
    pub messages: Vec<CmdMessage>,
    pub report: Option<DoctorReport>,
    pub status: Option<StoreStatus>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_listed(mut self, files: Vec<File>) -> Self {
        self.listed = files;
        self
    }

    pub fn with_affected(mut self, files: Vec<File>) -> Self {
        self.affected = files;
        self
    }
}

/// "1 file" / "3 files".
pub(crate) fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{} {}", count, noun)
    } else {
        format!("{} {}s", count, noun)
    }
}

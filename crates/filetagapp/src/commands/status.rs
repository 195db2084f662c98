use crate::commands::{plural, CmdMessage, CmdResult};
use crate::config::FiletagConfig;
use crate::error::Result;
use crate::store::MetadataStore;
use serde::Serialize;
use std::path::PathBuf;

/// Snapshot of where the store lives and whether it can be read.
#[derive(Debug, Clone, Serialize)]
pub struct StoreStatus {
    pub location: PathBuf,
    pub read_only: bool,
    /// `None` when the store could not be read.
    pub records: Option<usize>,
    pub follow_links: bool,
    pub include_hidden: bool,
}

/// Report configuration and probe the store.
///
/// A store that cannot be read is reported through an error message rather
/// than an `Err`, so the rest of the status is still shown.
pub fn run<S: MetadataStore + ?Sized>(store: &S, config: &FiletagConfig) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    let records = match store.len() {
        Ok(count) => {
            result.add_message(CmdMessage::success(format!(
                "Store is readable ({} tracked)",
                plural(count, "file")
            )));
            Some(count)
        }
        Err(e) => {
            result.add_message(CmdMessage::error(format!("Store is not readable: {}", e)));
            None
        }
    };

    result.status = Some(StoreStatus {
        location: store.location(),
        read_only: store.is_read_only(),
        records,
        follow_links: config.follow_links,
        include_hidden: config.include_hidden,
    });
    Ok(result)
}

use crate::attributes::Query;
use crate::commands::helpers::absolutize;
use crate::commands::{plural, CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::File;
use crate::query;
use crate::store::MetadataStore;
use std::path::Path;

/// Tracked files at or under `path`.
///
/// When `path` is itself a tracked file, its full record (with timestamps) is
/// returned in `records` as well.
pub fn run<S: MetadataStore + ?Sized>(store: &S, path: &Path) -> Result<CmdResult> {
    let target = absolutize(path)?;
    let mut result = CmdResult::default();

    if let Some(record) = store.get_record(&target)? {
        result
            .listed
            .push(File::from_record(record.path.clone(), record.metadata.clone()));
        result.records.push(record);
        return Ok(result);
    }

    if target.is_file() {
        result.add_message(CmdMessage::info(format!(
            "{} is not tracked",
            target.display()
        )));
        return Ok(result);
    }

    let found = query::find(store, &Query::under(&target))?;
    if found.is_empty() {
        result.add_message(CmdMessage::info(format!(
            "No tracked files under {}",
            target.display()
        )));
    } else {
        result.add_message(CmdMessage::info(format!(
            "{} tracked under {}",
            plural(found.len(), "file"),
            target.display()
        )));
    }
    Ok(result.with_listed(found.into_iter().collect()))
}

use crate::commands::{plural, CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::Collection;
use crate::store::MetadataStore;
use std::path::Path;

/// Stop tracking every member of `target`. The files themselves are untouched.
pub fn run<S: MetadataStore + ?Sized>(store: &mut S, target: &Collection) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    let paths: Vec<&Path> = target.iter().map(|f| f.path()).collect();
    let removed = store.remove_many(&paths)?;
    for (file, was_tracked) in target.iter().zip(removed) {
        if was_tracked {
            result.affected.push(file.clone());
        }
    }

    if result.affected.is_empty() {
        result.add_message(CmdMessage::info("Nothing to delete: no tracked files"));
    } else {
        result.add_message(CmdMessage::success(format!(
            "Stopped tracking {}",
            plural(result.affected.len(), "file")
        )));
    }
    Ok(result)
}

use crate::commands::{plural, CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::{Collection, File};
use crate::store::MetadataStore;
use std::path::Path;

/// Remove `fields` from the stored record of every member of `target`.
pub fn run<S: MetadataStore + ?Sized>(
    store: &mut S,
    target: &Collection,
    fields: &[String],
) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    let paths: Vec<&Path> = target.iter().map(|f| f.path()).collect();
    let remaining = store.remove_fields_many(&paths, fields)?;
    for (path, metadata) in paths.into_iter().zip(remaining) {
        if let Some(metadata) = metadata {
            result
                .affected
                .push(File::from_record(path.to_path_buf(), metadata));
        }
    }

    if result.affected.is_empty() {
        result.add_message(CmdMessage::info(format!(
            "No stored {} to remove",
            if fields.len() == 1 { "field" } else { "fields" }
        )));
    } else {
        result.add_message(CmdMessage::success(format!(
            "Removed {} from {}",
            fields.join(", "),
            plural(result.affected.len(), "file")
        )));
    }
    Ok(result)
}

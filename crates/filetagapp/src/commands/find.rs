use crate::attributes::Query;
use crate::commands::{plural, CmdMessage, CmdResult};
use crate::error::Result;
use crate::query;
use crate::store::MetadataStore;

pub fn run<S: MetadataStore + ?Sized>(store: &S, query: &Query) -> Result<CmdResult> {
    let found = query::find(store, query)?;
    let mut result = CmdResult::default();
    if found.is_empty() {
        result.add_message(CmdMessage::info(format!("No files match {}", query)));
    } else {
        result.add_message(CmdMessage::info(format!(
            "{} match {}",
            plural(found.len(), "file"),
            query
        )));
    }
    Ok(result.with_listed(found.into_iter().collect()))
}

use crate::commands::{plural, CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::{File, Taggable};
use crate::store::{MetadataStore, UpsertOutcome};

/// Write `item` to the store.
///
/// Group fields are resolved into each member first (member values win),
/// then every file is merge-upserted in one batch.
pub fn run<S, T>(store: &mut S, item: &T) -> Result<CmdResult>
where
    S: MetadataStore + ?Sized,
    T: Taggable + ?Sized,
{
    let resolved = item.resolved();
    let outcomes = store.upsert_many(&resolved)?;

    let mut result = CmdResult::default();
    let (mut created, mut updated, mut unchanged) = (0, 0, 0);
    for ((path, metadata), outcome) in resolved.into_iter().zip(outcomes) {
        match outcome {
            UpsertOutcome::Created => created += 1,
            UpsertOutcome::Updated => updated += 1,
            UpsertOutcome::Unchanged => {
                unchanged += 1;
                continue;
            }
        }
        result
            .affected
            .push(File::from_record(path.to_path_buf(), metadata));
    }

    if created > 0 {
        result.add_message(CmdMessage::success(format!(
            "Tracking {}",
            plural(created, "new file")
        )));
    }
    if updated > 0 {
        result.add_message(CmdMessage::success(format!(
            "Updated {}",
            plural(updated, "file")
        )));
    }
    if unchanged > 0 {
        result.add_message(CmdMessage::info(format!(
            "{} already up to date",
            plural(unchanged, "file")
        )));
    }
    Ok(result)
}

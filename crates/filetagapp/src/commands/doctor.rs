use crate::commands::{plural, CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::MetadataStore;

pub fn run<S: MetadataStore + ?Sized>(store: &mut S, fix: bool) -> Result<CmdResult> {
    let report = store.doctor(fix)?;
    let mut result = CmdResult::default();

    if report.is_clean() {
        result.add_message(CmdMessage::success("No inconsistencies found."));
        result.report = Some(report);
        return Ok(result);
    }

    if report.fixed {
        result.add_message(CmdMessage::warning("Inconsistencies found and fixed:"));
    } else {
        result.add_message(CmdMessage::warning(
            "Inconsistencies found (run with --fix to repair):",
        ));
    }
    if !report.missing_files.is_empty() {
        result.add_message(CmdMessage::info(format!(
            "  - {} tracked but missing from disk.",
            plural(report.missing_files.len(), "file")
        )));
        for path in &report.missing_files {
            result.add_message(CmdMessage::info(format!("      {}", path.display())));
        }
    }
    if report.duplicate_records > 0 {
        result.add_message(CmdMessage::info(format!(
            "  - {} for an already tracked path.",
            plural(report.duplicate_records, "duplicate record")
        )));
    }
    if !report.relative_paths.is_empty() {
        result.add_message(CmdMessage::info(format!(
            "  - {} with a relative path.",
            plural(report.relative_paths.len(), "record")
        )));
    }

    result.report = Some(report);
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attributes::Metadata;
    use crate::store::mem_backend::InMemoryStore;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    #[test]
    fn doctor_no_inconsistencies() {
        let mut store = InMemoryStore::new();

        let result = run(&mut store, false).unwrap();

        assert_eq!(result.messages.len(), 1);
        assert!(result.messages[0].content.contains("No inconsistencies"));
    }

    #[test]
    fn doctor_reports_vanished_files_without_fix() {
        let mut store = InMemoryStore::new();
        store
            .upsert(Path::new("/definitely/not/here.csv"), &Metadata::new())
            .unwrap();

        let result = run(&mut store, false).unwrap();

        assert!(result.messages[0].content.contains("--fix"));
        assert!(result
            .messages
            .iter()
            .any(|m| m.content.contains("1 file tracked but missing")));
        assert_eq!(store.len().unwrap(), 1);
    }

    #[test]
    fn doctor_fix_removes_vanished_files() {
        let dir = TempDir::new().unwrap();
        let kept = fs::canonicalize(dir.path()).unwrap().join("kept.csv");
        fs::write(&kept, "x").unwrap();

        let mut store = InMemoryStore::new();
        store.upsert(&kept, &Metadata::new()).unwrap();
        store
            .upsert(Path::new("/definitely/not/here.csv"), &Metadata::new())
            .unwrap();

        let result = run(&mut store, true).unwrap();

        assert!(result.report.unwrap().fixed);
        assert!(result.messages[0].content.contains("fixed"));
        assert_eq!(store.len().unwrap(), 1);
        assert!(store.get(&kept).unwrap().is_some());
    }
}

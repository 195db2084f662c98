use super::backend::StorageBackend;
use super::{DoctorReport, MetadataStore, Record, UpsertOutcome};
use crate::attributes::Metadata;
use crate::error::{FiletagError, Result};
use chrono::{DateTime, Utc};
use log::{debug, info, warn};
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

pub struct RecordStore<B: StorageBackend> {
    /// The underlying storage backend.
    /// Exposed as pub(crate) for testing and internal access only.
    pub(crate) backend: B,
    read_only: bool,
}

impl<B: StorageBackend> RecordStore<B> {
    pub fn with_backend(backend: B) -> Self {
        Self {
            backend,
            read_only: false,
        }
    }

    /// Reject every write with `ReadOnly`.
    pub fn read_only(mut self, read_only: bool) -> Self {
        self.read_only = read_only;
        self
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    fn check_writable(&self) -> Result<()> {
        if self.read_only {
            let location = self.backend.location();
            warn!("rejected write to read-only store {}", location.display());
            return Err(FiletagError::ReadOnly(location));
        }
        Ok(())
    }
}

/// Apply one merge-upsert to an in-memory record list.
fn apply_upsert(
    records: &mut Vec<Record>,
    index: &mut HashMap<PathBuf, usize>,
    path: &Path,
    metadata: &Metadata,
    now: DateTime<Utc>,
) -> UpsertOutcome {
    match index.get(path) {
        Some(&pos) => {
            let record = &mut records[pos];
            if record.metadata.merge_from(metadata) {
                record.updated_at = now;
                UpsertOutcome::Updated
            } else {
                UpsertOutcome::Unchanged
            }
        }
        None => {
            index.insert(path.to_path_buf(), records.len());
            records.push(Record {
                path: path.to_path_buf(),
                metadata: metadata.clone(),
                created_at: now,
                updated_at: now,
            });
            UpsertOutcome::Created
        }
    }
}

/// Fold a later duplicate into the authoritative first record. The first
/// record's values win; the duplicate only fills fields it lacks.
fn fold_duplicate(first: &mut Record, duplicate: &Record) {
    let folded = first.metadata.merged_under(&duplicate.metadata);
    if folded != first.metadata {
        first.metadata = folded;
        first.updated_at = first.updated_at.max(duplicate.updated_at);
    }
}

/// The folded view of every record stored for `path`.
fn lookup(records: &[Record], path: &Path) -> Option<Record> {
    let mut matching = records.iter().filter(|r| r.path == path);
    let mut first = matching.next()?.clone();
    for duplicate in matching {
        fold_duplicate(&mut first, duplicate);
    }
    Some(first)
}

/// Reject values serde_json would write as `null`, which would leave the
/// record file unreadable.
fn check_storable(items: &[(&Path, Metadata)]) -> Result<()> {
    for (path, metadata) in items {
        if let Some((field, value)) = metadata.first_unstorable() {
            return Err(FiletagError::InvalidValue {
                field: field.to_string(),
                reason: format!("{} cannot be stored for {}", value, path.display()),
            });
        }
    }
    Ok(())
}

fn index_of(records: &[Record]) -> HashMap<PathBuf, usize> {
    let mut index = HashMap::with_capacity(records.len());
    for (pos, record) in records.iter().enumerate() {
        // first record wins when duplicates exist; doctor folds the rest
        index.entry(record.path.clone()).or_insert(pos);
    }
    index
}

impl<B: StorageBackend> MetadataStore for RecordStore<B> {
    fn upsert(&mut self, path: &Path, metadata: &Metadata) -> Result<UpsertOutcome> {
        let outcomes = self.upsert_many(&[(path, metadata.clone())])?;
        Ok(outcomes[0])
    }

    fn upsert_many(&mut self, items: &[(&Path, Metadata)]) -> Result<Vec<UpsertOutcome>> {
        self.check_writable()?;
        check_storable(items)?;
        let mut records = self.backend.load_records()?;
        let mut index = index_of(&records);
        let now = Utc::now();

        let outcomes: Vec<UpsertOutcome> = items
            .iter()
            .map(|(path, metadata)| {
                let outcome = apply_upsert(&mut records, &mut index, path, metadata, now);
                debug!("upsert {}: {:?}", path.display(), outcome);
                outcome
            })
            .collect();

        if outcomes.iter().any(|o| *o != UpsertOutcome::Unchanged) {
            self.backend.save_records(&records)?;
        }
        Ok(outcomes)
    }

    fn get_record(&self, path: &Path) -> Result<Option<Record>> {
        let records = self.backend.load_records()?;
        Ok(lookup(&records, path))
    }

    fn scan(&self, predicate: &dyn Fn(&Record) -> bool) -> Result<Vec<Record>> {
        let records = self.backend.load_records()?;
        let total = records.len();
        let matched: Vec<Record> = records.into_iter().filter(|r| predicate(r)).collect();
        debug!("scan matched {} of {} records", matched.len(), total);
        Ok(matched)
    }

    fn remove(&mut self, path: &Path) -> Result<bool> {
        Ok(self.remove_many(&[path])?[0])
    }

    fn remove_many(&mut self, paths: &[&Path]) -> Result<Vec<bool>> {
        self.check_writable()?;
        let mut records = self.backend.load_records()?;
        let targets: HashSet<&Path> = paths.iter().copied().collect();
        let present: HashSet<PathBuf> = records
            .iter()
            .filter(|r| targets.contains(r.path.as_path()))
            .map(|r| r.path.clone())
            .collect();
        let removed: Vec<bool> = paths.iter().map(|p| present.contains(*p)).collect();

        if present.is_empty() {
            debug!("remove: none of {} paths tracked", paths.len());
            return Ok(removed);
        }
        records.retain(|r| !present.contains(&r.path));
        self.backend.save_records(&records)?;
        debug!("removed {} records", present.len());
        Ok(removed)
    }

    fn remove_fields(&mut self, path: &Path, fields: &[String]) -> Result<bool> {
        Ok(self.remove_fields_many(&[path], fields)?[0].is_some())
    }

    fn remove_fields_many(
        &mut self,
        paths: &[&Path],
        fields: &[String],
    ) -> Result<Vec<Option<Metadata>>> {
        self.check_writable()?;
        let mut records = self.backend.load_records()?;
        let targets: HashSet<&Path> = paths.iter().copied().collect();
        let now = Utc::now();

        let mut changed: HashSet<PathBuf> = HashSet::new();
        for record in records
            .iter_mut()
            .filter(|r| targets.contains(r.path.as_path()))
        {
            let mut touched = false;
            for field in fields {
                touched |= record.metadata.remove(field).is_some();
            }
            if touched {
                record.updated_at = now;
                changed.insert(record.path.clone());
            }
        }

        if changed.is_empty() {
            return Ok(vec![None; paths.len()]);
        }
        self.backend.save_records(&records)?;
        debug!("removed fields {:?} from {} records", fields, changed.len());

        Ok(paths
            .iter()
            .map(|p| {
                if changed.contains(*p) {
                    lookup(&records, p).map(|r| r.metadata)
                } else {
                    None
                }
            })
            .collect())
    }

    fn len(&self) -> Result<usize> {
        Ok(self.backend.load_records()?.len())
    }

    fn doctor(&mut self, fix: bool) -> Result<DoctorReport> {
        if fix {
            self.check_writable()?;
        }
        let records = self.backend.load_records()?;
        let mut report = DoctorReport::default();
        let mut kept: Vec<Record> = Vec::with_capacity(records.len());
        let mut index: HashMap<PathBuf, usize> = HashMap::new();

        for record in records {
            if let Some(&pos) = index.get(&record.path) {
                report.duplicate_records += 1;
                fold_duplicate(&mut kept[pos], &record);
                continue;
            }
            if !record.path.is_absolute() {
                report.relative_paths.push(record.path);
                continue;
            }
            if !record.path.exists() {
                report.missing_files.push(record.path.clone());
                continue;
            }
            index.insert(record.path.clone(), kept.len());
            kept.push(record);
        }

        if fix && !report.is_clean() {
            self.backend.save_records(&kept)?;
            report.fixed = true;
            info!(
                "doctor repaired store: {} missing, {} duplicate, {} relative",
                report.missing_files.len(),
                report.duplicate_records,
                report.relative_paths.len()
            );
        }
        Ok(report)
    }

    fn location(&self) -> PathBuf {
        self.backend.location()
    }

    fn is_read_only(&self) -> bool {
        self.read_only
    }
}

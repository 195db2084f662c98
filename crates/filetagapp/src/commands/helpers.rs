use crate::attributes::Query;
use crate::error::{FiletagError, Result};
use crate::model::{Collection, File};
use crate::query;
use crate::store::MetadataStore;
use crate::walk::WalkOptions;
use std::path::{Path, PathBuf};

/// Canonical form of `path` if it exists, otherwise its absolute form.
///
/// Tracked files may have been removed from disk, so commands that act on
/// stored records cannot insist on canonicalization.
pub fn absolutize(path: &Path) -> Result<PathBuf> {
    if let Ok(canonical) = std::fs::canonicalize(path) {
        return Ok(canonical);
    }
    std::path::absolute(path).map_err(|e| FiletagError::invalid_path(path, e.to_string()))
}

/// Existing files named by `paths`, with directories expanded by walking.
///
/// Every path must exist. Order follows the arguments, then walk order.
pub fn collect_targets<P: AsRef<Path>>(paths: &[P], options: &WalkOptions) -> Result<Collection> {
    if paths.is_empty() {
        return Err(FiletagError::Api("no paths given".to_string()));
    }
    let mut targets = Collection::new();
    for path in paths {
        let path = path.as_ref();
        if path.is_dir() {
            for file in Collection::from_dir(path, options)? {
                targets.push(file);
            }
        } else {
            targets.push(File::open(path)?);
        }
    }
    Ok(targets)
}

/// Stored files at or under each of `paths`, rebuilt from their records.
///
/// Paths need not exist on disk. Untracked paths contribute nothing.
pub fn tracked_targets<S: MetadataStore + ?Sized, P: AsRef<Path>>(
    store: &S,
    paths: &[P],
) -> Result<Collection> {
    let mut targets = Collection::new();
    for path in paths {
        let path = absolutize(path.as_ref())?;
        targets = targets.union(&query::find(store, &Query::under(&path))?);
    }
    Ok(targets)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attributes::Metadata;
    use crate::store::mem_backend::InMemoryStore;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn collect_targets_expands_directories() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        fs::write(dir.path().join("sub/b.txt"), "b").unwrap();
        fs::write(dir.path().join("sub/a.txt"), "a").unwrap();
        fs::write(dir.path().join("c.txt"), "c").unwrap();

        let targets = collect_targets(
            &[dir.path().join("c.txt"), dir.path().join("sub")],
            &WalkOptions::default(),
        )
        .unwrap();

        let names: Vec<String> = targets.iter().map(|f| f.name().into_owned()).collect();
        assert_eq!(names, vec!["c.txt", "a.txt", "b.txt"]);
    }

    #[test]
    fn collect_targets_dedups_overlapping_arguments() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.txt"), "a").unwrap();

        let targets = collect_targets(
            &[dir.path().join("a.txt"), dir.path().to_path_buf()],
            &WalkOptions::default(),
        )
        .unwrap();
        assert_eq!(targets.len(), 1);
    }

    #[test]
    fn collect_targets_rejects_missing_path() {
        let dir = TempDir::new().unwrap();
        let result = collect_targets(&[dir.path().join("nope")], &WalkOptions::default());
        assert!(matches!(result, Err(FiletagError::InvalidPath { .. })));
    }

    #[test]
    fn collect_targets_requires_paths() {
        let none: [&Path; 0] = [];
        assert!(matches!(
            collect_targets(&none, &WalkOptions::default()),
            Err(FiletagError::Api(_))
        ));
    }

    #[test]
    fn tracked_targets_include_vanished_files() {
        let mut store = InMemoryStore::new();
        store
            .upsert(Path::new("/gone/a.csv"), &Metadata::new())
            .unwrap();
        store
            .upsert(Path::new("/gone/sub/b.csv"), &Metadata::new())
            .unwrap();
        store
            .upsert(Path::new("/elsewhere/c.csv"), &Metadata::new())
            .unwrap();

        let targets = tracked_targets(&store, &["/gone"]).unwrap();
        assert_eq!(
            targets.paths(),
            vec![Path::new("/gone/a.csv"), Path::new("/gone/sub/b.csv")]
        );

        let single = tracked_targets(&store, &["/elsewhere/c.csv"]).unwrap();
        assert_eq!(single.len(), 1);

        assert!(tracked_targets(&store, &["/untracked"]).unwrap().is_empty());
    }
}

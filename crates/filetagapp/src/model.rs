//! # Entity Model
//!
//! The two addressable units are [`File`] (one path plus its metadata) and
//! [`Collection`] (an ordered group of files plus group-level metadata).
//!
//! Both are plain in-memory values. Setting a field changes only the object;
//! nothing reaches the store until the object is passed to `add`. Reading a
//! field that was never set returns `None`, so tagging code can probe freely.
//!
//! ## Identity
//!
//! A file is identified by its canonical path (absolute, symlinks resolved).
//! [`File::open`] canonicalizes once and rejects paths that do not exist or
//! that name a directory. Files rebuilt from query results skip that check:
//! the store is allowed to remember files that have since disappeared.
//!
//! ## Group Metadata
//!
//! A collection's own fields are applied to every member when the collection
//! is added. A member's own value wins over the group value for the same field:
//! the file is more specific than the group. See [`Taggable::resolved`].

use crate::attributes::{validate_field_name, AttrValue, Metadata};
use crate::error::{FiletagError, Result};
use crate::walk::{collect_files, WalkOptions};
use serde::Serialize;
use std::borrow::Cow;
use std::collections::HashSet;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::path::{Path, PathBuf};

fn check_field(field: &str) -> Result<()> {
    validate_field_name(field)
        .map_err(|e| FiletagError::InvalidField(format!("{}: {}", field, e)))
}

pub(crate) fn check_value(field: &str, value: &AttrValue) -> Result<()> {
    if value.is_storable() {
        return Ok(());
    }
    Err(FiletagError::InvalidValue {
        field: field.to_string(),
        reason: format!("{} cannot be stored", value),
    })
}

/// Anything that can be written to the store by `add`.
pub trait Taggable {
    /// The `(path, metadata)` pairs to upsert, with any group-level fields
    /// already folded in.
    fn resolved(&self) -> Vec<(&Path, Metadata)>;
}

/// A single file and its metadata.
#[derive(Debug, Clone, Serialize)]
pub struct File {
    path: PathBuf,
    metadata: Metadata,
}

impl File {
    /// Wrap an existing file. The path is canonicalized.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::with_metadata(path, Metadata::new())
    }

    /// Wrap an existing file, pre-seeded with metadata.
    pub fn with_metadata(path: impl AsRef<Path>, metadata: Metadata) -> Result<Self> {
        let path = path.as_ref();
        let canonical = std::fs::canonicalize(path)
            .map_err(|e| FiletagError::invalid_path(path, e.to_string()))?;
        if canonical.is_dir() {
            return Err(FiletagError::invalid_path(
                path,
                "is a directory (use a Collection)",
            ));
        }
        for (field, value) in metadata.iter() {
            check_field(field)?;
            check_value(field, value)?;
        }
        Ok(Self {
            path: canonical,
            metadata,
        })
    }

    /// Rebuild a file from a stored record. No filesystem access.
    pub(crate) fn from_record(path: PathBuf, metadata: Metadata) -> Self {
        Self { path, metadata }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Basename of the path.
    pub fn name(&self) -> Cow<'_, str> {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_default()
    }

    /// Directory containing the file.
    pub fn location(&self) -> &Path {
        self.path.parent().unwrap_or_else(|| Path::new("/"))
    }

    /// Extension without the leading dot.
    pub fn extension(&self) -> Option<&str> {
        self.path.extension().and_then(|e| e.to_str())
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    pub fn get(&self, field: &str) -> Option<&AttrValue> {
        self.metadata.get(field)
    }

    /// Set a field in memory. Fails for invalid field names and for values
    /// that cannot be persisted (non-finite floats).
    pub fn set(&mut self, field: &str, value: impl Into<AttrValue>) -> Result<()> {
        check_field(field)?;
        let value = value.into();
        check_value(field, &value)?;
        self.metadata.set(field, value);
        Ok(())
    }

    pub fn unset(&mut self, field: &str) -> Option<AttrValue> {
        self.metadata.remove(field)
    }
}

impl PartialEq for File {
    fn eq(&self, other: &Self) -> bool {
        self.path == other.path
    }
}

impl Eq for File {}

impl Hash for File {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.path.hash(state);
    }
}

impl PartialOrd for File {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for File {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.path.cmp(&other.path)
    }
}

impl fmt::Display for File {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path.display())
    }
}

impl Taggable for File {
    fn resolved(&self) -> Vec<(&Path, Metadata)> {
        vec![(self.path.as_path(), self.metadata.clone())]
    }
}

/// An ordered group of files with optional group-level metadata.
///
/// Membership is flat and unique by path; order is discovery or query order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Collection {
    root: Option<PathBuf>,
    files: Vec<File>,
    metadata: Metadata,
}

impl Collection {
    /// An empty, synthetic collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a collection by walking `dir` recursively.
    ///
    /// Fails with `InvalidPath` if `dir` is not a directory or holds no files.
    pub fn from_dir(dir: impl AsRef<Path>, options: &WalkOptions) -> Result<Self> {
        let dir = dir.as_ref();
        let root = std::fs::canonicalize(dir)
            .map_err(|e| FiletagError::invalid_path(dir, e.to_string()))?;
        let files: Vec<File> = collect_files(&root, options)?
            .into_iter()
            .map(|path| File::from_record(path, Metadata::new()))
            .collect();
        if files.is_empty() {
            return Err(FiletagError::invalid_path(dir, "no files found"));
        }
        Ok(Self {
            root: Some(root),
            files,
            metadata: Metadata::new(),
        })
    }

    /// Build a synthetic collection. Later duplicates of a path are dropped.
    pub fn from_files(files: impl IntoIterator<Item = File>) -> Self {
        let mut collection = Self::new();
        let mut seen = HashSet::new();
        for file in files {
            if seen.insert(file.path.clone()) {
                collection.files.push(file);
            }
        }
        collection
    }

    /// Open every path as a [`File`]. The first invalid path aborts.
    pub fn from_paths<P: AsRef<Path>>(paths: &[P]) -> Result<Self> {
        let files = paths
            .iter()
            .map(File::open)
            .collect::<Result<Vec<File>>>()?;
        Ok(Self::from_files(files))
    }

    /// Directory the collection was walked from, `None` when synthetic.
    pub fn root(&self) -> Option<&Path> {
        self.root.as_deref()
    }

    pub fn files(&self) -> &[File] {
        &self.files
    }

    pub fn paths(&self) -> Vec<&Path> {
        self.files.iter().map(|f| f.path()).collect()
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, File> {
        self.files.iter()
    }

    pub fn get_file(&self, index: usize) -> Option<&File> {
        self.files.get(index)
    }

    /// Mutable access to a member, for per-file tagging.
    pub fn get_file_mut(&mut self, index: usize) -> Option<&mut File> {
        self.files.get_mut(index)
    }

    pub fn files_mut(&mut self) -> std::slice::IterMut<'_, File> {
        self.files.iter_mut()
    }

    pub fn contains(&self, file: &File) -> bool {
        self.contains_path(&file.path)
    }

    pub fn contains_path(&self, path: &Path) -> bool {
        self.files.iter().any(|f| f.path == path)
    }

    /// Append a file unless its path is already a member.
    pub fn push(&mut self, file: File) -> bool {
        if self.contains(&file) {
            return false;
        }
        self.files.push(file);
        true
    }

    /// Group-level metadata (not including member fields).
    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    pub fn get(&self, field: &str) -> Option<&AttrValue> {
        self.metadata.get(field)
    }

    /// Set a group-level field. Applied to members when the collection is added.
    pub fn set(&mut self, field: &str, value: impl Into<AttrValue>) -> Result<()> {
        check_field(field)?;
        let value = value.into();
        check_value(field, &value)?;
        self.metadata.set(field, value);
        Ok(())
    }

    pub fn unset(&mut self, field: &str) -> Option<AttrValue> {
        self.metadata.remove(field)
    }

    /// Fields every member shares with the same value.
    pub fn common_metadata(&self) -> Metadata {
        let mut iter = self.files.iter();
        let Some(first) = iter.next() else {
            return Metadata::new();
        };
        iter.fold(first.metadata.clone(), |acc, f| acc.intersection(&f.metadata))
    }

    /// Client-side refinement. Keeps members for which `predicate` holds,
    /// in their original order. The source collection is left untouched;
    /// root and group metadata carry over to the result.
    pub fn filter<F>(&self, mut predicate: F) -> Collection
    where
        F: FnMut(&File) -> bool,
    {
        Collection {
            root: self.root.clone(),
            files: self.files.iter().filter(|f| predicate(f)).cloned().collect(),
            metadata: self.metadata.clone(),
        }
    }

    /// Members of `self` followed by members of `other` not already present.
    /// Group metadata is taken from `self`.
    pub fn union(&self, other: &Collection) -> Collection {
        let mut result = Collection {
            root: None,
            files: self.files.clone(),
            metadata: self.metadata.clone(),
        };
        let mut seen: HashSet<&Path> = self.files.iter().map(|f| f.path()).collect();
        for file in &other.files {
            if seen.insert(file.path()) {
                result.files.push(file.clone());
            }
        }
        result
    }

    /// Members of `self` whose paths are not in `other`.
    pub fn difference(&self, other: &Collection) -> Collection {
        let exclude: HashSet<&Path> = other.files.iter().map(|f| f.path()).collect();
        Collection {
            root: None,
            files: self
                .files
                .iter()
                .filter(|f| !exclude.contains(f.path()))
                .cloned()
                .collect(),
            metadata: self.metadata.clone(),
        }
    }
}

impl Taggable for Collection {
    fn resolved(&self) -> Vec<(&Path, Metadata)> {
        self.files
            .iter()
            .map(|f| (f.path(), f.metadata.merged_under(&self.metadata)))
            .collect()
    }
}

impl std::ops::Index<usize> for Collection {
    type Output = File;

    fn index(&self, index: usize) -> &File {
        &self.files[index]
    }
}

impl IntoIterator for Collection {
    type Item = File;
    type IntoIter = std::vec::IntoIter<File>;

    fn into_iter(self) -> Self::IntoIter {
        self.files.into_iter()
    }
}

impl<'a> IntoIterator for &'a Collection {
    type Item = &'a File;
    type IntoIter = std::slice::Iter<'a, File>;

    fn into_iter(self) -> Self::IntoIter {
        self.files.iter()
    }
}

impl From<File> for Collection {
    fn from(file: File) -> Self {
        Collection::from_files([file])
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, file) in self.files.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", file)?;
        }
        Ok(())
    }
}

use super::backend::StorageBackend;
use super::Record;
use crate::error::{FiletagError, Result};
use log::info;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Default file name for the record store inside a data directory.
pub const RECORDS_FILENAME: &str = "records.json";

/// Records kept in a single pretty-printed JSON file.
pub struct FsBackend {
    file: PathBuf,
}

impl FsBackend {
    /// Use `file` as the record file. It need not exist yet.
    pub fn new(file: impl Into<PathBuf>) -> Self {
        Self { file: file.into() }
    }

    /// Use `<dir>/records.json`.
    pub fn in_dir(dir: &Path) -> Self {
        Self::new(dir.join(RECORDS_FILENAME))
    }

    pub fn file(&self) -> &Path {
        &self.file
    }

    fn unavailable(&self, source: io::Error) -> FiletagError {
        FiletagError::StorageUnavailable {
            location: self.file.clone(),
            source,
        }
    }

    fn ensure_dir(&self, path: &Path) -> Result<()> {
        if !path.exists() {
            fs::create_dir_all(path).map_err(|e| self.unavailable(e))?;
            info!("created store directory {}", path.display());
        }
        Ok(())
    }
}

impl StorageBackend for FsBackend {
    fn load_records(&self) -> Result<Vec<Record>> {
        if !self.file.exists() {
            return Ok(Vec::new());
        }
        let content = fs::read_to_string(&self.file).map_err(|e| self.unavailable(e))?;
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }
        serde_json::from_str(&content).map_err(|source| FiletagError::Corrupt {
            location: self.file.clone(),
            source,
        })
    }

    fn save_records(&self, records: &[Record]) -> Result<()> {
        let dir = match self.file.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        self.ensure_dir(&dir)?;

        let content = serde_json::to_string_pretty(records)?;

        // Atomic write
        let tmp_file = dir.join(format!(".records-{}.tmp", Uuid::new_v4()));
        fs::write(&tmp_file, content).map_err(|e| self.unavailable(e))?;
        if let Err(e) = fs::rename(&tmp_file, &self.file) {
            let _ = fs::remove_file(&tmp_file);
            return Err(self.unavailable(e));
        }

        Ok(())
    }

    fn location(&self) -> PathBuf {
        self.file.clone()
    }
}

/// The production store: records in a JSON file.
pub type FileStore = super::RecordStore<FsBackend>;

use super::backend::StorageBackend;
use super::{Record, RecordStore};
use crate::error::{FiletagError, Result};
use std::cell::RefCell;
use std::io;
use std::path::PathBuf;

const MEM_LOCATION: &str = "memory://records";

/// In-memory storage backend for testing.
///
/// Uses `RefCell` for interior mutability since filetag is single-threaded.
/// This avoids the overhead of `RwLock` while still allowing the
/// `StorageBackend` trait to use `&self` for all methods.
#[derive(Default)]
pub struct MemBackend {
    records: RefCell<Vec<Record>>,
    simulate_write_error: RefCell<bool>,
    simulate_read_error: RefCell<bool>,
}

impl MemBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        *self.simulate_write_error.borrow_mut() = simulate;
    }

    /// Enable read error simulation (store cannot be opened).
    pub fn set_simulate_read_error(&self, simulate: bool) {
        *self.simulate_read_error.borrow_mut() = simulate;
    }

    fn simulated(&self, what: &str) -> FiletagError {
        FiletagError::StorageUnavailable {
            location: PathBuf::from(MEM_LOCATION),
            source: io::Error::other(format!("Simulated {} error", what)),
        }
    }
}

impl StorageBackend for MemBackend {
    fn load_records(&self) -> Result<Vec<Record>> {
        if *self.simulate_read_error.borrow() {
            return Err(self.simulated("read"));
        }
        Ok(self.records.borrow().clone())
    }

    fn save_records(&self, records: &[Record]) -> Result<()> {
        if *self.simulate_write_error.borrow() {
            return Err(self.simulated("write"));
        }
        *self.records.borrow_mut() = records.to_vec();
        Ok(())
    }

    fn location(&self) -> PathBuf {
        PathBuf::from(MEM_LOCATION)
    }
}

/// A record store over [`MemBackend`], the usual fixture for command tests.
pub type InMemoryStore = RecordStore<MemBackend>;

impl RecordStore<MemBackend> {
    pub fn new() -> Self {
        Self::with_backend(MemBackend::new())
    }
}

impl Default for RecordStore<MemBackend> {
    fn default() -> Self {
        Self::new()
    }
}

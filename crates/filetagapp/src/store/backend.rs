use super::Record;
use crate::error::Result;
use std::path::PathBuf;

/// Abstract interface for raw storage I/O.
/// This trait handles the "how" of storage (filesystem vs memory),
/// while RecordStore handles the "what" (merge rules, ordering, read-only).
pub trait StorageBackend {
    /// Load every record, in creation order.
    /// A store that has never been written is empty, not an error.
    fn load_records(&self) -> Result<Vec<Record>>;

    /// Replace the stored records.
    /// MUST be atomic (e.g. write to tmp then rename) to avoid partial writes.
    fn save_records(&self, records: &[Record]) -> Result<()>;

    /// Where the records live. For FsBackend, the real file path.
    /// For MemBackend, a virtual path.
    fn location(&self) -> PathBuf;
}

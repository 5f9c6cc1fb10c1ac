//! Storage layer for fieldtally
//!
//! Wizard state is persisted through a string-keyed store. Each key holds a
//! JSON document and is decoded independently on load.

pub mod file_io;
pub mod keys;
pub mod kv;
pub mod snapshot;

pub use file_io::{read_optional, write_atomic, write_json_atomic};
pub use kv::{probe, FileStore, KeyValueStore, MemoryStore};
pub use snapshot::{FormSnapshot, Snapshot};

use crate::config::paths::TallyPaths;

/// Open the file-backed store under the configured data directory
pub fn open_file_store(paths: &TallyPaths) -> FileStore {
    FileStore::new(paths.store_dir())
}

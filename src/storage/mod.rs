//! Key-value persistence behind a trait, plus the typed progress repository
//! the game and the daily challenges read and write through.

mod file;
mod memory;
mod repository;

pub use file::FileStore;
pub use memory::MemoryStore;
pub use repository::{LeaderboardEntry, ProgressRepository};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not encode stored value: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("could not determine a data directory")]
    NoDataDir,
}

pub type StorageResult<T> = Result<T, StorageError>;

/// String keys to string values. Implementations need not be durable.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> StorageResult<()>;
    fn delete(&mut self, key: &str) -> StorageResult<()>;
    /// Keys starting with `prefix`, sorted.
    fn list_prefix(&self, prefix: &str) -> StorageResult<Vec<String>>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Box<T> {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> StorageResult<()> {
        (**self).set(key, value)
    }

    fn delete(&mut self, key: &str) -> StorageResult<()> {
        (**self).delete(key)
    }

    fn list_prefix(&self, prefix: &str) -> StorageResult<Vec<String>> {
        (**self).list_prefix(prefix)
    }
}

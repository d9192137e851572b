use super::{KeyValueStore, StorageError, StorageResult};
use crate::utils::persistence::APP_DIR_NAME;
use directories::ProjectDirs;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

const STORE_FILE: &str = "progress.json";

/// All entries in one pretty-printed JSON object on disk. The file is read
/// on open and rewritten on every change.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl FileStore {
    /// Store in the platform data directory.
    pub fn open_default() -> StorageResult<Self> {
        let dirs = ProjectDirs::from("", "", APP_DIR_NAME).ok_or(StorageError::NoDataDir)?;
        Self::open_in(dirs.data_dir())
    }

    pub fn open_in(dir: &Path) -> StorageResult<Self> {
        fs::create_dir_all(dir)?;
        Self::open(dir.join(STORE_FILE))
    }

    /// A missing or unreadable file opens as an empty store.
    pub fn open(path: PathBuf) -> StorageResult<Self> {
        let entries = match fs::read_to_string(&path) {
            Ok(json) => serde_json::from_str(&json).unwrap_or_else(|e| {
                tracing::warn!(path = %path.display(), error = %e, "Discarding corrupt store file");
                BTreeMap::new()
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(e.into()),
        };
        Ok(Self { path, entries })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> StorageResult<()> {
        let json = serde_json::to_string_pretty(&self.entries)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> StorageResult<()> {
        self.entries.insert(key.to_string(), value.to_string());
        self.flush()
    }

    fn delete(&mut self, key: &str) -> StorageResult<()> {
        if self.entries.remove(key).is_some() {
            self.flush()?;
        }
        Ok(())
    }

    fn list_prefix(&self, prefix: &str) -> StorageResult<Vec<String>> {
        Ok(self
            .entries
            .keys()
            .filter(|k| k.starts_with(prefix))
            .cloned()
            .collect())
    }
}

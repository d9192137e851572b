//! JSON files under the per-user data directory.
//!
//! Settings, the progress store and the log file all live in one
//! directory resolved through `directories`. The `_in` variants take an
//! explicit directory so tests never touch the real one.

use directories::ProjectDirs;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

pub const APP_DIR_NAME: &str = "code-runner";

/// Resolves and creates the data directory.
pub fn data_dir() -> io::Result<PathBuf> {
    let dir = ProjectDirs::from("", "", APP_DIR_NAME)
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no home directory for data"))?;
    fs::create_dir_all(&dir)?;
    Ok(dir)
}

pub fn data_path(filename: &str) -> io::Result<PathBuf> {
    data_dir().map(|dir| dir.join(filename))
}

/// Missing, unreadable or malformed files all read as `T::default()`.
pub fn load_json_in<T: Default + DeserializeOwned>(dir: &Path, filename: &str) -> T {
    let path = dir.join(filename);
    let Ok(json) = fs::read_to_string(&path) else {
        return T::default();
    };
    serde_json::from_str(&json).unwrap_or_else(|e| {
        tracing::warn!(path = %path.display(), error = %e, "Ignoring malformed file");
        T::default()
    })
}

pub fn save_json_in<T: Serialize>(dir: &Path, filename: &str, value: &T) -> io::Result<()> {
    fs::create_dir_all(dir)?;
    let json = serde_json::to_string_pretty(value).map_err(io::Error::other)?;
    fs::write(dir.join(filename), json)
}

pub fn load_json_or_default<T: Default + DeserializeOwned>(filename: &str) -> T {
    match data_dir() {
        Ok(dir) => load_json_in(&dir, filename),
        Err(_) => T::default(),
    }
}

pub fn save_json<T: Serialize>(filename: &str, value: &T) -> io::Result<()> {
    save_json_in(&data_dir()?, filename, value)
}

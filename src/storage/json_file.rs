//! File-backed storage with atomic replace.

use super::dto::PhoneBookStateDto;
use super::PhoneBookStateStorage;
use crate::error::{StorageError, StorageResult};
use crate::models::PhoneBookState;
use std::ffi::OsString;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Options for [`JsonFilePhoneBookStateStorage`].
#[derive(Debug, Clone)]
pub struct JsonFileStorageOptions {
    pub file_path: PathBuf,
    pub pretty_print: bool,
}

impl Default for JsonFileStorageOptions {
    fn default() -> Self {
        Self {
            file_path: PathBuf::from("phonebook.json"),
            pretty_print: true,
        }
    }
}

/// Stores the phonebook as a single JSON document on disk.
///
/// Writes go through an atomic-replace protocol: the serialized state lands
/// in a temporary file next to the target, which is then renamed into place.
/// A failure anywhere leaves the previously committed file intact; a reader
/// observes either the old complete document or the new one, never a mix.
///
/// There is no cross-process locking. Two processes pointed at the same file
/// race with last-writer-wins semantics.
pub struct JsonFilePhoneBookStateStorage {
    options: JsonFileStorageOptions,
}

impl JsonFilePhoneBookStateStorage {
    pub fn new(options: JsonFileStorageOptions) -> Self {
        Self { options }
    }

    /// Storage at `path` with default options.
    pub fn at_path(path: impl Into<PathBuf>) -> Self {
        Self::new(JsonFileStorageOptions {
            file_path: path.into(),
            ..JsonFileStorageOptions::default()
        })
    }

    pub fn file_path(&self) -> &Path {
        &self.options.file_path
    }

    fn serialize(&self, dto: &PhoneBookStateDto) -> StorageResult<String> {
        let result = if self.options.pretty_print {
            serde_json::to_string_pretty(dto)
        } else {
            serde_json::to_string(dto)
        };
        result.map_err(StorageError::Serialize)
    }
}

impl PhoneBookStateStorage for JsonFilePhoneBookStateStorage {
    fn load(&self) -> StorageResult<PhoneBookState> {
        let path = &self.options.file_path;

        if !path.exists() {
            // First run: never-written is an empty phonebook, not an error.
            debug!(path = %path.display(), "storage file absent, starting empty");
            return Ok(PhoneBookState::new());
        }

        let json = fs::read_to_string(path).map_err(|source| StorageError::Read {
            path: path.clone(),
            source,
        })?;

        let dto: PhoneBookStateDto =
            serde_json::from_str(&json).map_err(|source| StorageError::Corrupted {
                path: path.clone(),
                source,
            })?;

        let state = dto.into_state()?;
        debug!(path = %path.display(), contacts = state.contacts.len(), "loaded phonebook state");
        Ok(state)
    }

    fn save(&self, state: &PhoneBookState) -> StorageResult<()> {
        let path = &self.options.file_path;
        let json = self.serialize(&PhoneBookStateDto::from_state(state))?;

        write_atomic(path, &json).map_err(|source| StorageError::Write {
            path: path.clone(),
            source,
        })?;

        debug!(path = %path.display(), contacts = state.contacts.len(), "saved phonebook state");
        Ok(())
    }
}

/// Write `contents` to `path` without ever exposing a half-written file at
/// the canonical location.
///
/// The data is flushed to a sibling temporary file first. A fresh target is
/// committed with a plain rename. An existing target is replaced by hard
/// linking its current contents to a backup path, renaming the temporary
/// file over the target (the atomic swap), then best-effort deleting the
/// backup — the previously committed document stays reachable until the
/// swap has happened.
fn write_atomic(path: &Path, contents: &str) -> std::io::Result<()> {
    if let Some(dir) = path.parent() {
        if !dir.as_os_str().is_empty() {
            fs::create_dir_all(dir)?;
        }
    }

    let tmp_path = sibling_path(path, ".tmp");
    {
        let mut file = File::create(&tmp_path)?;
        file.write_all(contents.as_bytes())?;
        file.sync_all()?;
    }

    if path.exists() {
        let backup_path = sibling_path(path, ".bak");
        let _ = fs::remove_file(&backup_path);
        fs::hard_link(path, &backup_path)?;
        fs::rename(&tmp_path, path)?;
        let _ = fs::remove_file(&backup_path);
    } else {
        fs::rename(&tmp_path, path)?;
    }

    Ok(())
}

fn sibling_path(path: &Path, suffix: &str) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(suffix);
    PathBuf::from(name)
}

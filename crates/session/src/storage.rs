//! Persistence backends for the session record.
//!
//! The whole session lives under one key as one serialized
//! [`PersistedSession`]; saving and clearing replace or remove it in a
//! single step.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crm_core::session::SessionRecord;
use crm_core::types::Timestamp;
use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Session storage I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Malformed session record: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// The single stored session record, with its expiry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedSession {
    #[serde(flatten)]
    pub record: SessionRecord,
    pub expires_at: Timestamp,
}

impl PersistedSession {
    pub fn is_expired(&self, now: Timestamp) -> bool {
        self.expires_at <= now
    }
}

/// Client-side storage for the session record.
pub trait SessionStorage: Send + Sync {
    /// Read the stored record, `None` if nothing is stored.
    fn load(&self) -> Result<Option<PersistedSession>, StorageError>;

    /// Replace the stored record.
    fn save(&self, session: &PersistedSession) -> Result<(), StorageError>;

    /// Remove the stored record. Clearing empty storage is a no-op.
    fn clear(&self) -> Result<(), StorageError>;
}

// ---------------------------------------------------------------------------
// File storage
// ---------------------------------------------------------------------------

/// JSON file on disk.
///
/// Writes go to a sibling `*.tmp` file that is renamed over the target, so
/// a crash mid-write leaves either the previous record or the new one.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "session".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl SessionStorage for FileStorage {
    fn load(&self) -> Result<Option<PersistedSession>, StorageError> {
        match fs::read(&self.path) {
            Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&self, session: &PersistedSession) -> Result<(), StorageError> {
        let bytes = serde_json::to_vec(session)?;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let tmp = self.temp_path();
        let mut options = OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            // The record carries a bearer token.
            options.mode(0o600);
        }
        let mut file = options.open(&tmp)?;
        file.write_all(&bytes)?;
        file.sync_all()?;
        drop(file);

        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    fn clear(&self) -> Result<(), StorageError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

// ---------------------------------------------------------------------------
// Memory storage
// ---------------------------------------------------------------------------

/// In-process storage. Clones share the same slot, which lets tests hand one
/// handle to a store and keep another to simulate a restart.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    slot: Arc<Mutex<Option<PersistedSession>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage pre-filled with a record.
    pub fn with_record(session: PersistedSession) -> Self {
        let storage = Self::default();
        *storage.lock() = Some(session);
        storage
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Option<PersistedSession>> {
        self.slot.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl SessionStorage for MemoryStorage {
    fn load(&self) -> Result<Option<PersistedSession>, StorageError> {
        Ok(self.lock().clone())
    }

    fn save(&self, session: &PersistedSession) -> Result<(), StorageError> {
        *self.lock() = Some(session.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), StorageError> {
        *self.lock() = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use chrono::{Duration, Utc};

    use super::*;

    fn sample() -> PersistedSession {
        PersistedSession {
            record: SessionRecord {
                id: "u1".into(),
                name: "Amy".into(),
                email: "a@x.com".into(),
                role: "admin".into(),
                token: "tok123".into(),
            },
            expires_at: Utc::now() + Duration::days(7),
        }
    }

    #[test]
    fn file_storage_save_load_clear() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path().join("session.json"));

        assert!(storage.load().unwrap().is_none());

        let record = sample();
        storage.save(&record).unwrap();
        assert_eq!(storage.load().unwrap(), Some(record));
        assert!(!storage.temp_path().exists(), "temp file must be renamed away");

        storage.clear().unwrap();
        assert!(storage.load().unwrap().is_none());
        storage.clear().expect("clearing twice is a no-op");
    }

    #[test]
    fn file_storage_is_one_flat_record() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path().join("session.json"));
        storage.save(&sample()).unwrap();

        let raw: serde_json::Value =
            serde_json::from_slice(&fs::read(storage.path()).unwrap()).unwrap();
        for key in ["id", "name", "email", "role", "token", "expires_at"] {
            assert!(raw.get(key).is_some(), "missing key {key}");
        }
    }

    #[test]
    fn file_storage_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path().join("nested/deeper/session.json"));
        storage.save(&sample()).unwrap();
        assert!(storage.load().unwrap().is_some());
    }

    #[test]
    fn garbage_file_is_a_serialization_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        fs::write(&path, b"{not json").unwrap();

        let result = FileStorage::new(path).load();
        assert_matches!(result, Err(StorageError::Serialization(_)));
    }

    #[test]
    fn memory_storage_clones_share_state() {
        let a = MemoryStorage::new();
        let b = a.clone();
        a.save(&sample()).unwrap();
        assert!(b.load().unwrap().is_some());
        b.clear().unwrap();
        assert!(a.load().unwrap().is_none());
    }

    #[test]
    fn expiry_boundary() {
        let record = sample();
        assert!(!record.is_expired(record.expires_at - Duration::seconds(1)));
        assert!(record.is_expired(record.expires_at));
    }
}

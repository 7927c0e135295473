//! One-key storage for the last connected wallet address.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::debug;

use crate::error::StorageError;

/// Key under which the address is stored.
pub const WALLET_STORAGE_KEY: &str = "predictx_wallet_address";

/// Persistence for the connected address.
pub trait SessionStore: Send + Sync {
    /// Stored address, if any.
    fn load(&self) -> Result<Option<String>, StorageError>;

    /// Store `address`, replacing any previous value.
    fn save(&self, address: &str) -> Result<(), StorageError>;

    /// Remove the stored address.
    fn clear(&self) -> Result<(), StorageError>;
}

/// In-memory store; forgets everything on restart.
#[derive(Debug, Default)]
pub struct MemoryStore {
    address: Mutex<Option<String>>,
}

impl MemoryStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with an address.
    pub fn with_address(address: impl Into<String>) -> Self {
        Self {
            address: Mutex::new(Some(address.into())),
        }
    }
}

impl SessionStore for MemoryStore {
    fn load(&self) -> Result<Option<String>, StorageError> {
        Ok(self.address.lock().map_err(|_| StorageError::Poisoned)?.clone())
    }

    fn save(&self, address: &str) -> Result<(), StorageError> {
        *self.address.lock().map_err(|_| StorageError::Poisoned)? = Some(address.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<(), StorageError> {
        *self.address.lock().map_err(|_| StorageError::Poisoned)? = None;
        Ok(())
    }
}

/// JSON file of string keys, like browser local storage.
///
/// Other keys in the file are preserved.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Store backed by the file at `path`. The file is created on first save.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>, StorageError> {
        match fs::read_to_string(&self.path) {
            Ok(contents) if contents.trim().is_empty() => Ok(BTreeMap::new()),
            Ok(contents) => Ok(serde_json::from_str(&contents)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    fn write_all(&self, entries: &BTreeMap<String, String>) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_vec_pretty(entries)?)?;
        Ok(())
    }
}

impl SessionStore for FileStore {
    fn load(&self) -> Result<Option<String>, StorageError> {
        Ok(self.read_all()?.remove(WALLET_STORAGE_KEY))
    }

    fn save(&self, address: &str) -> Result<(), StorageError> {
        let mut entries = self.read_all()?;
        entries.insert(WALLET_STORAGE_KEY.to_string(), address.to_string());
        self.write_all(&entries)?;
        debug!(path = %self.path.display(), "Persisted wallet address");
        Ok(())
    }

    fn clear(&self) -> Result<(), StorageError> {
        let mut entries = self.read_all()?;
        if entries.remove(WALLET_STORAGE_KEY).is_some() {
            self.write_all(&entries)?;
        }
        Ok(())
    }
}

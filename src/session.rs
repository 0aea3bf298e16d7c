// src/session.rs

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use serde::{Deserialize, Serialize};

use crate::error::AppError;

pub const KEY_USER_ID: &str = "userId";
pub const KEY_USERNAME: &str = "username";
pub const KEY_EMAIL: &str = "email";
pub const KEY_TOKEN: &str = "token";

/// Persistent key-value storage holding the logged-in identity.
pub trait Storage: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<(), AppError>;
    fn remove(&self, key: &str) -> Result<(), AppError>;
}

/// Storage that lives as long as the process.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.read().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), AppError> {
        self.entries
            .write()
            .map_err(|e| AppError::Storage(e.to_string()))?
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), AppError> {
        self.entries
            .write()
            .map_err(|e| AppError::Storage(e.to_string()))?
            .remove(key);
        Ok(())
    }
}

/// Storage backed by a flat JSON object on disk.
/// The file is re-read on every access so several processes see each other's writes.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    lock: RwLock<()>,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: RwLock::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<HashMap<String, String>, AppError> {
        match std::fs::read_to_string(&self.path) {
            Ok(raw) if raw.trim().is_empty() => Ok(HashMap::new()),
            Ok(raw) => Ok(serde_json::from_str(&raw)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(HashMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    fn store(&self, entries: &HashMap<String, String>) -> Result<(), AppError> {
        let raw = serde_json::to_string_pretty(entries)?;
        std::fs::write(&self.path, raw)?;
        Ok(())
    }
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> Option<String> {
        let _guard = self.lock.read().ok()?;
        match self.load() {
            Ok(entries) => entries.get(key).cloned(),
            Err(e) => {
                tracing::warn!("Failed to read session file {:?}: {}", self.path, e);
                None
            }
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), AppError> {
        let _guard = self.lock.write().map_err(|e| AppError::Storage(e.to_string()))?;
        let mut entries = self.load()?;
        entries.insert(key.to_string(), value.to_string());
        self.store(&entries)
    }

    fn remove(&self, key: &str) -> Result<(), AppError> {
        let _guard = self.lock.write().map_err(|e| AppError::Storage(e.to_string()))?;
        let mut entries = self.load()?;
        if entries.remove(key).is_some() {
            self.store(&entries)?;
        }
        Ok(())
    }
}

/// The logged-in user's identity as kept in storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    pub user_id: String,
    pub username: String,
    pub email: String,
    pub token: Option<String>,
}

/// Session Store: typed access to the identity keys.
#[derive(Clone)]
pub struct SessionStore {
    storage: Arc<dyn Storage>,
}

impl SessionStore {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStorage::new()))
    }

    /// Writes the identity. The token key is only touched when a token is present.
    pub fn save(&self, identity: &Identity) -> Result<(), AppError> {
        self.storage.set(KEY_USER_ID, &identity.user_id)?;
        self.storage.set(KEY_USERNAME, &identity.username)?;
        self.storage.set(KEY_EMAIL, &identity.email)?;
        if let Some(token) = &identity.token {
            self.storage.set(KEY_TOKEN, token)?;
        }
        tracing::debug!("Stored session for user {}", identity.user_id);
        Ok(())
    }

    pub fn identity(&self) -> Option<Identity> {
        let user_id = self.user_id()?;
        Some(Identity {
            user_id,
            username: self.storage.get(KEY_USERNAME).unwrap_or_default(),
            email: self.storage.get(KEY_EMAIL).unwrap_or_default(),
            token: self.token(),
        })
    }

    pub fn user_id(&self) -> Option<String> {
        self.storage.get(KEY_USER_ID).filter(|id| !id.is_empty())
    }

    pub fn username(&self) -> Option<String> {
        self.storage.get(KEY_USERNAME)
    }

    pub fn token(&self) -> Option<String> {
        self.storage.get(KEY_TOKEN)
    }

    /// Presence of `userId` is the only authentication check.
    pub fn is_authenticated(&self) -> bool {
        self.user_id().is_some()
    }

    /// Removes all four identity keys.
    pub fn clear(&self) -> Result<(), AppError> {
        for key in [KEY_USER_ID, KEY_USERNAME, KEY_EMAIL, KEY_TOKEN] {
            self.storage.remove(key)?;
        }
        Ok(())
    }

    pub fn storage(&self) -> &Arc<dyn Storage> {
        &self.storage
    }
}

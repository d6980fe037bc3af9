//! Persistent preference store.
//!
//! DESIGN
//! ======
//! A [`PreferenceBackend`] is the durable key-value storage of the platform:
//! `localStorage` in the browser, a JSON file or plain memory natively.
//! [`PreferenceStore`] wraps one backend and never lets its failures escape.
//!
//! ERROR HANDLING
//! ==============
//! Disabled storage, quota errors and unreadable files degrade to "no value".
//! Writes always land in a session overlay first, so a failed write still
//! holds for the rest of the session. Loss of persistence never blocks the UI.

use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

/// Storage key holding `"dark"` or `"light"`.
pub const THEME_KEY: &str = "theme";
/// Storage key holding the `"true"` sentinel once the disclaimer is accepted.
pub const CONSENT_KEY: &str = "disclaimerAccepted";

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The platform storage is disabled or missing (privacy mode, no window).
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("storage encoding failed: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Durable key-value storage for string preferences.
pub trait PreferenceBackend: Send + Sync {
    /// Read the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the storage cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Store `value` under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the storage cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
}

// =============================================================================
// STORE
// =============================================================================

/// Process-wide preference object shared by the theme and consent controllers.
///
/// Cloning shares the same backend and session overlay.
#[derive(Clone)]
pub struct PreferenceStore {
    backend: Arc<dyn PreferenceBackend>,
    session: Arc<Mutex<HashMap<String, String>>>,
}

impl PreferenceStore {
    pub fn new(backend: impl PreferenceBackend + 'static) -> Self {
        Self { backend: Arc::new(backend), session: Arc::new(Mutex::new(HashMap::new())) }
    }

    /// Store backed only by memory. Nothing survives the process.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(MemoryBackend::default())
    }

    /// Read `key`, preferring values written during this session.
    ///
    /// Backend failures read as `None`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<String> {
        if let Some(value) = self.session_map().get(key) {
            return Some(value.clone());
        }
        match self.backend.get(key) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(key, error = %e, "preference read failed; using default");
                None
            }
        }
    }

    /// Write `key`. The value holds for the session even if the backend rejects it.
    pub fn set(&self, key: &str, value: &str) {
        self.session_map().insert(key.to_string(), value.to_string());
        if let Err(e) = self.backend.set(key, value) {
            tracing::warn!(key, error = %e, "preference write failed; kept for this session only");
        }
    }

    fn session_map(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        self.session.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl std::fmt::Debug for PreferenceStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PreferenceStore").finish_non_exhaustive()
    }
}

// =============================================================================
// BACKENDS
// =============================================================================

/// Volatile backend, also the fallback when no durable storage is configured.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    values: Mutex<HashMap<String, String>>,
}

impl PreferenceBackend for MemoryBackend {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let values = self.values.lock().map_err(|e| StoreError::Unavailable(e.to_string()))?;
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut values = self.values.lock().map_err(|e| StoreError::Unavailable(e.to_string()))?;
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// JSON object file, one string value per key. A missing file is empty.
#[derive(Debug, Clone)]
pub struct FileBackend {
    path: PathBuf,
}

impl FileBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn load(&self) -> Result<BTreeMap<String, String>, StoreError> {
        match std::fs::read_to_string(&self.path) {
            Ok(text) if text.trim().is_empty() => Ok(BTreeMap::new()),
            Ok(text) => Ok(serde_json::from_str(&text)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }
}

impl PreferenceBackend for FileBackend {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.load()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut values = self.load()?;
        values.insert(key.to_string(), value.to_string());
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(&self.path, serde_json::to_string_pretty(&values)?)?;
        Ok(())
    }
}

/// Browser `localStorage`. Looked up on every call so the backend stays `Send`.
#[cfg(feature = "hydrate")]
#[derive(Debug, Clone, Copy, Default)]
pub struct WebStorageBackend;

#[cfg(feature = "hydrate")]
impl WebStorageBackend {
    fn storage() -> Result<web_sys::Storage, StoreError> {
        let window = web_sys::window().ok_or_else(|| StoreError::Unavailable("no window".into()))?;
        match window.local_storage() {
            Ok(Some(storage)) => Ok(storage),
            Ok(None) => Err(StoreError::Unavailable("localStorage disabled".into())),
            Err(e) => Err(StoreError::Unavailable(format!("{e:?}"))),
        }
    }
}

#[cfg(feature = "hydrate")]
impl PreferenceBackend for WebStorageBackend {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Self::storage()?
            .get_item(key)
            .map_err(|e| StoreError::Unavailable(format!("{e:?}")))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        Self::storage()?
            .set_item(key, value)
            .map_err(|e| StoreError::Unavailable(format!("{e:?}")))
    }
}

#[cfg(test)]
#[path = "storage_test.rs"]
mod tests;

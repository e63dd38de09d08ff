//! Expiration registry implementation
//!
//! A synchronized map from request identity to expiration time, with
//! optional JSON persistence using atomic writes.

use super::types::CacheSnapshot;
use crate::error::{Error, Result, TransportError};
use crate::types::RequestIdentity;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::ffi::OsString;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, RwLock};
use tracing::debug;

/// Default bound on a single registry file operation
const DEFAULT_IO_TIMEOUT: Duration = Duration::from_secs(5);

/// Registry of cache expirations, shared by every clone
#[derive(Debug, Clone)]
pub struct ExpirationRegistry {
    entries: Arc<RwLock<HashMap<RequestIdentity, DateTime<Utc>>>>,
    /// Backing file, `None` in memory-only mode
    path: Option<PathBuf>,
    io_timeout: Duration,
    /// Serializes concurrent saves to the same file
    save_lock: Arc<Mutex<()>>,
}

impl ExpirationRegistry {
    /// Create a registry with no file persistence
    pub fn in_memory() -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
            path: None,
            io_timeout: DEFAULT_IO_TIMEOUT,
            save_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Create an empty registry backed by the given file
    pub fn persistent(path: impl AsRef<Path>) -> Self {
        Self {
            path: Some(path.as_ref().to_path_buf()),
            ..Self::in_memory()
        }
    }

    /// Set the bound applied to every file operation
    pub fn with_io_timeout(mut self, timeout: Duration) -> Self {
        self.io_timeout = timeout;
        self
    }

    /// Create a registry backed by a file, loading it if it exists
    pub async fn open(path: impl AsRef<Path>, io_timeout: Duration) -> Result<Self> {
        let registry = Self::persistent(path).with_io_timeout(io_timeout);
        registry.load().await?;
        Ok(registry)
    }

    /// Create an in-memory registry from a JSON snapshot
    pub fn from_json(json: &str) -> Result<Self> {
        let snapshot: CacheSnapshot = serde_json::from_str(json)?;
        Ok(Self {
            entries: Arc::new(RwLock::new(snapshot.into_map())),
            ..Self::in_memory()
        })
    }

    /// Expiration recorded for an identity
    pub async fn lookup(&self, identity: &RequestIdentity) -> Option<DateTime<Utc>> {
        self.entries.read().await.get(identity).copied()
    }

    /// Record an expiration, replacing any previous one
    pub async fn upsert(&self, identity: RequestIdentity, expires: DateTime<Utc>) {
        self.entries.write().await.insert(identity, expires);
    }

    /// Whether the identity has an expiration strictly after `now`
    pub async fn is_fresh(&self, identity: &RequestIdentity, now: DateTime<Utc>) -> bool {
        self.lookup(identity).await.is_some_and(|expires| now < expires)
    }

    /// Number of tracked identities
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Whether nothing is tracked yet
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    /// Copy of the current contents
    pub async fn snapshot(&self) -> CacheSnapshot {
        CacheSnapshot::from_map(&*self.entries.read().await)
    }

    /// Export the registry as JSON
    pub async fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.snapshot().await)?)
    }

    /// Backing file path, if any
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Check if using in-memory mode
    pub fn is_in_memory(&self) -> bool {
        self.path.is_none()
    }

    /// Replace the contents with the backing file, if it exists
    pub async fn load(&self) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let exists = self
            .bounded(tokio::fs::try_exists(path))
            .await?
            .map_err(|e| Error::registry(format!("Failed to inspect registry file: {e}")))?;
        if !exists {
            return Ok(());
        }

        let contents = self
            .bounded(tokio::fs::read_to_string(path))
            .await?
            .map_err(|e| Error::registry(format!("Failed to read registry file: {e}")))?;
        let snapshot: CacheSnapshot = serde_json::from_str(&contents)
            .map_err(|e| Error::registry(format!("Failed to parse registry file: {e}")))?;

        let loaded = snapshot.into_map();
        debug!(path = %path.display(), entries = loaded.len(), "Loaded cache registry");
        *self.entries.write().await = loaded;
        Ok(())
    }

    /// Write the registry to its backing file; a no-op in memory-only mode
    pub async fn save(&self) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        let _guard = self.save_lock.lock().await;
        let contents = self.to_json().await?;

        // Write to temp file first, then rename for atomicity
        let staging = temp_path(path);
        self.bounded(tokio::fs::write(&staging, &contents))
            .await?
            .map_err(|e| Error::registry(format!("Failed to write registry file: {e}")))?;
        self.bounded(tokio::fs::rename(&staging, path))
            .await?
            .map_err(|e| Error::registry(format!("Failed to rename registry file: {e}")))?;

        debug!(path = %path.display(), "Saved cache registry");
        Ok(())
    }

    async fn bounded<F: Future>(&self, operation: F) -> Result<F::Output> {
        tokio::time::timeout(self.io_timeout, operation)
            .await
            .map_err(|_| {
                Error::Transport(TransportError::Timeout {
                    timeout_ms: self.io_timeout.as_millis() as u64,
                })
            })
    }
}

/// Sibling of `path` with `.tmp` appended to the full file name
pub(super) fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(OsString::from).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

impl Default for ExpirationRegistry {
    fn default() -> Self {
        Self::in_memory()
    }
}

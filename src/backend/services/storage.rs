//! Durable key/value storage for the session token.

use crate::utils::{Error, Result};
use log::{debug, warn};
use std::collections::BTreeMap;
use std::future::{self, Future};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::pin::Pin;
use std::sync::Mutex;
use tokio::fs;

/// Key the bearer token is persisted under.
pub const TOKEN_KEY: &str = "token";

/// Pending write to a [`TokenStorage`].
pub type StorageFuture<'a> = Pin<Box<dyn Future<Output = Result<()>> + Send + 'a>>;

/// String key/value storage that survives restarts.
///
/// Reads are synchronous: a persisted session is restored before the first
/// render. Writes happen from async login and logout paths and are awaited.
pub trait TokenStorage: Send + Sync + 'static {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set<'a>(&'a self, key: &'a str, value: &'a str) -> StorageFuture<'a>;
    fn remove<'a>(&'a self, key: &'a str) -> StorageFuture<'a>;
}

impl<T: TokenStorage + ?Sized> TokenStorage for Box<T> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set<'a>(&'a self, key: &'a str, value: &'a str) -> StorageFuture<'a> {
        (**self).set(key, value)
    }

    fn remove<'a>(&'a self, key: &'a str) -> StorageFuture<'a> {
        (**self).remove(key)
    }
}

/// JSON file backed storage, one object holding every key.
pub struct FileStorage {
    path: PathBuf,
    // Serializes read-modify-write cycles on the file.
    lock: tokio::sync::Mutex<()>,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: tokio::sync::Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Parses the file contents. An empty or unreadable file holds nothing.
    fn parse_entries(&self, json: &str) -> BTreeMap<String, String> {
        if json.trim().is_empty() {
            return BTreeMap::new();
        }

        serde_json::from_str(json).unwrap_or_else(|e| {
            warn!("Discarding unreadable storage file {}: {e}", self.path.display());
            BTreeMap::new()
        })
    }

    async fn read_entries(&self) -> Result<BTreeMap<String, String>> {
        match fs::read_to_string(&self.path).await {
            Ok(json) => Ok(self.parse_entries(&json)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    async fn write_entries(&self, entries: &BTreeMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).await?;
        }

        let json = serde_json::to_string_pretty(entries)?;
        fs::write(&self.path, json).await?;
        Ok(())
    }
}

impl TokenStorage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        match std::fs::read_to_string(&self.path) {
            Ok(json) => Ok(self.parse_entries(&json).remove(key)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set<'a>(&'a self, key: &'a str, value: &'a str) -> StorageFuture<'a> {
        Box::pin(async move {
            let _guard = self.lock.lock().await;
            let mut entries = self.read_entries().await?;
            entries.insert(key.to_string(), value.to_string());
            debug!("Persisting '{key}' to {}", self.path.display());
            self.write_entries(&entries).await
        })
    }

    fn remove<'a>(&'a self, key: &'a str) -> StorageFuture<'a> {
        Box::pin(async move {
            let _guard = self.lock.lock().await;
            let mut entries = self.read_entries().await?;
            if entries.remove(key).is_none() {
                return Ok(());
            }
            debug!("Removing '{key}' from {}", self.path.display());
            self.write_entries(&entries).await
        })
    }
}

/// Volatile storage, used where nothing should touch the disk.
#[derive(Default)]
pub struct MemoryStorage {
    entries: Mutex<BTreeMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage pre-seeded with a persisted token.
    pub fn with_token(token: &str) -> Self {
        let storage = Self::new();
        if let Ok(mut entries) = storage.entries.lock() {
            entries.insert(TOKEN_KEY.to_string(), token.to_string());
        }
        storage
    }

    fn entries(&self) -> Result<std::sync::MutexGuard<'_, BTreeMap<String, String>>> {
        self.entries
            .lock()
            .map_err(|_| Error::storage("Storage lock poisoned"))
    }
}

impl TokenStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries()?.get(key).cloned())
    }

    fn set<'a>(&'a self, key: &'a str, value: &'a str) -> StorageFuture<'a> {
        let result = self.entries().map(|mut entries| {
            entries.insert(key.to_string(), value.to_string());
        });
        Box::pin(future::ready(result))
    }

    fn remove<'a>(&'a self, key: &'a str) -> StorageFuture<'a> {
        let result = self.entries().map(|mut entries| {
            entries.remove(key);
        });
        Box::pin(future::ready(result))
    }
}

//! Durable client-side key-value storage.
//!
//! Two stores mirror the session: a primary store (the equivalent of a
//! browser's local storage) and a secondary cookie-style store read when the
//! primary has nothing. Both speak the same [`KeyValueStorage`] trait so tests
//! can substitute in-memory or failing implementations.

pub mod file;
pub mod memory;
pub mod paths;

pub use file::FileStorage;
pub use memory::MemoryStorage;
pub use paths::{DATA_DIR_ENV_VAR, PathSource, StoragePaths, detect_storage_paths};

use crate::error::StorageError;

use std::sync::Arc;

use log::warn;

/// Key holding the raw bearer token, in both stores.
pub const TOKEN_KEY: &str = "token";

/// Key holding the JSON snapshot of the whole session in the primary store.
pub const SESSION_SNAPSHOT_KEY: &str = "auth-storage";

pub trait KeyValueStorage: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Which durable store a token was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenSource {
    Primary,
    Cookie,
}

impl std::fmt::Display for TokenSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenSource::Primary => write!(f, "local storage"),
            TokenSource::Cookie => write!(f, "cookie store"),
        }
    }
}

/// The pair of durable stores backing the credential store.
#[derive(Clone)]
pub struct DurableStorage {
    primary: Arc<dyn KeyValueStorage>,
    cookies: Arc<dyn KeyValueStorage>,
}

impl DurableStorage {
    pub fn new(primary: Arc<dyn KeyValueStorage>, cookies: Arc<dyn KeyValueStorage>) -> Self {
        Self { primary, cookies }
    }

    /// File-backed stores under the detected data directory.
    pub fn open(paths: &StoragePaths) -> Self {
        Self::new(
            Arc::new(FileStorage::new(&paths.local_storage_file)),
            Arc::new(FileStorage::new(&paths.cookie_file)),
        )
    }

    pub fn in_memory() -> Self {
        Self::new(
            Arc::new(MemoryStorage::default()),
            Arc::new(MemoryStorage::default()),
        )
    }

    pub fn primary(&self) -> &dyn KeyValueStorage {
        self.primary.as_ref()
    }

    pub fn cookies(&self) -> &dyn KeyValueStorage {
        self.cookies.as_ref()
    }

    /// Token from the primary store only.
    ///
    /// Read failures and blank values count as absent.
    pub fn primary_token(&self) -> Option<String> {
        read_non_empty(self.primary(), TOKEN_KEY, TokenSource::Primary)
    }

    /// Token from the primary store, falling back to the cookie store.
    pub fn read_token(&self) -> Option<(String, TokenSource)> {
        if let Some(token) = self.primary_token() {
            return Some((token, TokenSource::Primary));
        }

        read_non_empty(self.cookies(), TOKEN_KEY, TokenSource::Cookie)
            .map(|token| (token, TokenSource::Cookie))
    }
}

fn read_non_empty(storage: &dyn KeyValueStorage, key: &str, source: TokenSource) -> Option<String> {
    match storage.get(key) {
        Ok(Some(value)) if !value.trim().is_empty() => Some(value),
        Ok(_) => None,
        Err(e) => {
            warn!("Failed to read '{}' from {}: {}", key, source, e);
            None
        }
    }
}

mod guard;
mod nav;
mod paths;
mod store;

use crate::error::StorageError;
use crate::storage::{KeyValueStorage, MemoryStorage};

use common::ErrorLocation;

use std::panic::Location;

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde_json::Value;

/// A JWT-shaped token whose payload is `claims`. The signature is not real.
pub(crate) fn token_with_claims(claims: Value) -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
    let payload = URL_SAFE_NO_PAD.encode(claims.to_string().as_bytes());
    format!("{header}.{payload}.signature")
}

/// Storage whose every operation fails.
pub(crate) struct FailingStorage;

impl FailingStorage {
    #[track_caller]
    fn error() -> StorageError {
        StorageError::Unavailable {
            message: "storage disabled".to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl KeyValueStorage for FailingStorage {
    fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Err(Self::error())
    }

    fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(Self::error())
    }

    fn remove(&self, _key: &str) -> Result<(), StorageError> {
        Err(Self::error())
    }
}

/// Storage that reads and writes normally but refuses to delete anything.
#[derive(Default)]
pub(crate) struct UnremovableStorage {
    inner: MemoryStorage,
}

impl KeyValueStorage for UnremovableStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.inner.set(key, value)
    }

    fn remove(&self, _key: &str) -> Result<(), StorageError> {
        Err(FailingStorage::error())
    }
}

//! Platform-aware detection of the newsdesk data directory.
//!
//! Lookup order:
//! 1. NEWSDESK_DATA_DIR environment variable (explicit override)
//! 2. Platform-specific data directory via `dirs` crate
//! 3. `$HOME/.local/share/newsdesk`
//!
//! Returns Result, never silently falls back to a wrong path.

use crate::error::StorageError;

use common::ErrorLocation;

use std::env;
use std::panic::Location;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};

pub const DATA_DIR_ENV_VAR: &str = "NEWSDESK_DATA_DIR";

const APP_DIR_NAME: &str = "newsdesk";
const LOCAL_STORAGE_FILE_NAME: &str = "local_storage.json";
const COOKIE_FILE_NAME: &str = "cookies.json";

/// Where the durable stores live.
#[derive(Debug, Clone)]
pub struct StoragePaths {
    /// Base data directory (e.g., ~/.local/share/newsdesk on Linux).
    pub data_dir: PathBuf,
    /// Primary store.
    pub local_storage_file: PathBuf,
    /// Secondary cookie-style store.
    pub cookie_file: PathBuf,
    /// How the path was determined.
    pub source: PathSource,
}

/// How the path was determined (for logging).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathSource {
    /// Set via NEWSDESK_DATA_DIR environment variable.
    EnvVar,
    /// Detected via platform-specific XDG/AppData/Library path.
    PlatformDefault,
    /// `$HOME` based fallback.
    HomeFallback,
    /// Given explicitly by the caller.
    Explicit,
}

impl std::fmt::Display for PathSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathSource::EnvVar => write!(f, "{DATA_DIR_ENV_VAR}"),
            PathSource::PlatformDefault => write!(f, "platform default"),
            PathSource::HomeFallback => write!(f, "home fallback"),
            PathSource::Explicit => write!(f, "explicit"),
        }
    }
}

impl StoragePaths {
    pub fn in_dir(data_dir: impl AsRef<Path>) -> Self {
        Self::with_source(data_dir.as_ref().to_path_buf(), PathSource::Explicit)
    }

    fn with_source(data_dir: PathBuf, source: PathSource) -> Self {
        Self {
            local_storage_file: data_dir.join(LOCAL_STORAGE_FILE_NAME),
            cookie_file: data_dir.join(COOKIE_FILE_NAME),
            data_dir,
            source,
        }
    }
}

/// Detect the newsdesk data paths.
///
/// # Errors
/// Returns `StorageError::PathDetection` if no valid path can be determined.
#[track_caller]
pub fn detect_storage_paths() -> Result<StoragePaths, StorageError> {
    if let Ok(custom_dir) = env::var(DATA_DIR_ENV_VAR) {
        if !custom_dir.trim().is_empty() {
            let data_dir = PathBuf::from(&custom_dir);
            info!("Using {} override: {:?}", DATA_DIR_ENV_VAR, data_dir);
            return Ok(StoragePaths::with_source(data_dir, PathSource::EnvVar));
        }
    }

    if let Some(data_dir) = dirs::data_local_dir() {
        let data_dir = data_dir.join(APP_DIR_NAME);
        debug!("Platform data dir: {:?}", data_dir);
        return Ok(StoragePaths::with_source(data_dir, PathSource::PlatformDefault));
    }

    if let Ok(home) = env::var("HOME") {
        let data_dir = PathBuf::from(home).join(".local/share").join(APP_DIR_NAME);
        warn!("Using home fallback path: {:?}", data_dir);
        return Ok(StoragePaths::with_source(data_dir, PathSource::HomeFallback));
    }

    Err(StorageError::PathDetection {
        message: format!(
            "Cannot determine newsdesk data directory. Set {DATA_DIR_ENV_VAR} environment variable."
        ),
        location: ErrorLocation::from(Location::caller()),
    })
}

use crate::error::config::ConfigError;
use crate::session::GuardPolicy;

use common::ErrorLocation;

use std::panic::Location;
use std::path::Path;
use std::time::Duration;

use log::{info, warn};
use serde::{Deserialize, Serialize};

const CONFIG_FILE_NAME: &str = "config.json";
const CONFIG_VERSION: u32 = 1;

pub const API_BASE_URL_ENV_VAR: &str = "NEWSDESK_API_BASE_URL";

const MIN_TIMEOUT_SECS: u64 = 1;
const MAX_TIMEOUT_SECS: u64 = 300;

/// Console client settings, persisted as `config.json` in the data directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default = "default_version")]
    pub version: u32,

    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    #[serde(default = "default_login_path")]
    pub login_path: String,

    #[serde(default = "default_protected_prefix")]
    pub protected_prefix: String,

    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            api_base_url: default_api_base_url(),
            login_path: default_login_path(),
            protected_prefix: default_protected_prefix(),
            request_timeout_secs: default_request_timeout_secs(),
            page_size: default_page_size(),
        }
    }
}

// ============================================
// DEFAULT FUNCTIONS
// ============================================

fn default_version() -> u32 {
    CONFIG_VERSION
}

fn default_api_base_url() -> String {
    crate::DEFAULT_API_BASE_URL.to_string()
}

fn default_login_path() -> String {
    crate::LOGIN_PATH.to_string()
}

fn default_protected_prefix() -> String {
    crate::ADMIN_ROUTE_PREFIX.to_string()
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_page_size() -> u32 {
    models::article::query::DEFAULT_PAGE_SIZE
}

// ============================================
// IMPLEMENTATION
// ============================================

impl ClientConfig {
    /// Load config from {data_dir}/config.json.
    ///
    /// A missing file yields defaults. A file that exists but cannot be read,
    /// parsed or validated is an error.
    #[track_caller]
    pub fn load(data_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = data_dir.join(CONFIG_FILE_NAME);

        if !config_path.exists() {
            info!(
                "Config file not found at {}, using defaults",
                config_path.display()
            );
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&config_path).map_err(|e| {
            warn!("Failed to read config file: {}", e);
            ConfigError::ReadError {
                location: ErrorLocation::from(Location::caller()),
                path: config_path.clone(),
                source: e,
            }
        })?;

        let config: ClientConfig = serde_json::from_str(&contents).map_err(|e| {
            warn!("Failed to parse config JSON: {}", e);
            ConfigError::ParseError {
                location: ErrorLocation::from(Location::caller()),
                path: config_path.clone(),
                reason: e.to_string(),
            }
        })?;

        config.validate()?;

        info!("Config loaded from {}", config_path.display());
        Ok(config)
    }

    /// Save config to {data_dir}/config.json using temp file + rename.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if validation, directory creation,
    /// serialization, write or rename fails.
    #[track_caller]
    pub fn save(&self, data_dir: &Path) -> Result<(), ConfigError> {
        self.validate()?;

        std::fs::create_dir_all(data_dir).map_err(|e| ConfigError::WriteError {
            location: ErrorLocation::from(Location::caller()),
            path: data_dir.to_path_buf(),
            source: e,
        })?;

        let config_path = data_dir.join(CONFIG_FILE_NAME);
        let temp_path = data_dir.join(format!("{}.tmp", CONFIG_FILE_NAME));

        let json = serde_json::to_string_pretty(self).map_err(|e| ConfigError::SerializeError {
            location: ErrorLocation::from(Location::caller()),
            reason: e.to_string(),
        })?;

        std::fs::write(&temp_path, json).map_err(|e| ConfigError::WriteError {
            location: ErrorLocation::from(Location::caller()),
            path: temp_path.clone(),
            source: e,
        })?;

        std::fs::rename(&temp_path, &config_path).map_err(|e| ConfigError::WriteError {
            location: ErrorLocation::from(Location::caller()),
            path: config_path.clone(),
            source: e,
        })?;

        info!("Config saved to {}", config_path.display());
        Ok(())
    }

    /// Load `.env` (if any) and apply environment overrides.
    ///
    /// The override is validated together with the rest of the config.
    #[track_caller]
    pub fn apply_env_overrides(mut self) -> Result<Self, ConfigError> {
        // A missing .env is the common case.
        let _ = dotenvy::dotenv();

        match std::env::var(API_BASE_URL_ENV_VAR) {
            Ok(url) if !url.trim().is_empty() => {
                info!("Using API base URL from {}", API_BASE_URL_ENV_VAR);
                self.api_base_url = url.trim().to_string();
            }
            Ok(_) | Err(std::env::VarError::NotPresent) => {}
            Err(std::env::VarError::NotUnicode(_)) => {
                return Err(ConfigError::EnvOverride {
                    location: ErrorLocation::from(Location::caller()),
                    variable: API_BASE_URL_ENV_VAR,
                    reason: "value is not valid unicode".to_string(),
                });
            }
        }

        self.validate()?;
        Ok(self)
    }

    /// Validate config values.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ValidationError`] for the first invalid value.
    #[track_caller]
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.version == 0 || self.version > CONFIG_VERSION {
            return Err(validation_error(format!(
                "Invalid version: {} (expected 1-{})",
                self.version, CONFIG_VERSION
            )));
        }

        let url = self.api_base_url.trim();
        if url.is_empty() {
            return Err(validation_error("api_base_url cannot be empty"));
        }
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(validation_error(format!("Invalid URL format: {url}")));
        }
        if let Err(e) = url::Url::parse(url) {
            return Err(validation_error(format!("Invalid URL {url}: {e}")));
        }

        if !self.protected_prefix.starts_with('/') {
            return Err(validation_error(format!(
                "protected_prefix must start with '/': {}",
                self.protected_prefix
            )));
        }
        if !self.login_path.starts_with('/') {
            return Err(validation_error(format!(
                "login_path must start with '/': {}",
                self.login_path
            )));
        }
        if !self.guard_policy().is_under_prefix(&self.login_path) {
            return Err(validation_error(format!(
                "login_path {} must be under protected_prefix {}",
                self.login_path, self.protected_prefix
            )));
        }

        if !(MIN_TIMEOUT_SECS..=MAX_TIMEOUT_SECS).contains(&self.request_timeout_secs) {
            return Err(validation_error(format!(
                "Invalid request timeout: {}s (must be {}-{})",
                self.request_timeout_secs, MIN_TIMEOUT_SECS, MAX_TIMEOUT_SECS
            )));
        }

        if self.page_size == 0 || self.page_size > models::article::query::MAX_PAGE_SIZE {
            return Err(validation_error(format!(
                "Invalid page size: {} (must be 1-{})",
                self.page_size,
                models::article::query::MAX_PAGE_SIZE
            )));
        }

        Ok(())
    }

    pub fn guard_policy(&self) -> GuardPolicy {
        GuardPolicy::new(self.login_path.clone(), self.protected_prefix.clone())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

#[track_caller]
fn validation_error(reason: impl Into<String>) -> ConfigError {
    ConfigError::ValidationError {
        location: ErrorLocation::from(Location::caller()),
        reason: reason.into(),
    }
}

use crate::error::ConsoleError;

use client_core::api::AuthService;
use client_core::config::ClientConfig;
use client_core::http::ApiClient;
use client_core::session::{
    BootstrapOutcome, CredentialStore, GuardPolicy, Navigator, RouteGuard, Router,
    SessionBootstrap,
};
use client_core::storage::{DurableStorage, StoragePaths};

use std::fs::create_dir_all;
use std::sync::Arc;

use log::{debug, info};

/// Route the console starts on before any command navigates.
pub const START_ROUTE: &str = "/";

/// Everything a command needs, wired once at startup.
///
/// One credential store and one API client per process; every consumer gets
/// clones of the same handles.
#[derive(Clone)]
pub struct AppState {
    pub paths: StoragePaths,
    pub config: ClientConfig,
    pub store: CredentialStore,
    pub router: Router,
    pub client: ApiClient,
    pub bootstrap: BootstrapOutcome,
}

impl AppState {
    /// Load config, open durable storage, restore the session and build the
    /// shared client.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError`] if the data directory cannot be created, the
    /// config is invalid, or the client cannot be built.
    pub fn initialize(paths: StoragePaths) -> Result<Self, ConsoleError> {
        create_dir_all(&paths.data_dir).map_err(|e| {
            ConsoleError::console(format!(
                "Failed to create data directory {}: {e}",
                paths.data_dir.display()
            ))
        })?;

        let config = ClientConfig::load(&paths.data_dir)?.apply_env_overrides()?;
        debug!("API base URL: {}", config.api_base_url);

        let store = CredentialStore::new(DurableStorage::open(&paths));
        let bootstrap = SessionBootstrap::new(store.clone()).run();
        if bootstrap.populated {
            info!(
                "Restored session from {}",
                bootstrap
                    .source
                    .map(|s| s.to_string())
                    .unwrap_or_default()
            );
        }

        let router = Router::new(START_ROUTE);
        let client = ApiClient::builder(config.api_base_url.as_str())
            .timeout(config.timeout())
            .with_session(
                store.clone(),
                Arc::new(router.clone()),
                config.login_path.as_str(),
            )
            .build()?;

        Ok(Self {
            paths,
            config,
            store,
            router,
            client,
            bootstrap,
        })
    }

    pub fn policy(&self) -> GuardPolicy {
        self.config.guard_policy()
    }

    pub fn navigator(&self) -> Arc<dyn Navigator> {
        Arc::new(self.router.clone())
    }

    pub fn guard(&self) -> RouteGuard {
        RouteGuard::new(self.store.clone(), self.navigator(), self.policy())
    }

    pub fn auth(&self) -> AuthService {
        AuthService::new(
            self.client.clone(),
            self.store.clone(),
            self.navigator(),
            self.config.login_path.as_str(),
        )
    }
}

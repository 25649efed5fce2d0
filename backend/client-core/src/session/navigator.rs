use std::sync::{Arc, Mutex, PoisonError};

use log::debug;
use tokio::sync::watch;

/// Moves the client to another route.
///
/// Fire-and-forget: navigation is assumed reliable and is never retried.
pub trait Navigator: Send + Sync {
    fn navigate(&self, path: &str);

    fn current_route(&self) -> String;
}

/// In-process router holding the active route.
///
/// Every navigation is recorded in the history, even one to the route already
/// active; subscribers are only woken when the route actually changes.
#[derive(Clone)]
pub struct Router {
    route: Arc<watch::Sender<String>>,
    history: Arc<Mutex<Vec<String>>>,
}

impl Router {
    pub fn new(initial_route: impl Into<String>) -> Self {
        let (route, _) = watch::channel(initial_route.into());
        Self {
            route: Arc::new(route),
            history: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<String> {
        self.route.subscribe()
    }

    /// Navigation events so far, oldest first.
    pub fn history(&self) -> Vec<String> {
        self.history
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Navigator for Router {
    fn navigate(&self, path: &str) {
        debug!("Navigating to {}", path);

        self.history
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(path.to_string());

        self.route.send_if_modified(|current| {
            if current == path {
                return false;
            }
            *current = path.to_string();
            true
        });
    }

    fn current_route(&self) -> String {
        self.route.borrow().clone()
    }
}

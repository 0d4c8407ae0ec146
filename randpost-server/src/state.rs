//! Application state shared across handlers

use std::sync::Arc;
use std::time::Duration;

use crate::db::PostStore;

/// Deadline applied to each store call when none is configured.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    store: Arc<dyn PostStore>,
    request_timeout: Duration,
}

impl AppState {
    pub fn new(store: Arc<dyn PostStore>) -> Self {
        Self::with_timeout(store, DEFAULT_REQUEST_TIMEOUT)
    }

    pub fn with_timeout(store: Arc<dyn PostStore>, request_timeout: Duration) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                store,
                request_timeout,
            }),
        }
    }

    pub fn store(&self) -> &dyn PostStore {
        self.inner.store.as_ref()
    }

    pub fn request_timeout(&self) -> Duration {
        self.inner.request_timeout
    }
}

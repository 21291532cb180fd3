//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::ServerConfig;
use crate::seclog::SecurityLog;
use crate::services::auth::AuthService;
use crate::store::{CustomerRegistry, UserStore};

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and owns the in-memory
/// stores and the security log handle. Handlers receive it by value and
/// borrow the pieces they need, which keeps tests free of process-wide
/// globals.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ServerConfig,
    users: UserStore,
    customers: CustomerRegistry,
    seclog: SecurityLog,
}

impl AppState {
    /// Create a new application state.
    ///
    /// Starts the security log writer task, so this must be called from
    /// within a Tokio runtime.
    #[must_use]
    pub fn new(config: ServerConfig) -> Self {
        let seclog = SecurityLog::start(config.security_log.clone());

        Self {
            inner: Arc::new(AppStateInner {
                config,
                users: UserStore::new(),
                customers: CustomerRegistry::new(),
                seclog,
            }),
        }
    }

    /// Get a reference to the server configuration.
    #[must_use]
    pub fn config(&self) -> &ServerConfig {
        &self.inner.config
    }

    /// Get a reference to the credential store.
    #[must_use]
    pub fn users(&self) -> &UserStore {
        &self.inner.users
    }

    /// Get a reference to the customer registry.
    #[must_use]
    pub fn customers(&self) -> &CustomerRegistry {
        &self.inner.customers
    }

    /// Get a reference to the security log.
    #[must_use]
    pub fn seclog(&self) -> &SecurityLog {
        &self.inner.seclog
    }

    /// Build an authentication service over this state's stores.
    #[must_use]
    pub fn auth(&self) -> AuthService<'_> {
        AuthService::new(self.users(), self.seclog())
    }
}

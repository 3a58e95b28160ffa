//! Application state for the Attendance Engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::config::ConfigLoader;
use crate::error::EngineResult;
use crate::session::SessionStore;
use crate::store::Registry;

/// Shared application state.
///
/// Contains resources that are shared across all request handlers: the loaded
/// configuration, the registry and the live sessions.
#[derive(Clone)]
pub struct AppState {
    config: Arc<ConfigLoader>,
    registry: Arc<Registry>,
    sessions: Arc<SessionStore>,
}

impl AppState {
    /// Creates the application state, seeding a fresh registry from the configuration.
    pub fn new(config: ConfigLoader) -> EngineResult<Self> {
        let registry = Registry::from_config(&config)?;
        Ok(Self::with_registry(config, registry))
    }

    /// Creates the application state around an existing registry.
    pub fn with_registry(config: ConfigLoader, registry: Registry) -> Self {
        let service = config.service();
        let sessions = SessionStore::new(service.admin.clone(), &service.session);
        Self {
            config: Arc::new(config),
            registry: Arc::new(registry),
            sessions: Arc::new(sessions),
        }
    }

    /// Returns a reference to the configuration loader.
    pub fn config(&self) -> &ConfigLoader {
        &self.config
    }

    /// Returns the master-data and attendance registry.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Returns the session store.
    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_state_is_clone() {
        // Verify AppState can be cloned (required for axum state)
        fn assert_clone<T: Clone>() {}
        assert_clone::<AppState>();
    }

    #[test]
    fn test_app_state_seeds_registry() {
        let config = ConfigLoader::load("./config/default").unwrap();
        let state = AppState::new(config).unwrap();
        assert_eq!(state.registry().employees().len(), 3);
        assert!(state.sessions().is_empty());
    }
}

//! Application state for the print pricing API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::config::ConfigLoader;

/// Shared application state.
///
/// Contains resources that are shared across all request handlers,
/// such as the loaded shop catalog.
#[derive(Clone)]
pub struct AppState {
    /// The loaded catalog, shared read-only across handlers.
    config: Arc<ConfigLoader>,
}

impl AppState {
    /// Creates a new application state with the given configuration loader.
    pub fn new(config: ConfigLoader) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    /// Returns a reference to the configuration loader.
    pub fn config(&self) -> &ConfigLoader {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_state_shares_catalog() {
        let loader = ConfigLoader::load("./config/catalog").expect("Failed to load config");
        let state = AppState::new(loader);
        let cloned = state.clone();

        assert!(std::ptr::eq(state.config(), cloned.config()));
        assert_eq!(cloned.config().shop().code, "PPS");
    }
}

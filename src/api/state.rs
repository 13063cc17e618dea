//! Application state for the fee engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::config::ConfigLoader;

/// Shared application state.
///
/// Holds the school's loaded fee configuration. Handlers only read it; every
/// computation starts from this configuration (or a catalog supplied in the
/// request) and nothing computed is stored back.
#[derive(Clone)]
pub struct AppState {
    /// The loaded school configuration.
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

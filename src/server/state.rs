//! Server shared state
//!
//! Holds configuration and the page coordinator for the HTTP server.

use crate::config::Config;
use crate::view::coordinator::CoordinatorHandle;

/// Shared state for the HTTP server
pub struct AppState {
    /// Configuration
    pub config: Config,

    /// Page state owner
    coordinator: CoordinatorHandle,
}

impl AppState {
    /// Create new application state
    pub fn new(config: Config, coordinator: CoordinatorHandle) -> Self {
        Self {
            config,
            coordinator,
        }
    }

    /// Page coordinator
    pub fn coordinator(&self) -> &CoordinatorHandle {
        &self.coordinator
    }
}

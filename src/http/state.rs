//! Application state for the HTTP server.

use std::sync::Arc;

use crate::ephemeris::Ephemeris;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Engine shared by every request; configured once at start-up
    pub ephemeris: Arc<dyn Ephemeris>,
}

impl AppState {
    pub fn new(ephemeris: Arc<dyn Ephemeris>) -> Self {
        Self { ephemeris }
    }
}

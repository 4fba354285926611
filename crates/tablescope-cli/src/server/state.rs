//! Application state for the web server.

use std::sync::Arc;
use std::time::Instant;

use tablescope::Tablescope;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Dataset registry and analysis engine.
    pub scope: Arc<Tablescope>,
    /// Server start time (for uptime reporting).
    pub started_at: Instant,
}

impl AppState {
    /// Create new application state.
    pub fn new(scope: Tablescope) -> Self {
        Self {
            scope: Arc::new(scope),
            started_at: Instant::now(),
        }
    }
}

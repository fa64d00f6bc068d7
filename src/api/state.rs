//! Application state for the Teller Shift Engine API.

use std::sync::Arc;

use crate::engine::InMemoryEngine;

/// Shared application state.
///
/// Holds the engine every handler operates on.
#[derive(Clone)]
pub struct AppState {
    engine: Arc<InMemoryEngine>,
}

impl AppState {
    /// Creates a new application state around an engine.
    pub fn new(engine: InMemoryEngine) -> Self {
        Self {
            engine: Arc::new(engine),
        }
    }

    /// Returns the engine.
    pub fn engine(&self) -> &InMemoryEngine {
        &self.engine
    }
}

//! Shared types for the HTTP layer.

use std::sync::Arc;

use crate::state::AppState;

/// Shared context for all routes. Wraps the immutable `AppState`;
/// handlers clone the `Arc`, never the state itself.
#[derive(Clone)]
pub struct ApiContext {
    pub state: Arc<AppState>,
}

impl ApiContext {
    pub fn new(state: Arc<AppState>) -> Self {
        Self { state }
    }
}

use std::sync::Arc;

use lvc_core::provider::DocumentProvider;

use crate::analyze::Analyzer;

/// Shared application state, injected into all route handlers via Axum state.
///
/// Everything in here is read-only; requests never coordinate.
#[derive(Clone)]
pub struct AppState {
    pub provider: Arc<dyn DocumentProvider>,
    pub analyzer: Arc<Analyzer>,
}

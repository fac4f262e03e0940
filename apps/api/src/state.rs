use std::sync::Arc;

use crate::config::Config;
use crate::recommend::engine::Engine;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// The ranking engine. Holds only immutable tunables; all per-request
    /// working data (corpus, vectors, scores) lives on the call stack.
    pub engine: Arc<Engine>,
}

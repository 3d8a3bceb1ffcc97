use std::sync::Arc;

use fluxgate_core::classify::{FailureClassifier, MarkerClassifier};
use fluxgate_engine::ImageEngine;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable and read-only: nothing in here changes after start-up.
#[derive(Clone)]
pub struct AppState {
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Downstream image engine.
    pub engine: Arc<dyn ImageEngine>,
    /// Maps raw engine failures to caller-facing errors.
    pub classifier: Arc<dyn FailureClassifier>,
}

impl AppState {
    /// State with the default moderation classifier.
    pub fn new(config: ServerConfig, engine: Arc<dyn ImageEngine>) -> Self {
        Self {
            config: Arc::new(config),
            engine,
            classifier: Arc::new(MarkerClassifier::default()),
        }
    }
}

use axum::response::{IntoResponse, Response};
use fluxgate_core::classify::{ClassifiedError, ErrorKind};
use fluxgate_core::error::CoreError;

use crate::response::error_response;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for validation failures and [`ClassifiedError`] for
/// engine failures that already went through the classifier. Implements
/// [`IntoResponse`] to produce consistent error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A request-shaping error from `fluxgate_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A classified downstream failure.
    #[error("{}", .0.user_message)]
    Classified(ClassifiedError),

    /// A malformed request body (not multipart, truncated part, ...).
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// No route matched.
    #[error("Not found")]
    NotFound,

    /// Anything else; surfaced as an engine error with the message as details.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// Classify this error for the caller.
    pub fn classify(self) -> ClassifiedError {
        match self {
            AppError::Core(core) => ClassifiedError::from(core),
            AppError::Classified(classified) => classified,
            AppError::BadRequest(msg) => ClassifiedError::validation(msg),
            AppError::NotFound => ClassifiedError::not_found(),
            AppError::InternalError(msg) => ClassifiedError::engine(msg),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let classified = self.classify();
        match classified.kind {
            ErrorKind::EngineError => tracing::error!(
                details = classified.details.as_deref().unwrap_or_default(),
                "Engine error"
            ),
            ErrorKind::ContentModeration => {
                tracing::warn!("Request rejected by content moderation")
            }
            ErrorKind::ValidationError => {
                tracing::debug!(error = %classified.user_message, "Validation failed")
            }
            ErrorKind::NotFound => {}
        }
        error_response(classified)
    }
}

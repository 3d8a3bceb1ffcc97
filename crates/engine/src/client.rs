//! The generation capability and a thin invocation wrapper.

use async_trait::async_trait;
use fluxgate_core::builder::EngineRequest;
use fluxgate_core::classify::RawFailure;

/// Errors surfaced by an [`ImageEngine`].
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The engine answered with a non-2xx status or an unsuccessful envelope.
    #[error("Workers AI error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body, kept verbatim for classification.
        body: String,
    },

    /// A successful response that carried no image.
    #[error("Workers AI response did not contain an image: {0}")]
    MissingImage(String),

    /// The image payload was not valid base64.
    #[error("Invalid base64 image data: {0}")]
    Decode(#[from] base64::DecodeError),
}

/// Something that turns an [`EngineRequest`] into encoded image bytes.
///
/// Shared across requests behind an `Arc`; implementations must not hold
/// per-request state.
#[async_trait]
pub trait ImageEngine: Send + Sync {
    async fn generate(&self, request: &EngineRequest) -> Result<Vec<u8>, EngineError>;
}

/// Result of one engine invocation, with failures left uninterpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationOutcome {
    Success(Vec<u8>),
    Failure(RawFailure),
}

/// Invoke `engine` once. No retries; the failure text is passed on as-is.
pub async fn run_generation(engine: &dyn ImageEngine, request: &EngineRequest) -> GenerationOutcome {
    tracing::debug!(
        images = request.images.len(),
        steps = request.steps,
        width = request.width,
        height = request.height,
        "Submitting generation request"
    );

    match engine.generate(request).await {
        Ok(bytes) => {
            tracing::debug!(bytes = bytes.len(), "Generation succeeded");
            GenerationOutcome::Success(bytes)
        }
        Err(err) => GenerationOutcome::Failure(RawFailure::from_error(&err)),
    }
}

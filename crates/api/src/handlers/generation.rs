//! Handler shared by all five generation endpoints.
//!
//! The router binds one route per [`GenerationMode`]; everything after that
//! is mode-agnostic: validate, build, invoke, classify.

use fluxgate_core::builder::EngineRequest;
use fluxgate_core::form::FormFields;
use fluxgate_core::mode::GenerationMode;
use fluxgate_core::request::GenerationRequest;
use fluxgate_engine::{run_generation, GenerationOutcome};

use crate::error::{AppError, AppResult};
use crate::response::ImageResponse;
use crate::state::AppState;

/// POST /api/{generate,multi-reference,json-prompt,style-transfer,product-shot}
///
/// Validation failures return before the engine is touched.
pub async fn generate(
    mode: GenerationMode,
    state: AppState,
    form: FormFields,
) -> AppResult<ImageResponse> {
    let request = GenerationRequest::from_form(mode, &form)?;
    let engine_request = EngineRequest::from(request);

    tracing::info!(
        %mode,
        images = engine_request.images.len(),
        steps = engine_request.steps,
        "Dispatching generation"
    );

    match run_generation(state.engine.as_ref(), &engine_request).await {
        GenerationOutcome::Success(bytes) => {
            tracing::info!(%mode, bytes = bytes.len(), "Generation complete");
            Ok(ImageResponse(bytes))
        }
        GenerationOutcome::Failure(raw) => {
            tracing::debug!(%mode, message = %raw.message, cause = ?raw.cause, "Engine failure");
            Err(AppError::Classified(state.classifier.classify(&raw)))
        }
    }
}

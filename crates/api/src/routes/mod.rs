pub mod health;

use axum::extract::State;
use axum::routing::any;
use axum::Router;
use fluxgate_core::mode::GenerationMode;

use crate::error::AppError;
use crate::extract::GenerationForm;
use crate::handlers::{generation, ui};
use crate::state::AppState;

/// Generation routes, one per [`GenerationMode`].
///
/// Routes dispatch on path alone; any method other than the `OPTIONS`
/// preflight (answered by the CORS middleware) reaches validation.
///
/// ```text
/// /api/generate            basic text-to-image
/// /api/multi-reference     prompt + input_image_0..3
/// /api/json-prompt         structured JSON prompt
/// /api/style-transfer      style_image + content_image
/// /api/product-shot        product_image + environment
/// ```
pub fn generation_routes() -> Router<AppState> {
    GenerationMode::ALL
        .into_iter()
        .fold(Router::new(), |router, mode| {
            router.route(
                mode.path(),
                any(
                    move |State(state): State<AppState>, GenerationForm(form): GenerationForm| {
                        generation::generate(mode, state, form)
                    },
                ),
            )
        })
}

/// All application routes: UI, health, generation, and the not-found fallback.
pub fn app_routes() -> Router<AppState> {
    Router::new()
        .route("/", any(ui::index))
        .merge(health::router())
        .merge(generation_routes())
        .fallback(not_found)
}

async fn not_found() -> AppError {
    AppError::NotFound
}

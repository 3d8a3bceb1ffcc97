//! Tests for `AppError` → HTTP response mapping.
//!
//! These tests verify that each `AppError` variant produces the correct HTTP
//! status code, error code, and message. They do NOT need an HTTP server --
//! they call `IntoResponse` directly on `AppError` values.

use axum::response::IntoResponse;
use fluxgate_api::error::AppError;
use fluxgate_core::classify::{ClassifiedError, FailureClassifier, MarkerClassifier, RawFailure};
use fluxgate_core::error::CoreError;
use http_body_util::BodyExt;

/// Helper: convert an `AppError` into its status code and raw body.
async fn error_to_parts(err: AppError) -> (axum::http::StatusCode, Vec<u8>) {
    let response = err.into_response();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, bytes.to_vec())
}

/// Helper: convert an `AppError` into its status code and parsed JSON body.
async fn error_to_response(err: AppError) -> (axum::http::StatusCode, serde_json::Value) {
    let (status, bytes) = error_to_parts(err).await;
    (status, serde_json::from_slice(&bytes).unwrap())
}

// ---------------------------------------------------------------------------
// Test: CoreError::MissingField maps to 400 with VALIDATION_ERROR code
// ---------------------------------------------------------------------------

#[tokio::test]
async fn missing_field_returns_400() {
    let err = AppError::Core(CoreError::MissingField("prompt".into()));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, axum::http::StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(json["error"], "Missing required field: prompt");
    assert!(json.get("details").is_none());
}

// ---------------------------------------------------------------------------
// Test: malformed JSON is distinct from a missing field
// ---------------------------------------------------------------------------

#[tokio::test]
async fn malformed_json_returns_400_with_own_message() {
    let err = AppError::Core(CoreError::MalformedJson {
        field: "json_prompt",
        reason: "EOF while parsing an object at line 1 column 5".into(),
    });

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, axum::http::StatusCode::BAD_REQUEST);
    assert_eq!(
        json["error"],
        "Malformed JSON in 'json_prompt': EOF while parsing an object at line 1 column 5"
    );
}

// ---------------------------------------------------------------------------
// Test: AppError::BadRequest maps to 400 with VALIDATION_ERROR code
// ---------------------------------------------------------------------------

#[tokio::test]
async fn bad_request_error_returns_400() {
    let err = AppError::BadRequest("Invalid `boundary` for `multipart/form-data` request".into());

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, axum::http::StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

// ---------------------------------------------------------------------------
// Test: moderation rejection maps to 400 with suggestions
// ---------------------------------------------------------------------------

#[tokio::test]
async fn content_moderation_returns_400_with_suggestions() {
    let classified = MarkerClassifier::default().classify(&RawFailure::new("error 3030"));
    let err = AppError::Classified(classified);

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, axum::http::StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "CONTENT_MODERATION");
    assert_eq!(json["suggestions"].as_array().unwrap().len(), 3);
    assert!(json["details"].is_string());
}

// ---------------------------------------------------------------------------
// Test: engine error maps to 500 with raw details
// ---------------------------------------------------------------------------

#[tokio::test]
async fn engine_error_returns_500() {
    let err = AppError::Classified(ClassifiedError::engine("socket hang up"));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, axum::http::StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["code"], "ENGINE_ERROR");
    assert_eq!(json["error"], "Image generation failed");
    assert_eq!(json["details"], "socket hang up");
}

// ---------------------------------------------------------------------------
// Test: unclassified internal failures become engine errors
// ---------------------------------------------------------------------------

#[tokio::test]
async fn internal_error_returns_500_with_message_as_details() {
    let err = AppError::InternalError("worker crashed".into());

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, axum::http::StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["code"], "ENGINE_ERROR");
    assert_eq!(json["details"], "worker crashed");
}

// ---------------------------------------------------------------------------
// Test: NotFound is a plain-text 404
// ---------------------------------------------------------------------------

#[tokio::test]
async fn not_found_returns_plain_text_404() {
    let (status, body) = error_to_parts(AppError::NotFound).await;

    assert_eq!(status, axum::http::StatusCode::NOT_FOUND);
    assert_eq!(body, b"Not Found".to_vec());
}

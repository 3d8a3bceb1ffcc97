//! Response formatting: generated images, structured errors, and the
//! cross-origin header set every response carries.

use axum::body::Body;
use axum::http::header::{
    HeaderMap, HeaderName, HeaderValue, ACCESS_CONTROL_ALLOW_HEADERS,
    ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN, CACHE_CONTROL, CONTENT_TYPE,
};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use fluxgate_core::classify::{ClassifiedError, ErrorKind, NOT_FOUND_MESSAGE};
use serde::Serialize;

pub const CORS_ALLOW_ORIGIN: &str = "*";
pub const CORS_ALLOW_METHODS: &str = "GET, POST, OPTIONS";
pub const CORS_ALLOW_HEADERS: &str = "Content-Type, Authorization";

/// Content type of every generated image.
pub const IMAGE_CONTENT_TYPE: &str = "image/png";
/// Caching directive attached to generated images.
pub const IMAGE_CACHE_CONTROL: &str = "public, max-age=3600";

/// The three cross-origin headers, in a fixed order.
pub fn cors_headers() -> [(HeaderName, HeaderValue); 3] {
    [
        (
            ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static(CORS_ALLOW_ORIGIN),
        ),
        (
            ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static(CORS_ALLOW_METHODS),
        ),
        (
            ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static(CORS_ALLOW_HEADERS),
        ),
    ]
}

/// Insert the cross-origin headers, replacing any already present.
pub fn apply_cors_headers(headers: &mut HeaderMap) {
    for (name, value) in cors_headers() {
        headers.insert(name, value);
    }
}

/// Bodyless `204` answer to a preflight request.
pub fn preflight_response() -> Response {
    let mut response = StatusCode::NO_CONTENT.into_response();
    apply_cors_headers(response.headers_mut());
    response
}

/// A generated image, rendered as raw PNG bytes.
#[derive(Debug)]
pub struct ImageResponse(pub Vec<u8>);

impl IntoResponse for ImageResponse {
    fn into_response(self) -> Response {
        (
            StatusCode::OK,
            [
                (CONTENT_TYPE, IMAGE_CONTENT_TYPE),
                (CACHE_CONTROL, IMAGE_CACHE_CONTROL),
            ],
            Body::from(self.0),
        )
            .into_response()
    }
}

/// JSON error body: `{ "error", "details"?, "code"?, "suggestions"? }`.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestions: Option<Vec<String>>,
}

impl From<ClassifiedError> for ErrorBody {
    fn from(err: ClassifiedError) -> Self {
        Self {
            code: Some(err.kind.code()),
            error: err.user_message,
            details: err.details,
            suggestions: err.suggestions,
        }
    }
}

/// HTTP status for each error kind.
pub fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::ValidationError | ErrorKind::ContentModeration => StatusCode::BAD_REQUEST,
        ErrorKind::EngineError => StatusCode::INTERNAL_SERVER_ERROR,
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
    }
}

/// Render a classified error.
///
/// Unmapped routes answer with the plain-text `Not Found` body; every other
/// kind gets the JSON error body.
pub fn error_response(err: ClassifiedError) -> Response {
    let status = status_for(err.kind);
    if err.kind == ErrorKind::NotFound {
        return (status, NOT_FOUND_MESSAGE).into_response();
    }
    (status, Json(ErrorBody::from(err))).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping() {
        assert_eq!(status_for(ErrorKind::ValidationError), StatusCode::BAD_REQUEST);
        assert_eq!(status_for(ErrorKind::ContentModeration), StatusCode::BAD_REQUEST);
        assert_eq!(status_for(ErrorKind::EngineError), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(status_for(ErrorKind::NotFound), StatusCode::NOT_FOUND);
    }

    #[test]
    fn error_body_omits_empty_fields() {
        let body = ErrorBody::from(ClassifiedError::validation("Missing required field: prompt"));
        let json = serde_json::to_value(body).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "error": "Missing required field: prompt",
                "code": "VALIDATION_ERROR",
            })
        );
    }

    #[test]
    fn image_response_headers() {
        let response = ImageResponse(vec![1, 2, 3]).into_response();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[CONTENT_TYPE], "image/png");
        assert_eq!(response.headers()[CACHE_CONTROL], "public, max-age=3600");
    }

    #[test]
    fn preflight_has_only_cors_headers() {
        let response = preflight_response();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        assert_eq!(response.headers().len(), 3);
        assert_eq!(response.headers()[ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    }
}

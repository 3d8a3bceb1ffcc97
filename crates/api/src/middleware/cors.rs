//! Uniform cross-origin headers.
//!
//! Preflight requests are answered here for every path, before routing, and
//! every other response leaving the router gets the same header set.

use axum::extract::Request;
use axum::http::Method;
use axum::middleware::Next;
use axum::response::Response;

use crate::response::{apply_cors_headers, preflight_response};

pub async fn cors(request: Request, next: Next) -> Response {
    if request.method() == Method::OPTIONS {
        tracing::debug!(path = %request.uri().path(), "Answering CORS preflight");
        return preflight_response();
    }

    let mut response = next.run(request).await;
    apply_cors_headers(response.headers_mut());
    response
}

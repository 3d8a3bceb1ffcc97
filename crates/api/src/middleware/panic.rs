//! Panic recovery: the router is the last failure boundary, so a panicking
//! handler still answers with a classified 500.

use std::any::Any;

use axum::response::{IntoResponse, Response};

use crate::error::AppError;

/// Response body for [`tower_http::catch_panic::CatchPanicLayer::custom`].
pub fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let message = if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else {
        "handler panicked".to_string()
    };
    AppError::InternalError(message).into_response()
}

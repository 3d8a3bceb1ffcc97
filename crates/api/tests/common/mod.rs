#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use fluxgate_api::config::ServerConfig;
use fluxgate_api::router::build_app_router;
use fluxgate_api::state::AppState;
use fluxgate_core::builder::EngineRequest;
use fluxgate_engine::workers_ai::WorkersAiConfig;
use fluxgate_engine::{EngineError, ImageEngine};
use http_body_util::BodyExt;
use tower::ServiceExt;

pub const PNG_BYTES: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        request_timeout_secs: 30,
        max_upload_bytes: 1024 * 1024,
        engine: WorkersAiConfig::new("test-account", "test-token"),
    }
}

// ---------------------------------------------------------------------------
// Stub engine
// ---------------------------------------------------------------------------

/// What the stub engine does when invoked.
#[derive(Debug, Clone)]
pub enum StubBehavior {
    Image(Vec<u8>),
    Fail { status: u16, body: String },
    Panic,
}

/// Call-counting engine that records the last request it received.
#[derive(Debug)]
pub struct StubEngine {
    behavior: StubBehavior,
    calls: AtomicUsize,
    last_request: Mutex<Option<EngineRequest>>,
}

impl StubEngine {
    pub fn new(behavior: StubBehavior) -> Arc<Self> {
        Arc::new(Self {
            behavior,
            calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
        })
    }

    pub fn succeeding() -> Arc<Self> {
        Self::new(StubBehavior::Image(PNG_BYTES.to_vec()))
    }

    pub fn failing(status: u16, body: &str) -> Arc<Self> {
        Self::new(StubBehavior::Fail {
            status,
            body: body.to_string(),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> EngineRequest {
        self.last_request
            .lock()
            .unwrap()
            .clone()
            .expect("engine was never invoked")
    }
}

#[async_trait]
impl ImageEngine for StubEngine {
    async fn generate(&self, request: &EngineRequest) -> Result<Vec<u8>, EngineError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_request.lock().unwrap() = Some(request.clone());
        match &self.behavior {
            StubBehavior::Image(bytes) => Ok(bytes.clone()),
            StubBehavior::Fail { status, body } => Err(EngineError::Api {
                status: *status,
                body: body.clone(),
            }),
            StubBehavior::Panic => panic!("engine blew up"),
        }
    }
}

/// Build the full application router around `engine`.
///
/// Uses the same [`build_app_router`] as `main.rs` so tests exercise the
/// production middleware stack (CORS, request ID, timeout, tracing, panic
/// recovery).
pub fn build_test_app(engine: Arc<StubEngine>) -> Router {
    build_app_router(AppState::new(test_config(), engine))
}

// ---------------------------------------------------------------------------
// Multipart bodies
// ---------------------------------------------------------------------------

const BOUNDARY: &str = "fluxgate-test-boundary";

/// Hand-built `multipart/form-data` body.
#[derive(Default)]
pub struct MultipartBody {
    buf: Vec<u8>,
}

impl MultipartBody {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, name: &str, value: &str) -> Self {
        self.buf.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
        self
    }

    pub fn file(mut self, name: &str, file_name: &str, bytes: &[u8]) -> Self {
        self.buf.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\nContent-Type: image/png\r\n\r\n"
            )
            .as_bytes(),
        );
        self.buf.extend_from_slice(bytes);
        self.buf.extend_from_slice(b"\r\n");
        self
    }

    /// A typed part with no filename, as sent by non-browser clients.
    pub fn typed(mut self, name: &str, content_type: &str, bytes: &[u8]) -> Self {
        self.buf.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\nContent-Type: {content_type}\r\n\r\n"
            )
            .as_bytes(),
        );
        self.buf.extend_from_slice(bytes);
        self.buf.extend_from_slice(b"\r\n");
        self
    }

    pub fn into_request(self, uri: &str) -> Request<Body> {
        self.into_request_with(Method::POST, uri)
    }

    pub fn into_request_with(mut self, method: Method, uri: &str) -> Request<Body> {
        self.buf
            .extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
        Request::builder()
            .method(method)
            .uri(uri)
            .header(
                "content-type",
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(self.buf))
            .unwrap()
    }
}

// ---------------------------------------------------------------------------
// Request / response helpers
// ---------------------------------------------------------------------------

pub async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

/// Assert the three cross-origin headers carry their exact values.
pub fn assert_cors_headers(response: &Response<Body>) {
    let headers = response.headers();
    assert_eq!(headers["access-control-allow-origin"], "*");
    assert_eq!(headers["access-control-allow-methods"], "GET, POST, OPTIONS");
    assert_eq!(
        headers["access-control-allow-headers"],
        "Content-Type, Authorization"
    );
}

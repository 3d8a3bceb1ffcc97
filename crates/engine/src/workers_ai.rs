//! REST client for the Cloudflare Workers AI `ai/run` endpoint.
//!
//! Sends `POST {base_url}/accounts/{account_id}/ai/run/{model}` with a
//! `multipart/form-data` body. The model answers either with raw image bytes
//! or with the standard JSON envelope carrying a base64 image in
//! `result.image`.

use async_trait::async_trait;
use base64::Engine as _;
use fluxgate_core::builder::EngineRequest;
use fluxgate_core::request::reference_image_field;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;

use crate::client::{EngineError, ImageEngine};

/// Default REST API root.
pub const DEFAULT_BASE_URL: &str = "https://api.cloudflare.com/client/v4";

/// Default model identifier.
pub const DEFAULT_MODEL: &str = "@cf/black-forest-labs/flux-2-dev";

/// Connection settings for one Workers AI account.
#[derive(Debug, Clone)]
pub struct WorkersAiConfig {
    /// REST API root, e.g. `https://api.cloudflare.com/client/v4`.
    pub base_url: String,
    pub account_id: String,
    pub api_token: String,
    pub model: String,
}

impl WorkersAiConfig {
    pub fn new(account_id: impl Into<String>, api_token: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            account_id: account_id.into(),
            api_token: api_token.into(),
            model: DEFAULT_MODEL.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Full URL of the model's run endpoint.
    pub fn run_url(&self) -> String {
        format!(
            "{}/accounts/{}/ai/run/{}",
            self.base_url.trim_end_matches('/'),
            self.account_id,
            self.model
        )
    }
}

/// JSON envelope returned by the Workers AI REST API.
#[derive(Debug, Deserialize)]
struct RunEnvelope {
    #[serde(default)]
    result: Option<RunResult>,
    #[serde(default = "default_success")]
    success: bool,
}

#[derive(Debug, Deserialize)]
struct RunResult {
    #[serde(default)]
    image: Option<String>,
}

fn default_success() -> bool {
    true
}

/// HTTP client for a single Workers AI model.
pub struct WorkersAiClient {
    client: reqwest::Client,
    config: WorkersAiConfig,
}

impl WorkersAiClient {
    pub fn new(config: WorkersAiConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    /// Build the multipart body for `request`.
    ///
    /// Reference images keep their slot in the field name, so a request
    /// carrying slots 0 and 2 sends `input_image_0` and `input_image_2`.
    pub fn build_form(request: &EngineRequest) -> Result<Form, EngineError> {
        let mut form = Form::new().text("prompt", request.prompt.clone());

        for reference in &request.images {
            let field = reference_image_field(reference.slot);
            let file_name = reference
                .image
                .file_name
                .clone()
                .unwrap_or_else(|| field.clone());
            let mut part = Part::bytes(reference.image.bytes.clone()).file_name(file_name);
            if let Some(content_type) = &reference.image.content_type {
                part = part.mime_str(content_type)?;
            }
            form = form.part(field, part);
        }

        form = form
            .text("steps", request.steps.to_string())
            .text("width", request.width.to_string())
            .text("height", request.height.to_string());

        if let Some(guidance) = request.guidance {
            form = form.text("guidance", guidance.to_string());
        }

        Ok(form)
    }

    /// Extract image bytes from a successful response.
    async fn read_image(response: reqwest::Response) -> Result<Vec<u8>, EngineError> {
        let status = response.status().as_u16();
        let is_image = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.starts_with("image/"));

        let body = response.bytes().await?;
        if is_image {
            return Ok(body.to_vec());
        }

        let text = String::from_utf8_lossy(&body).into_owned();
        let envelope: RunEnvelope = serde_json::from_slice(&body)
            .map_err(|_| EngineError::MissingImage(text.clone()))?;

        if !envelope.success {
            return Err(EngineError::Api { status, body: text });
        }

        let encoded = envelope
            .result
            .and_then(|r| r.image)
            .ok_or(EngineError::MissingImage(text))?;

        Ok(base64::engine::general_purpose::STANDARD.decode(encoded)?)
    }

    /// Return the response unchanged on success, or an [`EngineError::Api`]
    /// carrying the status and body text on failure.
    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, EngineError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(EngineError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }
}

#[async_trait]
impl ImageEngine for WorkersAiClient {
    async fn generate(&self, request: &EngineRequest) -> Result<Vec<u8>, EngineError> {
        let form = Self::build_form(request)?;

        let response = self
            .client
            .post(self.config.run_url())
            .bearer_auth(&self.config.api_token)
            .multipart(form)
            .send()
            .await?;

        let response = Self::ensure_success(response).await.inspect_err(|err| {
            tracing::warn!(model = %self.config.model, error = %err, "Workers AI rejected request");
        })?;

        Self::read_image(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_url_joins_account_and_model() {
        let config = WorkersAiConfig::new("acc123", "tok").with_base_url("http://localhost:9000/");
        assert_eq!(
            config.run_url(),
            "http://localhost:9000/accounts/acc123/ai/run/@cf/black-forest-labs/flux-2-dev"
        );
    }

    #[test]
    fn envelope_defaults_to_success() {
        let envelope: RunEnvelope = serde_json::from_str(r#"{"result":{"image":"AAEC"}}"#).unwrap();
        assert!(envelope.success);
        assert_eq!(envelope.result.unwrap().image.as_deref(), Some("AAEC"));
    }

    #[test]
    fn form_rejects_invalid_content_type() {
        use fluxgate_core::form::ImageBlob;
        use fluxgate_core::request::ReferenceImage;

        let request = EngineRequest {
            prompt: "p".into(),
            images: vec![ReferenceImage {
                slot: 0,
                image: ImageBlob::new(vec![1]).with_content_type("not a mime"),
            }],
            steps: 20,
            width: 1024,
            height: 1024,
            guidance: None,
        };
        assert!(WorkersAiClient::build_form(&request).is_err());
    }
}

use fluxgate_engine::workers_ai::{WorkersAiConfig, DEFAULT_BASE_URL, DEFAULT_MODEL};

/// Server configuration loaded from environment variables.
///
/// Everything except the Workers AI credentials has a default suitable for
/// local development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `8787`).
    pub port: u16,
    /// Whole-request timeout in seconds (default: `120`). Generation calls
    /// routinely take tens of seconds.
    pub request_timeout_secs: u64,
    /// Maximum accepted request body in bytes (default: 20 MiB).
    pub max_upload_bytes: usize,
    /// Downstream engine connection settings.
    pub engine: WorkersAiConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                                 |
    /// |------------------------|-----------------------------------------|
    /// | `HOST`                 | `0.0.0.0`                               |
    /// | `PORT`                 | `8787`                                  |
    /// | `REQUEST_TIMEOUT_SECS` | `120`                                   |
    /// | `MAX_UPLOAD_BYTES`     | `20971520`                              |
    /// | `CF_ACCOUNT_ID`        | required                                |
    /// | `CF_API_TOKEN`         | required                                |
    /// | `CF_AI_BASE_URL`       | `https://api.cloudflare.com/client/v4`  |
    /// | `FLUX_MODEL`           | `@cf/black-forest-labs/flux-2-dev`      |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "8787".into())
            .parse()
            .expect("PORT must be a valid u16");

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "120".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let max_upload_bytes: usize = std::env::var("MAX_UPLOAD_BYTES")
            .unwrap_or_else(|_| (20 * 1024 * 1024).to_string())
            .parse()
            .expect("MAX_UPLOAD_BYTES must be a valid usize");

        let account_id = std::env::var("CF_ACCOUNT_ID").expect("CF_ACCOUNT_ID must be set");
        let api_token = std::env::var("CF_API_TOKEN").expect("CF_API_TOKEN must be set");
        let base_url = std::env::var("CF_AI_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.into());
        let model = std::env::var("FLUX_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.into());

        let engine = WorkersAiConfig::new(account_id, api_token)
            .with_base_url(base_url)
            .with_model(model);

        Self {
            host,
            port,
            request_timeout_secs,
            max_upload_bytes,
            engine,
        }
    }
}

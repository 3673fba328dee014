/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
        }
    }
}

/// Collaborator configuration for the generation services.
///
/// Only loaded by the binary entrypoint; handlers receive the constructed
/// clients, never this config.
#[derive(Debug, Clone)]
pub struct GenerationConfig {
    /// OpenAI-compatible LLM endpoint base URL.
    pub llm_base_url: String,
    /// API key for the LLM service.
    pub llm_api_key: String,
    /// Default completion model.
    pub llm_model: String,
    /// OpenAI-compatible image endpoint base URL.
    pub image_base_url: String,
    /// API key for the image service.
    pub image_api_key: String,
    /// Image-generation model.
    pub image_model: String,
    /// Bucket receiving generated artifacts.
    pub bucket_name: String,
    /// Bucket region.
    pub bucket_region: String,
    /// Custom S3-compatible endpoint, if any.
    pub bucket_endpoint_url: Option<String>,
}

impl GenerationConfig {
    /// Load collaborator configuration from environment variables.
    ///
    /// `LLM_API_KEY` and `BUCKET_NAME` are required; the image service
    /// falls back to the LLM endpoint and key when not set separately.
    pub fn from_env() -> Self {
        let llm_base_url =
            std::env::var("LLM_BASE_URL").unwrap_or_else(|_| "https://api.openai.com/v1".into());
        let llm_api_key = std::env::var("LLM_API_KEY").expect("LLM_API_KEY must be set");
        let llm_model = std::env::var("LLM_MODEL").unwrap_or_else(|_| "gpt-4o-mini".into());

        let image_base_url =
            std::env::var("IMAGE_BASE_URL").unwrap_or_else(|_| llm_base_url.clone());
        let image_api_key = std::env::var("IMAGE_API_KEY").unwrap_or_else(|_| llm_api_key.clone());
        let image_model = std::env::var("IMAGE_MODEL").unwrap_or_else(|_| "gpt-image-1".into());

        let bucket_name = std::env::var("BUCKET_NAME").expect("BUCKET_NAME must be set");
        let bucket_region = std::env::var("BUCKET_REGION").unwrap_or_else(|_| "us-east-1".into());
        let bucket_endpoint_url = std::env::var("BUCKET_ENDPOINT_URL").ok();

        Self {
            llm_base_url,
            llm_api_key,
            llm_model,
            image_base_url,
            image_api_key,
            image_model,
            bucket_name,
            bucket_region,
            bucket_endpoint_url,
        }
    }
}

//! Image-generation client.
//!
//! Speaks the OpenAI-compatible `/images/generations` wire format and
//! returns the source URLs of the rendered images. Callers upload those to
//! object storage; the service-hosted URLs are short-lived.

use async_trait::async_trait;
use serde::Deserialize;

use crate::error::ClientError;

// ---------------------------------------------------------------------------
// Request type
// ---------------------------------------------------------------------------

/// Parameters for one image generation.
#[derive(Debug, Clone)]
pub struct ImageRequest {
    /// Full rendering prompt.
    pub prompt: String,
    /// Output size as `WIDTHxHEIGHT`, e.g. `2560x1440`.
    pub size: String,
    /// Whether the service may watermark the output.
    pub watermark: bool,
}

// ---------------------------------------------------------------------------
// Trait
// ---------------------------------------------------------------------------

/// An image-generation service.
#[async_trait]
pub trait ImageClient: Send + Sync {
    /// Generate images for `request`, returning at least one source URL.
    async fn generate(&self, request: &ImageRequest) -> Result<Vec<String>, ClientError>;
}

// ---------------------------------------------------------------------------
// HTTP implementation
// ---------------------------------------------------------------------------

/// [`ImageClient`] implementation over an OpenAI-compatible HTTP API.
pub struct HttpImageClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl HttpImageClient {
    /// Create a client targeting `base_url` (e.g. `https://host/v1`).
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            model: model.into(),
        }
    }

    fn request_body(&self, request: &ImageRequest) -> serde_json::Value {
        serde_json::json!({
            "model": self.model,
            "prompt": request.prompt,
            "size": request.size,
            "watermark": request.watermark,
            "response_format": "url",
        })
    }
}

#[async_trait]
impl ImageClient for HttpImageClient {
    async fn generate(&self, request: &ImageRequest) -> Result<Vec<String>, ClientError> {
        let response = self
            .http
            .post(format!("{}/images/generations", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&self.request_body(request))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ClientError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: ImageGenerationResponse = response.json().await?;
        let urls: Vec<String> = body.data.into_iter().filter_map(|item| item.url).collect();
        if urls.is_empty() {
            return Err(ClientError::MissingOutput(
                "image generation produced no output".to_string(),
            ));
        }
        tracing::debug!(count = urls.len(), size = %request.size, "Images generated");
        Ok(urls)
    }
}

#[derive(Debug, Deserialize)]
struct ImageGenerationResponse {
    #[serde(default)]
    data: Vec<ImageItem>,
}

#[derive(Debug, Deserialize)]
struct ImageItem {
    #[serde(default)]
    url: Option<String>,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

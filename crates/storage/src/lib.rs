//! Object storage for generated artifacts.
//!
//! [`ObjectStorage`] is the trait seam the API layer depends on;
//! [`S3ObjectStorage`] is the production implementation over `aws-sdk-s3`,
//! usable against AWS or any S3-compatible vendor via a custom endpoint.
//!
//! Generated images live at service-hosted URLs that expire quickly, so
//! the flow is always: download the source URL, put the bytes in the
//! bucket under a fresh key, and hand out presigned GET URLs.

use std::time::Duration;

use async_trait::async_trait;
use aws_sdk_s3::presigning::PresigningConfig;
use aws_sdk_s3::primitives::ByteStream;
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors that can occur while storing or signing artifacts.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Failed to download the source artifact.
    #[error("Download failed: {0}")]
    Download(String),

    /// Failed to write the object to the bucket.
    #[error("Upload failed: {0}")]
    Upload(String),

    /// Failed to produce a presigned URL.
    #[error("Presigning failed: {0}")]
    Presign(String),
}

// ---------------------------------------------------------------------------
// Trait
// ---------------------------------------------------------------------------

/// Durable storage for generated artifacts.
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    /// Download `source_url` and store the bytes under a fresh key.
    /// Returns the object key.
    async fn upload_from_url(&self, source_url: &str) -> Result<String, StorageError>;

    /// Produce a time-limited GET URL for a stored object.
    async fn presigned_url(&self, key: &str, expires_in: Duration)
        -> Result<String, StorageError>;
}

// ---------------------------------------------------------------------------
// S3 implementation
// ---------------------------------------------------------------------------

/// Connection settings for [`S3ObjectStorage`].
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Bucket receiving generated artifacts.
    pub bucket: String,
    /// Region name (any non-empty value for S3-compatible vendors).
    pub region: String,
    /// Custom endpoint for S3-compatible vendors; `None` means AWS.
    pub endpoint_url: Option<String>,
}

/// [`ObjectStorage`] implementation backed by an S3 bucket.
pub struct S3ObjectStorage {
    s3: aws_sdk_s3::Client,
    http: reqwest::Client,
    bucket: String,
}

impl S3ObjectStorage {
    /// Connect using `config` plus ambient AWS credentials (env vars or
    /// the usual credential chain).
    pub async fn connect(config: StorageConfig) -> Self {
        let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(aws_config::Region::new(config.region.clone()));
        if let Some(endpoint) = &config.endpoint_url {
            loader = loader.endpoint_url(endpoint);
        }
        let shared = loader.load().await;

        // Path-style addressing keeps S3-compatible vendors happy.
        let s3_config = aws_sdk_s3::config::Builder::from(&shared)
            .force_path_style(true)
            .build();

        tracing::info!(bucket = %config.bucket, "Object storage client ready");

        Self {
            s3: aws_sdk_s3::Client::from_conf(s3_config),
            http: reqwest::Client::new(),
            bucket: config.bucket,
        }
    }
}

/// Build a fresh object key, preserving a sensible extension from the
/// response content type.
fn object_key(content_type: Option<&str>) -> String {
    let extension = match content_type {
        Some("image/jpeg") => "jpg",
        Some("image/webp") => "webp",
        _ => "png",
    };
    format!("generated/{}.{extension}", Uuid::new_v4())
}

#[async_trait]
impl ObjectStorage for S3ObjectStorage {
    async fn upload_from_url(&self, source_url: &str) -> Result<String, StorageError> {
        let response = self
            .http
            .get(source_url)
            .send()
            .await
            .map_err(|e| StorageError::Download(e.to_string()))?;

        if !response.status().is_success() {
            return Err(StorageError::Download(format!(
                "source responded with {}",
                response.status()
            )));
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        let bytes = response
            .bytes()
            .await
            .map_err(|e| StorageError::Download(e.to_string()))?;

        let key = object_key(content_type.as_deref());

        self.s3
            .put_object()
            .bucket(&self.bucket)
            .key(&key)
            .content_type(content_type.unwrap_or_else(|| "image/png".to_string()))
            .body(ByteStream::from(bytes.to_vec()))
            .send()
            .await
            .map_err(|e| StorageError::Upload(e.to_string()))?;

        tracing::debug!(key = %key, "Artifact uploaded");
        Ok(key)
    }

    async fn presigned_url(
        &self,
        key: &str,
        expires_in: Duration,
    ) -> Result<String, StorageError> {
        let presigning = PresigningConfig::expires_in(expires_in)
            .map_err(|e| StorageError::Presign(e.to_string()))?;

        let request = self
            .s3
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .presigned(presigning)
            .await
            .map_err(|e| StorageError::Presign(e.to_string()))?;

        Ok(request.uri().to_string())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn object_keys_are_unique_and_prefixed() {
        let a = object_key(None);
        let b = object_key(None);
        assert_ne!(a, b);
        assert!(a.starts_with("generated/"));
        assert!(a.ends_with(".png"));
    }

    #[test]
    fn object_key_extension_follows_content_type() {
        assert!(object_key(Some("image/jpeg")).ends_with(".jpg"));
        assert!(object_key(Some("image/webp")).ends_with(".webp"));
        assert!(object_key(Some("image/png")).ends_with(".png"));
        assert!(object_key(Some("application/octet-stream")).ends_with(".png"));
    }
}

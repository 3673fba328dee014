pub mod architecture;
pub mod chat;
pub mod comic;
pub mod generations;
pub mod ppt;

use std::sync::Arc;
use std::time::Duration;

use dreambox_clients::{ImageClient, ImageRequest};
use dreambox_core::generation::SIGNED_URL_TTL_SECS;
use dreambox_storage::ObjectStorage;

use crate::error::AppError;

/// A stored artifact: permanent object key plus its current presigned URL.
#[derive(Debug, Clone)]
pub struct StoredImage {
    pub key: String,
    pub url: String,
}

/// Render one image and move it into durable storage.
///
/// The service-hosted source URL is short-lived, so the bytes are copied
/// into the bucket immediately and a 30-day presigned URL is returned in
/// its place. This is the body of every fan-out job.
pub(crate) async fn render_and_store(
    images: Arc<dyn ImageClient>,
    storage: Arc<dyn ObjectStorage>,
    prompt: String,
    size: &str,
) -> Result<StoredImage, AppError> {
    let request = ImageRequest {
        prompt,
        size: size.to_string(),
        watermark: false,
    };
    let mut urls = images.generate(&request).await?;
    let source = if urls.is_empty() {
        return Err(AppError::InternalError(
            "image generation returned no URLs".to_string(),
        ));
    } else {
        urls.remove(0)
    };

    let key = storage.upload_from_url(&source).await?;
    let url = storage
        .presigned_url(&key, Duration::from_secs(SIGNED_URL_TTL_SECS))
        .await?;
    Ok(StoredImage { key, url })
}

//! Handlers for generation history, including the signed-URL refresh.

use std::sync::Arc;
use std::time::Duration;

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use uuid::Uuid;

use dreambox_core::error::CoreError;
use dreambox_core::generation::{self, SIGNED_URL_TTL_SECS};
use dreambox_db::models::generation::{Generation, ListGenerations};
use dreambox_db::repositories::GenerationRepo;
use dreambox_db::DbPool;
use dreambox_storage::ObjectStorage;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/generations
///
/// Lists records newest first. Rows whose signed URLs are approaching
/// expiry are refreshed in the background; the current rows are returned
/// immediately.
pub async fn list_generations(
    State(state): State<AppState>,
    Query(params): Query<ListGenerations>,
) -> AppResult<impl IntoResponse> {
    if let Some(gen_type) = &params.gen_type {
        generation::validate_generation_type(gen_type).map_err(AppError::Core)?;
    }

    let rows = GenerationRepo::list(&state.pool, &params).await?;
    spawn_url_refresh(&state, &rows);

    Ok(Json(DataResponse { data: rows }))
}

/// GET /api/v1/generations/{id}
pub async fn get_generation(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    let row = GenerationRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Generation",
            id: id.to_string(),
        }))?;

    Ok(Json(DataResponse { data: row }))
}

/// Re-sign URLs for rows past the refresh threshold.
///
/// Fire-and-forget: listing must not wait on storage round-trips, and a
/// failed refresh just means the next listing tries again.
fn spawn_url_refresh(state: &AppState, rows: &[Generation]) {
    let now = chrono::Utc::now();
    let stale: Vec<(Uuid, Vec<String>)> = rows
        .iter()
        .filter(|row| generation::needs_url_refresh(row.created_at, now))
        .filter_map(|row| {
            row.image_keys
                .as_ref()
                .map(|keys| (row.id, keys.0.clone()))
        })
        .filter(|(_, keys)| !keys.is_empty())
        .collect();
    if stale.is_empty() {
        return;
    }

    let pool = state.pool.clone();
    let storage = Arc::clone(&state.storage);
    tokio::spawn(async move {
        for (id, keys) in stale {
            match refresh_row(&pool, storage.as_ref(), id, &keys).await {
                Ok(()) => tracing::info!(%id, "Refreshed signed URLs"),
                Err(e) => tracing::warn!(%id, error = %e, "Signed-URL refresh failed"),
            }
        }
    });
}

/// Regenerate every presigned URL for one record from its stored keys.
async fn refresh_row(
    pool: &DbPool,
    storage: &dyn ObjectStorage,
    id: Uuid,
    keys: &[String],
) -> Result<(), AppError> {
    let mut urls = Vec::with_capacity(keys.len());
    for key in keys {
        if key.is_empty() {
            // Placeholder for an index whose job failed; nothing to sign.
            urls.push(String::new());
            continue;
        }
        urls.push(
            storage
                .presigned_url(key, Duration::from_secs(SIGNED_URL_TTL_SECS))
                .await?,
        );
    }
    GenerationRepo::update_urls(pool, id, &urls).await?;
    Ok(())
}

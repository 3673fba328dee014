//! Handler for single-image architecture-diagram generation.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use dreambox_core::generation::{self, DECK_PAGE_SIZE, TYPE_ARCHITECTURE};
use dreambox_core::prompts;
use dreambox_db::models::generation::CreateGeneration;
use dreambox_db::repositories::GenerationRepo;

use crate::error::{AppError, AppResult};
use crate::handlers::render_and_store;
use crate::response::DataResponse;
use crate::state::AppState;

/// Body for `POST /generate/architecture`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArchitectureRequest {
    /// System description to diagram.
    pub prompt: String,
    /// Optional style hint.
    #[serde(default)]
    pub style: String,
}

/// Response for `POST /generate/architecture`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArchitectureResponse {
    pub id: Uuid,
    pub image_url: String,
}

/// POST /api/v1/generate/architecture
///
/// Single image, no fan-out: render, store, persist, respond.
pub async fn generate_architecture(
    State(state): State<AppState>,
    Json(input): Json<ArchitectureRequest>,
) -> AppResult<impl IntoResponse> {
    generation::validate_prompt(&input.prompt).map_err(AppError::Core)?;

    let record = GenerationRepo::create(
        &state.pool,
        &CreateGeneration {
            gen_type: TYPE_ARCHITECTURE.to_string(),
            prompt: input.prompt.clone(),
            style: (!input.style.is_empty()).then(|| input.style.clone()),
            page_count: 1,
        },
    )
    .await?;

    let prompt = prompts::diagram_prompt(&input.prompt, &input.style);
    let artifact = render_and_store(
        state.images.clone(),
        state.storage.clone(),
        prompt,
        DECK_PAGE_SIZE,
    )
    .await?;

    GenerationRepo::update_images(
        &state.pool,
        record.id,
        std::slice::from_ref(&artifact.url),
        std::slice::from_ref(&artifact.key),
    )
    .await?;

    Ok(Json(DataResponse {
        data: ArchitectureResponse {
            id: record.id,
            image_url: artifact.url,
        },
    }))
}

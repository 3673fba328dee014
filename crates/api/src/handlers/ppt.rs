//! Handler for slide-deck generation: LLM outline, bounded image fan-out,
//! JSON response.

use std::sync::Arc;

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use futures::FutureExt;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use dreambox_clients::{ChatMessage, CompletionOptions};
use dreambox_core::fanout::{FanoutRunner, Job, RunOutcome};
use dreambox_core::generation::{self, DECK_PAGE_SIZE, MAX_CONCURRENT_IMAGES, TYPE_PPT};
use dreambox_core::{parse, prompts};
use dreambox_db::models::generation::CreateGeneration;
use dreambox_db::repositories::GenerationRepo;

use crate::error::{AppError, AppResult};
use crate::handlers::{render_and_store, StoredImage};
use crate::response::DataResponse;
use crate::state::AppState;

/// Body for `POST /generate/ppt`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PptRequest {
    /// Topic or detailed requirements for the deck.
    pub prompt: String,
    /// Number of pages to produce.
    #[serde(default = "default_page_count")]
    pub page_count: u32,
    /// Optional overall style hint.
    #[serde(default)]
    pub style: String,
}

fn default_page_count() -> u32 {
    generation::DEFAULT_PAGE_COUNT
}

/// Response for `POST /generate/ppt`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PptResponse {
    pub id: Uuid,
    pub image_urls: Vec<String>,
    pub outline: Vec<String>,
}

/// POST /api/v1/generate/ppt
///
/// Plans a page outline with the LLM, renders one image per page through
/// the bounded fan-out, persists the artifacts, and returns the record.
pub async fn generate_ppt(
    State(state): State<AppState>,
    Json(input): Json<PptRequest>,
) -> AppResult<impl IntoResponse> {
    generation::validate_prompt(&input.prompt).map_err(AppError::Core)?;
    generation::validate_page_count(input.page_count).map_err(AppError::Core)?;

    let record = GenerationRepo::create(
        &state.pool,
        &CreateGeneration {
            gen_type: TYPE_PPT.to_string(),
            prompt: input.prompt.clone(),
            style: (!input.style.is_empty()).then(|| input.style.clone()),
            page_count: input.page_count as i32,
        },
    )
    .await?;

    let messages = [
        ChatMessage::system(prompts::DECK_OUTLINE_SYSTEM_PROMPT),
        ChatMessage::user(prompts::deck_outline_prompt(
            &input.prompt,
            input.page_count,
            &input.style,
        )),
    ];
    let outline_text = state
        .llm
        .complete(&messages, &CompletionOptions::default())
        .await?;

    let outline = parse::split_outline(&outline_text, input.page_count as usize);
    if outline.is_empty() {
        return Err(AppError::InternalError(
            "the model produced no outline".to_string(),
        ));
    }

    // Each page's outline paragraph doubles as its rendering prompt.
    let jobs: Vec<Job<StoredImage, AppError>> = outline
        .iter()
        .map(|page| {
            let prompt = page.clone();
            let images = Arc::clone(&state.images);
            let storage = Arc::clone(&state.storage);
            async move { render_and_store(images, storage, prompt, DECK_PAGE_SIZE).await }.boxed()
        })
        .collect();

    match FanoutRunner::new(MAX_CONCURRENT_IMAGES).run(jobs, None).await {
        RunOutcome::Succeeded(artifacts) => {
            let urls: Vec<String> = artifacts.iter().map(|a| a.url.clone()).collect();
            let keys: Vec<String> = artifacts.iter().map(|a| a.key.clone()).collect();
            GenerationRepo::update_images(&state.pool, record.id, &urls, &keys).await?;

            Ok(Json(DataResponse {
                data: PptResponse {
                    id: record.id,
                    image_urls: urls,
                    outline,
                },
            }))
        }
        RunOutcome::Failed { error, partial } => {
            // Persist whatever finished; failed indices stay empty.
            let urls: Vec<String> = partial
                .iter()
                .map(|slot| slot.as_ref().map(|a| a.url.clone()).unwrap_or_default())
                .collect();
            let keys: Vec<String> = partial
                .iter()
                .map(|slot| slot.as_ref().map(|a| a.key.clone()).unwrap_or_default())
                .collect();
            GenerationRepo::update_images(&state.pool, record.id, &urls, &keys).await?;

            Err(AppError::InternalError(error.to_string()))
        }
    }
}

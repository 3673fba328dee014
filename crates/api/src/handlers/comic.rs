//! Handler for comic generation: scene split, bounded image fan-out, and
//! SSE progress streaming.

use std::sync::Arc;

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use futures::{FutureExt, StreamExt};
use serde::Deserialize;
use tokio::sync::mpsc;

use dreambox_clients::{ChatMessage, CompletionOptions};
use dreambox_core::fanout::{FanoutRunner, Job, JobUpdate, RunOutcome};
use dreambox_core::generation::{
    self, COMIC_PANEL_SIZE, MAX_CONCURRENT_IMAGES, TYPE_COMIC,
};
use dreambox_core::{parse, prompts};
use dreambox_db::models::generation::CreateGeneration;
use dreambox_db::repositories::GenerationRepo;
use dreambox_events::{CompleteData, GenerationEvent, ProgressEmitter};

use crate::error::{AppError, AppResult};
use crate::handlers::{render_and_store, StoredImage};
use crate::sse;
use crate::state::AppState;

/// Body for `POST /generate/comic`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComicRequest {
    /// The story to turn into a comic.
    pub story_text: String,
    /// Optional art-style hint appended to every panel prompt.
    #[serde(default)]
    pub style: String,
    /// Number of scenes/panels to produce.
    #[serde(default = "default_page_count")]
    pub page_count: u32,
}

fn default_page_count() -> u32 {
    generation::DEFAULT_PAGE_COUNT
}

/// POST /api/v1/generate/comic
///
/// Validates the request, then runs the generation pipeline in a
/// background task while this handler returns an SSE stream of its
/// progress events. Validation failures are rejected with a JSON error
/// before any stream is opened.
pub async fn generate_comic(
    State(state): State<AppState>,
    Json(input): Json<ComicRequest>,
) -> AppResult<impl IntoResponse> {
    generation::validate_prompt(&input.story_text).map_err(AppError::Core)?;
    generation::validate_page_count(input.page_count).map_err(AppError::Core)?;

    let (emitter, receiver) = ProgressEmitter::channel();
    tokio::spawn(async move {
        if let Err(e) = run_pipeline(state, input, emitter.clone()).await {
            tracing::error!(error = %e, "Comic generation failed");
            emitter.error(e.to_string());
        }
    });

    Ok(sse::sse_response(receiver))
}

/// The comic pipeline: record, scene split, fan-out, persist, complete.
///
/// Any error returned here is emitted as a terminal `error` event by the
/// caller; events already emitted (including per-job errors) stand.
async fn run_pipeline(
    state: AppState,
    input: ComicRequest,
    emitter: ProgressEmitter,
) -> Result<(), AppError> {
    emitter.status("Splitting the story into scenes...");

    let record = GenerationRepo::create(
        &state.pool,
        &CreateGeneration {
            gen_type: TYPE_COMIC.to_string(),
            prompt: input.story_text.clone(),
            style: (!input.style.is_empty()).then(|| input.style.clone()),
            page_count: input.page_count as i32,
        },
    )
    .await?;

    // Stream the scene split so the client sees the text as it is written.
    let messages = [
        ChatMessage::system(prompts::comic_scene_system_prompt(input.page_count)),
        ChatMessage::user(prompts::comic_scene_user_prompt(
            &input.story_text,
            &input.style,
        )),
    ];
    let mut deltas = state
        .llm
        .stream(&messages, &CompletionOptions::default())
        .await?;
    let mut scene_text = String::new();
    while let Some(delta) = deltas.next().await {
        let delta = delta?;
        scene_text.push_str(&delta);
        emitter.emit(GenerationEvent::ScenesTextChunk {
            content: delta,
            full_content: scene_text.clone(),
        });
    }

    let scenes = parse::split_scenes(&scene_text);
    if scenes.is_empty() {
        return Err(AppError::InternalError(
            "the model produced no scenes".to_string(),
        ));
    }
    let total = scenes.len();
    emitter.emit(GenerationEvent::Scenes { count: total });

    // One image job per scene, fanned out through the bounded runner.
    let jobs: Vec<Job<StoredImage, AppError>> = scenes
        .iter()
        .enumerate()
        .map(|(index, description)| {
            let prompt = prompts::comic_panel_prompt(description, &input.style);
            let images = Arc::clone(&state.images);
            let storage = Arc::clone(&state.storage);
            let emitter = emitter.clone();
            async move {
                emitter.status(format!("Generating image {} of {total}...", index + 1));
                render_and_store(images, storage, prompt, COMIC_PANEL_SIZE).await
            }
            .boxed()
        })
        .collect();

    // Forward runner updates to the client as they happen.
    let (updates_tx, mut updates_rx) = mpsc::unbounded_channel::<JobUpdate<StoredImage>>();
    let update_emitter = emitter.clone();
    let forwarder = tokio::spawn(async move {
        while let Some(update) = updates_rx.recv().await {
            match update {
                JobUpdate::Completed {
                    index,
                    total,
                    result,
                } => update_emitter.emit(GenerationEvent::Progress {
                    index,
                    total,
                    url: result.url,
                }),
                JobUpdate::Failed { index, message, .. } => {
                    update_emitter.error(format!("image {} failed: {message}", index + 1));
                }
            }
        }
    });

    let outcome = FanoutRunner::new(MAX_CONCURRENT_IMAGES)
        .run(jobs, Some(updates_tx))
        .await;
    // The runner dropped its sender; the forwarder drains and exits.
    let _ = forwarder.await;

    match outcome {
        RunOutcome::Succeeded(artifacts) => {
            let urls: Vec<String> = artifacts.iter().map(|a| a.url.clone()).collect();
            let keys: Vec<String> = artifacts.iter().map(|a| a.key.clone()).collect();
            GenerationRepo::update_images(&state.pool, record.id, &urls, &keys).await?;

            emitter.emit(GenerationEvent::Complete {
                data: CompleteData {
                    id: record.id,
                    image_urls: urls,
                    scene_count: total,
                },
            });
            Ok(())
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

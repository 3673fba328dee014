//! Handler for preset-agent chat with a streaming text response.

use axum::body::{Body, Bytes};
use axum::extract::State;
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::Json;
use futures::StreamExt;
use serde::Deserialize;

use dreambox_clients::{ChatMessage, CompletionOptions};
use dreambox_core::{generation, prompts};

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Apology line substituted when the upstream stream fails mid-flight.
const STREAM_FAILURE_MESSAGE: &str =
    "Sorry, something went wrong while handling your request. Please try again later.";

/// Body for `POST /chat`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    /// Preset agent to chat with; unknown or absent falls back to the
    /// generic assistant.
    pub agent_id: Option<String>,
    /// The user's message.
    pub message: String,
    /// Caller-supplied system prompt, overriding any preset.
    pub system_prompt: Option<String>,
}

/// POST /api/v1/chat
///
/// Streams the assistant's reply as plain text chunks. Upstream failures
/// before the stream opens map to an error response; failures mid-stream
/// degrade to an apology line, since the status line is already gone.
pub async fn chat(
    State(state): State<AppState>,
    Json(input): Json<ChatRequest>,
) -> AppResult<Response> {
    generation::validate_prompt(&input.message).map_err(AppError::Core)?;

    let system = prompts::agent_system_prompt(
        input.agent_id.as_deref(),
        input.system_prompt.as_deref(),
    )
    .to_string();
    let messages = [ChatMessage::system(system), ChatMessage::user(input.message)];

    let mut deltas = state
        .llm
        .stream(&messages, &CompletionOptions::default())
        .await?;

    let body_stream = async_stream::stream! {
        while let Some(delta) = deltas.next().await {
            match delta {
                Ok(text) => yield Ok::<_, std::convert::Infallible>(Bytes::from(text)),
                Err(e) => {
                    tracing::error!(error = %e, "Chat stream failed mid-flight");
                    yield Ok(Bytes::from(STREAM_FAILURE_MESSAGE));
                    return;
                }
            }
        }
    };

    Ok((
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        Body::from_stream(body_stream),
    )
        .into_response())
}

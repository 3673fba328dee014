pub mod chat;
pub mod generate;
pub mod generations;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /generate/comic              start comic generation (POST, SSE)
/// /generate/ppt                generate a slide deck (POST)
/// /generate/architecture       generate an architecture diagram (POST)
///
/// /chat                        stream a chat completion (POST)
///
/// /generations                 list generation records (GET)
/// /generations/{id}            get one generation record (GET)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Generation endpoints (comic fan-out streams over SSE).
        .nest("/generate", generate::router())
        // Preset-agent chat streaming.
        .nest("/chat", chat::router())
        // Generation history.
        .nest("/generations", generations::router())
}

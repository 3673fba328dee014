//! Route definitions for the `/chat` resource.

use axum::routing::post;
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Routes mounted at `/chat`.
///
/// ```text
/// POST   /   -> chat (streaming text response)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", post(handlers::chat::chat))
}

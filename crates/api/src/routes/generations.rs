//! Route definitions for the `/generations` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Routes mounted at `/generations`.
///
/// ```text
/// GET    /        -> list_generations (?type=&limit=&offset=)
/// GET    /{id}    -> get_generation
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::generations::list_generations))
        .route("/{id}", get(handlers::generations::get_generation))
}

//! Route definitions for the `/generate` resource.

use axum::routing::post;
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Routes mounted at `/generate`.
///
/// ```text
/// POST   /comic          -> generate_comic (SSE progress stream)
/// POST   /ppt            -> generate_ppt
/// POST   /architecture   -> generate_architecture
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/comic", post(handlers::comic::generate_comic))
        .route("/ppt", post(handlers::ppt::generate_ppt))
        .route(
            "/architecture",
            post(handlers::architecture::generate_architecture),
        )
}

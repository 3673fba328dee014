use std::sync::Arc;

use dreambox_clients::{ImageClient, LlmClient};
use dreambox_storage::ObjectStorage;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Collaborators are trait objects injected at startup (or by tests), so
/// handlers never construct clients themselves. Cheaply cloneable.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: dreambox_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// LLM completion service.
    pub llm: Arc<dyn LlmClient>,
    /// Image-generation service.
    pub images: Arc<dyn ImageClient>,
    /// Object storage for generated artifacts.
    pub storage: Arc<dyn ObjectStorage>,
}

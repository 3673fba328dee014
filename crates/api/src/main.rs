use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use dreambox_api::config::{GenerationConfig, ServerConfig};
use dreambox_api::{router, state};
use dreambox_clients::{HttpImageClient, HttpLlmClient, ImageClient, LlmClient};
use dreambox_storage::{ObjectStorage, S3ObjectStorage, StorageConfig};

use state::AppState;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "dreambox_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Database ---
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = dreambox_db::create_pool(&database_url)
        .await
        .expect("Failed to connect to database");
    tracing::info!("Database connection pool created");

    dreambox_db::health_check(&pool)
        .await
        .expect("Database health check failed");
    tracing::info!("Database health check passed");

    dreambox_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Database migrations applied");

    // --- Generation collaborators ---
    let generation = GenerationConfig::from_env();

    let llm: Arc<dyn LlmClient> = Arc::new(HttpLlmClient::new(
        generation.llm_base_url.clone(),
        generation.llm_api_key.clone(),
        generation.llm_model.clone(),
    ));
    let images: Arc<dyn ImageClient> = Arc::new(HttpImageClient::new(
        generation.image_base_url.clone(),
        generation.image_api_key.clone(),
        generation.image_model.clone(),
    ));
    let storage: Arc<dyn ObjectStorage> = Arc::new(
        S3ObjectStorage::connect(StorageConfig {
            bucket: generation.bucket_name.clone(),
            region: generation.bucket_region.clone(),
            endpoint_url: generation.bucket_endpoint_url.clone(),
        })
        .await,
    );
    tracing::info!("Generation collaborators ready");

    // --- App state ---
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        llm,
        images,
        storage,
    };

    // --- Router ---
    let app = router::build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    tracing::info!("Graceful shutdown complete");
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix) so the server
/// shuts down cleanly whether stopped interactively or by a process
/// manager (e.g. systemd, Docker, Kubernetes).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}

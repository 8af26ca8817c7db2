// src/main.rs

use bookshelf::app::library_service::InitOutcome;
use bookshelf::storage::{BookRepository, InMemoryBookRepository, PgBookRepository, UnconfiguredRepository};
use bookshelf::transport;
use bookshelf::AppConfig;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let in_memory = std::env::args().skip(1).any(|a| a == "--in-memory");

    // --- Configuration ---
    let config = AppConfig::from_env();
    tracing::info!(?config, in_memory, "configuration loaded");
    if config.secret_generated() {
        tracing::warn!("SECRET_KEY is not set; using a per-process key (flash notices reset on restart)");
    }

    // --- Repository ---
    let repo: Arc<dyn BookRepository> = if in_memory {
        Arc::new(InMemoryBookRepository::new())
    } else if config.database_url_configured() {
        Arc::new(PgBookRepository::connect_lazy(&config)?)
    } else {
        tracing::warn!("DATABASE_URL is not set; pages will report the database as unavailable");
        Arc::new(UnconfiguredRepository)
    };

    let seed_on_empty = config.seed_on_empty;
    let bind_addr = config.bind_addr.clone();
    let app_state = transport::http::AppState::new(config, repo);

    // Schema failures are logged and do not stop startup; /health reports them.
    match app_state.library.initialize(seed_on_empty).await {
        InitOutcome::Ready { seeded } => tracing::info!(seeded, "database ready"),
        InitOutcome::Failed(reason) => {
            tracing::error!(%reason, "database initialization failed; continuing, see /health")
        }
    }

    // --- HTTP Server ---
    let app = transport::http::create_router(app_state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", transport::http::ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http());
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!("listening on http://{}", listener.local_addr()?);

    tokio::select! {
        result = axum::serve(listener, app) => {
            result?;
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("shutdown signal received");
        }
    }

    Ok(())
}

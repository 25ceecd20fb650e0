//! DocSearch API Server
//!
//! Multi-tenant knowledge base search: tenants upload documents, then query them
//! with a hybrid of fuzzy substring matching and embedding similarity.
//! Uses hexagonal (ports & adapters) architecture for clean separation of concerns.

use std::sync::Arc;

use anyhow::Context;
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeFile;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod adapters;
mod app;
mod config;
mod domain;
mod error;
mod handlers;

#[cfg(test)]
mod test_utils;


use adapters::{EmbeddingBackend, FileKnowledgeBaseStore};
use app::{KnowledgeBaseService, SearchService};
use config::{Config, LogFormat};
use domain::ports::Embedder;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub kb_service: Arc<KnowledgeBaseService<FileKnowledgeBaseStore, EmbeddingBackend>>,
    pub search_service: Arc<SearchService<FileKnowledgeBaseStore, EmbeddingBackend>>,
    pub config: Config,
}

impl AppState {
    pub fn new(store: FileKnowledgeBaseStore, embedder: EmbeddingBackend, config: Config) -> Self {
        let kb_service = Arc::new(KnowledgeBaseService::new(
            Arc::new(store),
            Arc::new(embedder),
            config.kb_cache_capacity,
        ));
        let search_service = Arc::new(SearchService::new(kb_service.clone()));

        Self {
            kb_service,
            search_service,
            config,
        }
    }
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Build the HTTP router for the given state
pub fn router(state: AppState) -> Router {
    let index = ServeFile::new(state.config.static_dir.join("index.html"));
    let body_limit = state.config.max_upload_bytes;

    Router::new()
        // Front-end
        .route_service("/", index)
        .route("/health", get(health))
        .route("/upload", post(handlers::upload))
        .route("/search", get(handlers::search))
        .route(
            "/kb/:tenant_id",
            get(handlers::get_knowledge_base).delete(handlers::delete_knowledge_base),
        )
        // Middleware
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn init_tracing(format: LogFormat) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,docsearch_api=debug".into());
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Text => registry.with(tracing_subscriber::fmt::layer()).init(),
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json())
            .init(),
    }
}

fn main() -> anyhow::Result<()> {
    let config = Config::from_env().context("Failed to load configuration")?;
    init_tracing(config.log_format);

    tokio::runtime::Builder::new_multi_thread()
        .worker_threads(config.worker_threads)
        .enable_all()
        .build()
        .context("Failed to build Tokio runtime")?
        .block_on(run(config))
}

async fn run(config: Config) -> anyhow::Result<()> {
    tracing::info!(
        worker_threads = config.worker_threads,
        "Starting DocSearch API..."
    );

    let store = FileKnowledgeBaseStore::open(&config.data_dir)
        .await
        .with_context(|| format!("Failed to open {}", config.data_dir.display()))?;
    tracing::info!(dir = %store.dir().display(), "Knowledge base store ready");

    let embedder = EmbeddingBackend::from_config(&config.embedding)?;
    tracing::info!(
        model = embedder.model(),
        dimensions = embedder.dimensions(),
        "Embedder ready"
    );

    let addr = config.listen_addr();
    let app = router(AppState::new(store, embedder, config));

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!("Listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}

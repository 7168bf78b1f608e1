use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tokio::sync::RwLock;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

mod config;
mod error;
mod extract;
mod handlers;
mod models;
mod registry;
mod seed;

use crate::config::Config;
use crate::registry::{DeleteGuard, Registry};

/// Shared application state. Cheap to clone: the registry sits behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<RwLock<Registry>>,
    pub delete_guard: DeleteGuard,
}

impl AppState {
    pub fn new(registry: Registry, delete_guard: DeleteGuard) -> Self {
        Self {
            registry: Arc::new(RwLock::new(registry)),
            delete_guard,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present (ignored in production where env vars are injected)
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,item_registry=debug")),
        )
        .with_target(false)
        .compact()
        .init();

    let config = Config::from_env()?;

    let registry = if config.seed_items {
        Registry::seeded()
    } else {
        Registry::new()
    };
    info!(
        items = registry.len(),
        delete_guard = ?config.delete_guard,
        "Registry ready"
    );

    let app = build_router(AppState::new(registry, config.delete_guard));

    let addr = format!("{}:{}", config.host, config.port);
    info!("Listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(%err, "Failed to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

fn build_router(state: AppState) -> Router {
    Router::new()
        // ── Health ──────────────────────────────────────────────────────────
        .route("/health", get(handlers::health))

        // ── Items ───────────────────────────────────────────────────────────
        .route(
            "/",
            get(handlers::items::list_items).post(handlers::items::add_item),
        )
        .route("/items/", get(handlers::items::query_items))
        .route("/items/:item_id", get(handlers::items::get_item))
        .route("/delete/:item_id", post(handlers::items::delete_item))

        // ── Middleware ──────────────────────────────────────────────────────
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

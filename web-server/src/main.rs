//! Health Assistant Web Server
//!
//! Multi-disease prediction forms (diabetes, heart disease, Parkinson's)
//! plus a small JSON API over the same pipeline.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                  HEALTH ASSISTANT WEB                     │
//! ├──────────────────────────────────────────────────────────┤
//! │  ┌────────────┐   ┌────────────┐   ┌──────────────────┐  │
//! │  │  Pages     │   │  JSON API  │   │  Health / Models │  │
//! │  │  (forms)   │   │  /api/v1   │   │  status          │  │
//! │  └─────┬──────┘   └─────┬──────┘   └────────┬─────────┘  │
//! │        └────────────────┼───────────────────┘            │
//! │                         ▼                                │
//! │        ┌─────────────────────────────────┐               │
//! │        │ HealthAssistant                 │               │
//! │        │ schema → validator → dispatcher │               │
//! │        └────────────────┬────────────────┘               │
//! │                         ▼                                │
//! │                  ModelRegistry                           │
//! └──────────────────────────────────────────────────────────┘
//! ```

mod config;
mod error;
mod handlers;
mod views;

#[cfg(test)]
mod tests;

use axum::{
    Router,
    routing::get,
};
use tower_http::{
    trace::TraceLayer,
    compression::CompressionLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use std::net::SocketAddr;
use std::sync::Arc;

use health_assistant_core::constants::{APP_NAME, APP_VERSION};
use health_assistant_core::HealthAssistant;

pub use error::{AppError, AppResult};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    dotenvy::dotenv().ok();
    let config = config::Config::from_env();

    // Initialize logging
    init_tracing(&config);

    tracing::info!("{} v{} starting ({})...", APP_NAME, APP_VERSION, config.environment);
    tracing::info!("Model directory: {}", config.core.model_dir.display());

    // Register models; a missing artifact only disables its own page
    let assistant = HealthAssistant::from_config(&config.core)?;
    for domain in assistant.availability() {
        match &domain.reason {
            None => tracing::info!("{}: model ready", domain.title),
            Some(reason) if config.core.eager_load => {
                tracing::warn!("{}: unavailable ({})", domain.title, reason)
            }
            Some(_) => tracing::debug!("{}: model will load on first use", domain.title),
        }
    }

    // Build application state
    let state = AppState {
        assistant: Arc::new(assistant),
        config: config.clone(),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::new(config.bind_addr, config.port);
    tracing::info!("🚀 Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn init_tracing(config: &config::Config) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "health_assistant_web=debug,health_assistant_core=info,tower_http=debug".into());

    let registry = tracing_subscriber::registry().with(filter);
    if config.log_json || config.is_production() {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub assistant: Arc<HealthAssistant>,
    pub config: config::Config,
}

/// Create the main router with all routes
fn create_router(state: AppState) -> Router {
    // Status routes
    let status_routes = Router::new()
        .route("/health", get(handlers::health::check))
        .route("/api/v1/models", get(handlers::health::models));

    // JSON API
    let api_routes = Router::new()
        .route("/api/v1/domains", get(handlers::predict::list_domains))
        .route("/api/v1/domains/:domain", get(handlers::predict::get_domain))
        .route("/api/v1/predict/:domain", axum::routing::post(handlers::predict::predict));

    // Form pages
    let page_routes = Router::new()
        .route("/", get(handlers::pages::index))
        .route("/:domain", get(handlers::pages::show).post(handlers::pages::submit));

    // Combine all routes
    Router::new()
        .merge(status_routes)
        .merge(api_routes)
        .merge(page_routes)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

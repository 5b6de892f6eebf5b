//! Health check handler

use axum::{extract::State, Json};
use serde::Serialize;

use health_assistant_core::ModelStatus;

use crate::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    version: &'static str,
    environment: String,
    models_loaded: usize,
    timestamp: i64,
}

pub async fn check(State(state): State<AppState>) -> Json<HealthResponse> {
    let models_loaded = state
        .assistant
        .registry()
        .status()
        .iter()
        .filter(|s| s.model_loaded)
        .count();

    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        environment: state.config.environment.clone(),
        models_loaded,
        timestamp: chrono::Utc::now().timestamp(),
    })
}

/// Per-domain model status
pub async fn models(State(state): State<AppState>) -> Json<Vec<ModelStatus>> {
    Json(state.assistant.registry().status())
}

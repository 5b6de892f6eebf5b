//! JSON prediction API

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use health_assistant_core::{
    DomainAvailability, DomainId, DomainSchema, LayoutInfo, Outcome, RawSubmission, RawValue,
};

use crate::{AppError, AppResult, AppState};

#[derive(Debug, Deserialize)]
pub struct PredictRequest {
    #[serde(default)]
    pub fields: HashMap<String, RawValue>,
}

#[derive(Serialize)]
pub struct DomainDetail {
    #[serde(flatten)]
    pub availability: DomainAvailability,
    pub schema: DomainSchema,
    pub layout: LayoutInfo,
}

/// Availability may try to load artifacts from disk
async fn availability(state: &AppState) -> AppResult<Vec<DomainAvailability>> {
    let assistant = state.assistant.clone();
    Ok(tokio::task::spawn_blocking(move || assistant.availability()).await?)
}

/// GET /api/v1/domains
pub async fn list_domains(State(state): State<AppState>) -> AppResult<Json<Vec<DomainAvailability>>> {
    Ok(Json(availability(&state).await?))
}

/// GET /api/v1/domains/:domain
pub async fn get_domain(
    State(state): State<AppState>,
    Path(domain): Path<String>,
) -> AppResult<Json<DomainDetail>> {
    let domain: DomainId = domain.parse()?;

    let availability = availability(&state)
        .await?
        .into_iter()
        .find(|a| a.domain == domain)
        .ok_or_else(|| AppError::NotFound(format!("Unknown domain '{}'", domain)))?;

    Ok(Json(DomainDetail {
        availability,
        schema: state.assistant.schema(domain).clone(),
        layout: LayoutInfo::for_domain(domain),
    }))
}

/// POST /api/v1/predict/:domain
pub async fn predict(
    State(state): State<AppState>,
    Path(domain): Path<String>,
    payload: Result<Json<PredictRequest>, JsonRejection>,
) -> AppResult<Json<Outcome>> {
    let domain: DomainId = domain.parse()?;
    let Json(req) = payload.map_err(|rejection| {
        AppError::ValidationError(vec![format!("Invalid request body: {}", rejection.body_text())])
    })?;
    let raw = RawSubmission { domain, values: req.fields };

    let outcome = super::run_submission(&state, raw).await??;
    tracing::info!("API prediction for {}: positive={}", domain, outcome.is_positive);

    Ok(Json(outcome))
}

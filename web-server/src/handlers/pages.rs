//! Form pages

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use std::collections::HashMap;

use health_assistant_core::{model_unavailable_message, DispatchError, DomainId, RawSubmission, SubmitError};

use crate::views::{self, Notice, NoticeKind};
use crate::{AppResult, AppState};

/// GET /
pub async fn index() -> Redirect {
    Redirect::to(&format!("/{}", DomainId::Diabetes.as_str()))
}

fn not_found(slug: &str) -> Response {
    (StatusCode::NOT_FOUND, Html(views::not_found_page(slug))).into_response()
}

async fn unavailable_notice(state: &AppState, domain: DomainId) -> AppResult<Option<Notice>> {
    let assistant = state.assistant.clone();
    let available = tokio::task::spawn_blocking(move || assistant.is_available(domain)).await?;

    Ok((!available).then(|| Notice::new(NoticeKind::Warning, model_unavailable_message(domain))))
}

/// GET /:domain
pub async fn show(State(state): State<AppState>, Path(slug): Path<String>) -> AppResult<Response> {
    let Ok(domain) = slug.parse::<DomainId>() else {
        return Ok(not_found(&slug));
    };

    let notice = unavailable_notice(&state, domain).await?;
    let html = views::form_page(&state.assistant, domain, &HashMap::new(), notice.as_ref());
    Ok(Html(html).into_response())
}

/// POST /:domain
pub async fn submit(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Form(form): Form<HashMap<String, String>>,
) -> AppResult<Response> {
    let Ok(domain) = slug.parse::<DomainId>() else {
        return Ok(not_found(&slug));
    };

    let mut raw = RawSubmission::new(domain);
    for (name, value) in &form {
        raw.set(name, value.as_str());
    }

    let (status, notice) = match super::run_submission(&state, raw).await? {
        Ok(outcome) => {
            tracing::info!("{} form: positive={}", domain, outcome.is_positive);
            (StatusCode::OK, Notice::outcome(&outcome))
        }
        Err(SubmitError::Validation(errors)) => {
            tracing::debug!("{} form rejected: {}", domain, errors);
            let notice = Notice { kind: NoticeKind::Error, messages: errors.messages() };
            (StatusCode::UNPROCESSABLE_ENTITY, notice)
        }
        Err(err @ SubmitError::Dispatch(DispatchError::ModelUnavailable { .. })) => {
            tracing::warn!("{}", err);
            (StatusCode::SERVICE_UNAVAILABLE, Notice::new(NoticeKind::Warning, err.user_message()))
        }
        Err(err) => {
            tracing::error!("{}", err);
            (StatusCode::INTERNAL_SERVER_ERROR, Notice::new(NoticeKind::Error, err.user_message()))
        }
    };

    let html = views::form_page(&state.assistant, domain, &form, Some(&notice));
    Ok((status, Html(html)).into_response())
}

//! HTTP handlers

pub mod health;
pub mod pages;
pub mod predict;

use health_assistant_core::{Outcome, RawSubmission, SubmitError};

use crate::{AppResult, AppState};

/// Run one submission off the async executor; the first call for a domain
/// may read its artifact from disk
pub(crate) async fn run_submission(
    state: &AppState,
    raw: RawSubmission,
) -> AppResult<Result<Outcome, SubmitError>> {
    let assistant = state.assistant.clone();
    let result = tokio::task::spawn_blocking(move || assistant.submit(&raw)).await?;
    Ok(result)
}

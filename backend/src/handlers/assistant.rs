//! HTTP handlers for the farming assistant

use axum::{extract::State, Json};
use validator::Validate;

use crate::error::AppResult;
use crate::models::{AdvisoryAnswer, AssistantRequest};
use crate::services::AssistantService;
use crate::AppState;

/// Answer a free-form farming question
pub async fn ask_assistant(
    State(state): State<AppState>,
    Json(request): Json<AssistantRequest>,
) -> AppResult<Json<AdvisoryAnswer>> {
    request.validate()?;

    let service = AssistantService::new(state.store.clone(), state.advisor());
    let answer = service.ask(&request.question).await?;
    Ok(Json(answer))
}

/// Most recent assistant exchanges
pub async fn recent_queries(State(state): State<AppState>) -> AppResult<Json<Vec<AdvisoryAnswer>>> {
    let service = AssistantService::new(state.store.clone(), state.advisor());
    let answers = service.recent().await?;
    Ok(Json(answers))
}

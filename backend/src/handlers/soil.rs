//! HTTP handlers for soil analysis

use axum::{extract::State, Json};
use validator::Validate;

use crate::error::AppResult;
use crate::models::{SoilAnalysis, SoilAnalysisInput};
use crate::services::SoilAnalysisService;
use crate::AppState;

/// Analyze a soil sample
pub async fn analyze_soil(
    State(state): State<AppState>,
    Json(input): Json<SoilAnalysisInput>,
) -> AppResult<Json<SoilAnalysis>> {
    input.validate()?;

    let service = SoilAnalysisService::new(state.store.clone(), state.advisor());
    let analysis = service.analyze(input).await?;
    Ok(Json(analysis))
}

/// Latest soil analyses
pub async fn soil_history(State(state): State<AppState>) -> AppResult<Json<Vec<SoilAnalysis>>> {
    let service = SoilAnalysisService::new(state.store.clone(), state.advisor());
    let analyses = service.history().await?;
    Ok(Json(analyses))
}

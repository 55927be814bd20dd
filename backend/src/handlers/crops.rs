//! HTTP handlers for crop suggestions and planting records

use axum::{extract::State, Json};
use validator::Validate;

use crate::error::AppResult;
use crate::models::{CropRecord, CropRecordInput, CropSuggestion, LocationRequest};
use crate::services::{CropRecordService, CropSuggestionService};
use crate::AppState;

/// Suggest crops for the current weather at a location
pub async fn suggest_crops(
    State(state): State<AppState>,
    Json(request): Json<LocationRequest>,
) -> AppResult<Json<Vec<CropSuggestion>>> {
    request.validate()?;

    let service = CropSuggestionService::new(
        state.store.clone(),
        state.weather_service(),
        state.advisor(),
    );
    let suggestions = service.suggest(&request.location).await?;
    Ok(Json(suggestions))
}

/// Record a planting
pub async fn create_crop_record(
    State(state): State<AppState>,
    Json(input): Json<CropRecordInput>,
) -> AppResult<Json<CropRecord>> {
    input.validate()?;

    let service = CropRecordService::new(state.store);
    let record = service.create(input).await?;
    Ok(Json(record))
}

/// List planting records
pub async fn list_crop_records(State(state): State<AppState>) -> AppResult<Json<Vec<CropRecord>>> {
    let service = CropRecordService::new(state.store);
    let records = service.list().await?;
    Ok(Json(records))
}

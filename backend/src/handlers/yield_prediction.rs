//! HTTP handlers for yield prediction

use axum::{extract::State, Json};
use validator::Validate;

use crate::error::AppResult;
use crate::models::{YieldPrediction, YieldPredictionInput};
use crate::services::YieldPredictionService;
use crate::AppState;

fn service(state: &AppState) -> YieldPredictionService {
    YieldPredictionService::new(state.store.clone(), state.weather_service(), state.advisor())
}

/// Predict the yield of a planting
pub async fn predict_yield(
    State(state): State<AppState>,
    Json(input): Json<YieldPredictionInput>,
) -> AppResult<Json<YieldPrediction>> {
    input.validate()?;

    let prediction = service(&state).predict(input).await?;
    Ok(Json(prediction))
}

/// Latest yield predictions
pub async fn yield_history(State(state): State<AppState>) -> AppResult<Json<Vec<YieldPrediction>>> {
    let predictions = service(&state).history().await?;
    Ok(Json(predictions))
}

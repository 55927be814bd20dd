//! HTTP handlers for weather lookups

use axum::{extract::State, Json};
use validator::Validate;

use crate::error::AppResult;
use crate::models::{LocationRequest, WeatherSnapshot};
use crate::AppState;

/// Fetch and store current weather for a location
pub async fn get_weather(
    State(state): State<AppState>,
    Json(request): Json<LocationRequest>,
) -> AppResult<Json<WeatherSnapshot>> {
    request.validate()?;

    let snapshot = state.weather_service().fetch_and_store(&request.location).await?;
    Ok(Json(snapshot))
}

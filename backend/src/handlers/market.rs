//! HTTP handlers for market prices

use axum::{extract::State, Json};

use crate::error::AppResult;
use crate::models::MarketPrice;
use crate::services::MarketService;
use crate::AppState;

/// Current simulated commodity prices
pub async fn market_prices(State(state): State<AppState>) -> AppResult<Json<Vec<MarketPrice>>> {
    let service = MarketService::new(state.store);
    let prices = service.current_prices().await?;
    Ok(Json(prices))
}

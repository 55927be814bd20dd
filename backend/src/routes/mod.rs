//! Route definitions for the agriculture assistant API

use axum::{
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};

use crate::{handlers, AppState};

/// Create API routes, mounted under `/api`
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/weather", post(handlers::get_weather))
        .route("/crop-suggestions", post(handlers::suggest_crops))
        .route("/ai-assistant", post(handlers::ask_assistant))
        .route("/recent-queries", get(handlers::recent_queries))
        .route(
            "/crops",
            get(handlers::list_crop_records).post(handlers::create_crop_record),
        )
        .route("/market-prices", get(handlers::market_prices))
        .route("/yield-prediction", post(handlers::predict_yield))
        .route("/yield-history", get(handlers::yield_history))
        .route("/soil-analysis", post(handlers::analyze_soil))
        .route("/soil-history", get(handlers::soil_history))
}

/// Banner served at `/api` and `/api/`
pub async fn api_root() -> Json<Value> {
    Json(json!({ "message": "AI Agriculture Assistant API" }))
}

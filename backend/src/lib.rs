//! AI Agriculture Assistant - Backend
//!
//! Weather lookups, model-backed farming advice with deterministic fallbacks,
//! soil scoring, yield estimates and simulated market prices.

use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub mod config;
pub mod error;
pub mod external;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;
pub mod store;

pub use config::Config;

use external::{LanguageModel, WeatherProvider};
use services::{Advisor, WeatherService};
use store::DocumentStore;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn DocumentStore>,
    pub weather: Arc<dyn WeatherProvider>,
    pub model: Arc<dyn LanguageModel>,
}

impl AppState {
    pub fn new(
        store: Arc<dyn DocumentStore>,
        weather: Arc<dyn WeatherProvider>,
        model: Arc<dyn LanguageModel>,
    ) -> Self {
        Self {
            store,
            weather,
            model,
        }
    }

    pub fn weather_service(&self) -> WeatherService {
        WeatherService::new(self.store.clone(), self.weather.clone())
    }

    pub fn advisor(&self) -> Advisor {
        Advisor::new(self.model.clone())
    }
}

/// Create the application router with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/api", get(routes::api_root))
        .route("/api/", get(routes::api_root))
        .nest("/api", routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

//! Weather API client for fetching current conditions
//!
//! Integrates with the OpenWeatherMap current-weather endpoint, looked up by
//! place name.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::config::WeatherConfig;
use crate::error::{AppError, AppResult};

const SERVICE: &str = "weather";

/// Conditions reported by a weather provider
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentConditions {
    /// Degrees Celsius
    pub temperature: f64,
    /// Relative humidity, percent
    pub humidity: f64,
    pub description: String,
}

/// Source of current weather for a place name
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    async fn current_conditions(&self, location: &str) -> AppResult<CurrentConditions>;
}

/// Weather API client
#[derive(Clone)]
pub struct WeatherClient {
    client: Client,
    api_key: String,
    base_url: String,
}

/// OpenWeatherMap API response for current weather
#[derive(Debug, Deserialize)]
struct OWMCurrentResponse {
    weather: Vec<OWMWeather>,
    main: OWMMain,
}

#[derive(Debug, Deserialize)]
struct OWMWeather {
    description: String,
}

#[derive(Debug, Deserialize)]
struct OWMMain {
    temp: f64,
    humidity: f64,
}

impl WeatherClient {
    /// Create a new WeatherClient from configuration
    pub fn new(config: &WeatherConfig) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AppError::Configuration(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            base_url: config.api_endpoint.trim_end_matches('/').to_string(),
        })
    }

    /// Convert OpenWeatherMap current response to our format
    fn convert_current_response(data: OWMCurrentResponse) -> CurrentConditions {
        CurrentConditions {
            temperature: data.main.temp,
            humidity: data.main.humidity,
            description: data
                .weather
                .into_iter()
                .next()
                .map(|w| w.description)
                .unwrap_or_default(),
        }
    }
}

#[async_trait]
impl WeatherProvider for WeatherClient {
    async fn current_conditions(&self, location: &str) -> AppResult<CurrentConditions> {
        let url = format!("{}/weather", self.base_url);

        tracing::debug!(location, "Requesting current weather");

        let response = self
            .client
            .get(&url)
            .query(&[
                ("q", location),
                ("appid", self.api_key.as_str()),
                ("units", "metric"),
            ])
            .send()
            .await
            .map_err(|e| AppError::upstream(SERVICE, format!("Weather API request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::upstream(
                SERVICE,
                format!("Weather API error: {} - {}", status, body),
            ));
        }

        let data: OWMCurrentResponse = response.json().await.map_err(|e| {
            AppError::upstream(SERVICE, format!("Failed to parse weather response: {}", e))
        })?;

        Ok(Self::convert_current_response(data))
    }
}

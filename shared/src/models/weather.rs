//! Weather data models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::types::timestamp;
use crate::validation::validate_not_blank;

/// Current conditions at a location, captured once and never modified
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub id: Uuid,
    pub location: String,
    /// Degrees Celsius
    pub temperature: f64,
    /// Relative humidity, percent
    pub humidity: f64,
    pub description: String,
    #[serde(with = "timestamp")]
    pub timestamp: DateTime<Utc>,
}

impl WeatherSnapshot {
    pub fn new(
        location: impl Into<String>,
        temperature: f64,
        humidity: f64,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            location: location.into(),
            temperature,
            humidity,
            description: description.into(),
            timestamp: Utc::now(),
        }
    }
}

/// Request body naming a location
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LocationRequest {
    #[validate(custom = "validate_not_blank")]
    pub location: String,
}

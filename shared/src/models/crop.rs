//! Crop suggestion and planting record models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::types::timestamp;
use crate::validation::{validate_growing_window, validate_not_blank};

/// Crop name used when the model's suggestions could not be parsed
pub const GENERIC_SUGGESTION_CROP: &str = "General crops suitable for current weather";

/// Season label used when the model's suggestions could not be parsed
pub const GENERIC_SUGGESTION_SEASON: &str = "Current season";

/// Status assigned to every new planting record
pub const DEFAULT_CROP_STATUS: &str = "planted";

/// A crop recommended for the current weather at a location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CropSuggestion {
    pub id: Uuid,
    pub crop_name: String,
    pub reason: String,
    pub season: String,
    pub location: String,
    pub weather_condition: String,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
}

impl CropSuggestion {
    pub fn new(
        crop_name: impl Into<String>,
        reason: impl Into<String>,
        season: impl Into<String>,
        location: impl Into<String>,
        weather_condition: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            crop_name: crop_name.into(),
            reason: reason.into(),
            season: season.into(),
            location: location.into(),
            weather_condition: weather_condition.into(),
            created_at: Utc::now(),
        }
    }

    /// Wrap unparseable model text as a single catch-all suggestion
    pub fn generic(
        raw_text: impl Into<String>,
        location: impl Into<String>,
        weather_condition: impl Into<String>,
    ) -> Self {
        Self::new(
            GENERIC_SUGGESTION_CROP,
            raw_text,
            GENERIC_SUGGESTION_SEASON,
            location,
            weather_condition,
        )
    }
}

/// A user-entered planting record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CropRecord {
    pub id: Uuid,
    pub crop_name: String,
    #[serde(with = "timestamp")]
    pub planting_date: DateTime<Utc>,
    #[serde(with = "timestamp")]
    pub expected_harvest: DateTime<Utc>,
    pub location: String,
    pub notes: String,
    pub status: String,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
}

/// Input for recording a planting
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CropRecordInput {
    #[validate(custom = "validate_not_blank")]
    pub crop_name: String,
    #[serde(deserialize_with = "timestamp::deserialize")]
    pub planting_date: DateTime<Utc>,
    #[serde(deserialize_with = "timestamp::deserialize")]
    pub expected_harvest: DateTime<Utc>,
    #[validate(custom = "validate_not_blank")]
    pub location: String,
    #[serde(default)]
    pub notes: String,
}

impl CropRecordInput {
    /// Cross-field checks the derive cannot express
    pub fn check_growing_window(&self) -> Result<(), &'static str> {
        validate_growing_window(self.planting_date, self.expected_harvest)
    }
}

impl From<CropRecordInput> for CropRecord {
    fn from(input: CropRecordInput) -> Self {
        Self {
            id: Uuid::new_v4(),
            crop_name: input.crop_name.trim().to_string(),
            planting_date: input.planting_date,
            expected_harvest: input.expected_harvest,
            location: input.location.trim().to_string(),
            notes: input.notes,
            status: DEFAULT_CROP_STATUS.to_string(),
            created_at: Utc::now(),
        }
    }
}

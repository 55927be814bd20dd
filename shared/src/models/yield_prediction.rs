//! Yield prediction models and the baseline yield table

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;
use validator::Validate;

use crate::models::AdvisorySource;
use crate::types::{clamp_score, round2, timestamp};
use crate::validation::{normalize_crop_name, validate_not_blank};

/// Per-acre yield assumed when neither the model nor the table knows the crop
pub const DEFAULT_YIELD_PER_ACRE: f64 = 2.5;

/// Confidence assumed when the model omits one
pub const DEFAULT_MODEL_CONFIDENCE: f64 = 75.0;

/// Confidence reported for baseline-table estimates
pub const BASELINE_CONFIDENCE: f64 = 70.0;

/// Highest per-acre yield accepted, in tons
pub const MAX_YIELD_PER_ACRE: f64 = 500.0;

/// Typical yield in tons per acre
const BASELINE_YIELDS: &[(&str, f64)] = &[
    ("wheat", 2.1),
    ("rice", 2.8),
    ("corn", 3.2),
    ("soybeans", 1.3),
    ("cotton", 0.8),
    ("sugarcane", 30.0),
    ("turmeric", 8.0),
    ("tomatoes", 12.0),
    ("potatoes", 10.0),
];

/// Baseline tons per acre for a crop, matched case-insensitively
pub fn baseline_yield_per_acre(crop_name: &str) -> f64 {
    let crop = normalize_crop_name(crop_name);
    BASELINE_YIELDS
        .iter()
        .find(|(name, _)| *name == crop)
        .map(|(_, per_acre)| *per_acre)
        .unwrap_or(DEFAULT_YIELD_PER_ACRE)
}

/// A yield figure before it is attached to a prediction record
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct YieldEstimate {
    pub yield_per_acre: f64,
    pub predicted_yield: f64,
    pub confidence_score: f64,
}

impl YieldEstimate {
    /// Scale a per-acre figure to the field. The per-acre figure is clamped
    /// into `[0, MAX_YIELD_PER_ACRE]` (NaN becomes zero) and the confidence
    /// into `[0, 100]`.
    pub fn new(yield_per_acre: f64, field_size: f64, confidence_score: f64) -> Self {
        let yield_per_acre = if yield_per_acre.is_nan() {
            0.0
        } else {
            yield_per_acre.clamp(0.0, MAX_YIELD_PER_ACRE)
        };
        Self {
            yield_per_acre,
            predicted_yield: round2(yield_per_acre * field_size),
            confidence_score: clamp_score(confidence_score),
        }
    }
}

/// Whether a per-acre figure from the model can be taken at face value
pub fn is_plausible_yield(yield_per_acre: f64) -> bool {
    yield_per_acre.is_finite() && yield_per_acre <= MAX_YIELD_PER_ACRE
}

/// Deterministic estimate from the baseline table
pub fn estimate_yield(crop_name: &str, field_size: f64) -> YieldEstimate {
    YieldEstimate::new(
        baseline_yield_per_acre(crop_name),
        field_size,
        BASELINE_CONFIDENCE,
    )
}

/// Input for a yield prediction
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct YieldPredictionInput {
    #[validate(custom = "validate_not_blank")]
    pub crop_name: String,
    #[validate(custom = "validate_not_blank")]
    pub location: String,
    #[serde(deserialize_with = "timestamp::deserialize")]
    pub planting_date: DateTime<Utc>,
    /// Acres
    #[validate(range(min = 0.01, max = 1000000.0, message = "must be between 0.01 and 1,000,000 acres"))]
    pub field_size: f64,
}

/// A stored yield prediction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YieldPrediction {
    pub id: Uuid,
    pub crop_name: String,
    pub location: String,
    pub field_size: f64,
    pub yield_per_acre: f64,
    /// Total for the field
    pub predicted_yield: f64,
    pub confidence_score: f64,
    pub factors: Map<String, Value>,
    pub source: AdvisorySource,
    #[serde(with = "timestamp")]
    pub prediction_date: DateTime<Utc>,
}

impl YieldPrediction {
    pub fn new(
        input: &YieldPredictionInput,
        estimate: YieldEstimate,
        factors: Map<String, Value>,
        source: AdvisorySource,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            crop_name: input.crop_name.trim().to_string(),
            location: input.location.trim().to_string(),
            field_size: input.field_size,
            yield_per_acre: estimate.yield_per_acre,
            predicted_yield: estimate.predicted_yield,
            confidence_score: estimate.confidence_score,
            factors,
            source,
            prediction_date: Utc::now(),
        }
    }
}

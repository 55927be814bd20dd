//! Soil analysis models and the soil-health rule table
//!
//! Scoring starts at [`BASELINE_SCORE`] and applies at most one rule per
//! reading. Every rule that fires contributes its advisory line, in table order.
//!
//! | Reading        | Low (delta)  | High (delta) | In between |
//! |----------------|--------------|--------------|------------|
//! | pH             | < 6.0 (−15)  | > 7.5 (−10)  | +15        |
//! | Nitrogen       | < 20 (−10)   | > 50 (+10)   | none       |
//! | Phosphorus     | < 15 (−8)    | > 50 (+8)    | none       |
//! | Potassium      | < 100 (−12)  | > 200 (+12)  | none       |
//! | Organic matter | < 2 (−15)    | > 4 (+20)    | none       |

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::AdvisorySource;
use crate::types::{clamp_score, timestamp};
use crate::validation::validate_not_blank;

/// Score every soil starts from before rules apply
pub const BASELINE_SCORE: f64 = 50.0;

pub const ACIDIC_SOIL: &str = "Soil is acidic. Apply agricultural lime to raise the pH.";
pub const ALKALINE_SOIL: &str = "Soil is alkaline. Add sulfur or organic matter to lower the pH.";
pub const OPTIMAL_PH: &str = "Soil pH is in the optimal range for most crops.";
pub const LOW_NITROGEN: &str =
    "Nitrogen is low. Apply a nitrogen-rich fertilizer such as urea or composted manure.";
pub const GOOD_NITROGEN: &str = "Nitrogen levels are good.";
pub const LOW_PHOSPHORUS: &str = "Phosphorus is low. Add a phosphate fertilizer or bone meal.";
pub const GOOD_PHOSPHORUS: &str = "Phosphorus levels are good.";
pub const LOW_POTASSIUM: &str = "Potassium is low. Apply potash or wood ash.";
pub const GOOD_POTASSIUM: &str = "Potassium levels are good.";
pub const LOW_ORGANIC_MATTER: &str =
    "Organic matter is low. Work in compost or well-rotted manure.";
pub const RICH_ORGANIC_MATTER: &str = "Organic matter content is excellent.";

/// One scoring rule: point delta and the advice it adds
type Rule = (f64, &'static str);

/// Lab readings for a soil sample
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SoilReadings {
    pub ph_level: f64,
    pub nitrogen: f64,
    pub phosphorus: f64,
    pub potassium: f64,
    pub organic_matter: f64,
}

/// Score and advice derived from readings
#[derive(Debug, Clone, PartialEq)]
pub struct SoilHealthAssessment {
    pub health_score: f64,
    pub recommendations: Vec<String>,
}

/// Pick the low or high rule for a reading, if either applies
fn banded(value: f64, low: f64, high: f64, below: Rule, above: Rule) -> Option<Rule> {
    if value < low {
        Some(below)
    } else if value > high {
        Some(above)
    } else {
        None
    }
}

fn ph_rule(ph_level: f64) -> Rule {
    banded(ph_level, 6.0, 7.5, (-15.0, ACIDIC_SOIL), (-10.0, ALKALINE_SOIL))
        .unwrap_or((15.0, OPTIMAL_PH))
}

/// Apply the rule table to a set of readings
pub fn assess_soil_health(readings: &SoilReadings) -> SoilHealthAssessment {
    let rules = [
        Some(ph_rule(readings.ph_level)),
        banded(readings.nitrogen, 20.0, 50.0, (-10.0, LOW_NITROGEN), (10.0, GOOD_NITROGEN)),
        banded(readings.phosphorus, 15.0, 50.0, (-8.0, LOW_PHOSPHORUS), (8.0, GOOD_PHOSPHORUS)),
        banded(readings.potassium, 100.0, 200.0, (-12.0, LOW_POTASSIUM), (12.0, GOOD_POTASSIUM)),
        banded(
            readings.organic_matter,
            2.0,
            4.0,
            (-15.0, LOW_ORGANIC_MATTER),
            (20.0, RICH_ORGANIC_MATTER),
        ),
    ];

    let mut score = BASELINE_SCORE;
    let mut recommendations = Vec::new();
    for (delta, advice) in rules.into_iter().flatten() {
        score += delta;
        recommendations.push(advice.to_string());
    }

    SoilHealthAssessment {
        health_score: clamp_score(score),
        recommendations,
    }
}

/// Input for a soil analysis
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SoilAnalysisInput {
    #[validate(range(min = 0.0, max = 14.0, message = "must be between 0 and 14"))]
    pub ph_level: f64,
    #[validate(range(min = 0.0, message = "cannot be negative"))]
    pub nitrogen: f64,
    #[validate(range(min = 0.0, message = "cannot be negative"))]
    pub phosphorus: f64,
    #[validate(range(min = 0.0, message = "cannot be negative"))]
    pub potassium: f64,
    #[validate(range(min = 0.0, message = "cannot be negative"))]
    pub organic_matter: f64,
    #[validate(custom = "validate_not_blank")]
    pub soil_type: String,
    #[validate(custom = "validate_not_blank")]
    pub location: String,
}

impl SoilAnalysisInput {
    pub fn readings(&self) -> SoilReadings {
        SoilReadings {
            ph_level: self.ph_level,
            nitrogen: self.nitrogen,
            phosphorus: self.phosphorus,
            potassium: self.potassium,
            organic_matter: self.organic_matter,
        }
    }
}

/// A stored soil analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SoilAnalysis {
    pub id: Uuid,
    pub ph_level: f64,
    pub nitrogen: f64,
    pub phosphorus: f64,
    pub potassium: f64,
    pub organic_matter: f64,
    pub soil_type: String,
    pub health_score: f64,
    pub recommendations: Vec<String>,
    pub location: String,
    pub source: AdvisorySource,
    #[serde(with = "timestamp")]
    pub analysis_date: DateTime<Utc>,
}

impl SoilAnalysis {
    /// Build the record; the score is clamped whatever its origin
    pub fn new(
        input: &SoilAnalysisInput,
        health_score: f64,
        recommendations: Vec<String>,
        source: AdvisorySource,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            ph_level: input.ph_level,
            nitrogen: input.nitrogen,
            phosphorus: input.phosphorus,
            potassium: input.potassium,
            organic_matter: input.organic_matter,
            soil_type: input.soil_type.trim().to_string(),
            health_score: clamp_score(health_score),
            recommendations,
            location: input.location.trim().to_string(),
            source,
            analysis_date: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn readings(ph: f64, n: f64, p: f64, k: f64, om: f64) -> SoilReadings {
        SoilReadings {
            ph_level: ph,
            nitrogen: n,
            phosphorus: p,
            potassium: k,
            organic_matter: om,
        }
    }

    #[test]
    fn test_loamy_sample_scores_65() {
        let assessment = assess_soil_health(&readings(6.5, 25.0, 20.0, 150.0, 3.0));
        assert_eq!(assessment.health_score, 65.0);
        assert_eq!(assessment.recommendations, vec![OPTIMAL_PH.to_string()]);
    }

    #[test]
    fn test_poor_soil_clamps_to_zero() {
        // 50 - 15 - 10 - 8 - 12 - 15 = -10
        let assessment = assess_soil_health(&readings(5.2, 5.0, 4.0, 40.0, 0.5));
        assert_eq!(assessment.health_score, 0.0);
        assert_eq!(
            assessment.recommendations,
            vec![
                ACIDIC_SOIL,
                LOW_NITROGEN,
                LOW_PHOSPHORUS,
                LOW_POTASSIUM,
                LOW_ORGANIC_MATTER
            ]
        );
    }

    #[test]
    fn test_rich_soil_clamps_to_hundred() {
        // 50 + 15 + 10 + 8 + 12 + 20 = 115
        let assessment = assess_soil_health(&readings(6.8, 60.0, 55.0, 250.0, 5.0));
        assert_eq!(assessment.health_score, 100.0);
        assert_eq!(assessment.recommendations.len(), 5);
    }

    #[test]
    fn test_alkaline_soil() {
        let assessment = assess_soil_health(&readings(8.1, 25.0, 20.0, 150.0, 3.0));
        assert_eq!(assessment.health_score, 40.0);
        assert_eq!(assessment.recommendations, vec![ALKALINE_SOIL.to_string()]);
    }

    #[test]
    fn test_thresholds_are_exclusive() {
        // Every reading sits exactly on a band edge, so only the pH rule fires
        let assessment = assess_soil_health(&readings(6.0, 20.0, 15.0, 100.0, 2.0));
        assert_eq!(assessment.health_score, 65.0);

        let assessment = assess_soil_health(&readings(7.5, 50.0, 50.0, 200.0, 4.0));
        assert_eq!(assessment.health_score, 65.0);
    }

    #[test]
    fn test_ph_out_of_range_rejected() {
        let input = SoilAnalysisInput {
            ph_level: 15.0,
            nitrogen: 25.0,
            phosphorus: 20.0,
            potassium: 150.0,
            organic_matter: 3.0,
            soil_type: "Loamy".to_string(),
            location: "Test Farm".to_string(),
        };
        let errors = input.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("ph_level"));
    }

    #[test]
    fn test_record_clamps_model_score() {
        let input = SoilAnalysisInput {
            ph_level: 6.5,
            nitrogen: 25.0,
            phosphorus: 20.0,
            potassium: 150.0,
            organic_matter: 3.0,
            soil_type: "Loamy".to_string(),
            location: "Test Farm".to_string(),
        };
        let analysis = SoilAnalysis::new(&input, 180.0, vec![], AdvisorySource::Model);
        assert_eq!(analysis.health_score, 100.0);
    }

    proptest! {
        #[test]
        fn prop_score_always_in_range(
            ph in -100.0f64..100.0,
            n in -1.0e6f64..1.0e6,
            p in -1.0e6f64..1.0e6,
            k in -1.0e6f64..1.0e6,
            om in -1.0e6f64..1.0e6,
        ) {
            let assessment = assess_soil_health(&readings(ph, n, p, k, om));
            prop_assert!((0.0..=100.0).contains(&assessment.health_score));
            prop_assert!(!assessment.recommendations.is_empty());
            prop_assert!(assessment.recommendations.len() <= 5);
        }
    }
}

//! Soil health analysis with a rule-table fallback

use std::sync::Arc;

use serde::Deserialize;
use shared::{assess_soil_health, AdvisorySource, Extraction, SoilAnalysis, SoilAnalysisInput};

use super::advisory::{Advisor, AdvisoryPrompt, QUANTITATIVE_TEMPERATURE};
use crate::error::AppResult;
use crate::store::{self, DocumentStore, FindOptions};

const SYSTEM_ROLE: &str = "You are a soil scientist advising farmers. Assess soil health from lab readings and answer with JSON only.";

/// Number of analyses returned by the history listing
pub const SOIL_HISTORY_LIMIT: usize = 20;

#[derive(Debug, Default, Deserialize)]
struct SoilReply {
    health_score: Option<f64>,
    recommendations: Option<Vec<String>>,
}

#[derive(Clone)]
pub struct SoilAnalysisService {
    store: Arc<dyn DocumentStore>,
    advisor: Advisor,
}

fn soil_prompt(input: &SoilAnalysisInput) -> AdvisoryPrompt {
    let user = format!(
        "Analyze this soil sample from {}:\n\
         - Soil type: {}\n\
         - pH: {}\n\
         - Nitrogen: {} ppm\n\
         - Phosphorus: {} ppm\n\
         - Potassium: {} ppm\n\
         - Organic matter: {}%\n\n\
         Return a JSON object with: health_score (0-100) and recommendations (an array of short, practical actions).",
        input.location.trim(),
        input.soil_type.trim(),
        input.ph_level,
        input.nitrogen,
        input.phosphorus,
        input.potassium,
        input.organic_matter
    );

    AdvisoryPrompt {
        system: SYSTEM_ROLE,
        user,
        temperature: QUANTITATIVE_TEMPERATURE,
    }
}

fn analysis_from(extraction: Extraction<SoilReply>, input: &SoilAnalysisInput) -> SoilAnalysis {
    let assessment = assess_soil_health(&input.readings());

    match extraction {
        Extraction::Parsed(reply) => SoilAnalysis::new(
            input,
            reply.health_score.unwrap_or(assessment.health_score),
            reply.recommendations.unwrap_or(assessment.recommendations),
            AdvisorySource::Model,
        ),
        Extraction::FallbackRequired(_) => SoilAnalysis::new(
            input,
            assessment.health_score,
            assessment.recommendations,
            AdvisorySource::Fallback,
        ),
    }
}

impl SoilAnalysisService {
    pub fn new(store: Arc<dyn DocumentStore>, advisor: Advisor) -> Self {
        Self { store, advisor }
    }

    /// Score a soil sample and store the analysis
    #[tracing::instrument(skip(self, input), fields(location = %input.location))]
    pub async fn analyze(&self, input: SoilAnalysisInput) -> AppResult<SoilAnalysis> {
        let consultation = self.advisor.consult::<SoilReply>(soil_prompt(&input)).await?;
        let analysis = analysis_from(consultation.extraction, &input);

        store::insert(self.store.as_ref(), &analysis).await?;
        tracing::info!(
            analysis_id = %analysis.id,
            source = ?analysis.source,
            health_score = analysis.health_score,
            "Stored soil analysis"
        );

        Ok(analysis)
    }

    /// Latest analyses, newest first
    pub async fn history(&self) -> AppResult<Vec<SoilAnalysis>> {
        store::find(
            self.store.as_ref(),
            FindOptions::latest("analysis_date", SOIL_HISTORY_LIMIT),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::{extract_as, OPTIMAL_PH};

    fn sample() -> SoilAnalysisInput {
        SoilAnalysisInput {
            ph_level: 6.5,
            nitrogen: 25.0,
            phosphorus: 20.0,
            potassium: 150.0,
            organic_matter: 3.0,
            soil_type: "Loamy".to_string(),
            location: "Test Farm".to_string(),
        }
    }

    #[test]
    fn test_prompt_lists_readings() {
        let prompt = soil_prompt(&sample());
        assert!(prompt.user.contains("sample from Test Farm"));
        assert!(prompt.user.contains("- Soil type: Loamy"));
        assert!(prompt.user.contains("- pH: 6.5"));
        assert!(prompt.user.contains("- Potassium: 150 ppm"));
        assert!(prompt.user.contains("- Organic matter: 3%"));
    }

    #[test]
    fn test_model_score_is_clamped() {
        let raw = "```json\n{\"health_score\": 130, \"recommendations\": [\"Mulch between rows\"]}\n```";
        let analysis = analysis_from(extract_as(raw), &sample());

        assert_eq!(analysis.source, AdvisorySource::Model);
        assert_eq!(analysis.health_score, 100.0);
        assert_eq!(analysis.recommendations, vec!["Mulch between rows".to_string()]);
    }

    #[test]
    fn test_missing_recommendations_come_from_rule_table() {
        let analysis = analysis_from(extract_as("{\"health_score\": 72}"), &sample());

        assert_eq!(analysis.health_score, 72.0);
        assert_eq!(analysis.recommendations[0], OPTIMAL_PH);
    }

    #[test]
    fn test_unparseable_reply_uses_rule_table() {
        let analysis = analysis_from(extract_as("Looks healthy to me."), &sample());

        assert_eq!(analysis.source, AdvisorySource::Fallback);
        assert_eq!(analysis.health_score, 65.0);
        assert_eq!(analysis.recommendations, vec![OPTIMAL_PH.to_string()]);
    }
}

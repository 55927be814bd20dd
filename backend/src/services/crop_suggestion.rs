//! Crop suggestions from current weather

use std::sync::Arc;

use serde::Deserialize;
use shared::{CropSuggestion, Extraction, WeatherSnapshot};

use super::advisory::{weather_context, Advisor, AdvisoryPrompt, Consultation, NARRATIVE_TEMPERATURE};
use super::weather::WeatherService;
use crate::error::AppResult;
use crate::store::{self, DocumentStore};

const SYSTEM_ROLE: &str = "You are an expert agricultural advisor. Provide practical crop suggestions based on weather and location data.";

/// One suggestion as the model writes it
#[derive(Debug, Deserialize)]
struct SuggestionReply {
    #[serde(default)]
    crop_name: String,
    #[serde(default)]
    reason: String,
    #[serde(default)]
    season: String,
}

/// Crop suggestion service
#[derive(Clone)]
pub struct CropSuggestionService {
    store: Arc<dyn DocumentStore>,
    weather: WeatherService,
    advisor: Advisor,
}

fn suggestion_prompt(location: &str, weather: &WeatherSnapshot) -> AdvisoryPrompt {
    let user = format!(
        "Based on the current weather conditions in {}:\n{}\n\n\
         Suggest 3-5 crops that would be suitable for planting now. Consider the season, climate, and weather conditions.\n\
         Return your response as a JSON array with objects containing: crop_name, reason, season.",
        location,
        weather_context(weather)
    );

    AdvisoryPrompt {
        system: SYSTEM_ROLE,
        user,
        temperature: NARRATIVE_TEMPERATURE,
    }
}

/// Turn the model's reply into suggestion records
fn suggestions_from(
    consultation: Consultation<Vec<SuggestionReply>>,
    weather: &WeatherSnapshot,
) -> Vec<CropSuggestion> {
    match consultation.extraction {
        Extraction::Parsed(replies) => replies
            .into_iter()
            .map(|reply| {
                CropSuggestion::new(
                    reply.crop_name,
                    reply.reason,
                    reply.season,
                    weather.location.as_str(),
                    weather.description.as_str(),
                )
            })
            .collect(),
        Extraction::FallbackRequired(_) => vec![CropSuggestion::generic(
            consultation.raw,
            weather.location.as_str(),
            weather.description.as_str(),
        )],
    }
}

impl CropSuggestionService {
    pub fn new(store: Arc<dyn DocumentStore>, weather: WeatherService, advisor: Advisor) -> Self {
        Self {
            store,
            weather,
            advisor,
        }
    }

    /// Suggest crops for the current weather at a location
    #[tracing::instrument(skip(self))]
    pub async fn suggest(&self, location: &str) -> AppResult<Vec<CropSuggestion>> {
        let weather = self.weather.fetch_and_store(location).await?;

        let consultation = self
            .advisor
            .consult::<Vec<SuggestionReply>>(suggestion_prompt(&weather.location, &weather))
            .await?;
        let suggestions = suggestions_from(consultation, &weather);

        for suggestion in &suggestions {
            store::insert(self.store.as_ref(), suggestion).await?;
        }
        tracing::info!(count = suggestions.len(), "Stored crop suggestions");

        Ok(suggestions)
    }
}

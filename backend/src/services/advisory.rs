//! Shared plumbing for the model-backed advisory generators
//!
//! Every generator sends one prompt, runs the reply through the extractor, and
//! then either maps the parsed payload or falls back to a deterministic result.
//! This module owns the first two steps.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use shared::{extract_as, Extraction, WeatherSnapshot};

use crate::error::AppResult;
use crate::external::{ChatMessage, CompletionRequest, LanguageModel};

/// Sampling temperature for free-form advice and suggestions
pub const NARRATIVE_TEMPERATURE: f32 = 0.7;

/// Sampling temperature for replies that carry numbers
pub const QUANTITATIVE_TEMPERATURE: f32 = 0.3;

/// A fully composed request to the model
#[derive(Debug, Clone, PartialEq)]
pub struct AdvisoryPrompt {
    pub system: &'static str,
    pub user: String,
    pub temperature: f32,
}

impl From<AdvisoryPrompt> for CompletionRequest {
    fn from(prompt: AdvisoryPrompt) -> Self {
        CompletionRequest {
            messages: vec![ChatMessage::system(prompt.system), ChatMessage::user(prompt.user)],
            temperature: prompt.temperature,
        }
    }
}

/// The model's raw reply and what could be extracted from it
#[derive(Debug)]
pub struct Consultation<T> {
    pub raw: String,
    pub extraction: Extraction<T>,
}

/// Sends prompts to the language model
#[derive(Clone)]
pub struct Advisor {
    model: Arc<dyn LanguageModel>,
}

impl Advisor {
    pub fn new(model: Arc<dyn LanguageModel>) -> Self {
        Self { model }
    }

    /// Ask for free text
    pub async fn ask(&self, prompt: AdvisoryPrompt) -> AppResult<String> {
        self.model.complete(prompt.into()).await
    }

    /// Ask for a structured reply. Upstream failures are errors; an
    /// unparseable reply is not, it comes back as `FallbackRequired`.
    pub async fn consult<T: DeserializeOwned>(
        &self,
        prompt: AdvisoryPrompt,
    ) -> AppResult<Consultation<T>> {
        let raw = self.ask(prompt).await?;
        let extraction = extract_as::<T>(&raw);

        if let Extraction::FallbackRequired(reason) = &extraction {
            tracing::warn!(%reason, "Model reply not usable, falling back");
        }

        Ok(Consultation { raw, extraction })
    }
}

/// Weather lines embedded in prompts
pub fn weather_context(weather: &WeatherSnapshot) -> String {
    format!(
        "- Temperature: {}°C\n- Humidity: {}%\n- Weather: {}",
        weather.temperature, weather.humidity, weather.description
    )
}

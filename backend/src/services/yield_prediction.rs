//! Yield prediction with a baseline-table fallback

use std::sync::Arc;

use serde::Deserialize;
use serde_json::{json, Map, Value};
use shared::{
    baseline_yield_per_acre, estimate_yield, is_plausible_yield, AdvisorySource, Extraction,
    WeatherSnapshot, YieldEstimate, YieldPrediction, YieldPredictionInput,
    DEFAULT_MODEL_CONFIDENCE, DEFAULT_YIELD_PER_ACRE,
};

use super::advisory::{weather_context, Advisor, AdvisoryPrompt, QUANTITATIVE_TEMPERATURE};
use super::weather::WeatherService;
use crate::error::AppResult;
use crate::store::{self, DocumentStore, FindOptions};

const SYSTEM_ROLE: &str = "You are an agricultural yield analyst. Estimate crop yields from crop, field and weather data and answer with JSON only.";

/// Number of predictions returned by the history listing
pub const YIELD_HISTORY_LIMIT: usize = 20;

/// Label stored in `factors.method` for baseline estimates
pub const BASELINE_METHOD: &str = "baseline_table";

#[derive(Debug, Default, Deserialize)]
struct YieldReply {
    predicted_yield_per_acre: Option<f64>,
    confidence_score: Option<f64>,
    factors: Option<Map<String, Value>>,
}

#[derive(Clone)]
pub struct YieldPredictionService {
    store: Arc<dyn DocumentStore>,
    weather: WeatherService,
    advisor: Advisor,
}

fn yield_prompt(input: &YieldPredictionInput, weather: &WeatherSnapshot) -> AdvisoryPrompt {
    let user = format!(
        "Predict the yield for this planting:\n\
         - Crop: {}\n\
         - Location: {}\n\
         - Planting date: {}\n\
         - Field size: {} acres\n\n\
         Current weather at the location:\n{}\n\n\
         Return a JSON object with: predicted_yield_per_acre (tons per acre), \
         confidence_score (0-100), factors (an object describing what drove the estimate).",
        input.crop_name.trim(),
        input.location.trim(),
        input.planting_date.format("%Y-%m-%d"),
        input.field_size,
        weather_context(weather)
    );

    AdvisoryPrompt {
        system: SYSTEM_ROLE,
        user,
        temperature: QUANTITATIVE_TEMPERATURE,
    }
}

fn baseline_factors(input: &YieldPredictionInput, weather: &WeatherSnapshot) -> Map<String, Value> {
    let factors = json!({
        "method": BASELINE_METHOD,
        "base_yield_per_acre": baseline_yield_per_acre(&input.crop_name),
        "field_size": input.field_size,
        "weather": {
            "temperature": weather.temperature,
            "humidity": weather.humidity,
            "description": weather.description,
        },
    });

    match factors {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

fn prediction_from(
    extraction: Extraction<YieldReply>,
    input: &YieldPredictionInput,
    weather: &WeatherSnapshot,
) -> YieldPrediction {
    match extraction {
        Extraction::Parsed(reply)
            if reply
                .predicted_yield_per_acre
                .map_or(true, is_plausible_yield) =>
        {
            let estimate = YieldEstimate::new(
                reply.predicted_yield_per_acre.unwrap_or(DEFAULT_YIELD_PER_ACRE),
                input.field_size,
                reply.confidence_score.unwrap_or(DEFAULT_MODEL_CONFIDENCE),
            );
            YieldPrediction::new(
                input,
                estimate,
                reply.factors.unwrap_or_default(),
                AdvisorySource::Model,
            )
        }
        Extraction::Parsed(reply) => {
            tracing::warn!(
                per_acre = ?reply.predicted_yield_per_acre,
                "Model yield out of range, falling back"
            );
            baseline_prediction(input, weather)
        }
        Extraction::FallbackRequired(_) => baseline_prediction(input, weather),
    }
}

fn baseline_prediction(input: &YieldPredictionInput, weather: &WeatherSnapshot) -> YieldPrediction {
    YieldPrediction::new(
        input,
        estimate_yield(&input.crop_name, input.field_size),
        baseline_factors(input, weather),
        AdvisorySource::Fallback,
    )
}

impl YieldPredictionService {
    pub fn new(store: Arc<dyn DocumentStore>, weather: WeatherService, advisor: Advisor) -> Self {
        Self {
            store,
            weather,
            advisor,
        }
    }

    /// Predict the harvest for a planting and store the prediction
    #[tracing::instrument(skip(self, input), fields(crop = %input.crop_name))]
    pub async fn predict(&self, input: YieldPredictionInput) -> AppResult<YieldPrediction> {
        let weather = self.weather.fetch_and_store(&input.location).await?;

        let consultation = self
            .advisor
            .consult::<YieldReply>(yield_prompt(&input, &weather))
            .await?;
        let prediction = prediction_from(consultation.extraction, &input, &weather);

        store::insert(self.store.as_ref(), &prediction).await?;
        tracing::info!(
            prediction_id = %prediction.id,
            source = ?prediction.source,
            predicted_yield = prediction.predicted_yield,
            "Stored yield prediction"
        );

        Ok(prediction)
    }

    /// Latest predictions, newest first
    pub async fn history(&self) -> AppResult<Vec<YieldPrediction>> {
        store::find(
            self.store.as_ref(),
            FindOptions::latest("prediction_date", YIELD_HISTORY_LIMIT),
        )
        .await
    }
}

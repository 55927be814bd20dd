//! WebAssembly module for the AI Agriculture Assistant
//!
//! Provides client-side computation for:
//! - Soil health previews from the rule table
//! - Baseline yield estimates
//! - Reading JSON out of model replies
//! - USD to INR price conversion

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use wasm_bindgen::prelude::*;

// Re-export shared types for use in JavaScript
pub use shared::models::*;
pub use shared::types::*;
pub use shared::extract::*;

/// Initialize the WASM module
#[wasm_bindgen(start)]
pub fn init() {
    // Set up panic hook for better error messages in browser console
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

fn readings(ph_level: f64, nitrogen: f64, phosphorus: f64, potassium: f64, organic_matter: f64) -> SoilReadings {
    SoilReadings {
        ph_level,
        nitrogen,
        phosphorus,
        potassium,
        organic_matter,
    }
}

/// Rule-table soil health score (0-100)
#[wasm_bindgen]
pub fn soil_health_score(
    ph_level: f64,
    nitrogen: f64,
    phosphorus: f64,
    potassium: f64,
    organic_matter: f64,
) -> f64 {
    assess_soil_health(&readings(ph_level, nitrogen, phosphorus, potassium, organic_matter)).health_score
}

/// Rule-table advice as a JavaScript array of strings
#[wasm_bindgen]
pub fn soil_recommendations(
    ph_level: f64,
    nitrogen: f64,
    phosphorus: f64,
    potassium: f64,
    organic_matter: f64,
) -> js_sys::Array {
    assess_soil_health(&readings(ph_level, nitrogen, phosphorus, potassium, organic_matter))
        .recommendations
        .into_iter()
        .map(|advice| JsValue::from_str(&advice))
        .collect()
}

/// Baseline yield per acre for a crop (tons)
#[wasm_bindgen]
pub fn baseline_yield(crop_name: &str) -> f64 {
    baseline_yield_per_acre(crop_name)
}

/// Baseline total yield for a field (tons)
#[wasm_bindgen]
pub fn estimate_field_yield(crop_name: &str, field_size: f64) -> f64 {
    if field_size <= 0.0 {
        return 0.0;
    }
    estimate_yield(crop_name, field_size).predicted_yield
}

/// Pull the JSON payload out of a model reply.
///
/// Returns the compact JSON text, or `None` when the reply cannot be used.
#[wasm_bindgen]
pub fn extract_model_json(text: &str) -> Option<String> {
    match extract_json(text) {
        Extraction::Parsed(value) => Some(value.to_string()),
        Extraction::FallbackRequired(reason) => {
            #[cfg(target_arch = "wasm32")]
            web_sys::console::warn_1(&JsValue::from_str(&format!("Model reply not usable: {}", reason)));
            #[cfg(not(target_arch = "wasm32"))]
            let _ = reason;
            None
        }
    }
}

/// Convert a USD price to INR at the fixed exchange rate
#[wasm_bindgen]
pub fn usd_to_inr(usd: f64) -> f64 {
    let usd = Decimal::try_from(usd).unwrap_or(Decimal::ZERO);
    (usd * EXCHANGE_RATE_USD_INR)
        .round_dp(2)
        .to_f64()
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_soil_health_score() {
        assert_eq!(soil_health_score(6.5, 25.0, 20.0, 150.0, 3.0), 65.0);
        assert_eq!(soil_health_score(5.0, 10.0, 10.0, 50.0, 1.0), 0.0);
    }

    #[test]
    fn test_yield_estimates() {
        assert_eq!(baseline_yield("Sugarcane"), 30.0);
        assert_eq!(baseline_yield("quinoa"), 2.5);
        assert_eq!(estimate_field_yield("corn", 10.0), 32.0);
        assert_eq!(estimate_field_yield("corn", -1.0), 0.0);
    }

    #[test]
    fn test_extract_model_json() {
        assert_eq!(
            extract_model_json("```json\n{\"health_score\": 70}\n```").as_deref(),
            Some("{\"health_score\":70}")
        );
        assert_eq!(extract_model_json("no json here"), None);
    }

    #[test]
    fn test_usd_to_inr() {
        assert_eq!(usd_to_inr(6.5), 542.75);
        assert_eq!(usd_to_inr(0.0), 0.0);
    }
}

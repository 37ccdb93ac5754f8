//! WebAssembly module for the Poultry Egg Production Predictor
//!
//! Provides client-side computation for:
//! - Derived feature calculations on every input change
//! - Confidence classification
//! - Input clamping against the widget bounds

use wasm_bindgen::prelude::*;

// Re-export shared types for use in JavaScript
pub use shared::models::*;
pub use shared::types::*;
pub use shared::validation::*;

/// Calculate feed per chicken, rounded to 5 decimals.
///
/// The chicken count is clamped into the widget bounds first.
#[wasm_bindgen]
pub fn calculate_feed_per_chicken(amount_of_feeding: f64, amount_of_chicken: u32) -> f64 {
    let chickens = InputField::AmountOfChicken
        .constraint()
        .clamp(f64::from(amount_of_chicken)) as u32;
    feed_per_chicken(amount_of_feeding, chickens)
}

/// Calculate the environmental stress index, rounded to 3 decimals
#[wasm_bindgen]
pub fn calculate_environmental_stress_index(temperature: f64, humidity: f64, ammonia: f64) -> f64 {
    environmental_stress_index(temperature, humidity, ammonia)
}

/// Derive both features from an observation given as JSON
#[wasm_bindgen]
pub fn derive_features(observation_json: &str) -> Result<String, JsValue> {
    let obs: FarmObservation = serde_json::from_str(observation_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid observation JSON: {}", e)))?;

    let derived = DerivedFeatures::from_observation(&obs.clamped());
    serde_json::to_string(&derived)
        .map_err(|e| JsValue::from_str(&format!("Failed to encode derived features: {}", e)))
}

/// Classify prediction confidence ("High" or "Lower")
#[wasm_bindgen]
pub fn classify_confidence(temperature: f64, amount_of_feeding: f64) -> String {
    let confidence = if is_optimal_range(temperature, amount_of_feeding) {
        Confidence::High
    } else {
        Confidence::Lower
    };
    format!("{}", confidence)
}

/// Message shown under a prediction for the given inputs
#[wasm_bindgen]
pub fn confidence_message(temperature: f64, amount_of_feeding: f64) -> String {
    let obs = FarmObservation {
        temperature,
        amount_of_feeding,
        ..Default::default()
    };
    Confidence::assess(&obs).message().to_string()
}

/// Clamp a value into the bounds of the named input field
#[wasm_bindgen]
pub fn clamp_input(field: &str, value: f64) -> Result<f64, JsValue> {
    let field = InputField::from_key(field)
        .ok_or_else(|| JsValue::from_str(&format!("Unknown input field: {}", field)))?;
    Ok(field.constraint().clamp(value))
}

/// Input bounds and defaults as JSON
#[wasm_bindgen]
pub fn input_constraints_json() -> String {
    serde_json::to_string(&INPUT_CONSTRAINTS).unwrap_or_else(|_| "[]".to_string())
}

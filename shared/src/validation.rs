//! Validation utilities for the Poultry Egg Production Predictor
//!
//! Hard bounds live in [`crate::types::INPUT_CONSTRAINTS`]; the optimal
//! ranges here never reject input, they only lower the confidence label.

use std::ops::RangeInclusive;

use crate::features::{first_order_mismatch, FEATURE_COUNT, FEATURE_ORDER};
use crate::predictor::{Predictor, PredictorError};
use crate::types::InputField;

// ============================================================================
// Optimal Training Range
// ============================================================================

/// Temperatures (°C) the training data concentrated on
pub const OPTIMAL_TEMPERATURE: RangeInclusive<f64> = 28.0..=32.0;

/// Daily feed (kg) the training data concentrated on
pub const OPTIMAL_FEEDING: RangeInclusive<f64> = 170.0..=200.0;

pub fn is_optimal_temperature(temperature: f64) -> bool {
    OPTIMAL_TEMPERATURE.contains(&temperature)
}

pub fn is_optimal_feeding(amount_of_feeding: f64) -> bool {
    OPTIMAL_FEEDING.contains(&amount_of_feeding)
}

/// Both temperature and feeding inside the optimal training range
pub fn is_optimal_range(temperature: f64, amount_of_feeding: f64) -> bool {
    is_optimal_temperature(temperature) && is_optimal_feeding(amount_of_feeding)
}

// ============================================================================
// Input Bounds
// ============================================================================

/// Validate a single input value against its widget bounds
pub fn validate_input(field: InputField, value: f64) -> Result<(), &'static str> {
    let constraint = field.constraint();
    if !value.is_finite() {
        return Err("Input must be a finite number");
    }
    if constraint.integer && value.fract() != 0.0 {
        return Err("Input must be a whole number");
    }
    if !constraint.contains(value) {
        return Err("Input out of allowed range");
    }
    Ok(())
}

// ============================================================================
// Model Schema
// ============================================================================

/// Check that a predictor was trained on [`FEATURE_ORDER`].
///
/// Width is always checked; names only when the artifact recorded them.
pub fn verify_feature_schema(predictor: &dyn Predictor) -> Result<(), PredictorError> {
    if predictor.n_features() != FEATURE_COUNT {
        return Err(PredictorError::SchemaMismatch(format!(
            "model was trained on {} features, dashboard provides {}",
            predictor.n_features(),
            FEATURE_COUNT
        )));
    }

    if let Some(names) = predictor.feature_names() {
        if let Some(pos) = first_order_mismatch(names) {
            let found = names.get(pos).map(String::as_str).unwrap_or("<missing>");
            return Err(PredictorError::SchemaMismatch(format!(
                "column {} is `{}` in the model but `{}` in the dashboard",
                pos, found, FEATURE_ORDER[pos]
            )));
        }
    }

    Ok(())
}

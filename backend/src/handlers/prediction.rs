//! HTTP handlers for prediction endpoints

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use shared::{DerivedFeatures, FarmObservation, InputConstraint, INPUT_CONSTRAINTS};
use validator::Validate;

use crate::error::AppResult;
use crate::services::prediction::{PredictionOutcome, PredictionService};
use crate::AppState;

/// List the input fields with their bounds and defaults
pub async fn list_inputs() -> Json<&'static [InputConstraint]> {
    Json(&INPUT_CONSTRAINTS[..])
}

/// Compute derived features without predicting
pub async fn derive_features(
    State(state): State<AppState>,
    payload: Result<Json<FarmObservation>, JsonRejection>,
) -> AppResult<Json<DerivedFeatures>> {
    let Json(input) = payload?;
    input.validate()?;
    let service = PredictionService::new(state.predictor);
    Ok(Json(service.derive(&input)))
}

/// Predict daily egg production
pub async fn predict(
    State(state): State<AppState>,
    payload: Result<Json<FarmObservation>, JsonRejection>,
) -> AppResult<Json<PredictionOutcome>> {
    let Json(input) = payload?;
    input.validate()?;
    let service = PredictionService::new(state.predictor);
    let outcome = service.predict(&input)?;
    Ok(Json(outcome))
}

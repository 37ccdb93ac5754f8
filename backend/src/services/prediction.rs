//! Egg production prediction service

use std::sync::Arc;

use serde::Serialize;
use shared::{
    rank_feature_importances, verify_feature_schema, Confidence, DerivedFeatures,
    FarmObservation, FeatureImportance, FeatureVector, NamedFeature, PredictionResult, Predictor,
};

use crate::error::AppResult;

/// Prediction service wrapping the shared, read-only predictor
#[derive(Clone)]
pub struct PredictionService {
    predictor: Arc<dyn Predictor>,
}

/// Everything produced by one press of the predict button
#[derive(Debug, Clone, Serialize)]
pub struct PredictionOutcome {
    pub observation: FarmObservation,
    pub derived: DerivedFeatures,
    pub features: Vec<NamedFeature>,
    pub predicted_eggs_per_day: f64,
    pub rounded_eggs_per_day: f64,
    pub confidence: Confidence,
    pub confidence_message: &'static str,
}

impl PredictionOutcome {
    pub fn result(&self) -> PredictionResult {
        PredictionResult {
            eggs_per_day: self.predicted_eggs_per_day,
            confidence: self.confidence,
        }
    }
}

impl PredictionService {
    pub fn new(predictor: Arc<dyn Predictor>) -> Self {
        Self { predictor }
    }

    /// Derived features for the current inputs
    pub fn derive(&self, obs: &FarmObservation) -> DerivedFeatures {
        DerivedFeatures::from_observation(obs)
    }

    /// Build the feature vector and ask the model for a prediction
    pub fn predict(&self, obs: &FarmObservation) -> AppResult<PredictionOutcome> {
        verify_feature_schema(self.predictor.as_ref())?;

        let derived = self.derive(obs);
        let vector = FeatureVector::new(obs, &derived);
        let eggs = self.predictor.predict(vector.as_slice())?;

        let result = PredictionResult {
            eggs_per_day: eggs,
            confidence: Confidence::assess(obs),
        };

        tracing::debug!(
            eggs_per_day = result.eggs_per_day,
            confidence = %result.confidence,
            "Prediction completed"
        );

        Ok(PredictionOutcome {
            observation: *obs,
            derived,
            features: vector.named(),
            predicted_eggs_per_day: result.eggs_per_day,
            rounded_eggs_per_day: result.rounded_eggs(),
            confidence: result.confidence,
            confidence_message: result.confidence.message(),
        })
    }

    /// Model importances paired with feature names, ascending
    pub fn feature_importance(&self) -> AppResult<Vec<FeatureImportance>> {
        Ok(rank_feature_importances(
            self.predictor.feature_importances(),
        )?)
    }
}

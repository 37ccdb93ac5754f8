//! Feature vector and prediction result models

use serde::{Deserialize, Serialize};

use super::derived::DerivedFeatures;
use super::observation::FarmObservation;
use crate::features::{FeatureName, FEATURE_COUNT, FEATURE_ORDER};
use crate::validation::is_optimal_range;

/// One model input row laid out in [`FEATURE_ORDER`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureVector([f64; FEATURE_COUNT]);

impl FeatureVector {
    /// Build the row from raw inputs plus their derived features
    pub fn new(obs: &FarmObservation, derived: &DerivedFeatures) -> Self {
        let mut row = [0.0; FEATURE_COUNT];
        for (slot, name) in row.iter_mut().zip(FEATURE_ORDER.iter()) {
            *slot = match name {
                FeatureName::AmountOfChicken => f64::from(obs.amount_of_chicken),
                FeatureName::AmountOfFeeding => obs.amount_of_feeding,
                FeatureName::Ammonia => obs.ammonia,
                FeatureName::Temperature => obs.temperature,
                FeatureName::Humidity => obs.humidity,
                FeatureName::LightIntensity => obs.light_intensity,
                FeatureName::Noise => obs.noise,
                FeatureName::FeedPerChicken => derived.feed_per_chicken,
                FeatureName::EnvironmentalStressIndex => derived.environmental_stress_index,
            };
        }
        Self(row)
    }

    pub fn from_observation(obs: &FarmObservation) -> Self {
        Self::new(obs, &DerivedFeatures::from_observation(obs))
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn get(&self, name: FeatureName) -> f64 {
        self.0[name.index()]
    }

    /// Column name and value pairs in model order
    pub fn named(&self) -> Vec<NamedFeature> {
        FEATURE_ORDER
            .iter()
            .zip(self.0.iter())
            .map(|(&name, &value)| NamedFeature { name, value })
            .collect()
    }
}

/// A single labelled cell of a feature vector
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct NamedFeature {
    pub name: FeatureName,
    pub value: f64,
}

/// How far the model can be trusted for a given input
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Confidence {
    /// Temperature and feeding both inside the training concentration
    High,
    /// At least one of them outside it
    Lower,
}

impl Confidence {
    pub fn assess(obs: &FarmObservation) -> Self {
        if is_optimal_range(obs.temperature, obs.amount_of_feeding) {
            Confidence::High
        } else {
            Confidence::Lower
        }
    }

    /// Annotation shown under the prediction
    pub fn message(&self) -> &'static str {
        match self {
            Confidence::High => "Inputs within optimal range. Prediction confidence: High",
            Confidence::Lower => {
                "Note: These input values fall outside the model's optimal training range \
                 (Temperature 28–32°C, Feeding 170–200 kg). Prediction confidence may be lower."
            }
        }
    }
}

impl std::fmt::Display for Confidence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Confidence::High => write!(f, "High"),
            Confidence::Lower => write!(f, "Lower"),
        }
    }
}

/// A model prediction with its confidence annotation
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct PredictionResult {
    /// Raw regressor output
    pub eggs_per_day: f64,
    pub confidence: Confidence,
}

impl PredictionResult {
    /// Prediction rounded to whole eggs
    pub fn rounded_eggs(&self) -> f64 {
        self.eggs_per_day.round_ties_even()
    }

    /// Headline shown after a prediction
    pub fn headline(&self) -> String {
        format!("Estimated Egg Production: {:.0} eggs/day", self.eggs_per_day)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vector_follows_feature_order() {
        let obs = FarmObservation::default();
        let vector = FeatureVector::from_observation(&obs);
        let row = vector.as_slice();

        assert_eq!(row.len(), FEATURE_COUNT);
        assert_eq!(row[0], 2700.0);
        assert_eq!(row[1], 180.0);
        assert_eq!(row[2], 15.0);
        assert_eq!(row[3], 30.0);
        assert_eq!(row[4], 50.0);
        assert_eq!(row[5], 330.0);
        assert_eq!(row[6], 200.0);
        assert_eq!(row[7], 0.06667);
        assert_eq!(row[8], 22500.0);
    }

    #[test]
    fn test_named_pairs_use_same_order() {
        let vector = FeatureVector::from_observation(&FarmObservation::default());
        let named = vector.named();
        for (cell, expected) in named.iter().zip(FEATURE_ORDER.iter()) {
            assert_eq!(cell.name, *expected);
            assert_eq!(cell.value, vector.get(*expected));
        }
    }

    #[test]
    fn test_confidence_high_inside_optimal_range() {
        let obs = FarmObservation {
            temperature: 30.0,
            amount_of_feeding: 180.0,
            ..Default::default()
        };
        assert_eq!(Confidence::assess(&obs), Confidence::High);
    }

    #[test]
    fn test_confidence_lower_when_temperature_outside() {
        let obs = FarmObservation {
            temperature: 25.0,
            amount_of_feeding: 180.0,
            ..Default::default()
        };
        assert_eq!(Confidence::assess(&obs), Confidence::Lower);
    }

    #[test]
    fn test_confidence_lower_when_feeding_outside() {
        let obs = FarmObservation {
            temperature: 30.0,
            amount_of_feeding: 201.0,
            ..Default::default()
        };
        assert_eq!(Confidence::assess(&obs), Confidence::Lower);
    }

    #[test]
    fn test_confidence_messages() {
        assert!(Confidence::High.message().ends_with("Prediction confidence: High"));
        assert!(Confidence::Lower
            .message()
            .contains("(Temperature 28–32°C, Feeding 170–200 kg)"));
    }

    #[test]
    fn test_headline_rounds_to_whole_eggs() {
        let result = PredictionResult {
            eggs_per_day: 2431.6,
            confidence: Confidence::High,
        };
        assert_eq!(result.headline(), "Estimated Egg Production: 2432 eggs/day");
        assert_eq!(result.rounded_eggs(), 2432.0);
    }
}

//! Model feature schema
//!
//! The regressor has no internal schema, so the column order it was trained
//! on lives here as a single constant. Both the feature-vector builder and
//! the importance chart read [`FEATURE_ORDER`]; never spell the order out a
//! second time.

use serde::{Deserialize, Serialize};

/// Number of columns the regressor expects
pub const FEATURE_COUNT: usize = 9;

/// A named model input column
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum FeatureName {
    AmountOfChicken,
    AmountOfFeeding,
    Ammonia,
    Temperature,
    Humidity,
    LightIntensity,
    Noise,
    FeedPerChicken,
    EnvironmentalStressIndex,
}

/// Column order the regressor was trained with
pub const FEATURE_ORDER: [FeatureName; FEATURE_COUNT] = [
    FeatureName::AmountOfChicken,
    FeatureName::AmountOfFeeding,
    FeatureName::Ammonia,
    FeatureName::Temperature,
    FeatureName::Humidity,
    FeatureName::LightIntensity,
    FeatureName::Noise,
    FeatureName::FeedPerChicken,
    FeatureName::EnvironmentalStressIndex,
];

impl FeatureName {
    /// Column identifier as stored in the model artifact
    pub fn as_str(&self) -> &'static str {
        match self {
            FeatureName::AmountOfChicken => "amount_of_chicken",
            FeatureName::AmountOfFeeding => "amount_of_feeding",
            FeatureName::Ammonia => "ammonia",
            FeatureName::Temperature => "temperature",
            FeatureName::Humidity => "humidity",
            FeatureName::LightIntensity => "light_intensity",
            FeatureName::Noise => "noise",
            FeatureName::FeedPerChicken => "feed_per_chicken",
            FeatureName::EnvironmentalStressIndex => "environmental_stress_index",
        }
    }

    /// Position of this column in [`FEATURE_ORDER`]
    pub fn index(&self) -> usize {
        FEATURE_ORDER
            .iter()
            .position(|name| name == self)
            .unwrap_or(FEATURE_COUNT)
    }

    pub fn is_derived(&self) -> bool {
        matches!(
            self,
            FeatureName::FeedPerChicken | FeatureName::EnvironmentalStressIndex
        )
    }
}

impl std::fmt::Display for FeatureName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Check that a list of column names matches [`FEATURE_ORDER`] exactly.
///
/// Returns the first position that disagrees, if any.
pub fn first_order_mismatch<S: AsRef<str>>(names: &[S]) -> Option<usize> {
    if names.len() != FEATURE_COUNT {
        return Some(names.len().min(FEATURE_COUNT));
    }
    FEATURE_ORDER
        .iter()
        .zip(names)
        .position(|(expected, actual)| expected.as_str() != actual.as_ref())
}

//! Derived feature models

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use super::observation::FarmObservation;

/// Decimal places kept for feed per chicken
pub const FEED_PER_CHICKEN_DP: u32 = 5;

/// Decimal places kept for the environmental stress index
pub const STRESS_INDEX_DP: u32 = 3;

/// Features computed from the raw observation before prediction
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct DerivedFeatures {
    /// Feed in kilograms per bird
    pub feed_per_chicken: f64,
    /// temperature × humidity × ammonia
    pub environmental_stress_index: f64,
}

impl DerivedFeatures {
    pub fn from_observation(obs: &FarmObservation) -> Self {
        Self {
            feed_per_chicken: feed_per_chicken(obs.amount_of_feeding, obs.amount_of_chicken),
            environmental_stress_index: environmental_stress_index(
                obs.temperature,
                obs.humidity,
                obs.ammonia,
            ),
        }
    }

    /// Feed per chicken formatted with its fixed precision
    pub fn feed_per_chicken_display(&self) -> String {
        format!(
            "{:.*}",
            FEED_PER_CHICKEN_DP as usize, self.feed_per_chicken
        )
    }

    /// Stress index formatted with its fixed precision
    pub fn environmental_stress_index_display(&self) -> String {
        format!(
            "{:.*}",
            STRESS_INDEX_DP as usize, self.environmental_stress_index
        )
    }
}

/// `feed / chickens`, rounded to 5 decimals
pub fn feed_per_chicken(amount_of_feeding: f64, amount_of_chicken: u32) -> f64 {
    // chicken count is bounded below by 100 at the collector
    round_dp(amount_of_feeding / f64::from(amount_of_chicken), FEED_PER_CHICKEN_DP)
}

/// `temperature * humidity * ammonia`, rounded to 3 decimals
pub fn environmental_stress_index(temperature: f64, humidity: f64, ammonia: f64) -> f64 {
    round_dp(temperature * humidity * ammonia, STRESS_INDEX_DP)
}

/// Round half to even at `dp` decimal places of the exact binary value
pub fn round_dp(value: f64, dp: u32) -> f64 {
    Decimal::from_f64_retain(value)
        .map(|d| d.round_dp_with_strategy(dp, RoundingStrategy::MidpointNearestEven))
        .and_then(|d| d.to_string().parse().ok())
        .unwrap_or(value)
}

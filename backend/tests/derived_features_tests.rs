//! Derived feature tests
//!
//! Tests for the two computed model inputs:
//! - feed per chicken = round(feed / chickens, 5)
//! - environmental stress index = round(temperature * humidity * ammonia, 3)

use proptest::prelude::*;
use shared::{
    environmental_stress_index, feed_per_chicken, DerivedFeatures, FarmObservation, FeatureName,
    FeatureVector, FEATURE_ORDER,
};

/// Reference rounding: scale, round half to even, unscale
fn reference_round(value: f64, dp: i32) -> f64 {
    let scale = 10f64.powi(dp);
    (value * scale).round_ties_even() / scale
}

/// Whether `value` sits so close to a half step that scaling may flip it
fn near_tie(value: f64, dp: i32) -> bool {
    let scaled = value * 10f64.powi(dp);
    ((scaled - scaled.floor()) - 0.5).abs() < 1e-6
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[test]
    fn test_reference_observation() {
        let obs = FarmObservation {
            amount_of_chicken: 2700,
            amount_of_feeding: 180.0,
            ammonia: 15.0,
            temperature: 30.0,
            humidity: 50.0,
            light_intensity: 330.0,
            noise: 200.0,
        };
        let derived = DerivedFeatures::from_observation(&obs);
        assert_eq!(derived.feed_per_chicken, 0.06667);
        assert_eq!(derived.environmental_stress_index, 22500.0);
    }

    #[test]
    fn test_rounds_to_nearest_not_down() {
        // values from Python's round(); truncation gives the second column
        let feed_cases = [
            (180.0, 2700, 0.06667),  // 0.06666
            (499.99, 101, 4.9504),   // 4.95039
            (173.3, 2999, 0.05779),  // 0.05778
        ];
        for (feed, chickens, expected) in feed_cases {
            assert_eq!(feed_per_chicken(feed, chickens), expected);
        }

        assert_eq!(environmental_stress_index(22.2, 33.3, 7.7), 5692.302); // 5692.301
        assert_eq!(environmental_stress_index(28.5, 61.2, 12.3), 21453.66);
        assert_eq!(environmental_stress_index(31.7, 77.7, 9.9), 24384.591);
    }

    #[test]
    fn test_bounds_of_feed_per_chicken() {
        // smallest: least feed over most birds
        assert_eq!(feed_per_chicken(50.0, 5000), 0.01);
        // largest: most feed over fewest birds
        assert_eq!(feed_per_chicken(500.0, 100), 5.0);
    }

    #[test]
    fn test_bounds_of_stress_index() {
        assert_eq!(environmental_stress_index(20.0, 20.0, 5.0), 2000.0);
        assert_eq!(environmental_stress_index(40.0, 100.0, 25.0), 100000.0);
    }

    #[test]
    fn test_vector_places_derived_features_last() {
        let obs = FarmObservation::default();
        let vector = FeatureVector::from_observation(&obs);
        let derived = DerivedFeatures::from_observation(&obs);

        assert_eq!(FEATURE_ORDER[7], FeatureName::FeedPerChicken);
        assert_eq!(FEATURE_ORDER[8], FeatureName::EnvironmentalStressIndex);
        assert_eq!(vector.as_slice()[7], derived.feed_per_chicken);
        assert_eq!(vector.as_slice()[8], derived.environmental_stress_index);
    }
}

// ============================================================================
// Property Tests
// ============================================================================

fn chickens_strategy() -> impl Strategy<Value = u32> {
    100u32..=5000
}

fn feeding_strategy() -> impl Strategy<Value = f64> {
    50.0f64..=500.0
}

fn temperature_strategy() -> impl Strategy<Value = f64> {
    20.0f64..=40.0
}

fn humidity_strategy() -> impl Strategy<Value = f64> {
    20.0f64..=100.0
}

fn ammonia_strategy() -> impl Strategy<Value = f64> {
    5.0f64..=25.0
}

#[cfg(test)]
mod property_tests {
    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        /// Feed per chicken is finite, non-negative and rounded to 5 places
        #[test]
        fn prop_feed_per_chicken_rounded(
            chickens in chickens_strategy(),
            feed in feeding_strategy()
        ) {
            let value = feed_per_chicken(feed, chickens);
            prop_assert!(value.is_finite());
            prop_assert!(value >= 0.0);

            let raw = feed / f64::from(chickens);
            prop_assume!(!near_tie(raw, 5));
            prop_assert_eq!(value, reference_round(raw, 5));
        }

        /// Stress index equals the rounded product
        #[test]
        fn prop_stress_index_rounded(
            t in temperature_strategy(),
            h in humidity_strategy(),
            a in ammonia_strategy()
        ) {
            let raw = t * h * a;
            prop_assume!(!near_tie(raw, 3));
            prop_assert_eq!(environmental_stress_index(t, h, a), reference_round(raw, 3));
        }

        /// Stress index never decreases when temperature grows
        #[test]
        fn prop_stress_index_monotone_in_temperature(
            t1 in temperature_strategy(),
            t2 in temperature_strategy(),
            h in humidity_strategy(),
            a in ammonia_strategy()
        ) {
            let (lo, hi) = if t1 <= t2 { (t1, t2) } else { (t2, t1) };
            prop_assert!(environmental_stress_index(lo, h, a) <= environmental_stress_index(hi, h, a));
        }

        /// Stress index never decreases when humidity grows
        #[test]
        fn prop_stress_index_monotone_in_humidity(
            t in temperature_strategy(),
            h1 in humidity_strategy(),
            h2 in humidity_strategy(),
            a in ammonia_strategy()
        ) {
            let (lo, hi) = if h1 <= h2 { (h1, h2) } else { (h2, h1) };
            prop_assert!(environmental_stress_index(t, lo, a) <= environmental_stress_index(t, hi, a));
        }

        /// Stress index never decreases when ammonia grows
        #[test]
        fn prop_stress_index_monotone_in_ammonia(
            t in temperature_strategy(),
            h in humidity_strategy(),
            a1 in ammonia_strategy(),
            a2 in ammonia_strategy()
        ) {
            let (lo, hi) = if a1 <= a2 { (a1, a2) } else { (a2, a1) };
            prop_assert!(environmental_stress_index(t, h, lo) <= environmental_stress_index(t, h, hi));
        }

        /// Raw inputs land in their named slots of the feature vector
        #[test]
        fn prop_vector_matches_observation(
            chickens in chickens_strategy(),
            feed in feeding_strategy(),
            t in temperature_strategy(),
            h in humidity_strategy(),
            a in ammonia_strategy()
        ) {
            let obs = FarmObservation {
                amount_of_chicken: chickens,
                amount_of_feeding: feed,
                ammonia: a,
                temperature: t,
                humidity: h,
                ..Default::default()
            };
            let vector = FeatureVector::from_observation(&obs);
            prop_assert_eq!(vector.get(FeatureName::AmountOfChicken), f64::from(chickens));
            prop_assert_eq!(vector.get(FeatureName::AmountOfFeeding), feed);
            prop_assert_eq!(vector.get(FeatureName::Ammonia), a);
            prop_assert_eq!(vector.get(FeatureName::Temperature), t);
            prop_assert_eq!(vector.get(FeatureName::Humidity), h);
        }
    }
}

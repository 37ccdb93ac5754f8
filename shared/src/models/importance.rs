//! Feature importance models

use serde::{Deserialize, Serialize};

use crate::features::{FeatureName, FEATURE_COUNT, FEATURE_ORDER};
use crate::predictor::PredictorError;

/// Allowed drift of the importance total away from 1.0
pub const IMPORTANCE_SUM_TOLERANCE: f64 = 1e-3;

/// Contribution of one column to the model
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct FeatureImportance {
    pub feature: FeatureName,
    pub importance: f64,
}

/// Pair importances with [`FEATURE_ORDER`] and sort them ascending.
///
/// The sequence must hold one finite, non-negative value per column and sum
/// to 1.0 within [`IMPORTANCE_SUM_TOLERANCE`].
pub fn rank_feature_importances(
    importances: &[f64],
) -> Result<Vec<FeatureImportance>, PredictorError> {
    if importances.len() != FEATURE_COUNT {
        return Err(PredictorError::SchemaMismatch(format!(
            "expected {} feature importances, model provides {}",
            FEATURE_COUNT,
            importances.len()
        )));
    }

    if let Some(pos) = importances.iter().position(|v| !v.is_finite() || *v < 0.0) {
        return Err(PredictorError::SchemaMismatch(format!(
            "importance of {} is {}",
            FEATURE_ORDER[pos], importances[pos]
        )));
    }

    let total: f64 = importances.iter().sum();
    if (total - 1.0).abs() > IMPORTANCE_SUM_TOLERANCE {
        return Err(PredictorError::SchemaMismatch(format!(
            "feature importances sum to {:.6}, expected 1.0",
            total
        )));
    }

    let mut ranked: Vec<FeatureImportance> = FEATURE_ORDER
        .iter()
        .zip(importances)
        .map(|(&feature, &importance)| FeatureImportance {
            feature,
            importance,
        })
        .collect();
    ranked.sort_by(|a, b| a.importance.total_cmp(&b.importance));
    Ok(ranked)
}

#[cfg(test)]
mod tests {
    use super::*;

    const IMPORTANCES: [f64; 9] = [0.40, 0.20, 0.02, 0.08, 0.03, 0.01, 0.01, 0.15, 0.10];

    #[test]
    fn test_ranked_ascending() {
        let ranked = rank_feature_importances(&IMPORTANCES).unwrap();
        assert_eq!(ranked.len(), 9);
        assert!(ranked.windows(2).all(|w| w[0].importance <= w[1].importance));
        assert_eq!(ranked.last().unwrap().feature, FeatureName::AmountOfChicken);
    }

    #[test]
    fn test_ties_keep_model_order() {
        let ranked = rank_feature_importances(&IMPORTANCES).unwrap();
        assert_eq!(ranked[0].feature, FeatureName::LightIntensity);
        assert_eq!(ranked[1].feature, FeatureName::Noise);
    }

    #[test]
    fn test_wrong_length_is_schema_mismatch() {
        let err = rank_feature_importances(&IMPORTANCES[..8]).unwrap_err();
        assert!(matches!(err, PredictorError::SchemaMismatch(_)));
    }

    #[test]
    fn test_unnormalized_is_schema_mismatch() {
        let mut doubled = IMPORTANCES;
        doubled.iter_mut().for_each(|v| *v *= 2.0);
        let err = rank_feature_importances(&doubled).unwrap_err();
        assert!(err.to_string().contains("sum to 2.000000"));
    }

    #[test]
    fn test_negative_importance_is_schema_mismatch() {
        let mut bad = IMPORTANCES;
        bad[0] = -0.1;
        bad[1] = 0.7;
        assert!(rank_feature_importances(&bad).is_err());
    }
}

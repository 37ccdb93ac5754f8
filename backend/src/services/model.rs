//! Model artifact loading

use std::path::Path;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use sha2::{Digest, Sha256};
use shared::{verify_feature_schema, ForestRegressor, Predictor, PredictorError};

/// Facts about the loaded artifact, fixed for the life of the process
#[derive(Debug, Clone, Serialize)]
pub struct ModelInfo {
    pub path: String,
    /// Hex SHA-256 of the artifact bytes
    pub sha256: String,
    pub n_estimators: usize,
    pub n_features: usize,
    pub max_depth: usize,
    /// Whether the artifact matches the dashboard's feature order
    pub schema_ok: bool,
    pub loaded_at: DateTime<Utc>,
}

/// A predictor ready to be shared with request handlers
pub struct LoadedModel {
    pub predictor: Arc<dyn Predictor>,
    pub info: ModelInfo,
}

/// Read, validate and fingerprint the random forest artifact.
///
/// Any failure here is fatal for the server.
pub fn load_model(path: impl AsRef<Path>) -> Result<LoadedModel, PredictorError> {
    let path = path.as_ref();
    let bytes = std::fs::read(path)?;
    let forest = ForestRegressor::from_slice(&bytes)?;

    let schema_ok = match verify_feature_schema(&forest) {
        Ok(()) => true,
        Err(e) => {
            // Predictions will be refused until the artifact is replaced
            tracing::error!("Model at {} does not match the dashboard: {}", path.display(), e);
            false
        }
    };

    let info = ModelInfo {
        path: path.display().to_string(),
        sha256: format!("{:x}", Sha256::digest(&bytes)),
        n_estimators: forest.n_estimators(),
        n_features: forest.n_features(),
        max_depth: forest.max_depth(),
        schema_ok,
        loaded_at: Utc::now(),
    };

    Ok(LoadedModel {
        predictor: Arc::new(forest),
        info,
    })
}

//! Fixtures shared by the backend unit tests

use std::path::PathBuf;
use std::sync::Arc;

use chrono::Utc;
use shared::{ForestRegressor, Predictor};

use crate::services::model::ModelInfo;
use crate::{AppState, Config};

/// A two-tree forest over the dashboard's nine columns.
///
/// Default inputs land on leaves 2400 and 2600, so they predict 2500.
pub const FOREST_JSON: &str = r#"{
    "n_features": 9,
    "feature_names": [
        "amount_of_chicken", "amount_of_feeding", "ammonia", "temperature",
        "humidity", "light_intensity", "noise",
        "feed_per_chicken", "environmental_stress_index"
    ],
    "feature_importances": [0.3, 0.0, 0.0, 0.4, 0.0, 0.0, 0.0, 0.3, 0.0],
    "estimators": [
        {
            "children_left": [1, 2, -1, -1, -1],
            "children_right": [4, 3, -1, -1, -1],
            "feature": [3, 0, -2, -2, -2],
            "threshold": [32.0, 2000.0, -2.0, -2.0, -2.0],
            "value": [0.0, 0.0, 1500.0, 2400.0, 1800.0]
        },
        {
            "children_left": [1, -1, -1],
            "children_right": [2, -1, -1],
            "feature": [7, -2, -2],
            "threshold": [0.05, -2.0, -2.0],
            "value": [0.0, 2000.0, 2600.0]
        }
    ]
}"#;

pub fn test_predictor() -> Arc<dyn Predictor> {
    Arc::new(ForestRegressor::from_json(FOREST_JSON).expect("fixture forest is valid"))
}

/// Application state backed by an arbitrary predictor
pub fn test_state_with(predictor: Arc<dyn Predictor>) -> AppState {
    let info = ModelInfo {
        path: "memory".to_string(),
        sha256: String::new(),
        n_estimators: predictor.n_estimators(),
        n_features: predictor.n_features(),
        max_depth: 0,
        schema_ok: shared::verify_feature_schema(predictor.as_ref()).is_ok(),
        loaded_at: Utc::now(),
    };
    AppState {
        predictor,
        model: Arc::new(info),
        config: Arc::new(Config::default()),
    }
}

pub fn test_state() -> AppState {
    test_state_with(test_predictor())
}

/// Write an artifact under the system temp dir and return its path
pub fn write_temp_artifact(name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!(
        "egg_predictor_{}_{}.json",
        name,
        std::process::id()
    ));
    std::fs::write(&path, contents).expect("temp dir is writable");
    path
}

//! Health check handlers

use axum::{extract::State, Json};
use serde::Serialize;

use crate::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub environment: String,
    pub model: String,
    pub n_estimators: usize,
}

/// Health check endpoint handler
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    // The server never starts without a model, but it may not fit the dashboard
    let model_status = if state.model.schema_ok {
        "loaded".to_string()
    } else {
        "schema_mismatch".to_string()
    };

    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        environment: state.config.environment.clone(),
        model: model_status,
        n_estimators: state.model.n_estimators,
    })
}

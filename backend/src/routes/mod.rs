//! Route definitions for the Poultry Egg Production Predictor

use axum::{
    routing::{get, post},
    Router,
};

use crate::{handlers, AppState};

/// Dashboard page routes
pub fn dashboard_routes() -> Router<AppState> {
    Router::new().route(
        "/",
        get(handlers::show_dashboard).post(handlers::predict_dashboard),
    )
}

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/inputs", get(handlers::list_inputs))
        .route("/derived-features", post(handlers::derive_features))
        .route("/predict", post(handlers::predict))
        .nest("/model", model_routes())
}

/// Model information routes
fn model_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::get_model_info))
        .route("/performance", get(handlers::get_performance))
        .route("/feature-importance", get(handlers::get_feature_importance))
}

//! HTTP handlers for model information endpoints

use axum::{
    extract::{Query, State},
    http::header,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use shared::{FeatureImportance, ModelPerformance, MODEL_PERFORMANCE};

use crate::error::{AppError, AppResult};
use crate::services::model::ModelInfo;
use crate::services::PredictionService;
use crate::AppState;

#[derive(Deserialize)]
pub struct ImportanceQuery {
    pub format: Option<String>, // "json" or "csv"
}

/// Describe the loaded artifact
pub async fn get_model_info(State(state): State<AppState>) -> Json<ModelInfo> {
    Json(state.model.as_ref().clone())
}

/// Static hold-out metrics
pub async fn get_performance() -> Json<ModelPerformance> {
    Json(MODEL_PERFORMANCE)
}

/// Feature importances, ascending
pub async fn get_feature_importance(
    State(state): State<AppState>,
    Query(query): Query<ImportanceQuery>,
) -> AppResult<impl IntoResponse> {
    let service = PredictionService::new(state.predictor);
    let ranked = service.feature_importance()?;

    if query.format.as_deref() == Some("csv") {
        let csv = export_to_csv(&ranked)?;
        Ok((
            [
                (header::CONTENT_TYPE, "text/csv"),
                (
                    header::CONTENT_DISPOSITION,
                    "attachment; filename=\"feature_importance.csv\"",
                ),
            ],
            csv,
        )
            .into_response())
    } else {
        Ok(Json(ranked).into_response())
    }
}

fn export_to_csv(data: &[FeatureImportance]) -> AppResult<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    for record in data {
        wtr.serialize(record)
            .map_err(|e| AppError::Export(format!("CSV serialization error: {}", e)))?;
    }
    let bytes = wtr
        .into_inner()
        .map_err(|e| AppError::Export(format!("CSV writer error: {}", e)))?;
    String::from_utf8(bytes).map_err(|e| AppError::Export(format!("UTF-8 conversion error: {}", e)))
}

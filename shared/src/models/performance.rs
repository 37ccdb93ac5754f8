//! Model evaluation models

use serde::Serialize;

/// Hold-out metrics recorded when the model was trained
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct ModelPerformance {
    pub r2_score: f64,
    /// Mean absolute error in eggs
    pub mae: f64,
    /// Root mean squared error in eggs
    pub rmse: f64,
}

/// Metrics of the shipped random forest
pub const MODEL_PERFORMANCE: ModelPerformance = ModelPerformance {
    r2_score: 0.974,
    mae: 19.71,
    rmse: 33.86,
};

impl ModelPerformance {
    /// Share of variance explained, as a percentage
    pub fn explained_variance_percent(&self) -> f64 {
        self.r2_score * 100.0
    }

    /// Bullet points shown under the metric cards
    pub fn interpretation(&self) -> [String; 2] {
        [
            format!(
                "The model explains {:.1}% of the variance in egg production.",
                self.explained_variance_percent()
            ),
            format!(
                "The average error is around {:.0} eggs per prediction, suitable for real-world use.",
                self.mae
            ),
        ]
    }
}

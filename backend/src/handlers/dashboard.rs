//! HTML dashboard handlers

use axum::{
    extract::{Query, State},
    response::Html,
    Form,
};

use crate::error::AppResult;
use crate::services::dashboard::{render_dashboard, DashboardForm, DashboardView};
use crate::services::PredictionService;
use crate::AppState;

/// Render the dashboard for the inputs in the query string
pub async fn show_dashboard(
    State(state): State<AppState>,
    Query(form): Query<DashboardForm>,
) -> Html<String> {
    let service = PredictionService::new(state.predictor);
    let obs = form.observation();
    let view = DashboardView::build(&service, &obs, None, form.tab());
    Html(render_dashboard(&view))
}

/// Handle the predict button
pub async fn predict_dashboard(
    State(state): State<AppState>,
    Form(form): Form<DashboardForm>,
) -> AppResult<Html<String>> {
    let service = PredictionService::new(state.predictor);
    let obs = form.observation();
    let outcome = service.predict(&obs)?;
    let view = DashboardView::build(&service, &obs, Some(outcome.result()), form.tab());
    Ok(Html(render_dashboard(&view)))
}

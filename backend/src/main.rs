//! Poultry Egg Production Predictor - Dashboard Server
//!
//! Serves a single-page dashboard that predicts daily egg production from
//! farm feeding and environmental measurements using a pre-trained random
//! forest.

use anyhow::Context;
use axum::{routing::get, Router};
use std::{net::SocketAddr, sync::Arc};
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod error;
mod handlers;
mod routes;
mod services;

pub use config::Config;

use services::model::ModelInfo;
use shared::Predictor;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Loaded once at startup and never mutated
    pub predictor: Arc<dyn Predictor>,
    pub model: Arc<ModelInfo>,
    pub config: Arc<Config>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "egg_predictor_server=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = config::Config::load()?;

    tracing::info!("Starting Poultry Egg Production Predictor");
    tracing::info!("Environment: {}", config.environment);

    // Load the model; the dashboard is useless without it
    tracing::info!("Loading model from {}...", config.model.path);
    let loaded = services::model::load_model(&config.model.path)
        .with_context(|| format!("failed to load model artifact {}", config.model.path))?;

    tracing::info!(
        n_estimators = loaded.info.n_estimators,
        n_features = loaded.info.n_features,
        sha256 = %loaded.info.sha256,
        "Model loaded"
    );

    // Create application state
    let state = AppState {
        predictor: loaded.predictor,
        model: Arc::new(loaded.info),
        config: Arc::new(config.clone()),
    };

    // Build application
    let app = create_app(state);

    // Start server
    let ip: std::net::IpAddr = config
        .server
        .host
        .parse()
        .with_context(|| format!("invalid server host {}", config.server.host))?;
    let addr = SocketAddr::from((ip, config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes and middleware
fn create_app(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Browser bindings for live derived features; absent files just 404
    let pkg = ServeDir::new(&state.config.web.pkg_dir);

    Router::new()
        .merge(routes::dashboard_routes())
        .route("/health", get(health_check))
        .nest("/api/v1", routes::api_routes())
        .nest_service("/pkg", pkg)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}

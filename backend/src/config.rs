//! Configuration management for the Poultry Egg Production Predictor
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (development.toml, production.toml)
//! 3. Environment variable overrides with EGG_ prefix

use config::{ConfigError, Environment, File};
use serde::Deserialize;

/// Artifact location relative to the working directory
pub const DEFAULT_MODEL_PATH: &str = "random_forest_model.json";

/// `wasm-pack build --target web` output served under `/pkg`
pub const DEFAULT_PKG_DIR: &str = "wasm/pkg";

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Server configuration
    pub server: ServerConfig,

    /// Model artifact configuration
    pub model: ModelConfig,

    /// Browser asset configuration
    pub web: WebConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Server port
    pub port: u16,

    /// Server host
    pub host: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ModelConfig {
    /// Path of the exported random forest
    pub path: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct WebConfig {
    /// Directory holding the compiled wasm bindings
    pub pkg_dir: String,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment = std::env::var("EGG_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("server.port", 8501)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("model.path", DEFAULT_MODEL_PATH)?
            .set_default("web.pkg_dir", DEFAULT_PKG_DIR)?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (EGG_ prefix)
            .add_source(
                Environment::with_prefix("EGG")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8501,
            host: "0.0.0.0".to_string(),
        }
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            path: DEFAULT_MODEL_PATH.to_string(),
        }
    }
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            pkg_dir: DEFAULT_PKG_DIR.to_string(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            server: ServerConfig::default(),
            model: ModelConfig::default(),
            web: WebConfig::default(),
        }
    }
}

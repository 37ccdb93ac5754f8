//! Shared types and models for the Poultry Egg Production Predictor
//!
//! This crate contains the feature schema, derived-feature math and the
//! inference-only regressor shared between the backend and the browser
//! (via WASM).

pub mod features;
pub mod models;
pub mod predictor;
pub mod types;
pub mod validation;

pub use features::*;
pub use models::*;
pub use predictor::*;
pub use types::*;
pub use validation::*;

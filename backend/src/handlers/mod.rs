//! HTTP handlers for the Poultry Egg Production Predictor

pub mod dashboard;
pub mod health;
pub mod model;
pub mod prediction;

pub use dashboard::*;
pub use health::*;
pub use model::*;
pub use prediction::*;

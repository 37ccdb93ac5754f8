//! Business logic services for the Poultry Egg Production Predictor

pub mod dashboard;
pub mod model;
pub mod prediction;

#[cfg(test)]
pub mod testing;

pub use prediction::PredictionService;

//! Domain models for the Poultry Egg Production Predictor

mod derived;
mod importance;
mod observation;
mod performance;
mod prediction;

pub use derived::*;
pub use importance::*;
pub use observation::*;
pub use performance::*;
pub use prediction::*;

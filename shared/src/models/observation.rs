//! Farm observation models

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::types::{InputField, INPUT_CONSTRAINTS};

/// One set of farm measurements entered on the dashboard
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Validate, PartialEq)]
pub struct FarmObservation {
    /// Number of laying hens
    #[validate(range(min = 100, max = 5000))]
    pub amount_of_chicken: u32,
    /// Daily feed in kilograms
    #[validate(range(min = 50.0, max = 500.0))]
    pub amount_of_feeding: f64,
    /// Ammonia concentration in ppm
    #[validate(range(min = 5.0, max = 25.0))]
    pub ammonia: f64,
    /// Shed temperature in °C
    #[validate(range(min = 20.0, max = 40.0))]
    pub temperature: f64,
    /// Relative humidity in percent
    #[validate(range(min = 20.0, max = 100.0))]
    pub humidity: f64,
    /// Light intensity in lux
    #[validate(range(min = 100.0, max = 500.0))]
    pub light_intensity: f64,
    /// Noise level in dB
    #[validate(range(min = 50.0, max = 300.0))]
    pub noise: f64,
}

impl Default for FarmObservation {
    fn default() -> Self {
        Self {
            amount_of_chicken: InputField::AmountOfChicken.constraint().default as u32,
            amount_of_feeding: InputField::AmountOfFeeding.constraint().default,
            ammonia: InputField::Ammonia.constraint().default,
            temperature: InputField::Temperature.constraint().default,
            humidity: InputField::Humidity.constraint().default,
            light_intensity: InputField::LightIntensity.constraint().default,
            noise: InputField::Noise.constraint().default,
        }
    }
}

impl FarmObservation {
    /// Value of one input field as a float
    pub fn get(&self, field: InputField) -> f64 {
        match field {
            InputField::AmountOfChicken => f64::from(self.amount_of_chicken),
            InputField::AmountOfFeeding => self.amount_of_feeding,
            InputField::Ammonia => self.ammonia,
            InputField::Temperature => self.temperature,
            InputField::Humidity => self.humidity,
            InputField::LightIntensity => self.light_intensity,
            InputField::Noise => self.noise,
        }
    }

    /// Set one input field, clamping it into the widget bounds
    pub fn set_clamped(&mut self, field: InputField, value: f64) {
        let value = field.constraint().clamp(value);
        match field {
            InputField::AmountOfChicken => self.amount_of_chicken = value as u32,
            InputField::AmountOfFeeding => self.amount_of_feeding = value,
            InputField::Ammonia => self.ammonia = value,
            InputField::Temperature => self.temperature = value,
            InputField::Humidity => self.humidity = value,
            InputField::LightIntensity => self.light_intensity = value,
            InputField::Noise => self.noise = value,
        }
    }

    /// Copy of this observation with every field clamped into bounds
    pub fn clamped(&self) -> Self {
        let mut clamped = *self;
        for constraint in &INPUT_CONSTRAINTS {
            clamped.set_clamped(constraint.field, self.get(constraint.field));
        }
        clamped
    }
}

//! Common types used across the platform

use serde::{Deserialize, Serialize};

use crate::features::FeatureName;

/// A raw measurement the user enters on the dashboard
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum InputField {
    AmountOfChicken,
    AmountOfFeeding,
    Ammonia,
    Temperature,
    Humidity,
    LightIntensity,
    Noise,
}

impl InputField {
    /// Form and JSON key for this field
    pub fn key(&self) -> &'static str {
        self.feature().as_str()
    }

    /// Model column fed by this field
    pub fn feature(&self) -> FeatureName {
        match self {
            InputField::AmountOfChicken => FeatureName::AmountOfChicken,
            InputField::AmountOfFeeding => FeatureName::AmountOfFeeding,
            InputField::Ammonia => FeatureName::Ammonia,
            InputField::Temperature => FeatureName::Temperature,
            InputField::Humidity => FeatureName::Humidity,
            InputField::LightIntensity => FeatureName::LightIntensity,
            InputField::Noise => FeatureName::Noise,
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        INPUT_CONSTRAINTS
            .iter()
            .map(|c| c.field)
            .find(|field| field.key() == key)
    }

    /// Bounds and default for this field
    pub fn constraint(&self) -> &'static InputConstraint {
        // INPUT_CONSTRAINTS has one entry per variant, in declaration order
        &INPUT_CONSTRAINTS[*self as usize]
    }
}

/// Hard bounds, default and display metadata for one input
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct InputConstraint {
    pub field: InputField,
    pub label: &'static str,
    pub min: f64,
    pub max: f64,
    pub default: f64,
    /// Whether the widget accepts whole numbers only
    pub integer: bool,
}

impl InputConstraint {
    /// Clamp a value into `[min, max]`, rounding integer fields.
    ///
    /// Non-finite input falls back to the default.
    pub fn clamp(&self, value: f64) -> f64 {
        if !value.is_finite() {
            return self.default;
        }
        let value = if self.integer { value.round() } else { value };
        value.clamp(self.min, self.max)
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Input widgets in the order they appear on the dashboard
pub static INPUT_CONSTRAINTS: [InputConstraint; 7] = [
    InputConstraint {
        field: InputField::AmountOfChicken,
        label: "Amount of Chickens",
        min: 100.0,
        max: 5000.0,
        default: 2700.0,
        integer: true,
    },
    InputConstraint {
        field: InputField::AmountOfFeeding,
        label: "Feed Quantity (kg)",
        min: 50.0,
        max: 500.0,
        default: 180.0,
        integer: false,
    },
    InputConstraint {
        field: InputField::Ammonia,
        label: "Ammonia Level (ppm)",
        min: 5.0,
        max: 25.0,
        default: 15.0,
        integer: false,
    },
    InputConstraint {
        field: InputField::Temperature,
        label: "Temperature (°C)",
        min: 20.0,
        max: 40.0,
        default: 30.0,
        integer: false,
    },
    InputConstraint {
        field: InputField::Humidity,
        label: "Humidity (%)",
        min: 20.0,
        max: 100.0,
        default: 50.0,
        integer: false,
    },
    InputConstraint {
        field: InputField::LightIntensity,
        label: "Light Intensity (lux)",
        min: 100.0,
        max: 500.0,
        default: 330.0,
        integer: false,
    },
    InputConstraint {
        field: InputField::Noise,
        label: "Noise Level (dB)",
        min: 50.0,
        max: 300.0,
        default: 200.0,
        integer: false,
    },
];

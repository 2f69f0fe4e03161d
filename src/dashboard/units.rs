//! Temperature display units.
//!
//! Upstream data is always metric; conversion happens only at display time,
//! always from the stored Celsius value, so toggling back and forth never
//! accumulates rounding error.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TemperatureUnit {
    #[default]
    Celsius,
    Fahrenheit,
}

impl TemperatureUnit {
    pub fn toggled(self) -> Self {
        match self {
            Self::Celsius => Self::Fahrenheit,
            Self::Fahrenheit => Self::Celsius,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Self::Celsius => "°C",
            Self::Fahrenheit => "°F",
        }
    }

    /// Whole-degree value shown for a Celsius reading.
    pub fn display_value(self, celsius: f64) -> i64 {
        match self {
            Self::Celsius => celsius.round() as i64,
            Self::Fahrenheit => celsius_to_fahrenheit(celsius).round() as i64,
        }
    }

    /// Formatted reading, e.g. `31°C`.
    pub fn format(self, celsius: f64) -> String {
        format!("{}{}", self.display_value(celsius), self.symbol())
    }
}

pub fn celsius_to_fahrenheit(celsius: f64) -> f64 {
    celsius * 9.0 / 5.0 + 32.0
}

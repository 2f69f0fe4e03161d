//! Weather alert banner detection.
//!
//! Rules are evaluated in priority order and the first match wins; messages
//! are never combined.

use crate::models::{CurrentConditions, Forecast};

/// Description fragments that mark a severe condition (matched case-insensitively).
const SEVERE_KEYWORDS: [&str; 6] = [
    "storm",
    "thunder",
    "tornado",
    "hurricane",
    "cyclone",
    "extreme",
];

/// Forecast slots inspected for flood risk (8 × 3h = next 24h).
const FLOOD_LOOKAHEAD_SLOTS: usize = 8;

/// Probability of precipitation above which heavy rain counts as a flood risk.
const FLOOD_POP_THRESHOLD: f64 = 0.5;

pub const THUNDERSTORM_ALERT: &str = "Thunderstorm detected — stay safe.";
pub const EXTREME_WEATHER_ALERT: &str = "Extreme weather detected — follow advisories.";
pub const FLOOD_RISK_ALERT: &str = "Heavy rain expected in next 24h — possible flooding.";

/// Derive the alert banner text, if any, for a current/forecast pair.
pub fn detect_alert(current: &CurrentConditions, forecast: &Forecast) -> Option<String> {
    let condition = current.condition();
    let description = condition.map(|c| c.description.as_str()).unwrap_or("");

    if is_severe_description(description) {
        return Some(format!("Severe condition: {}", description));
    }

    if let Some(id) = condition.and_then(|c| c.id) {
        if (200..300).contains(&id) {
            return Some(THUNDERSTORM_ALERT.to_string());
        }
        if (900..=962).contains(&id) {
            return Some(EXTREME_WEATHER_ALERT.to_string());
        }
    }

    let heavy_rain_ahead = forecast
        .list
        .iter()
        .take(FLOOD_LOOKAHEAD_SLOTS)
        .any(|entry| {
            entry.condition_id().is_some_and(|id| (500..532).contains(&id))
                && entry.pop > FLOOD_POP_THRESHOLD
        });
    if heavy_rain_ahead {
        return Some(FLOOD_RISK_ALERT.to_string());
    }

    None
}

fn is_severe_description(description: &str) -> bool {
    let lowered = description.to_lowercase();
    SEVERE_KEYWORDS.iter().any(|kw| lowered.contains(kw))
}

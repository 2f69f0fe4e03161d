//! OpenWeatherMap payload types as consumed by the dashboard.
//!
//! The proxy relays upstream JSON untouched; these structs only describe the
//! members the dashboard reads. Every member defaults so that sparse payloads
//! still decode.

use serde::{Deserialize, Serialize};

/// One entry of the upstream `weather` array.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Condition {
    pub id: Option<u16>,
    /// Group name, e.g. "Rain".
    pub main: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MainReadings {
    /// Temperature in Celsius (the proxy always requests metric units).
    pub temp: f64,
    pub feels_like: f64,
    /// Relative humidity percentage.
    pub humidity: f64,
    /// Pressure in hPa.
    pub pressure: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Wind {
    /// Metres per second.
    pub speed: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SunTimes {
    pub country: Option<String>,
    pub sunrise: i64,
    pub sunset: i64,
}

/// Current conditions, as returned by `/api/weather`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurrentConditions {
    pub name: String,
    pub sys: SunTimes,
    pub main: MainReadings,
    pub wind: Wind,
    /// Visibility in metres.
    pub visibility: f64,
    /// Offset from UTC in seconds for the observed location.
    pub timezone: i64,
    pub weather: Vec<Condition>,
    /// Observation time, unix seconds.
    pub dt: i64,
}

impl CurrentConditions {
    /// First reported condition, if upstream sent any.
    pub fn condition(&self) -> Option<&Condition> {
        self.weather.first()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForecastReadings {
    pub temp: f64,
}

/// A single 3-hour forecast slot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForecastEntry {
    /// Slot start, unix seconds.
    pub dt: i64,
    pub main: ForecastReadings,
    pub weather: Vec<Condition>,
    /// Probability of precipitation, 0.0 to 1.0.
    pub pop: f64,
}

impl ForecastEntry {
    pub fn condition(&self) -> Option<&Condition> {
        self.weather.first()
    }

    pub fn condition_id(&self) -> Option<u16> {
        self.condition().and_then(|c| c.id)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForecastCity {
    pub name: String,
    /// Offset from UTC in seconds.
    pub timezone: Option<i64>,
}

/// Forecast payload, as returned by `/api/forecast`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Forecast {
    pub list: Vec<ForecastEntry>,
    pub city: Option<ForecastCity>,
}

impl Forecast {
    /// UTC offset used to decide which calendar day a slot belongs to.
    pub fn utc_offset_secs(&self) -> i64 {
        self.city.as_ref().and_then(|c| c.timezone).unwrap_or(0)
    }
}

/// Where to look up weather: a free-text city or a coordinate pair.
#[derive(Debug, Clone, PartialEq)]
pub enum Location {
    City(String),
    Coordinates { lat: f64, lon: f64 },
}

impl Location {
    /// Query pairs for the proxy's `/api/*` endpoints.
    pub fn proxy_query(&self) -> Vec<(&'static str, String)> {
        match self {
            Location::City(city) => vec![("city", city.clone())],
            Location::Coordinates { lat, lon } => {
                vec![("lat", lat.to_string()), ("lon", lon.to_string())]
            }
        }
    }

    /// Query pairs for OpenWeatherMap (`q` instead of `city`).
    pub fn upstream_query(&self) -> Vec<(&'static str, String)> {
        match self {
            Location::City(city) => vec![("q", city.clone())],
            Location::Coordinates { .. } => self.proxy_query(),
        }
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Location::City(city) => write!(f, "{}", city),
            Location::Coordinates { lat, lon } => write!(f, "{},{}", lat, lon),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_current_conditions() {
        let json = serde_json::json!({
            "name": "Chennai",
            "sys": { "country": "IN", "sunrise": 1760000000, "sunset": 1760043000 },
            "main": { "temp": 31.4, "feels_like": 36.2, "humidity": 66, "pressure": 1007 },
            "wind": { "speed": 4.1 },
            "visibility": 6000,
            "timezone": 19800,
            "weather": [{ "id": 721, "main": "Haze", "description": "haze" }],
            "dt": 1760020000
        });

        let current: CurrentConditions = serde_json::from_value(json).unwrap();
        assert_eq!(current.name, "Chennai");
        assert_eq!(current.sys.country.as_deref(), Some("IN"));
        assert_eq!(current.condition().and_then(|c| c.id), Some(721));
        assert_eq!(current.main.humidity, 66.0);
        assert_eq!(current.timezone, 19800);
    }

    #[test]
    fn test_decode_sparse_payload() {
        let current: CurrentConditions =
            serde_json::from_value(serde_json::json!({ "name": "Nowhere" })).unwrap();
        assert!(current.condition().is_none());
        assert_eq!(current.visibility, 0.0);

        let forecast: Forecast = serde_json::from_value(serde_json::json!({})).unwrap();
        assert!(forecast.list.is_empty());
        assert_eq!(forecast.utc_offset_secs(), 0);
    }

    #[test]
    fn test_location_queries() {
        let city = Location::City("São Paulo".into());
        assert_eq!(city.proxy_query(), vec![("city", "São Paulo".to_string())]);
        assert_eq!(city.upstream_query(), vec![("q", "São Paulo".to_string())]);

        let coords = Location::Coordinates { lat: 13.08, lon: 80.27 };
        assert_eq!(
            coords.upstream_query(),
            vec![("lat", "13.08".to_string()), ("lon", "80.27".to_string())]
        );
    }

    #[test]
    fn test_forecast_city_offset() {
        let forecast: Forecast = serde_json::from_value(serde_json::json!({
            "list": [{ "dt": 1, "main": { "temp": 1.0 }, "weather": [{ "id": 500 }], "pop": 0.2 }],
            "city": { "name": "Oslo", "timezone": 3600 }
        }))
        .unwrap();
        assert_eq!(forecast.utc_offset_secs(), 3600);
        assert_eq!(forecast.list[0].condition_id(), Some(500));
    }
}

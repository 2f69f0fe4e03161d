//! Weather proxy endpoints.
//!
//! - GET /api/weather?city=NAME | ?lat=LAT&lon=LON
//! - GET /api/forecast?city=NAME | ?lat=LAT&lon=LON

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use utoipa::IntoParams;

use crate::errors::{AppError, ErrorResponse};
use crate::models::Location;
use crate::services::openweather::{Endpoint, OpenWeatherClient};

/// Shared application state for the proxy endpoints.
#[derive(Debug, Clone)]
pub struct AppState {
    pub openweather: OpenWeatherClient,
}

const MISSING_LOCATION: &str = "city or lat+lon required";

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct LocationQuery {
    /// City name, e.g. "Chennai" or "Paris,FR". Takes precedence over coordinates.
    pub city: Option<String>,
    /// Latitude in decimal degrees (requires `lon`)
    pub lat: Option<String>,
    /// Longitude in decimal degrees (requires `lat`)
    pub lon: Option<String>,
}

impl LocationQuery {
    /// A non-blank city wins; otherwise both coordinates must be present and numeric.
    pub fn resolve(&self) -> Result<Location, AppError> {
        if let Some(city) = self.city.as_deref().map(str::trim).filter(|c| !c.is_empty()) {
            return Ok(Location::City(city.to_string()));
        }

        let present = |v: &Option<String>| {
            v.as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };
        match (present(&self.lat), present(&self.lon)) {
            (Some(lat), Some(lon)) => Ok(Location::Coordinates {
                lat: parse_coordinate("lat", &lat)?,
                lon: parse_coordinate("lon", &lon)?,
            }),
            _ => Err(AppError::BadRequest(MISSING_LOCATION.to_string())),
        }
    }
}

fn parse_coordinate(name: &str, raw: &str) -> Result<f64, AppError> {
    raw.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| AppError::BadRequest(format!("Invalid {}: '{}'", name, raw)))
}

async fn relay(
    state: &AppState,
    endpoint: Endpoint,
    params: Result<Query<LocationQuery>, QueryRejection>,
) -> Result<(StatusCode, Json<serde_json::Value>), AppError> {
    // Malformed query strings (e.g. a repeated key) still answer with a JSON error body.
    let Query(params) = params.map_err(|e| AppError::BadRequest(e.body_text()))?;
    let location = params.resolve()?;
    let reply = state.openweather.relay(endpoint, &location).await?;
    Ok((reply.status, Json(reply.body)))
}

/// Current conditions for a city or coordinate pair.
///
/// Relays the OpenWeatherMap `/weather` response (metric units) with its
/// upstream status code.
#[utoipa::path(
    get,
    path = "/api/weather",
    tag = "Weather",
    params(LocationQuery),
    responses(
        (status = 200, description = "Upstream current-conditions JSON, relayed verbatim"),
        (status = 400, description = "Neither city nor lat+lon supplied, or malformed query", body = ErrorResponse),
        (status = 500, description = "Forwarding to OpenWeatherMap failed", body = ErrorResponse),
    )
)]
pub async fn get_weather(
    State(state): State<AppState>,
    params: Result<Query<LocationQuery>, QueryRejection>,
) -> Result<(StatusCode, Json<serde_json::Value>), AppError> {
    relay(&state, Endpoint::CurrentWeather, params).await
}

/// 5-day / 3-hour forecast for a city or coordinate pair.
///
/// Relays the OpenWeatherMap `/forecast` response (metric units) with its
/// upstream status code.
#[utoipa::path(
    get,
    path = "/api/forecast",
    tag = "Weather",
    params(LocationQuery),
    responses(
        (status = 200, description = "Upstream forecast JSON (`list` of 3-hour slots), relayed verbatim"),
        (status = 400, description = "Neither city nor lat+lon supplied, or malformed query", body = ErrorResponse),
        (status = 500, description = "Forwarding to OpenWeatherMap failed", body = ErrorResponse),
    )
)]
pub async fn get_forecast(
    State(state): State<AppState>,
    params: Result<Query<LocationQuery>, QueryRejection>,
) -> Result<(StatusCode, Json<serde_json::Value>), AppError> {
    relay(&state, Endpoint::Forecast, params).await
}

use axum::extract::State;
use axum::Json;
use serde::Serialize;
use utoipa::ToSchema;

use crate::routes::weather::AppState;

/// Health check response.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Service status ("ok" when an upstream credential is configured, "degraded" otherwise)
    pub status: String,
    /// API version
    pub version: String,
    /// Whether OPENWEATHER_API_KEY was supplied at startup
    pub api_key_configured: bool,
}

/// Health check endpoint.
///
/// Never contacts OpenWeatherMap. Reports "degraded" (still 200) when the
/// proxy runs without a credential, since every relayed call will then be
/// rejected upstream.
#[utoipa::path(
    get,
    path = "/api/health",
    tag = "Health",
    responses(
        (status = 200, description = "Service is up", body = HealthResponse),
    )
)]
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let key_ok = state.openweather.has_api_key();

    Json(HealthResponse {
        status: if key_ok {
            "ok".to_string()
        } else {
            "degraded".to_string()
        },
        version: env!("CARGO_PKG_VERSION").to_string(),
        api_key_configured: key_ok,
    })
}

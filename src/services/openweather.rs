//! OpenWeatherMap 2.5 relay client.
//!
//! Forwards a resolved location to `/weather` or `/forecast` with the
//! server-held credential and metric units, and hands back the upstream
//! status and JSON body untouched.
//! See: https://openweathermap.org/current and https://openweathermap.org/forecast5

use axum::http::StatusCode;

use crate::errors::AppError;
use crate::models::Location;

/// Upstream resource to relay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    CurrentWeather,
    Forecast,
}

impl Endpoint {
    fn path(self) -> &'static str {
        match self {
            Endpoint::CurrentWeather => "weather",
            Endpoint::Forecast => "forecast",
        }
    }
}

/// Upstream answer, passed through as-is.
#[derive(Debug)]
pub struct UpstreamReply {
    pub status: StatusCode,
    pub body: serde_json::Value,
}

/// Client for the OpenWeatherMap API.
#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl OpenWeatherClient {
    pub fn new(base_url: &str, api_key: Option<String>) -> Self {
        let client = reqwest::Client::builder()
            .build()
            .expect("Failed to build HTTP client");
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        }
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Forward one request upstream. No caching, no retry.
    pub async fn relay(
        &self,
        endpoint: Endpoint,
        location: &Location,
    ) -> Result<UpstreamReply, AppError> {
        let url = format!("{}/{}", self.base_url, endpoint.path());

        let mut query = location.upstream_query();
        query.push(("appid", self.api_key.clone().unwrap_or_default()));
        query.push(("units", "metric".to_string()));

        tracing::debug!("Forwarding {:?} for '{}'", endpoint, location);

        let response = self
            .client
            .get(&url)
            .query(&query)
            .send()
            .await
            .map_err(|e| AppError::Upstream(format!("OpenWeatherMap request failed: {}", e)))?;

        let status = StatusCode::from_u16(response.status().as_u16())
            .unwrap_or(StatusCode::BAD_GATEWAY);

        let body: serde_json::Value = response.json().await.map_err(|e| {
            AppError::Upstream(format!("OpenWeatherMap JSON parse error: {}", e))
        })?;

        if !status.is_success() {
            tracing::warn!(
                "OpenWeatherMap answered {} for {:?} '{}'",
                status,
                endpoint,
                location
            );
        }

        Ok(UpstreamReply { status, body })
    }
}

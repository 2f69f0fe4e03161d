//! HTTP client for the Skycast proxy, used by the dashboard.
//!
//! Mirrors what the browser dashboard does per search: fetch current
//! conditions, then the forecast, and fail the whole search if either call
//! fails. No timeout, no retry.

use serde::de::DeserializeOwned;

use crate::models::{CurrentConditions, Forecast, Location};

/// Default proxy API base when the dashboard runs next to the proxy.
pub const DEFAULT_PROXY_URL: &str = "http://localhost:5000/api";

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("Request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} answered HTTP {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("Unexpected response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

/// Client for the proxy's `/api/weather` and `/api/forecast` routes.
#[derive(Debug, Clone)]
pub struct ProxyClient {
    client: reqwest::Client,
    base_url: String,
}

impl ProxyClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    async fn fetch_json<T: DeserializeOwned>(
        &self,
        resource: &str,
        location: &Location,
    ) -> Result<T, ClientError> {
        let url = format!("{}/{}", self.base_url, resource);

        let response = self
            .client
            .get(&url)
            .query(&location.proxy_query())
            .send()
            .await
            .map_err(|source| ClientError::Request {
                url: url.clone(),
                source,
            })?;

        if !response.status().is_success() {
            return Err(ClientError::Status {
                url,
                status: response.status(),
            });
        }

        response
            .json()
            .await
            .map_err(|source| ClientError::Decode { url, source })
    }

    pub async fn fetch_weather(&self, location: &Location) -> Result<CurrentConditions, ClientError> {
        self.fetch_json("weather", location).await
    }

    pub async fn fetch_forecast(&self, location: &Location) -> Result<Forecast, ClientError> {
        self.fetch_json("forecast", location).await
    }

    /// Current conditions followed by the forecast for the same location.
    pub async fn search(
        &self,
        location: &Location,
    ) -> Result<(CurrentConditions, Forecast), ClientError> {
        let current = self.fetch_weather(location).await?;
        let forecast = self.fetch_forecast(location).await?;
        Ok((current, forecast))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{closed_port_url, spawn_app};
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn mount_city(upstream: &MockServer, city: &str) {
        Mock::given(method("GET"))
            .and(path("/weather"))
            .and(query_param("q", city))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "name": city,
                "sys": { "country": "IN" },
                "main": { "temp": 29.6, "feels_like": 33.0, "humidity": 70, "pressure": 1008 },
                "weather": [{ "id": 500, "main": "Rain", "description": "light rain" }]
            })))
            .mount(upstream)
            .await;
        Mock::given(method("GET"))
            .and(path("/forecast"))
            .and(query_param("q", city))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "list": [
                    { "dt": 1792368000, "main": { "temp": 28.0 }, "weather": [{ "id": 501 }], "pop": 0.9 }
                ],
                "city": { "name": city, "timezone": 19800 }
            })))
            .mount(upstream)
            .await;
    }

    #[tokio::test]
    async fn test_search_through_proxy() {
        let upstream = MockServer::start().await;
        mount_city(&upstream, "Mumbai").await;
        let app = spawn_app(&upstream.uri()).await;

        let client = ProxyClient::new(&format!("{}/api/", app.base_url));
        let (current, forecast) = client
            .search(&Location::City("Mumbai".into()))
            .await
            .unwrap();

        assert_eq!(current.name, "Mumbai");
        assert_eq!(current.condition().and_then(|c| c.id), Some(500));
        assert_eq!(forecast.list.len(), 1);
        assert_eq!(forecast.utc_offset_secs(), 19800);
    }

    #[tokio::test]
    async fn test_non_ok_status_fails_search() {
        let upstream = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
                "cod": "404",
                "message": "city not found"
            })))
            .mount(&upstream)
            .await;
        let app = spawn_app(&upstream.uri()).await;

        let client = ProxyClient::new(&format!("{}/api", app.base_url));
        let err = client
            .search(&Location::City("Atlantis".into()))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ClientError::Status { status, .. } if status == reqwest::StatusCode::NOT_FOUND
        ));
    }

    #[tokio::test]
    async fn test_unreachable_proxy() {
        let client = ProxyClient::new(&closed_port_url());
        let err = client
            .fetch_weather(&Location::Coordinates { lat: 1.0, lon: 2.0 })
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Request { .. }));
    }
}

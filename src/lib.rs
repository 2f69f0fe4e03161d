//! Skycast: OpenWeatherMap proxy and weather dashboard view model.
//!
//! The proxy (`skycast` binary) hides the upstream credential and serves the
//! static dashboard. The [`dashboard`] module derives everything the
//! dashboard shows from a fetched (current, forecast) pair; the
//! `skycast-dashboard` binary drives it from a terminal through [`client`].

use std::path::Path;

use axum::{routing::get, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub mod client;
pub mod config;
pub mod dashboard;
pub mod errors;
pub mod models;
pub mod routes;
pub mod services;

#[cfg(test)]
pub(crate) mod test_support;

use routes::weather::AppState;

/// OpenAPI document for the proxy.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Skycast Proxy",
        version = "0.1.0",
        description = "Same-origin proxy for the Skycast weather dashboard. \
            Forwards current-conditions and forecast lookups to OpenWeatherMap \
            with a server-held API key and relays the JSON response unchanged.",
        license(name = "MIT"),
    ),
    tags(
        (name = "Health", description = "Service health check"),
        (name = "Weather", description = "OpenWeatherMap relay"),
    ),
    paths(
        routes::health::health_check,
        routes::weather::get_weather,
        routes::weather::get_forecast,
    ),
    components(
        schemas(
            routes::health::HealthResponse,
            errors::ErrorResponse,
        )
    )
)]
pub struct ApiDoc;

/// Build the full router: API routes, Swagger UI, then static files with an
/// `index.html` fallback for every other path.
pub fn build_router(state: AppState, static_dir: &Path) -> Router {
    // Same-origin in normal use; permissive CORS keeps local dev servers working.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([axum::http::Method::GET])
        .allow_headers(Any);

    let api_routes = Router::new()
        .route("/api/weather", get(routes::weather::get_weather))
        .route("/api/forecast", get(routes::weather::get_forecast))
        .route("/api/health", get(routes::health::health_check))
        .with_state(state);

    let static_files =
        ServeDir::new(static_dir).fallback(ServeFile::new(static_dir.join("index.html")));

    Router::new()
        .merge(api_routes)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .fallback_service(static_files)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

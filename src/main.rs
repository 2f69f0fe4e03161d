// Skycast proxy v0.1
use std::net::SocketAddr;
use std::path::Path;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use skycast::config::AppConfig;
use skycast::routes::weather::AppState;
use skycast::services::openweather::OpenWeatherClient;

#[tokio::main]
async fn main() {
    // Pick up OPENWEATHER_API_KEY and friends from a local .env, if present.
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "skycast=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env();

    let static_dir = Path::new(&config.static_dir);
    if !static_dir.join("index.html").exists() {
        tracing::warn!(
            "No index.html in {}; non-API paths will answer 404",
            static_dir.display()
        );
    }

    let app_state = AppState {
        openweather: OpenWeatherClient::new(&config.openweather_base_url, config.api_key.clone()),
    };

    let app = skycast::build_router(app_state, static_dir);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Server running on {}", addr);
    tracing::info!(
        "Swagger UI available at http://localhost:{}/swagger-ui/",
        config.port
    );

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind TCP listener");
    axum::serve(listener, app)
        .await
        .expect("Server terminated unexpectedly");
}

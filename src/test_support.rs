//! Spawns the real router on an ephemeral port for end-to-end tests.

use std::net::SocketAddr;

use tempfile::TempDir;

use crate::build_router;
use crate::routes::weather::AppState;
use crate::services::openweather::OpenWeatherClient;

pub(crate) const INDEX_HTML: &str = "<!doctype html><title>Skycast</title>";

pub(crate) struct TestApp {
    pub base_url: String,
    /// Static root; dropped (and deleted) with the app.
    _static_dir: TempDir,
}

/// Serve the app against `upstream` with API key `test-key`.
pub(crate) async fn spawn_app(upstream: &str) -> TestApp {
    let static_dir = tempfile::tempdir().unwrap();
    std::fs::write(static_dir.path().join("index.html"), INDEX_HTML).unwrap();
    std::fs::write(static_dir.path().join("app.js"), "console.log('skycast');").unwrap();

    let state = AppState {
        openweather: OpenWeatherClient::new(upstream, Some("test-key".into())),
    };
    let app = build_router(state, static_dir.path());

    let listener = tokio::net::TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0)))
        .await
        .unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    TestApp {
        base_url: format!("http://{}", addr),
        _static_dir: static_dir,
    }
}

/// URL of a local port that was just released, so connections are refused.
pub(crate) fn closed_port_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

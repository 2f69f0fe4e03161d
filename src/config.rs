/// Default upstream base for the OpenWeatherMap 2.5 API.
pub const DEFAULT_OPENWEATHER_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";

/// Application configuration, parsed from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// OpenWeatherMap credential. Startup continues without it.
    pub api_key: Option<String>,
    pub openweather_base_url: String,
    pub port: u16,
    /// Directory served for every non-API path.
    pub static_dir: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let api_key = std::env::var("OPENWEATHER_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty());

        if api_key.is_none() {
            tracing::warn!("OPENWEATHER_API_KEY not set; upstream requests will be rejected");
        }

        Self {
            api_key,
            openweather_base_url: std::env::var("OPENWEATHER_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_OPENWEATHER_BASE_URL.to_string()),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "5000".to_string())
                .parse()
                .expect("PORT must be a valid u16"),
            static_dir: std::env::var("STATIC_DIR").unwrap_or_else(|_| "./public".to_string()),
        }
    }
}

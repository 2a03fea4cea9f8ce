use crate::lnd::api::HISTORY_START_TIME;
use std::env;
use std::path::PathBuf;

/// Configuration loaded from environment variables (with `.env` support).
#[derive(Debug, Clone)]
pub struct Config {
    pub rest_url: String,
    pub tls_cert_path: PathBuf,
    pub macaroon_path: PathBuf,
    pub output_path: PathBuf,
    pub start_time: u64,
    /// Sort day-keyed series chronologically instead of the default
    /// first-occurrence order.
    pub sort_day_series: bool,
}

#[derive(Debug)]
pub enum ConfigError {
    MissingVariable(String),
    InvalidValue(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::MissingVariable(var) => write!(f, "Missing environment variable: {}", var),
            ConfigError::InvalidValue(msg) => write!(f, "Invalid configuration value: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let rest_url = env::var("LND_REST_URL")
            .map_err(|_| ConfigError::MissingVariable("LND_REST_URL".to_string()))?;

        if !rest_url.starts_with("http://") && !rest_url.starts_with("https://") {
            return Err(ConfigError::InvalidValue(
                "LND_REST_URL must start with http:// or https://".to_string(),
            ));
        }

        let tls_cert_path = env::var("LND_TLS_CERT_PATH")
            .map_err(|_| ConfigError::MissingVariable("LND_TLS_CERT_PATH".to_string()))?
            .into();

        let macaroon_path = env::var("LND_MACAROON_PATH")
            .map_err(|_| ConfigError::MissingVariable("LND_MACAROON_PATH".to_string()))?
            .into();

        let output_path = env::var("REPORT_OUTPUT_PATH")
            .unwrap_or_else(|_| "report.html".to_string())
            .into();

        let start_time = env::var("HISTORY_START_TIME")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(HISTORY_START_TIME);

        let sort_day_series = env::var("SORT_DAY_SERIES")
            .unwrap_or_else(|_| "false".to_string())
            .to_lowercase()
            .parse::<bool>()
            .unwrap_or(false);

        Ok(Self {
            rest_url,
            tls_cert_path,
            macaroon_path,
            output_path,
            start_time,
            sort_day_series,
        })
    }
}

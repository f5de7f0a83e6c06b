//! Configuration module for the spread tracker

use serde::Deserialize;

use crate::error::Result;

const DEFAULT_API_BASE_URL: &str = "https://www.buda.com/api/v2/";
const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:8000";
const DEFAULT_DATABASE_URL: &str = "sqlite://spread_alerts.db";

const ENV_PREFIX: &str = "SPREAD_TRACKER";

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Base URL of the Buda REST API, always ending in `/`
    pub buda_api_base_url: String,

    /// Address the web API listens on
    pub listen_addr: String,

    /// SQLite connection string for the alert store
    pub database_url: String,

    pub database_max_connections: u32,
}

impl Config {
    /// Load configuration from `.env`, an optional `spread-tracker` file and
    /// `SPREAD_TRACKER_*` environment variables, in increasing order of
    /// precedence
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();

        let settings = config::Config::builder()
            .set_default("buda_api_base_url", DEFAULT_API_BASE_URL)?
            .set_default("listen_addr", DEFAULT_LISTEN_ADDR)?
            .set_default("database_url", DEFAULT_DATABASE_URL)?
            .set_default("database_max_connections", 5)?
            .add_source(config::File::with_name("spread-tracker").required(false))
            .add_source(config::Environment::with_prefix(ENV_PREFIX))
            .build()?;

        let mut config: Config = settings.try_deserialize()?;
        config.buda_api_base_url = normalize_base_url(&config.buda_api_base_url);
        Ok(config)
    }

    /// Default configuration pointed at another upstream
    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            buda_api_base_url: normalize_base_url(base_url),
            ..Self::default()
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            buda_api_base_url: DEFAULT_API_BASE_URL.to_string(),
            listen_addr: DEFAULT_LISTEN_ADDR.to_string(),
            database_url: DEFAULT_DATABASE_URL.to_string(),
            database_max_connections: 5,
        }
    }
}

/// Endpoint templates are relative, so the base URL must end in a slash
fn normalize_base_url(base_url: &str) -> String {
    let trimmed = base_url.trim();
    if trimmed.ends_with('/') {
        trimmed.to_string()
    } else {
        format!("{}/", trimmed)
    }
}

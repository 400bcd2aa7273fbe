use std::{env, time::Duration};
use thiserror::Error;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("invalid value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Process-wide configuration, read once at startup and shared immutably.
#[derive(Debug, Clone)]
pub struct Config {
    pub base_url: String,
    pub property_id: String,
    pub api_key: String,
    pub request_timeout: Duration,
    pub port: u16,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let base_url = require("ANALYTICS_BASE_URL")?;
        let timeout_secs = parse_or(
            "ANALYTICS_TIMEOUT_SECS",
            DEFAULT_TIMEOUT_SECS,
        )?;
        Ok(Self {
            // No trailing slash so request paths can be appended directly.
            base_url: base_url.trim_end_matches('/').to_string(),
            property_id: require("ANALYTICS_PROPERTY_ID")?,
            api_key: require("ANALYTICS_API_KEY")?,
            request_timeout: Duration::from_secs(timeout_secs),
            port: parse_or("PORT", DEFAULT_PORT)?,
        })
    }
}

fn require(name: &'static str) -> Result<String, ConfigError> {
    env::var(name).map_err(|_| ConfigError::Missing(name))
}

fn parse_or<T: std::str::FromStr>(name: &'static str, default: T) -> Result<T, ConfigError>
where
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(value) => value.parse().map_err(|err: T::Err| ConfigError::Invalid {
            field: name,
            reason: err.to_string(),
        }),
        Err(_) => Ok(default),
    }
}

use std::collections::HashMap;
use thiserror::Error;

use crate::domain::Decimal;
use crate::engine::Timeframe;

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub portfolio_api_url: String,
    /// Seeds the session; requests go out unauthenticated without it.
    pub portfolio_api_token: Option<String>,
    pub default_timeframe: Timeframe,
    /// Percentage points a reported window delta may differ from the series.
    pub delta_tolerance_percent: Decimal,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnv(String),
    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_map(std::env::vars().collect())
    }

    pub fn from_env_map(env_map: HashMap<String, String>) -> Result<Self, ConfigError> {
        let port = env_map
            .get("PORT")
            .map(|s| s.as_str())
            .unwrap_or("8080")
            .parse::<u16>()
            .map_err(|_| {
                ConfigError::InvalidValue("PORT".to_string(), "must be a valid u16".to_string())
            })?;

        let portfolio_api_url = env_map
            .get("PORTFOLIO_API_URL")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .ok_or_else(|| ConfigError::MissingEnv("PORTFOLIO_API_URL".to_string()))?;

        let portfolio_api_token = env_map
            .get("PORTFOLIO_API_TOKEN")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        let default_timeframe = env_map
            .get("DEFAULT_TIMEFRAME")
            .map(|s| s.parse::<Timeframe>())
            .transpose()
            .map_err(|e| ConfigError::InvalidValue("DEFAULT_TIMEFRAME".to_string(), e))?
            .unwrap_or_default();

        let delta_tolerance_percent = env_map
            .get("DELTA_TOLERANCE_PERCENT")
            .map(|s| s.as_str())
            .unwrap_or("0.5")
            .parse::<Decimal>()
            .ok()
            .filter(|d| !d.is_negative())
            .ok_or_else(|| {
                ConfigError::InvalidValue(
                    "DELTA_TOLERANCE_PERCENT".to_string(),
                    "must be a non-negative decimal".to_string(),
                )
            })?;

        Ok(Config {
            port,
            portfolio_api_url,
            portfolio_api_token,
            default_timeframe,
            delta_tolerance_percent,
        })
    }
}

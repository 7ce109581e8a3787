//! Source abstraction for fetching portfolio payloads from the backend.

use crate::domain::{HistoricalData, InvalidInput, PortfolioSnapshot};
use async_trait::async_trait;
use std::fmt;

pub mod http;
pub mod mock;

pub use http::HttpPortfolioSource;
pub use mock::MockPortfolioSource;

/// Portfolio backend, already parsed into domain types.
///
/// Implementations own transport concerns (auth headers, retry/backoff); the
/// engine only ever sees fully materialized payloads.
#[async_trait]
pub trait PortfolioSource: Send + Sync + fmt::Debug {
    /// Current balances (`GET /portfolio/balance`).
    async fn fetch_balance(&self) -> Result<PortfolioSnapshot, DataSourceError>;

    /// Value history and reported window deltas (`GET /portfolio/history`).
    async fn fetch_history(&self) -> Result<HistoricalData, DataSourceError>;
}

/// Error type for data source operations.
#[derive(Debug, Clone)]
pub enum DataSourceError {
    /// Network error (e.g., connection timeout, DNS failure)
    NetworkError(String),
    /// Non-success HTTP status other than 401/429
    HttpError { status: u16, message: String },
    /// Body is not JSON
    ParseError(String),
    /// Body is JSON but violates the payload shape
    InvalidInput(InvalidInput),
    /// Rate limit still exceeded after backoff
    RateLimited,
    /// Backend rejected the session credentials
    Unauthorized,
}

impl fmt::Display for DataSourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSourceError::NetworkError(msg) => write!(f, "Network error: {}", msg),
            DataSourceError::HttpError { status, message } => {
                write!(f, "HTTP error {}: {}", status, message)
            }
            DataSourceError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            DataSourceError::InvalidInput(err) => write!(f, "Invalid payload: {}", err),
            DataSourceError::RateLimited => write!(f, "Rate limited"),
            DataSourceError::Unauthorized => write!(f, "Unauthorized"),
        }
    }
}

impl std::error::Error for DataSourceError {}

impl From<InvalidInput> for DataSourceError {
    fn from(err: InvalidInput) -> Self {
        DataSourceError::InvalidInput(err)
    }
}

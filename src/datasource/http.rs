//! HTTP client for the portfolio backend.

use super::{DataSourceError, PortfolioSource};
use crate::auth::SessionAuth;
use crate::domain::{parse_history, parse_snapshot, HistoricalData, PortfolioSnapshot};
use async_trait::async_trait;
use backoff::future::retry;
use backoff::ExponentialBackoff;
use reqwest::{Client, StatusCode};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

#[derive(Debug, Clone)]
pub struct HttpPortfolioSource {
    client: Client,
    base_url: String,
    auth: Arc<dyn SessionAuth>,
}

impl HttpPortfolioSource {
    pub fn new(base_url: String, auth: Arc<dyn SessionAuth>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            auth,
        }
    }

    async fn get_json(&self, path: &str) -> Result<serde_json::Value, DataSourceError> {
        let url = format!("{}{}", self.base_url, path);
        let backoff = ExponentialBackoff {
            max_elapsed_time: Some(Duration::from_secs(30)),
            ..Default::default()
        };

        retry(backoff, || async {
            let mut request = self.client.get(&url);
            if let Some(token) = self.auth.token() {
                request = request.bearer_auth(token);
            }

            let response = request.send().await.map_err(|e| {
                backoff::Error::transient(DataSourceError::NetworkError(e.to_string()))
            })?;

            let status = response.status();
            if status == StatusCode::UNAUTHORIZED {
                self.auth.handle_unauthorized();
                return Err(backoff::Error::permanent(DataSourceError::Unauthorized));
            }
            if status == StatusCode::TOO_MANY_REQUESTS {
                warn!("Rate limited on {}", url);
                return Err(backoff::Error::transient(DataSourceError::RateLimited));
            }
            if status.is_server_error() {
                return Err(backoff::Error::transient(DataSourceError::HttpError {
                    status: status.as_u16(),
                    message: "Server error".to_string(),
                }));
            }
            if !status.is_success() {
                return Err(backoff::Error::permanent(DataSourceError::HttpError {
                    status: status.as_u16(),
                    message: "Client error".to_string(),
                }));
            }

            response
                .json::<serde_json::Value>()
                .await
                .map_err(|e| backoff::Error::permanent(DataSourceError::ParseError(e.to_string())))
        })
        .await
    }
}

#[async_trait]
impl PortfolioSource for HttpPortfolioSource {
    async fn fetch_balance(&self) -> Result<PortfolioSnapshot, DataSourceError> {
        debug!("Fetching portfolio balance from {}", self.base_url);
        let body = self.get_json("/portfolio/balance").await?;
        let snapshot = parse_snapshot(&body)?;
        debug!(
            "Balance snapshot: {} assets across {} platforms",
            snapshot.assets.len(),
            snapshot.platforms.len()
        );
        Ok(snapshot)
    }

    async fn fetch_history(&self) -> Result<HistoricalData, DataSourceError> {
        debug!("Fetching portfolio history from {}", self.base_url);
        let body = self.get_json("/portfolio/history").await?;
        let history = parse_history(&body)?;
        debug!("History series: {} points", history.series.len());
        Ok(history)
    }
}

//! Mock data source for testing without network calls.

use super::{DataSourceError, PortfolioSource};
use crate::domain::{parse_history, parse_snapshot, HistoricalData, PortfolioSnapshot};
use async_trait::async_trait;

/// Mock source returning predefined payloads, or a predefined failure.
#[derive(Debug, Clone, Default)]
pub struct MockPortfolioSource {
    snapshot: PortfolioSnapshot,
    history: HistoricalData,
    error: Option<DataSourceError>,
    history_error: Option<DataSourceError>,
}

impl MockPortfolioSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_snapshot(mut self, snapshot: PortfolioSnapshot) -> Self {
        self.snapshot = snapshot;
        self
    }

    pub fn with_history(mut self, history: HistoricalData) -> Self {
        self.history = history;
        self
    }

    /// Build from raw JSON bodies, as the backend would send them.
    pub fn from_json(
        balance: &serde_json::Value,
        history: &serde_json::Value,
    ) -> Result<Self, DataSourceError> {
        Ok(Self::new()
            .with_snapshot(parse_snapshot(balance)?)
            .with_history(parse_history(history)?))
    }

    /// Only the history fetch fails, with `error`.
    pub fn with_history_error(mut self, error: DataSourceError) -> Self {
        self.history_error = Some(error);
        self
    }

    /// Every fetch fails with `error`.
    pub fn failing(error: DataSourceError) -> Self {
        Self {
            error: Some(error),
            ..Default::default()
        }
    }
}

#[async_trait]
impl PortfolioSource for MockPortfolioSource {
    async fn fetch_balance(&self) -> Result<PortfolioSnapshot, DataSourceError> {
        match &self.error {
            Some(err) => Err(err.clone()),
            None => Ok(self.snapshot.clone()),
        }
    }

    async fn fetch_history(&self) -> Result<HistoricalData, DataSourceError> {
        match self.error.as_ref().or(self.history_error.as_ref()) {
            Some(err) => Err(err.clone()),
            None => Ok(self.history.clone()),
        }
    }
}

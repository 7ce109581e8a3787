//! Historical portfolio value series and backend-reported window deltas.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::Decimal;

/// One sample of total portfolio value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoricalPoint {
    pub timestamp: DateTime<Utc>,
    pub value: Decimal,
    pub change_from_previous: Decimal,
}

impl HistoricalPoint {
    pub fn new(timestamp: DateTime<Utc>, value: Decimal) -> Self {
        Self {
            timestamp,
            value,
            change_from_previous: Decimal::zero(),
        }
    }
}

/// Absolute and percentage change over one trailing window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowDelta {
    pub absolute: Decimal,
    pub percent: Decimal,
}

impl WindowDelta {
    pub fn new(absolute: Decimal, percent: Decimal) -> Self {
        Self { absolute, percent }
    }

    pub fn zero() -> Self {
        Self::default()
    }
}

/// Trailing window over which deltas are reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Window {
    Daily,
    Weekly,
    Monthly,
}

impl Window {
    pub const ALL: [Window; 3] = [Window::Daily, Window::Weekly, Window::Monthly];

    pub fn duration(&self) -> Duration {
        match self {
            Window::Daily => Duration::days(1),
            Window::Weekly => Duration::days(7),
            Window::Monthly => Duration::days(30),
        }
    }
}

impl std::fmt::Display for Window {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Window::Daily => write!(f, "daily"),
            Window::Weekly => write!(f, "weekly"),
            Window::Monthly => write!(f, "monthly"),
        }
    }
}

/// History payload: the value series (ascending, unique timestamps) plus the
/// window deltas the backend chose to precompute.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HistoricalData {
    pub series: Vec<HistoricalPoint>,
    pub daily: Option<WindowDelta>,
    pub weekly: Option<WindowDelta>,
    pub monthly: Option<WindowDelta>,
}

impl HistoricalData {
    pub fn new(series: Vec<HistoricalPoint>) -> Self {
        Self {
            series,
            ..Default::default()
        }
    }

    pub fn with_window(mut self, window: Window, delta: WindowDelta) -> Self {
        match window {
            Window::Daily => self.daily = Some(delta),
            Window::Weekly => self.weekly = Some(delta),
            Window::Monthly => self.monthly = Some(delta),
        }
        self
    }

    pub fn reported(&self, window: Window) -> Option<WindowDelta> {
        match window {
            Window::Daily => self.daily,
            Window::Weekly => self.weekly,
            Window::Monthly => self.monthly,
        }
    }
}

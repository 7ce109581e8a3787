//! Day/week/month change figures for the portfolio summary.
//!
//! Backend-reported windows are authoritative. A window the backend left out
//! is derived from the value series when the series spans it, otherwise it is
//! zero. Reported windows that disagree with the series beyond a tolerance are
//! logged, never corrected.

use serde::Serialize;
use tracing::warn;

use crate::domain::{Decimal, HistoricalData, HistoricalPoint, Window, WindowDelta};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct WindowDeltas {
    pub daily: WindowDelta,
    pub weekly: WindowDelta,
    pub monthly: WindowDelta,
}

impl WindowDeltas {
    pub fn get(&self, window: Window) -> WindowDelta {
        match window {
            Window::Daily => self.daily,
            Window::Weekly => self.weekly,
            Window::Monthly => self.monthly,
        }
    }

    fn set(&mut self, window: Window, delta: WindowDelta) {
        match window {
            Window::Daily => self.daily = delta,
            Window::Weekly => self.weekly = delta,
            Window::Monthly => self.monthly = delta,
        }
    }
}

/// A reported window whose percent differs from the series-derived one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Divergence {
    pub window: Window,
    pub reported: WindowDelta,
    pub derived: WindowDelta,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowDeltaCalculator {
    /// Allowed gap, in percentage points, between reported and derived percent.
    pub tolerance_percent: Decimal,
}

impl Default for WindowDeltaCalculator {
    fn default() -> Self {
        Self {
            tolerance_percent: Decimal::from_str_canonical("0.5").unwrap_or_default(),
        }
    }
}

impl WindowDeltaCalculator {
    pub fn new(tolerance_percent: Decimal) -> Self {
        Self { tolerance_percent }
    }

    pub fn compute(&self, history: &HistoricalData) -> WindowDeltas {
        for divergence in self.divergences(history) {
            warn!(
                "{} change reported as {}% but series gives {}% (tolerance {})",
                divergence.window,
                divergence.reported.percent,
                divergence.derived.percent,
                self.tolerance_percent
            );
        }

        let mut deltas = WindowDeltas::default();
        for window in Window::ALL {
            let delta = history
                .reported(window)
                .or_else(|| derive_from_series(&history.series, window))
                .unwrap_or_default();
            deltas.set(window, delta);
        }
        deltas
    }

    /// Reported windows that the series contradicts beyond the tolerance.
    pub fn divergences(&self, history: &HistoricalData) -> Vec<Divergence> {
        Window::ALL
            .into_iter()
            .filter_map(|window| {
                let reported = history.reported(window)?;
                let derived = derive_from_series(&history.series, window)?;
                // A gap too large to represent is a divergence too.
                let diverges = reported
                    .percent
                    .checked_sub(derived.percent)
                    .map_or(true, |gap| gap.abs() > self.tolerance_percent);
                diverges.then_some(Divergence {
                    window,
                    reported,
                    derived,
                })
            })
            .collect()
    }
}

/// Window deltas with the default reconciliation tolerance.
pub fn window_deltas(history: &HistoricalData) -> WindowDeltas {
    WindowDeltaCalculator::default().compute(history)
}

/// Change between the latest point and the last point at or before
/// `latest - window`. `None` when the series does not reach that far back,
/// or when the window start or the change is out of range.
pub fn derive_from_series(series: &[HistoricalPoint], window: Window) -> Option<WindowDelta> {
    if series.len() < 2 {
        return None;
    }
    let latest = series.last()?;
    let cutoff = latest.timestamp.checked_sub_signed(window.duration())?;
    let baseline = series.iter().rev().find(|p| p.timestamp <= cutoff)?;

    let absolute = latest.value.checked_sub(baseline.value)?;
    Some(WindowDelta::new(absolute, absolute.percent_of(baseline.value)))
}

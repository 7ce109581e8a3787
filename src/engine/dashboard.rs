use serde::Serialize;

use super::{chart, normalize, project, AllocationSlice, AssetView, ChartSeries, Timeframe};
use super::{WindowDeltaCalculator, WindowDeltas};
use crate::domain::{Decimal, HistoricalData, PortfolioSnapshot, WindowDelta};

/// Headline figures: total value and the three window deltas.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioSummary {
    pub total_balance: Decimal,
    pub daily: WindowDelta,
    pub weekly: WindowDelta,
    pub monthly: WindowDelta,
}

impl PortfolioSummary {
    /// Shown while either payload is still missing.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn new(total_balance: Decimal, deltas: WindowDeltas) -> Self {
        Self {
            total_balance,
            daily: deltas.daily,
            weekly: deltas.weekly,
            monthly: deltas.monthly,
        }
    }
}

/// Everything the dashboard renders, computed from one snapshot and, when
/// available, one history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardView {
    pub summary: PortfolioSummary,
    pub allocation: Vec<AllocationSlice>,
    pub assets: Vec<AssetView>,
    pub chart: ChartSeries,
}

/// Without a history the asset table and allocation are still built; the
/// summary is all zeros and the chart is empty.
pub fn build_dashboard(
    snapshot: &PortfolioSnapshot,
    history: Option<&HistoricalData>,
    timeframe: Timeframe,
    calculator: &WindowDeltaCalculator,
) -> DashboardView {
    let assets = normalize(snapshot);
    let allocation = project(&assets);
    let summary = build_summary(Some(snapshot), history, calculator);
    let series = history.map(|h| h.series.as_slice()).unwrap_or_default();

    DashboardView {
        summary,
        allocation,
        assets,
        chart: chart::format(series, timeframe),
    }
}

/// Summary figures, all zero unless both payloads are present.
pub fn build_summary(
    snapshot: Option<&PortfolioSnapshot>,
    history: Option<&HistoricalData>,
    calculator: &WindowDeltaCalculator,
) -> PortfolioSummary {
    match (snapshot, history) {
        (Some(snapshot), Some(history)) => {
            PortfolioSummary::new(snapshot.total_value, calculator.compute(history))
        }
        _ => PortfolioSummary::empty(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{parse_history, parse_snapshot, Window};
    use serde_json::json;

    fn d(s: &str) -> Decimal {
        Decimal::from_str_canonical(s).unwrap()
    }

    fn snapshot() -> PortfolioSnapshot {
        parse_snapshot(&json!({
            "total_balance_usd": 60500,
            "assets": {
                "BTC": { "amount": 2, "usd_value": 60000 },
                "ETH": { "amount": 0, "usd_value": 0 }
            },
            "platforms": {
                "binance": {
                    "total_usd": 60000,
                    "assets": { "BTC": { "entry_price": 25000, "pnl": 10000, "pnl_percent": 20 } }
                }
            }
        }))
        .unwrap()
    }

    fn history() -> HistoricalData {
        parse_history(&json!({
            "data": [
                { "date": "2024-01-01", "value": 1000 },
                { "date": "2024-01-31", "value": 1200 }
            ],
            "daily_change": { "value": 15, "percent": 1.25 }
        }))
        .unwrap()
    }

    #[test]
    fn test_build_dashboard() {
        let view = build_dashboard(
            &snapshot(),
            Some(&history()),
            Timeframe::Month,
            &WindowDeltaCalculator::default(),
        );

        assert_eq!(view.assets.len(), 2);
        assert_eq!(view.allocation.len(), 1);
        assert_eq!(view.allocation[0].symbol.as_str(), "BTC");
        assert_eq!(view.allocation[0].value, d("60000"));

        // Reported total, not the sum of asset values.
        assert_eq!(view.summary.total_balance, d("60500"));
        assert_eq!(view.summary.daily, WindowDelta::new(d("15"), d("1.25")));
        // Derived: 2024-01-31 vs 2024-01-01.
        assert_eq!(view.summary.monthly, WindowDelta::new(d("200"), d("20")));
        assert_eq!(view.summary.weekly.absolute, d("200"));

        assert_eq!(view.chart.points.len(), 2);
        assert!(view.chart.is_upward);
    }

    #[test]
    fn test_dashboard_without_history_keeps_assets() {
        let view = build_dashboard(
            &snapshot(),
            None,
            Timeframe::Week,
            &WindowDeltaCalculator::default(),
        );

        assert_eq!(view.assets.len(), 2);
        assert_eq!(view.allocation.len(), 1);
        assert_eq!(view.summary, PortfolioSummary::empty());
        assert!(view.chart.points.is_empty());
        assert_eq!(view.chart.timeframe, Timeframe::Week);
    }

    #[test]
    fn test_summary_empty_when_history_missing() {
        let summary = build_summary(Some(&snapshot()), None, &WindowDeltaCalculator::default());
        assert_eq!(summary, PortfolioSummary::empty());
        assert_eq!(summary.total_balance, Decimal::zero());
    }

    #[test]
    fn test_summary_uses_window_accessors() {
        let deltas = WindowDeltaCalculator::default().compute(&history());
        let summary = PortfolioSummary::new(d("1"), deltas);
        assert_eq!(summary.daily, deltas.get(Window::Daily));
        assert_eq!(summary.monthly, deltas.get(Window::Monthly));
    }
}

use serde::Serialize;
use tracing::warn;

use super::AssetView;
use crate::domain::{Decimal, Symbol};

/// Hue step between consecutive slices; wraps after 12 slices.
const HUE_STEP: usize = 30;

/// One asset's share of the allocation chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocationSlice {
    pub symbol: Symbol,
    pub value: Decimal,
    /// Position within the projected (filtered) sequence.
    pub color_index: usize,
    /// CSS color. Pure function of `color_index`.
    pub color: String,
}

fn slice_color(color_index: usize) -> String {
    format!("hsl({}, 70%, 50%)", (color_index * HUE_STEP) % 360)
}

impl AllocationSlice {
    pub fn new(symbol: Symbol, value: Decimal, color_index: usize) -> Self {
        Self {
            symbol,
            value,
            color_index,
            color: slice_color(color_index),
        }
    }

    pub fn color(&self) -> &str {
        &self.color
    }

    /// Share of `total` in percent, zero when `total` is zero.
    pub fn share_percent(&self, total: Decimal) -> Decimal {
        self.value.percent_of(total)
    }
}

/// Build allocation slices from asset rows.
///
/// Rows with a non-positive value are dropped. Input order is kept, and colors
/// are assigned by position in the filtered sequence.
pub fn project(views: &[AssetView]) -> Vec<AllocationSlice> {
    views
        .iter()
        .filter(|view| view.total_value.is_positive())
        .enumerate()
        .map(|(color_index, view)| {
            AllocationSlice::new(view.symbol.clone(), view.total_value, color_index)
        })
        .collect()
}

/// Denominator for allocation percentages: the sum of the projected values.
///
/// Zero when the sum overflows, which makes every share zero.
pub fn allocation_total(slices: &[AllocationSlice]) -> Decimal {
    Decimal::checked_sum(slices.iter().map(|s| s.value)).unwrap_or_else(|| {
        warn!(slices = slices.len(), "allocation total overflowed, shares reported as zero");
        Decimal::zero()
    })
}

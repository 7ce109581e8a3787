//! Pure aggregation engine turning upstream payloads into the dashboard view model.
//!
//! Nothing here performs I/O or holds state; every function is a pure
//! function of its arguments and never panics on well-typed input.

pub mod allocation;
pub mod chart;
pub mod dashboard;
pub mod deltas;
pub mod normalizer;

pub use allocation::{allocation_total, project, AllocationSlice};
pub use chart::{ChartPoint, ChartSeries, Timeframe};
pub use dashboard::{build_dashboard, build_summary, DashboardView, PortfolioSummary};
pub use deltas::{window_deltas, Divergence, WindowDeltaCalculator, WindowDeltas};
pub use normalizer::{normalize, AssetView};

pub mod api;
pub mod auth;
pub mod config;
pub mod datasource;
pub mod domain;
pub mod engine;
pub mod error;

pub use auth::{AuthContext, SessionAuth};
pub use config::Config;
pub use datasource::{DataSourceError, HttpPortfolioSource, MockPortfolioSource, PortfolioSource};
pub use domain::{
    Decimal, HistoricalData, HistoricalPoint, InvalidInput, PlatformName, PortfolioSnapshot,
    Symbol, WindowDelta,
};
pub use engine::{
    build_dashboard, normalize, project, window_deltas, AllocationSlice, AssetView,
    DashboardView, Timeframe,
};
pub use error::AppError;

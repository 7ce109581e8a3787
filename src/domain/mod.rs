//! Domain types for the portfolio view model.
//!
//! This module provides:
//! - Lossless numeric handling via Decimal wrapper
//! - Domain primitives: Symbol, PlatformName
//! - Balance snapshot and value history records
//! - Parsing of upstream JSON payloads with field-level errors

pub mod decimal;
pub mod history;
pub mod payload;
pub mod primitives;
pub mod snapshot;

pub use decimal::Decimal;
pub use history::{HistoricalData, HistoricalPoint, Window, WindowDelta};
pub use payload::{parse_history, parse_snapshot, InvalidInput};
pub use primitives::{PlatformName, Symbol};
pub use snapshot::{AssetBalance, PlatformAsset, PlatformHolding, PortfolioSnapshot};

//! Point-in-time balance snapshot as reported by the portfolio backend.

use super::{Decimal, PlatformName, Symbol};

/// Aggregate balance of one asset across all platforms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetBalance {
    pub symbol: Symbol,
    pub amount: Decimal,
    /// Value in the quote currency (already converted upstream).
    pub value: Decimal,
}

impl AssetBalance {
    pub fn new(symbol: Symbol, amount: Decimal, value: Decimal) -> Self {
        Self {
            symbol,
            amount,
            value,
        }
    }
}

/// Per-platform detail for one asset. Every field is optional upstream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformAsset {
    pub symbol: Symbol,
    pub entry_price: Option<Decimal>,
    pub pnl: Option<Decimal>,
    pub pnl_percent: Option<Decimal>,
    pub change_24h: Option<Decimal>,
}

impl PlatformAsset {
    pub fn new(symbol: Symbol) -> Self {
        Self {
            symbol,
            entry_price: None,
            pnl: None,
            pnl_percent: None,
            change_24h: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformHolding {
    pub name: PlatformName,
    pub total_value: Decimal,
    /// In upstream order.
    pub assets: Vec<PlatformAsset>,
}

impl PlatformHolding {
    pub fn new(name: PlatformName) -> Self {
        Self {
            name,
            total_value: Decimal::zero(),
            assets: Vec::new(),
        }
    }

    pub fn with_asset(mut self, asset: PlatformAsset) -> Self {
        self.assets.push(asset);
        self
    }

    pub fn asset(&self, symbol: &Symbol) -> Option<&PlatformAsset> {
        self.assets.iter().find(|a| &a.symbol == symbol)
    }
}

/// Balance payload: aggregate per-asset balances plus per-platform breakdowns.
///
/// `total_value` is displayed as reported; it may include components that are
/// not listed in `assets` and is never recomputed from them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PortfolioSnapshot {
    pub total_value: Decimal,
    pub assets: Vec<AssetBalance>,
    pub platforms: Vec<PlatformHolding>,
}

impl PortfolioSnapshot {
    pub fn new(total_value: Decimal) -> Self {
        Self {
            total_value,
            ..Default::default()
        }
    }

    pub fn with_asset(mut self, asset: AssetBalance) -> Self {
        self.assets.push(asset);
        self
    }

    pub fn with_platform(mut self, platform: PlatformHolding) -> Self {
        self.platforms.push(platform);
        self
    }

    /// First platform, in upstream order, that reports `symbol`.
    pub fn owning_platform(&self, symbol: &Symbol) -> Option<(&PlatformName, &PlatformAsset)> {
        self.platforms
            .iter()
            .find_map(|p| p.asset(symbol).map(|asset| (&p.name, asset)))
    }

    /// Number of platforms that report `symbol`.
    pub fn platform_count(&self, symbol: &Symbol) -> usize {
        self.platforms
            .iter()
            .filter(|p| p.asset(symbol).is_some())
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_owning_platform_is_first_in_order() {
        let btc = Symbol::new("BTC");
        let snapshot = PortfolioSnapshot::new(Decimal::zero())
            .with_platform(PlatformHolding::new(PlatformName::new("kraken")))
            .with_platform(
                PlatformHolding::new(PlatformName::new("bitget"))
                    .with_asset(PlatformAsset::new(btc.clone())),
            )
            .with_platform(
                PlatformHolding::new(PlatformName::new("binance"))
                    .with_asset(PlatformAsset::new(btc.clone())),
            );

        let (name, _) = snapshot.owning_platform(&btc).unwrap();
        assert_eq!(name.as_str(), "bitget");
        assert_eq!(snapshot.platform_count(&btc), 2);
    }

    #[test]
    fn test_platform_asset_starts_without_details() {
        let asset = PlatformAsset::new(Symbol::new("SOL"));
        assert_eq!(asset.symbol.as_str(), "SOL");
        assert_eq!(asset.entry_price, None);
        assert_eq!(asset.pnl, None);
        assert_eq!(asset.pnl_percent, None);
        assert_eq!(asset.change_24h, None);
    }

    #[test]
    fn test_owning_platform_missing() {
        let snapshot = PortfolioSnapshot::new(Decimal::zero());
        assert!(snapshot.owning_platform(&Symbol::new("BTC")).is_none());
    }
}

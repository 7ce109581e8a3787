use serde::Serialize;
use tracing::debug;

use crate::domain::{Decimal, PlatformAsset, PlatformName, PortfolioSnapshot, Symbol};

/// One row of the asset table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetView {
    pub symbol: Symbol,
    /// Display name; the backend only supplies symbols.
    pub name: String,
    pub quantity: Decimal,
    pub average_entry_price: Decimal,
    /// `total_value / quantity`, or zero when the quantity is zero.
    pub current_price: Decimal,
    pub total_value: Decimal,
    pub pnl: Decimal,
    pub pnl_percent: Decimal,
    pub change_24h: Decimal,
    /// Owning platform, empty when no platform reports the asset.
    pub platform: PlatformName,
}

/// Merge aggregate balances with per-platform detail into asset rows.
///
/// Output order and length follow `snapshot.assets`. PnL and entry price come
/// from the first platform, in upstream order, that reports the symbol.
pub fn normalize(snapshot: &PortfolioSnapshot) -> Vec<AssetView> {
    snapshot
        .assets
        .iter()
        .map(|balance| {
            let owner = snapshot.owning_platform(&balance.symbol);

            let holders = snapshot.platform_count(&balance.symbol);
            if holders > 1 {
                debug!(
                    "{} reported by {} platforms, using {}",
                    balance.symbol,
                    holders,
                    owner.map(|(name, _)| name.as_str()).unwrap_or_default()
                );
            }

            let (platform, detail) = match owner {
                Some((name, detail)) => (name.clone(), Some(detail)),
                None => (PlatformName::none(), None),
            };
            let field = |pick: fn(&PlatformAsset) -> Option<Decimal>| {
                detail.and_then(pick).unwrap_or_default()
            };

            AssetView {
                symbol: balance.symbol.clone(),
                name: balance.symbol.to_string(),
                quantity: balance.amount,
                average_entry_price: field(|a| a.entry_price),
                current_price: current_price(balance.value, balance.amount),
                total_value: balance.value,
                pnl: field(|a| a.pnl),
                pnl_percent: field(|a| a.pnl_percent),
                change_24h: field(|a| a.change_24h),
                platform,
            }
        })
        .collect()
}

/// Unit price, or zero for an empty (or negative) position.
fn current_price(value: Decimal, amount: Decimal) -> Decimal {
    if !amount.is_positive() {
        return Decimal::zero();
    }
    value.checked_div(amount).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AssetBalance, PlatformHolding};

    fn d(s: &str) -> Decimal {
        Decimal::from_str_canonical(s).unwrap()
    }

    fn sample_snapshot() -> PortfolioSnapshot {
        let mut btc = PlatformAsset::new(Symbol::new("BTC"));
        btc.entry_price = Some(d("25000"));
        btc.pnl = Some(d("10000"));
        btc.pnl_percent = Some(d("20"));

        PortfolioSnapshot::new(d("60000"))
            .with_asset(AssetBalance::new(Symbol::new("BTC"), d("2"), d("60000")))
            .with_asset(AssetBalance::new(Symbol::new("ETH"), d("0"), d("0")))
            .with_platform(PlatformHolding::new(PlatformName::new("binance")).with_asset(btc))
    }

    #[test]
    fn test_normalize_btc_with_owning_platform() {
        let views = normalize(&sample_snapshot());
        assert_eq!(views.len(), 2);

        let btc = &views[0];
        assert_eq!(btc.symbol.as_str(), "BTC");
        assert_eq!(btc.name, "BTC");
        assert_eq!(btc.quantity, d("2"));
        assert_eq!(btc.current_price, d("30000"));
        assert_eq!(btc.average_entry_price, d("25000"));
        assert_eq!(btc.pnl, d("10000"));
        assert_eq!(btc.pnl_percent, d("20"));
        assert_eq!(btc.change_24h, Decimal::zero());
        assert_eq!(btc.platform.as_str(), "binance");
    }

    #[test]
    fn test_zero_amount_uses_zero_price() {
        let views = normalize(&sample_snapshot());
        let eth = &views[1];
        assert_eq!(eth.current_price, Decimal::zero());
        assert_eq!(eth.total_value, Decimal::zero());
        assert!(eth.platform.is_none());
        assert_eq!(eth.pnl, Decimal::zero());
        assert_eq!(eth.average_entry_price, Decimal::zero());
    }

    #[test]
    fn test_zero_amount_with_nonzero_value_does_not_divide() {
        let snapshot = PortfolioSnapshot::new(d("5"))
            .with_asset(AssetBalance::new(Symbol::new("DUST"), d("0"), d("5")));
        let views = normalize(&snapshot);
        assert_eq!(views[0].current_price, Decimal::zero());
        assert_eq!(views[0].total_value, d("5"));
    }

    #[test]
    fn test_first_platform_in_order_wins() {
        let mut on_kraken = PlatformAsset::new(Symbol::new("SOL"));
        on_kraken.pnl = Some(d("1"));
        let mut on_binance = PlatformAsset::new(Symbol::new("SOL"));
        on_binance.pnl = Some(d("2"));

        let snapshot = PortfolioSnapshot::new(d("100"))
            .with_asset(AssetBalance::new(Symbol::new("SOL"), d("1"), d("100")))
            .with_platform(PlatformHolding::new(PlatformName::new("kraken")).with_asset(on_kraken))
            .with_platform(
                PlatformHolding::new(PlatformName::new("binance")).with_asset(on_binance),
            );

        let views = normalize(&snapshot);
        assert_eq!(views[0].platform.as_str(), "kraken");
        assert_eq!(views[0].pnl, d("1"));
    }

    #[test]
    fn test_symbol_match_is_case_sensitive() {
        let snapshot = PortfolioSnapshot::new(d("1"))
            .with_asset(AssetBalance::new(Symbol::new("btc"), d("1"), d("1")))
            .with_platform(
                PlatformHolding::new(PlatformName::new("binance"))
                    .with_asset(PlatformAsset::new(Symbol::new("BTC"))),
            );

        let views = normalize(&snapshot);
        assert!(views[0].platform.is_none());
    }

    #[test]
    fn test_empty_snapshot() {
        assert!(normalize(&PortfolioSnapshot::default()).is_empty());
    }

    #[test]
    fn test_serializes_camel_case() {
        let views = normalize(&sample_snapshot());
        let json = serde_json::to_value(&views[0]).unwrap();
        assert_eq!(json["averageEntryPrice"], serde_json::json!(25000.0));
        assert_eq!(json["currentPrice"], serde_json::json!(30000.0));
        assert_eq!(json["platform"], "binance");
    }
}

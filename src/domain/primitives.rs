//! Domain primitives: Symbol, PlatformName.

use serde::{Deserialize, Serialize};

/// Asset symbol (e.g., "BTC", "ETH").
///
/// Case-sensitive; never normalized, so "btc" and "BTC" are distinct assets.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Symbol(pub String);

impl Symbol {
    pub fn new(symbol: impl Into<String>) -> Self {
        Symbol(symbol.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Exchange or wallet name as reported by the backend (e.g., "binance").
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlatformName(pub String);

impl PlatformName {
    pub fn new(name: impl Into<String>) -> Self {
        PlatformName(name.into())
    }

    /// The placeholder used when no platform reports an asset.
    pub fn none() -> Self {
        PlatformName(String::new())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_none(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Display for PlatformName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbol_is_case_sensitive() {
        assert_ne!(Symbol::new("btc"), Symbol::new("BTC"));
    }

    #[test]
    fn test_symbol_serializes_as_plain_string() {
        let json = serde_json::to_string(&Symbol::new("ETH")).unwrap();
        assert_eq!(json, "\"ETH\"");
    }

    #[test]
    fn test_platform_none_is_empty_string() {
        let none = PlatformName::none();
        assert!(none.is_none());
        assert_eq!(none.to_string(), "");
        assert!(!PlatformName::new("binance").is_none());
    }
}

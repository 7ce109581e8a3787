//! Parsing of upstream JSON payloads into domain types.
//!
//! Containers and required figures must have the right shape; a violation
//! yields a single [`InvalidInput`] naming the offending field as a dotted
//! path. Optional per-platform figures are lenient: anything unusable there
//! degrades to "absent" so one bad platform row cannot block the rest.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde_json::{Map, Value};
use thiserror::Error;

use super::{
    AssetBalance, Decimal, HistoricalData, HistoricalPoint, PlatformAsset, PlatformHolding,
    PlatformName, PortfolioSnapshot, Symbol, WindowDelta,
};

/// Shape violation in an upstream payload.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid input at `{field}`: {reason}")]
pub struct InvalidInput {
    pub field: String,
    pub reason: String,
}

impl InvalidInput {
    fn new(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Parse a `/portfolio/balance` body.
///
/// ```json
/// { "total_balance_usd": 61000,
///   "assets": { "BTC": { "amount": 2, "usd_value": 60000 } },
///   "platforms": { "binance": { "total_usd": 60000,
///                               "assets": { "BTC": { "entry_price": 25000 } } } } }
/// ```
pub fn parse_snapshot(json: &Value) -> Result<PortfolioSnapshot, InvalidInput> {
    let root = as_object(json, "$")?;
    let total_value = required_number(root, "total_balance_usd", "total_balance_usd")?;

    let mut assets = Vec::new();
    if let Some(assets_json) = optional_object(root, "assets", "assets")? {
        for (symbol, entry) in assets_json {
            let path = format!("assets.{}", symbol);
            let entry = as_object(entry, &path)?;
            let amount = required_number(entry, "amount", &format!("{}.amount", path))?;
            let value = required_number(entry, "usd_value", &format!("{}.usd_value", path))?;
            assets.push(AssetBalance::new(Symbol::new(symbol.as_str()), amount, value));
        }
    }

    let mut platforms = Vec::new();
    if let Some(platforms_json) = optional_object(root, "platforms", "platforms")? {
        for (name, entry) in platforms_json {
            let path = format!("platforms.{}", name);
            platforms.push(parse_platform(name, entry, &path)?);
        }
    }

    Ok(PortfolioSnapshot {
        total_value,
        assets,
        platforms,
    })
}

fn parse_platform(name: &str, json: &Value, path: &str) -> Result<PlatformHolding, InvalidInput> {
    let entry = as_object(json, path)?;
    let mut holding = PlatformHolding::new(PlatformName::new(name));
    holding.total_value = entry.get("total_usd").and_then(number).unwrap_or_default();

    let assets_path = format!("{}.assets", path);
    if let Some(assets) = optional_object(entry, "assets", &assets_path)? {
        for (symbol, detail) in assets {
            // A null entry means the platform does not actually report the symbol.
            if detail.is_null() {
                continue;
            }
            let mut asset = PlatformAsset::new(Symbol::new(symbol.as_str()));
            if let Some(detail) = detail.as_object() {
                asset.entry_price = detail.get("entry_price").and_then(number);
                asset.pnl = detail.get("pnl").and_then(number);
                asset.pnl_percent = detail.get("pnl_percent").and_then(number);
                asset.change_24h = detail.get("change_24h").and_then(number);
            }
            holding.assets.push(asset);
        }
    }

    Ok(holding)
}

/// Parse a `/portfolio/history` body.
///
/// ```json
/// { "data": [ { "date": "2024-01-01", "value": 1000, "change": 0 } ],
///   "daily_change": { "value": 12.5, "percent": 1.2 } }
/// ```
pub fn parse_history(json: &Value) -> Result<HistoricalData, InvalidInput> {
    let root = as_object(json, "$")?;

    let mut series: Vec<HistoricalPoint> = Vec::new();
    match root.get("data") {
        None | Some(Value::Null) => {}
        Some(Value::Array(points)) => {
            for (i, point) in points.iter().enumerate() {
                let path = format!("data[{}]", i);
                let point = parse_point(point, &path)?;
                if let Some(previous) = series.last() {
                    if point.timestamp <= previous.timestamp {
                        return Err(InvalidInput::new(
                            format!("{}.date", path),
                            "must be later than the previous point",
                        ));
                    }
                }
                series.push(point);
            }
        }
        Some(_) => return Err(InvalidInput::new("data", "must be an array")),
    }

    Ok(HistoricalData {
        series,
        daily: parse_window(root, "daily_change")?,
        weekly: parse_window(root, "weekly_change")?,
        monthly: parse_window(root, "monthly_change")?,
    })
}

fn parse_point(json: &Value, path: &str) -> Result<HistoricalPoint, InvalidInput> {
    let point = as_object(json, path)?;
    let date_path = format!("{}.date", path);
    let date = point
        .get("date")
        .and_then(|v| v.as_str())
        .ok_or_else(|| InvalidInput::new(&date_path, "missing or not a string"))?;
    let timestamp = parse_timestamp(date)
        .ok_or_else(|| InvalidInput::new(&date_path, format!("unrecognized date `{}`", date)))?;
    let value = required_number(point, "value", &format!("{}.value", path))?;
    let change_from_previous = point.get("change").and_then(number).unwrap_or_default();

    Ok(HistoricalPoint {
        timestamp,
        value,
        change_from_previous,
    })
}

fn parse_window(root: &Map<String, Value>, key: &str) -> Result<Option<WindowDelta>, InvalidInput> {
    match root.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Object(window)) => Ok(Some(WindowDelta::new(
            window.get("value").and_then(number).unwrap_or_default(),
            window.get("percent").and_then(number).unwrap_or_default(),
        ))),
        Some(_) => Err(InvalidInput::new(key, "must be an object")),
    }
}

/// Accepts RFC 3339, a naive `YYYY-MM-DDTHH:MM:SS[.f]` (read as UTC) or a bare date.
pub fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// JSON number or numeric string.
fn number(value: &Value) -> Option<Decimal> {
    match value {
        Value::Number(n) => Decimal::from_json_number(n),
        Value::String(s) => Decimal::from_str_canonical(s.trim()).ok(),
        _ => None,
    }
}

fn required_number(
    obj: &Map<String, Value>,
    key: &str,
    path: &str,
) -> Result<Decimal, InvalidInput> {
    let value = obj
        .get(key)
        .ok_or_else(|| InvalidInput::new(path, "missing"))?;
    number(value).ok_or_else(|| InvalidInput::new(path, "must be numeric"))
}

fn as_object<'a>(value: &'a Value, path: &str) -> Result<&'a Map<String, Value>, InvalidInput> {
    value
        .as_object()
        .ok_or_else(|| InvalidInput::new(path, "must be an object"))
}

fn optional_object<'a>(
    obj: &'a Map<String, Value>,
    key: &str,
    path: &str,
) -> Result<Option<&'a Map<String, Value>>, InvalidInput> {
    match obj.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Object(map)) => Ok(Some(map)),
        Some(_) => Err(InvalidInput::new(path, "must be an object")),
    }
}

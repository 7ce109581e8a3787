use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::domain::{Decimal, HistoricalPoint};

/// Range selected on the value chart; only affects axis labels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Timeframe {
    Day,
    Week,
    #[default]
    Month,
    Year,
    All,
}

impl Timeframe {
    /// chrono format string for point labels.
    fn label_format(&self) -> &'static str {
        match self {
            Timeframe::Day => "%H:%M",
            Timeframe::Week => "%a",
            Timeframe::Month => "%-d %b",
            Timeframe::Year => "%b",
            Timeframe::All => "%b %y",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Timeframe::Day => "day",
            Timeframe::Week => "week",
            Timeframe::Month => "month",
            Timeframe::Year => "year",
            Timeframe::All => "all",
        }
    }
}

impl std::fmt::Display for Timeframe {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Timeframe {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "day" => Ok(Timeframe::Day),
            "week" => Ok(Timeframe::Week),
            "month" => Ok(Timeframe::Month),
            "year" => Ok(Timeframe::Year),
            "all" => Ok(Timeframe::All),
            other => Err(format!(
                "must be day, week, month, year, or all, got {}",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartPoint {
    pub label: String,
    pub value: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartSeries {
    pub timeframe: Timeframe,
    pub points: Vec<ChartPoint>,
    /// Styling hint: last value above first. Defaults to true for fewer than two points.
    pub is_upward: bool,
}

/// Label every point for `timeframe`. Count, order and values are unchanged.
pub fn format(series: &[HistoricalPoint], timeframe: Timeframe) -> ChartSeries {
    let fmt = timeframe.label_format();
    let points = series
        .iter()
        .map(|p| ChartPoint {
            label: p.timestamp.format(fmt).to_string(),
            value: p.value,
        })
        .collect();

    ChartSeries {
        timeframe,
        points,
        is_upward: is_upward(series),
    }
}

pub fn is_upward(series: &[HistoricalPoint]) -> bool {
    match (series.first(), series.last()) {
        (Some(first), Some(last)) if series.len() > 1 => last.value > first.value,
        _ => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::payload::parse_timestamp;

    fn point(date: &str, value: i64) -> HistoricalPoint {
        HistoricalPoint::new(parse_timestamp(date).unwrap(), Decimal::from(value))
    }

    fn labels(series: &ChartSeries) -> Vec<&str> {
        series.points.iter().map(|p| p.label.as_str()).collect()
    }

    #[test]
    fn test_month_labels_and_trend() {
        let series = vec![point("2024-01-01", 1000), point("2024-01-31", 1200)];
        let chart = format(&series, Timeframe::Month);

        assert_eq!(chart.points.len(), 2);
        assert!(chart.is_upward);
        assert_eq!(labels(&chart), vec!["1 Jan", "31 Jan"]);
        assert_eq!(chart.points[1].value, Decimal::from(1200_i64));
    }

    #[test]
    fn test_labels_per_timeframe() {
        // 2024-03-05 is a Tuesday.
        let series = vec![point("2024-03-05T14:07:00Z", 10)];

        assert_eq!(labels(&format(&series, Timeframe::Day)), vec!["14:07"]);
        assert_eq!(labels(&format(&series, Timeframe::Week)), vec!["Tue"]);
        assert_eq!(labels(&format(&series, Timeframe::Month)), vec!["5 Mar"]);
        assert_eq!(labels(&format(&series, Timeframe::Year)), vec!["Mar"]);
        assert_eq!(labels(&format(&series, Timeframe::All)), vec!["Mar 24"]);
    }

    #[test]
    fn test_values_identical_across_timeframes() {
        let series = vec![
            point("2024-01-01", 5),
            point("2024-01-02", 3),
            point("2024-01-03", 9),
        ];
        let reference: Vec<_> = format(&series, Timeframe::Day)
            .points
            .into_iter()
            .map(|p| p.value)
            .collect();

        for tf in [Timeframe::Week, Timeframe::Month, Timeframe::Year, Timeframe::All] {
            let values: Vec<_> = format(&series, tf).points.into_iter().map(|p| p.value).collect();
            assert_eq!(values, reference);
        }
    }

    #[test]
    fn test_downward_and_flat_trend() {
        let down = vec![point("2024-01-01", 10), point("2024-01-02", 5)];
        assert!(!format(&down, Timeframe::Month).is_upward);

        let flat = vec![point("2024-01-01", 10), point("2024-01-02", 10)];
        assert!(!format(&flat, Timeframe::Month).is_upward);
    }

    #[test]
    fn test_empty_and_single_point_default_upward() {
        let empty = format(&[], Timeframe::All);
        assert!(empty.points.is_empty());
        assert!(empty.is_upward);

        let single = format(&[point("2024-01-01", 10)], Timeframe::All);
        assert!(single.is_upward);
    }

    #[test]
    fn test_timeframe_parse() {
        assert_eq!("WEEK".parse::<Timeframe>(), Ok(Timeframe::Week));
        assert_eq!(" all ".parse::<Timeframe>(), Ok(Timeframe::All));
        assert!("fortnight".parse::<Timeframe>().is_err());
        assert_eq!(Timeframe::default(), Timeframe::Month);
    }

    #[test]
    fn test_series_serialization() {
        let chart = format(&[point("2024-01-01", 1)], Timeframe::Year);
        let json = serde_json::to_value(&chart).unwrap();
        assert_eq!(json["timeframe"], "year");
        assert_eq!(json["isUpward"], true);
        assert_eq!(json["points"][0]["label"], "Jan");
    }
}

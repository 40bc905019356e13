use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Price/volume series for one symbol as six parallel arrays, oldest bar first.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HistoricalData {
    pub symbol: String,
    pub timestamps: Vec<i64>,
    pub opens: Vec<f64>,
    pub highs: Vec<f64>,
    pub lows: Vec<f64>,
    pub closes: Vec<f64>,
    pub volumes: Vec<f64>,
}

impl HistoricalData {
    pub fn empty(symbol: impl Into<String>) -> Self {
        HistoricalData {
            symbol: symbol.into(),
            ..Default::default()
        }
    }

    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    /// All six arrays share one length.
    pub fn is_aligned(&self) -> bool {
        let n = self.timestamps.len();
        self.opens.len() == n
            && self.highs.len() == n
            && self.lows.len() == n
            && self.closes.len() == n
            && self.volumes.len() == n
    }
}

/// Lookback window selected by a period keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Period {
    #[default]
    OneMonth,
    ThreeMonths,
    SixMonths,
    OneYear,
    FiveYears,
}

impl Period {
    pub const ALL: [Period; 5] = [
        Period::OneMonth,
        Period::ThreeMonths,
        Period::SixMonths,
        Period::OneYear,
        Period::FiveYears,
    ];

    /// Unknown keywords fall back to one month.
    pub fn from_keyword(keyword: &str) -> Self {
        match keyword.trim().to_ascii_lowercase().as_str() {
            "1m" => Period::OneMonth,
            "3m" => Period::ThreeMonths,
            "6m" => Period::SixMonths,
            "1y" => Period::OneYear,
            "5y" => Period::FiveYears,
            other => {
                log::debug!("unrecognized period keyword '{}', using 1m", other);
                Period::OneMonth
            }
        }
    }

    pub fn keyword(&self) -> &'static str {
        match self {
            Period::OneMonth => "1m",
            Period::ThreeMonths => "3m",
            Period::SixMonths => "6m",
            Period::OneYear => "1y",
            Period::FiveYears => "5y",
        }
    }

    pub fn months_back(&self) -> u32 {
        match self {
            Period::OneMonth => 1,
            Period::ThreeMonths => 3,
            Period::SixMonths => 6,
            Period::OneYear => 12,
            Period::FiveYears => 60,
        }
    }

    pub fn interval(&self) -> BarInterval {
        match self {
            Period::FiveYears => BarInterval::Weekly,
            _ => BarInterval::Daily,
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.keyword())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BarInterval {
    Daily,
    Weekly,
}

impl BarInterval {
    /// Interval code understood by the chart endpoint.
    pub fn provider_code(&self) -> &'static str {
        match self {
            BarInterval::Daily => "1d",
            BarInterval::Weekly => "1wk",
        }
    }
}

impl fmt::Display for BarInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BarInterval::Daily => write!(f, "daily"),
            BarInterval::Weekly => write!(f, "weekly"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub interval: BarInterval,
}

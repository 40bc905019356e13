use serde::Serialize;

use crate::display::table::derive_rows;
use crate::display::format_currency;
use crate::models::HistoricalData;

/// Padding applied below the lowest and above the highest close.
const DOMAIN_PADDING: f64 = 0.005;

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChartPoint {
    pub timestamp: i64,
    pub date: String,
    pub price: f64,
    pub volume: f64,
    pub change_percent: f64,
    /// tooltip text, e.g. `$189.84`
    pub label: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChartSeries {
    pub symbol: String,
    pub points: Vec<ChartPoint>,
    /// `[min(close) * 0.995, max(close) * 1.005]`, `None` without data
    pub y_domain: Option<[f64; 2]>,
}

/// Y-axis bounds over the full series, padded by half a percent either side.
pub fn y_domain(closes: &[f64]) -> Option<[f64; 2]> {
    let mut finite = closes.iter().copied().filter(|c| c.is_finite());
    let first = finite.next()?;
    let (min, max) = finite.fold((first, first), |(lo, hi), c| (lo.min(c), hi.max(c)));
    Some([min * (1.0 - DOMAIN_PADDING), max * (1.0 + DOMAIN_PADDING)])
}

/// Close-price series, oldest first.
pub fn chart_series(data: &HistoricalData) -> ChartSeries {
    let points = derive_rows(data)
        .into_iter()
        .map(|row| ChartPoint {
            timestamp: row.timestamp,
            label: format_currency(row.close),
            date: row.date,
            price: row.close,
            volume: row.volume,
            change_percent: row.change_percent,
        })
        .collect();

    ChartSeries {
        symbol: data.symbol.clone(),
        points,
        y_domain: y_domain(&data.closes),
    }
}

//! Presentation-ready values derived from the domain records.
//!
//! The table, chart and CSV export all go through `table::derive_rows` and the
//! number formatters here, so a figure is rounded the same way wherever it shows.

pub mod chart;
pub mod csv_export;
pub mod metrics;
pub mod table;

pub use chart::{chart_series, y_domain, ChartPoint, ChartSeries};
pub use csv_export::{csv_filename, to_csv_string, write_csv, CSV_HEADER};
pub use metrics::{format_metric, key_metrics_view, logo_url, quote_card, KeyMetricsView, MetricKind, QuoteCard, Trend};
pub use table::{daily_change, derive_rows, display_rows, paginate, DailyChange, DerivedRow, TablePage, TableRow, ROWS_PER_PAGE};

use serde::Serialize;

/// Fixed-point rendering. Negative zero prints as zero.
pub fn fixed(value: f64, decimals: usize) -> String {
    let value = if value == 0.0 { 0.0 } else { value };
    format!("{:.*}", decimals, value)
}

/// `$` amount scaled to T/B/M, two decimals at every tier.
pub fn format_large_number(n: f64) -> String {
    if n >= 1e12 {
        format!("${}T", fixed(n / 1e12, 2))
    } else if n >= 1e9 {
        format!("${}B", fixed(n / 1e9, 2))
    } else if n >= 1e6 {
        format!("${}M", fixed(n / 1e6, 2))
    } else {
        format!("${}", fixed(n, 2))
    }
}

/// Share count scaled to B/M/K; below a thousand the plain value is shown.
pub fn format_volume(n: f64) -> String {
    if n >= 1e9 {
        format!("{}B", fixed(n / 1e9, 2))
    } else if n >= 1e6 {
        format!("{}M", fixed(n / 1e6, 2))
    } else if n >= 1e3 {
        format!("{}K", fixed(n / 1e3, 2))
    } else {
        let n = if n == 0.0 { 0.0 } else { n };
        format!("{}", n)
    }
}

pub fn format_currency(value: f64) -> String {
    format!("${}", fixed(value, 2))
}

/// Signed percent, `+` for non-negative values.
pub fn format_change_percent(percent: f64) -> String {
    let sign = if percent >= 0.0 { "+" } else { "" };
    format!("{}{}%", sign, fixed(percent, 2))
}

/// Quote badge, e.g. `+1.23 (0.87%)` or `-1.23 (-0.87%)`.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PriceChange {
    pub text: String,
    pub is_positive: bool,
}

pub fn format_price_change(change: f64, change_percent: f64) -> PriceChange {
    let is_positive = change >= 0.0;
    let sign = if is_positive { "+" } else { "" };
    PriceChange {
        text: format!("{}{} ({}%)", sign, fixed(change, 2), fixed(change_percent, 2)),
        is_positive,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_large_number_tiers() {
        assert_eq!(format_large_number(1_500_000_000.0), "$1.50B");
        assert_eq!(format_large_number(999.0), "$999.00");
        assert_eq!(format_large_number(2.95e12), "$2.95T");
        assert_eq!(format_large_number(1_000_000.0), "$1.00M");
        assert_eq!(format_large_number(999_999.0), "$999999.00");
    }

    #[test]
    fn test_format_volume_tiers() {
        assert_eq!(format_volume(2_300_000.0), "2.30M");
        assert_eq!(format_volume(500.0), "500");
        assert_eq!(format_volume(1_000.0), "1.00K");
        assert_eq!(format_volume(4_200_000_000.0), "4.20B");
        assert_eq!(format_volume(0.0), "0");
        assert_eq!(format_volume(12.5), "12.5");
    }

    #[test]
    fn test_price_change_badge() {
        let badge = format_price_change(-1.23, -0.87);
        assert_eq!(badge.text, "-1.23 (-0.87%)");
        assert!(!badge.is_positive);

        let badge = format_price_change(0.0, 0.0);
        assert_eq!(badge.text, "+0.00 (0.00%)");
        assert!(badge.is_positive);
    }

    #[test]
    fn test_change_percent_and_negative_zero() {
        assert_eq!(format_change_percent(1.234), "+1.23%");
        assert_eq!(format_change_percent(-0.5), "-0.50%");
        assert_eq!(format_change_percent(0.0), "+0.00%");
        assert_eq!(fixed(-0.0, 2), "0.00");
    }
}

use serde::Serialize;

use crate::display::{fixed, format_currency, format_large_number, format_price_change, format_volume, PriceChange};
use crate::models::{CompanyQuote, KeyStats};

const NOT_AVAILABLE: &str = "N/A";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricKind {
    Percent,
    Currency,
    Number,
}

/// Two-decimal metric, `N/A` when the provider did not report it.
pub fn format_metric(value: Option<f64>, kind: MetricKind) -> String {
    match value {
        None => NOT_AVAILABLE.to_string(),
        Some(v) => match kind {
            MetricKind::Percent => format!("{}%", fixed(v, 2)),
            MetricKind::Currency => format_currency(v),
            MetricKind::Number => fixed(v, 2),
        },
    }
}

/// Direction hint shown under a metric.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Trend {
    pub text: String,
    pub is_positive: bool,
}

pub fn eps_growth_trend(growth: Option<f64>) -> Option<Trend> {
    let growth = growth?;
    let percent = format_metric(Some(growth * 100.0), MetricKind::Percent);
    Some(if growth > 0.0 {
        Trend { text: format!("+{} YoY", percent), is_positive: true }
    } else {
        Trend { text: format!("{} YoY", percent), is_positive: false }
    })
}

/// Dividend yield is a fraction, the five-year average a percentage.
pub fn dividend_trend(dividend_yield: Option<f64>, five_year_avg: Option<f64>) -> Option<Trend> {
    let avg = five_year_avg.filter(|a| *a != 0.0)?;
    let current = dividend_yield?;
    Some(if current > avg / 100.0 {
        Trend { text: "Above 5-year avg".to_string(), is_positive: true }
    } else {
        Trend { text: "Below 5-year avg".to_string(), is_positive: false }
    })
}

pub fn volume_trend(average: Option<f64>, average_10days: Option<f64>) -> Option<Trend> {
    let average = average.filter(|v| *v != 0.0)?;
    let recent = average_10days.filter(|v| *v != 0.0)?;
    let delta = fixed((average / recent - 1.0) * 100.0, 1);
    Some(if average > recent {
        Trend { text: format!("+{}% vs 10-day", delta), is_positive: true }
    } else {
        Trend { text: format!("{}% vs 10-day", delta), is_positive: false }
    })
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct KeyMetricsView {
    pub symbol: String,
    pub eps: String,
    pub eps_trend: Option<Trend>,
    pub dividend_yield: String,
    pub dividend_trend: Option<Trend>,
    pub beta: String,
    pub average_volume: String,
    pub volume_trend: Option<Trend>,
}

pub fn key_metrics_view(stats: &KeyStats) -> KeyMetricsView {
    KeyMetricsView {
        symbol: stats.symbol.clone(),
        eps: format_metric(stats.trailing_eps, MetricKind::Currency),
        eps_trend: eps_growth_trend(stats.eps_trailing_twelve_months_growth),
        dividend_yield: format_metric(stats.dividend_yield.map(|y| y * 100.0), MetricKind::Percent),
        dividend_trend: dividend_trend(stats.dividend_yield, stats.five_year_avg_dividend_yield),
        beta: format_metric(stats.beta, MetricKind::Number),
        average_volume: stats.average_volume.map(format_volume).unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        volume_trend: volume_trend(stats.average_volume, stats.average_volume_10days),
    }
}

/// Header card of a quote lookup.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct QuoteCard {
    pub symbol: String,
    pub name: String,
    pub exchange: String,
    pub price: String,
    pub change: PriceChange,
    pub market_cap: String,
    pub fifty_two_week_range: String,
    pub day_range: String,
    pub volume: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub long_business_summary: Option<String>,
}

/// Clearbit logo guessed from the first word of the display name.
pub fn logo_url(short_name: &str) -> Option<String> {
    let word: String = short_name
        .split_whitespace()
        .next()?
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '-')
        .collect::<String>()
        .to_lowercase();
    if word.is_empty() {
        return None;
    }
    Some(format!("https://logo.clearbit.com/{}.com", word))
}

pub fn quote_card(quote: &CompanyQuote) -> QuoteCard {
    QuoteCard {
        symbol: quote.symbol.clone(),
        name: quote.short_name.clone(),
        exchange: quote.exchange.clone(),
        price: format_currency(quote.regular_market_price),
        change: format_price_change(quote.regular_market_change, quote.regular_market_change_percent),
        market_cap: format_large_number(quote.market_cap),
        fifty_two_week_range: format!(
            "{} - {}",
            format_currency(quote.fifty_two_week_low),
            format_currency(quote.fifty_two_week_high)
        ),
        day_range: format!(
            "{} - {}",
            format_currency(quote.regular_market_day_low),
            format_currency(quote.regular_market_day_high)
        ),
        volume: format_volume(quote.regular_market_volume),
        logo_url: logo_url(&quote.short_name),
        long_business_summary: quote
            .long_business_summary
            .clone()
            .filter(|s| !s.trim().is_empty()),
    }
}

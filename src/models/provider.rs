//! Raw records as the finance-data provider returns them.
//!
//! Nothing here is validated; the services decide which fields are required.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Quote response. Only `symbol` is guaranteed by the provider.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProviderQuote {
    pub symbol: String,
    pub short_name: Option<String>,
    pub long_name: Option<String>,
    pub long_business_summary: Option<String>,
    pub full_exchange_name: Option<String>,
    pub exchange: Option<String>,
    pub quote_type: Option<String>,
    pub regular_market_price: Option<f64>,
    pub regular_market_change: Option<f64>,
    pub regular_market_change_percent: Option<f64>,
    pub regular_market_open: Option<f64>,
    pub regular_market_day_high: Option<f64>,
    pub regular_market_day_low: Option<f64>,
    pub regular_market_volume: Option<f64>,
    pub fifty_two_week_high: Option<f64>,
    pub fifty_two_week_low: Option<f64>,
    pub market_cap: Option<f64>,
    #[serde(rename = "trailingPE")]
    pub trailing_pe: Option<f64>,
    #[serde(rename = "forwardPE")]
    pub forward_pe: Option<f64>,
    pub beta: Option<f64>,
    pub dividend_yield: Option<f64>,
    pub average_volume: Option<f64>,
    #[serde(rename = "averageDailyVolume10Day")]
    pub average_daily_volume_10_day: Option<f64>,
}

/// One OHLCV observation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProviderBar {
    pub date: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SummaryModule {
    DefaultKeyStatistics,
    FinancialData,
}

impl SummaryModule {
    pub fn as_str(&self) -> &'static str {
        match self {
            SummaryModule::DefaultKeyStatistics => "defaultKeyStatistics",
            SummaryModule::FinancialData => "financialData",
        }
    }
}

/// Summary response; a module is `None` when it was not requested or the provider had nothing.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct QuoteSummary {
    #[serde(default)]
    pub default_key_statistics: Option<KeyStatisticsModule>,
    #[serde(default)]
    pub financial_data: Option<FinancialDataModule>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct KeyStatisticsModule {
    #[serde(default, deserialize_with = "provider_number")]
    pub trailing_eps: Option<f64>,
    #[serde(rename = "lastFiscalYearEPS", default, deserialize_with = "provider_number")]
    pub last_fiscal_year_eps: Option<f64>,
    #[serde(default, deserialize_with = "provider_number")]
    pub five_year_avg_dividend_yield: Option<f64>,
    #[serde(default, deserialize_with = "provider_number")]
    pub beta: Option<f64>,
}

/// Only its presence is checked; none of its fields are read.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct FinancialDataModule {}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrRaw {
    Number(f64),
    Raw {
        #[serde(default)]
        raw: Option<f64>,
    },
}

/// Summary numbers arrive either plain (`1.5`) or wrapped (`{"raw": 1.5, "fmt": "1.50"}`).
fn provider_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<NumberOrRaw> = Option::deserialize(deserializer)?;
    Ok(match value {
        Some(NumberOrRaw::Number(n)) => Some(n),
        Some(NumberOrRaw::Raw { raw }) => raw,
        None => None,
    })
}

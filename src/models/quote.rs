use serde::{Deserialize, Serialize};

/// Current trading state of one symbol, built fresh for every request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CompanyQuote {
    pub symbol: String,
    pub short_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub long_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub long_business_summary: Option<String>,
    pub exchange: String,
    pub quote_type: String,
    pub regular_market_price: f64,
    pub regular_market_change: f64,
    pub regular_market_change_percent: f64,
    pub regular_market_open: f64,
    pub regular_market_day_high: f64,
    pub regular_market_day_low: f64,
    pub regular_market_volume: f64,
    pub fifty_two_week_high: f64,
    pub fifty_two_week_low: f64,
    pub market_cap: f64,
    #[serde(rename = "trailingPE", default, skip_serializing_if = "Option::is_none")]
    pub trailing_pe: Option<f64>,
    #[serde(rename = "forwardPE", default, skip_serializing_if = "Option::is_none")]
    pub forward_pe: Option<f64>,
}

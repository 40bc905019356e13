use serde::{Deserialize, Serialize};

/// Fundamental metrics for a symbol. Every metric is optional because the
/// provider omits them freely (ETFs, recent listings, non-dividend payers).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct KeyStats {
    pub symbol: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub beta: Option<f64>,
    #[serde(rename = "trailingPE", default, skip_serializing_if = "Option::is_none")]
    pub trailing_pe: Option<f64>,
    #[serde(rename = "forwardPE", default, skip_serializing_if = "Option::is_none")]
    pub forward_pe: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub market_cap: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trailing_eps: Option<f64>,
    /// `(trailing EPS - last fiscal year EPS) / |last fiscal year EPS|`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eps_trailing_twelve_months_growth: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dividend_yield: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub five_year_avg_dividend_yield: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub average_volume: Option<f64>,
    #[serde(rename = "averageVolume10days", default, skip_serializing_if = "Option::is_none")]
    pub average_volume_10days: Option<f64>,
}

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use serde::de::DeserializeOwned;
use reqwest::{StatusCode, Url};
use serde::Deserialize;
use tokio::sync::RwLock;

use crate::config::ProviderConfig;
use crate::error::StockError;
use crate::models::{DateRange, ProviderBar, ProviderQuote, QuoteSummary, SummaryModule};
use crate::provider::traits::MarketDataProvider;

/// Page that hands out the session cookie the crumb endpoint requires.
const COOKIE_URL: &str = "https://fc.yahoo.com";
const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0 Safari/537.36";

/// Yahoo Finance REST connector (quote, chart and quoteSummary endpoints)
pub struct YahooFinanceProvider {
    base_url: Url,
    http: reqwest::Client,
    crumb: RwLock<Option<String>>,
}

impl YahooFinanceProvider {
    pub fn new(cfg: &ProviderConfig) -> Result<Self, StockError> {
        let http = reqwest::Client::builder()
            .cookie_store(true)
            .timeout(cfg.timeout())
            .user_agent(cfg.user_agent.clone().unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()))
            .build()
            .map_err(|e| StockError::ConfigError(format!("failed to build http client: {}", e)))?;

        let base_url = Url::parse(cfg.base_url.trim_end_matches('/'))
            .map_err(|e| StockError::ConfigError(format!("invalid provider base url '{}': {}", cfg.base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(StockError::ConfigError(format!("provider base url '{}' cannot take a path", cfg.base_url)));
        }

        Ok(YahooFinanceProvider {
            base_url,
            http,
            crumb: RwLock::new(None),
        })
    }

    /// Session crumb, fetched once and reused. `None` when the handshake fails;
    /// the chart endpoint works without it, quote and quoteSummary may not.
    async fn crumb(&self) -> Option<String> {
        if let Some(crumb) = self.crumb.read().await.as_ref() {
            return Some(crumb.clone());
        }

        let mut guard = self.crumb.write().await;
        if let Some(crumb) = guard.as_ref() {
            return Some(crumb.clone());
        }

        // fc.yahoo.com answers 404 but still sets the cookie
        if let Err(e) = self.http.get(COOKIE_URL).send().await {
            log::warn!("yahoo cookie handshake failed: {}", e);
        }

        let url = self.endpoint(&["v1", "test", "getcrumb"]);
        let crumb = match self.http.get(url).send().await {
            Ok(res) if res.status().is_success() => res.text().await.ok(),
            Ok(res) => {
                log::warn!("yahoo crumb request returned {}", res.status());
                None
            }
            Err(e) => {
                log::warn!("yahoo crumb request failed: {}", e);
                None
            }
        }
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty());

        if crumb.is_some() {
            *guard = crumb.clone();
        }
        crumb
    }

    /// Base url plus `segments`, each percent-encoded as a single path segment.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// A rotated crumb is answered with 401; drop it so the next call fetches a fresh one.
    async fn forget_crumb_on(&self, status: StatusCode) {
        if status == StatusCode::UNAUTHORIZED {
            log::warn!("yahoo rejected the session crumb; it will be fetched again");
            *self.crumb.write().await = None;
        }
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: Url,
        mut query: Vec<(&'static str, String)>,
        context: &str,
    ) -> Result<T, StockError> {
        if let Some(crumb) = self.crumb().await {
            query.push(("crumb", crumb));
        }

        let res = self.http
            .get(url)
            .query(&query)
            .send().await
            .map_err(|e| StockError::ProviderFetch(format!("{}: {}", context, e)))?;

        let status = res.status();
        self.forget_crumb_on(status).await;
        let body = res.text().await
            .map_err(|e| StockError::ProviderFetch(format!("{}: {}", context, e)))?;

        if !status.is_success() {
            let detail = error_description(&body).unwrap_or_else(|| status.to_string());
            return Err(StockError::ProviderFetch(format!("{}: {}", context, detail)));
        }

        serde_json::from_str(&body)
            .map_err(|e| StockError::ProviderFetch(format!("{}: unexpected response ({})", context, e)))
    }
}

#[async_trait]
impl MarketDataProvider for YahooFinanceProvider {
    async fn quote(&self, symbol: &str) -> Result<ProviderQuote, StockError> {
        let context = format!("Failed to fetch quote data for {}", symbol);
        let url = self.endpoint(&["v7", "finance", "quote"]);
        let envelope: QuoteEnvelope = self
            .get_json(url, vec![("symbols", symbol.to_string())], &context)
            .await?;

        if let Some(err) = envelope.quote_response.error {
            return Err(StockError::ProviderFetch(format!("{}: {}", context, err.describe())));
        }

        envelope.quote_response.result
            .unwrap_or_default()
            .into_iter()
            .find(|q| q.symbol.eq_ignore_ascii_case(symbol))
            .ok_or_else(|| StockError::ProviderFetch(format!("{}: no data found for symbol", context)))
    }

    async fn historical(&self, symbol: &str, range: &DateRange) -> Result<Vec<ProviderBar>, StockError> {
        let context = format!("Failed to fetch historical data for {}", symbol);
        let url = self.endpoint(&["v8", "finance", "chart", symbol]);
        let query = vec![
            ("period1", range.start.timestamp().to_string()),
            ("period2", range.end.timestamp().to_string()),
            ("interval", range.interval.provider_code().to_string()),
            ("includePrePost", "false".to_string()),
        ];
        let envelope: ChartEnvelope = self.get_json(url, query, &context).await?;

        if let Some(err) = envelope.chart.error {
            return Err(StockError::ProviderFetch(format!("{}: {}", context, err.describe())));
        }

        let result = envelope.chart.result
            .and_then(|r| r.into_iter().next())
            .ok_or_else(|| StockError::ProviderFetch(format!("{}: no data found for symbol", context)))?;

        Ok(result.into_bars())
    }

    async fn quote_summary(
        &self,
        symbol: &str,
        modules: &[SummaryModule],
    ) -> Result<QuoteSummary, StockError> {
        let context = format!("Failed to fetch key statistics for {}", symbol);
        let url = self.endpoint(&["v10", "finance", "quoteSummary", symbol]);
        let names: Vec<&str> = modules.iter().map(|m| m.as_str()).collect();
        let envelope: SummaryEnvelope = self
            .get_json(url, vec![("modules", names.join(","))], &context)
            .await?;

        if let Some(err) = envelope.quote_summary.error {
            return Err(StockError::ProviderFetch(format!("{}: {}", context, err.describe())));
        }

        envelope.quote_summary.result
            .and_then(|r| r.into_iter().next())
            .ok_or_else(|| StockError::ProviderFetch(format!("{}: no data found for symbol", context)))
    }
}

// ---- wire envelopes ----

#[derive(Debug, Deserialize)]
struct ProviderErrorBody {
    code: Option<String>,
    description: Option<String>,
}

impl ProviderErrorBody {
    fn describe(&self) -> String {
        match (&self.code, &self.description) {
            (_, Some(d)) if !d.is_empty() => d.clone(),
            (Some(c), _) => c.clone(),
            _ => "unknown provider error".to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct QuoteEnvelope {
    quote_response: ResultList<ProviderQuote>,
}

#[derive(Debug, Deserialize)]
struct ChartEnvelope {
    chart: ResultList<ChartResult>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SummaryEnvelope {
    quote_summary: ResultList<QuoteSummary>,
}

#[derive(Debug, Deserialize)]
struct ResultList<T> {
    result: Option<Vec<T>>,
    error: Option<ProviderErrorBody>,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    #[serde(default)]
    timestamp: Vec<i64>,
    indicators: ChartIndicators,
}

#[derive(Debug, Deserialize)]
struct ChartIndicators {
    #[serde(default)]
    quote: Vec<ChartQuote>,
}

#[derive(Debug, Default, Deserialize)]
struct ChartQuote {
    #[serde(default)]
    open: Vec<Option<f64>>,
    #[serde(default)]
    high: Vec<Option<f64>>,
    #[serde(default)]
    low: Vec<Option<f64>>,
    #[serde(default)]
    close: Vec<Option<f64>>,
    #[serde(default)]
    volume: Vec<Option<f64>>,
}

impl ChartResult {
    /// Zip the columnar chart payload into bars. Rows with a null price are
    /// dropped, as is any row that does not advance the timestamp (Yahoo
    /// repeats the live bar at the end of the series).
    fn into_bars(self) -> Vec<ProviderBar> {
        let q = self.indicators.quote.into_iter().next().unwrap_or_default();
        let at = |col: &Vec<Option<f64>>, i: usize| col.get(i).copied().flatten();

        let mut bars: Vec<ProviderBar> = Vec::with_capacity(self.timestamp.len());
        let mut last_ts: Option<i64> = None;

        for (i, ts) in self.timestamp.iter().copied().enumerate() {
            let (Some(open), Some(high), Some(low), Some(close)) =
                (at(&q.open, i), at(&q.high, i), at(&q.low, i), at(&q.close, i))
            else {
                continue;
            };
            if last_ts.map_or(false, |prev| ts <= prev) {
                continue;
            }
            let Some(date) = Utc.timestamp_opt(ts, 0).single() else { continue };

            bars.push(ProviderBar {
                date,
                open,
                high,
                low,
                close,
                volume: at(&q.volume, i).unwrap_or(0.0),
            });
            last_ts = Some(ts);
        }

        bars
    }
}

fn error_description(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    ["chart", "quoteSummary", "quoteResponse", "finance"]
        .iter()
        .filter_map(|key| value.get(key)?.get("error"))
        .find(|e| !e.is_null())
        .and_then(|e| serde_json::from_value::<ProviderErrorBody>(e.clone()).ok())
        .map(|e| e.describe())
}

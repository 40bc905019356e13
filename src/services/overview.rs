use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::{ErrorMessage, StockError};
use crate::models::{CompanyQuote, HistoricalData, KeyStats};
use crate::provider::MarketDataProvider;
use crate::services::{build_key_stats, fetch_historical_data, fetch_quote};

/// Outcome of one lookup section. Sections succeed or fail on their own.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(untagged)]
pub enum Section<T> {
    Ready { data: T },
    Failed { error: ErrorMessage },
}

impl<T> Section<T> {
    fn from_result(section: &str, symbol: &str, result: Result<T, StockError>) -> Self {
        match result {
            Ok(data) => Section::Ready { data },
            Err(e) => {
                log::error!("{} lookup failed for {}: {}", section, symbol, e);
                Section::Failed { error: ErrorMessage::from(&e) }
            }
        }
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            Section::Ready { data } => Some(data),
            Section::Failed { .. } => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Overview {
    pub symbol: String,
    pub quote: Section<CompanyQuote>,
    pub history: Section<HistoricalData>,
    pub key_stats: Section<KeyStats>,
}

/// Run the quote, history and key-statistics lookups side by side.
/// Unlike the key-statistics join this waits for all three and reports each.
pub async fn fetch_overview(
    provider: &dyn MarketDataProvider,
    symbol: &str,
    period: &str,
    now: DateTime<Utc>,
) -> Overview {
    let (quote, history, key_stats) = tokio::join!(
        fetch_quote(provider, symbol),
        fetch_historical_data(provider, symbol, period, now),
        build_key_stats(provider, symbol),
    );

    Overview {
        symbol: symbol.to_string(),
        quote: Section::from_result("quote", symbol, quote),
        history: Section::from_result("history", symbol, history),
        key_stats: Section::from_result("key statistics", symbol, key_stats),
    }
}

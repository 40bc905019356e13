use async_trait::async_trait;

use crate::error::StockError;
use crate::models::{DateRange, ProviderBar, ProviderQuote, QuoteSummary, SummaryModule};

/// The `MarketDataProvider` trait is the only way the services reach the
/// finance-data source. Implemented by the Yahoo client and the in-memory mock.
///
/// Every failure (transport, auth, rate limit, unknown symbol) is reported as
/// `StockError::ProviderFetch`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Current quote for a symbol
    async fn quote(&self, symbol: &str) -> Result<ProviderQuote, StockError>;

    /// Bars inside `range`, oldest first, sampled at `range.interval`
    async fn historical(&self, symbol: &str, range: &DateRange) -> Result<Vec<ProviderBar>, StockError>;

    /// Selected fundamental modules for a symbol
    async fn quote_summary(
        &self,
        symbol: &str,
        modules: &[SummaryModule],
    ) -> Result<QuoteSummary, StockError>;
}

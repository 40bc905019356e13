use crate::error::StockError;
use crate::models::{KeyStatisticsModule, KeyStats, ProviderQuote, SummaryModule};
use crate::provider::MarketDataProvider;

/// Gather key statistics for `symbol`.
///
/// The quote, `defaultKeyStatistics` and `financialData` queries run
/// concurrently; the first failure aborts the others and no partial
/// record is returned.
pub async fn build_key_stats(
    provider: &dyn MarketDataProvider,
    symbol: &str,
) -> Result<KeyStats, StockError> {
    log::debug!("fetching key statistics for {}", symbol);

    let (quote, statistics, _financial) = tokio::try_join!(
        provider.quote(symbol),
        provider.quote_summary(symbol, &[SummaryModule::DefaultKeyStatistics]),
        provider.quote_summary(symbol, &[SummaryModule::FinancialData]),
    )?;

    // financialData contributes no field yet; it still has to succeed
    Ok(merge_key_stats(symbol, &quote, statistics.default_key_statistics.as_ref()))
}

/// Quote figures win for the fields both sources carry (beta falls back to
/// the key-statistics module); EPS and the five-year dividend average come
/// from the key-statistics module.
pub fn merge_key_stats(
    symbol: &str,
    quote: &ProviderQuote,
    statistics: Option<&KeyStatisticsModule>,
) -> KeyStats {
    let trailing_eps = statistics.and_then(|s| s.trailing_eps);
    let last_year_eps = statistics.and_then(|s| s.last_fiscal_year_eps);

    KeyStats {
        symbol: symbol.to_string(),
        beta: quote.beta.or_else(|| statistics.and_then(|s| s.beta)),
        trailing_pe: quote.trailing_pe,
        forward_pe: quote.forward_pe,
        market_cap: quote.market_cap,
        trailing_eps,
        eps_trailing_twelve_months_growth: eps_growth(trailing_eps, last_year_eps),
        dividend_yield: quote.dividend_yield,
        five_year_avg_dividend_yield: statistics.and_then(|s| s.five_year_avg_dividend_yield),
        average_volume: quote.average_volume,
        average_volume_10days: quote.average_daily_volume_10_day,
    }
}

/// `(current - last_year) / |last_year|`, or `None` when an operand is
/// missing, non-finite, or `last_year` is zero.
pub fn eps_growth(current: Option<f64>, last_year: Option<f64>) -> Option<f64> {
    let (current, last_year) = (current?, last_year?);
    if !current.is_finite() || !last_year.is_finite() || last_year == 0.0 {
        return None;
    }
    Some((current - last_year) / last_year.abs())
}

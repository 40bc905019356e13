use crate::error::StockError;
use crate::models::{CompanyQuote, ProviderQuote};
use crate::provider::MarketDataProvider;

/// Fetch and normalize the quote for `symbol`. Provider errors propagate unchanged.
pub async fn fetch_quote(
    provider: &dyn MarketDataProvider,
    symbol: &str,
) -> Result<CompanyQuote, StockError> {
    log::debug!("fetching quote for {}", symbol);
    let raw = provider.quote(symbol).await?;
    normalize_quote(raw)
}

/// Map a provider quote onto `CompanyQuote`.
///
/// Display name resolves `shortName` → `longName` → `symbol`, exchange resolves
/// `fullExchangeName` → `exchange`. A missing required field is reported as
/// `DataIncomplete` rather than defaulted.
pub fn normalize_quote(raw: ProviderQuote) -> Result<CompanyQuote, StockError> {
    if raw.symbol.trim().is_empty() {
        return Err(StockError::data_incomplete("symbol", "<unknown>"));
    }
    let symbol = raw.symbol.clone();
    let require = |value: Option<f64>, field: &str| {
        value.ok_or_else(|| StockError::data_incomplete(field, symbol.as_str()))
    };

    let price = require(raw.regular_market_price, "regularMarketPrice")?;
    let change = require(raw.regular_market_change, "regularMarketChange")?;
    let change_percent = require(raw.regular_market_change_percent, "regularMarketChangePercent")?;
    let open = require(raw.regular_market_open, "regularMarketOpen")?;
    let day_high = require(raw.regular_market_day_high, "regularMarketDayHigh")?;
    let day_low = require(raw.regular_market_day_low, "regularMarketDayLow")?;
    let volume = require(raw.regular_market_volume, "regularMarketVolume")?;
    let year_high = require(raw.fifty_two_week_high, "fiftyTwoWeekHigh")?;
    let year_low = require(raw.fifty_two_week_low, "fiftyTwoWeekLow")?;
    let market_cap = require(raw.market_cap, "marketCap")?;

    let exchange = first_non_empty([raw.full_exchange_name.as_deref(), raw.exchange.as_deref()])
        .ok_or_else(|| StockError::data_incomplete("exchange", symbol.as_str()))?
        .to_string();
    let quote_type = first_non_empty([raw.quote_type.as_deref()])
        .ok_or_else(|| StockError::data_incomplete("quoteType", symbol.as_str()))?
        .to_string();
    let short_name = first_non_empty([
        raw.short_name.as_deref(),
        raw.long_name.as_deref(),
        Some(raw.symbol.as_str()),
    ])
    .unwrap_or(raw.symbol.as_str())
    .to_string();

    let change_percent = consistent_change_percent(&symbol, price, change, change_percent)?;

    Ok(CompanyQuote {
        symbol,
        short_name,
        long_name: raw.long_name,
        long_business_summary: raw.long_business_summary,
        exchange,
        quote_type,
        regular_market_price: price,
        regular_market_change: change,
        regular_market_change_percent: change_percent,
        regular_market_open: open,
        regular_market_day_high: day_high,
        regular_market_day_low: day_low,
        regular_market_volume: volume,
        fifty_two_week_high: year_high,
        fifty_two_week_low: year_low,
        market_cap,
        trailing_pe: raw.trailing_pe,
        forward_pe: raw.forward_pe,
    })
}

fn first_non_empty<'a, I>(candidates: I) -> Option<&'a str>
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    candidates
        .into_iter()
        .flatten()
        .find(|s| !s.trim().is_empty())
}

fn sign(x: f64) -> i8 {
    if x > 0.0 {
        1
    } else if x < 0.0 {
        -1
    } else {
        0
    }
}

/// The badge styling keys off the change amount alone, so the percent must
/// carry the same sign. When it does not, re-derive it from the implied
/// previous close. With no previous close the provider's magnitude is kept
/// under the change's sign; a zero percent there cannot be repaired.
fn consistent_change_percent(
    symbol: &str,
    price: f64,
    change: f64,
    percent: f64,
) -> Result<f64, StockError> {
    if sign(change) == sign(percent) {
        return Ok(percent);
    }

    let prev_close = (price - change).abs();
    let repaired = if change == 0.0 {
        0.0
    } else if prev_close != 0.0 {
        change / prev_close * 100.0
    } else if percent != 0.0 {
        percent.abs().copysign(change)
    } else {
        return Err(StockError::data_incomplete("regularMarketChangePercent", symbol));
    };
    log::warn!(
        "quote for {} has change {} but change percent {}; using {}",
        symbol, change, percent, repaired
    );
    Ok(repaired)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::traits::MockMarketDataProvider;

    fn complete_quote() -> ProviderQuote {
        ProviderQuote {
            symbol: "AAPL".to_string(),
            short_name: Some("Apple Inc.".to_string()),
            long_name: Some("Apple Inc.".to_string()),
            full_exchange_name: Some("NasdaqGS".to_string()),
            exchange: Some("NMS".to_string()),
            quote_type: Some("EQUITY".to_string()),
            regular_market_price: Some(140.0),
            regular_market_change: Some(-1.23),
            regular_market_change_percent: Some(-0.87),
            regular_market_open: Some(141.0),
            regular_market_day_high: Some(142.0),
            regular_market_day_low: Some(139.5),
            regular_market_volume: Some(50_000_000.0),
            fifty_two_week_high: Some(199.6),
            fifty_two_week_low: Some(124.2),
            market_cap: Some(2.2e12),
            trailing_pe: Some(22.4),
            ..Default::default()
        }
    }

    #[test]
    fn test_normalize_complete_quote() {
        let quote = normalize_quote(complete_quote()).unwrap();
        assert_eq!(quote.symbol, "AAPL");
        assert_eq!(quote.short_name, "Apple Inc.");
        assert_eq!(quote.exchange, "NasdaqGS");
        assert_eq!(quote.regular_market_change, -1.23);
        assert_eq!(quote.regular_market_change_percent, -0.87);
        assert_eq!(quote.trailing_pe, Some(22.4));
        assert_eq!(quote.forward_pe, None);
    }

    #[test]
    fn test_short_name_fallback_order() {
        let mut raw = complete_quote();
        raw.short_name = Some("  ".to_string());
        raw.long_name = Some("Apple Incorporated".to_string());
        assert_eq!(normalize_quote(raw.clone()).unwrap().short_name, "Apple Incorporated");

        raw.long_name = None;
        assert_eq!(normalize_quote(raw).unwrap().short_name, "AAPL");
    }

    #[test]
    fn test_exchange_falls_back_to_code() {
        let mut raw = complete_quote();
        raw.full_exchange_name = None;
        assert_eq!(normalize_quote(raw).unwrap().exchange, "NMS");
    }

    #[test]
    fn test_missing_required_field_is_data_incomplete() {
        let mut raw = complete_quote();
        raw.market_cap = None;
        match normalize_quote(raw) {
            Err(StockError::DataIncomplete { field, symbol }) => {
                assert_eq!(field, "marketCap");
                assert_eq!(symbol, "AAPL");
            }
            other => panic!("expected DataIncomplete, got {:?}", other),
        }
    }

    #[test]
    fn test_disagreeing_percent_is_rederived() {
        let mut raw = complete_quote();
        raw.regular_market_price = Some(99.0);
        raw.regular_market_change = Some(-1.0);
        raw.regular_market_change_percent = Some(0.5);
        let quote = normalize_quote(raw).unwrap();
        assert!((quote.regular_market_change_percent - (-1.0)).abs() < 1e-9);

        let mut flat = complete_quote();
        flat.regular_market_change = Some(0.0);
        flat.regular_market_change_percent = Some(0.0001);
        assert_eq!(normalize_quote(flat).unwrap().regular_market_change_percent, 0.0);
    }

    #[test]
    fn test_zero_previous_close_keeps_magnitude_with_change_sign() {
        let mut raw = complete_quote();
        raw.regular_market_price = Some(0.05);
        raw.regular_market_change = Some(0.05);
        raw.regular_market_change_percent = Some(-3.0);
        let quote = normalize_quote(raw.clone()).unwrap();
        assert_eq!(quote.regular_market_change, 0.05);
        assert_eq!(quote.regular_market_change_percent, 3.0);

        raw.regular_market_change_percent = Some(0.0);
        match normalize_quote(raw) {
            Err(StockError::DataIncomplete { field, .. }) => assert_eq!(field, "regularMarketChangePercent"),
            other => panic!("expected DataIncomplete, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_fetch_quote_propagates_provider_error() {
        let mut provider = MockMarketDataProvider::new();
        provider
            .expect_quote()
            .returning(|_| Err(StockError::ProviderFetch("Failed to fetch quote data for AAPL".into())));

        let err = fetch_quote(&provider, "AAPL").await.unwrap_err();
        assert!(matches!(err, StockError::ProviderFetch(ref m) if m.contains("AAPL")));
    }
}

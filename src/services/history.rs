use chrono::{DateTime, Months, Utc};

use crate::error::StockError;
use crate::models::{DateRange, HistoricalData, Period, ProviderBar};
use crate::provider::MarketDataProvider;

/// Fetch bars for the period named by `keyword` and shape them into parallel arrays.
pub async fn fetch_historical_data(
    provider: &dyn MarketDataProvider,
    symbol: &str,
    keyword: &str,
    now: DateTime<Utc>,
) -> Result<HistoricalData, StockError> {
    let range = period_to_range(keyword, now);
    log::debug!(
        "fetching {} history for {} from {} to {}",
        range.interval, symbol, range.start, range.end
    );
    let bars = provider.historical(symbol, &range).await?;
    Ok(build_series(symbol, &bars))
}

/// Provider date range for a period keyword, ending at `now`.
/// Unrecognized keywords get the one-month daily range.
pub fn period_to_range(keyword: &str, now: DateTime<Utc>) -> DateRange {
    range_for(Period::from_keyword(keyword), now)
}

/// Calendar-month lookback that clamps to the end of a shorter month
/// (Mar 31 - 1m = Feb 29) rather than rolling over into the next one (Mar 2).
pub fn range_for(period: Period, now: DateTime<Utc>) -> DateRange {
    let start = now
        .checked_sub_months(Months::new(period.months_back()))
        .unwrap_or(DateTime::<Utc>::MIN_UTC);

    DateRange {
        start,
        end: now,
        interval: period.interval(),
    }
}

/// Split bars into six equal-length arrays, keeping provider order.
pub fn build_series(symbol: &str, bars: &[ProviderBar]) -> HistoricalData {
    let n = bars.len();
    let mut data = HistoricalData {
        symbol: symbol.to_string(),
        timestamps: Vec::with_capacity(n),
        opens: Vec::with_capacity(n),
        highs: Vec::with_capacity(n),
        lows: Vec::with_capacity(n),
        closes: Vec::with_capacity(n),
        volumes: Vec::with_capacity(n),
    };

    for bar in bars {
        data.timestamps.push(bar.date.timestamp());
        data.opens.push(bar.open);
        data.highs.push(bar.high);
        data.lows.push(bar.low);
        data.closes.push(bar.close);
        data.volumes.push(bar.volume);
    }

    data
}

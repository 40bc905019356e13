use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::{Datelike, Duration, Weekday};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::StockError;
use crate::models::{
    BarInterval, DateRange, FinancialDataModule, KeyStatisticsModule, ProviderBar, ProviderQuote,
    QuoteSummary, SummaryModule,
};
use crate::provider::traits::MarketDataProvider;

/// Which provider call a `MockProvider` should fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MockCall {
    Quote,
    Historical,
    KeyStatistics,
    FinancialData,
}

/// In-memory provider for development and tests.
///
/// Quotes and summaries are seeded for a handful of symbols; bars are either
/// supplied explicitly or generated as a seeded random walk over the range.
pub struct MockProvider {
    quotes: HashMap<String, ProviderQuote>,
    summaries: HashMap<String, QuoteSummary>,
    bars: HashMap<String, Vec<ProviderBar>>,
    failures: HashSet<MockCall>,
    calls: AtomicUsize,
}

impl MockProvider {
    pub fn new() -> Self {
        let mut provider = Self::empty();
        provider.initialize_test_data();
        provider
    }

    /// A provider that knows no symbols.
    pub fn empty() -> Self {
        MockProvider {
            quotes: HashMap::new(),
            summaries: HashMap::new(),
            bars: HashMap::new(),
            failures: HashSet::new(),
            calls: AtomicUsize::new(0),
        }
    }

    fn initialize_test_data(&mut self) {
        let seeds = [
            ("AAPL", "Apple Inc.", "NasdaqGS", 189.84, -1.23, 2.95e12, 6.43, 6.11, 0.0051),
            ("MSFT", "Microsoft Corporation", "NasdaqGS", 415.50, 3.12, 3.09e12, 11.55, 9.68, 0.0072),
            ("TSLA", "Tesla, Inc.", "NasdaqGS", 242.10, 5.66, 7.71e11, 3.12, 4.30, 0.0),
        ];

        for (symbol, name, exchange, price, change, cap, eps, last_eps, dividend) in seeds {
            let prev_close = price - change;
            self.quotes.insert(symbol.to_string(), ProviderQuote {
                symbol: symbol.to_string(),
                short_name: Some(name.to_string()),
                long_name: Some(name.to_string()),
                long_business_summary: Some(format!("{} is a mock listing used for local development.", name)),
                full_exchange_name: Some(exchange.to_string()),
                exchange: Some("NMS".to_string()),
                quote_type: Some("EQUITY".to_string()),
                regular_market_price: Some(price),
                regular_market_change: Some(change),
                regular_market_change_percent: Some(change / prev_close * 100.0),
                regular_market_open: Some(prev_close),
                regular_market_day_high: Some(price.max(prev_close) * 1.01),
                regular_market_day_low: Some(price.min(prev_close) * 0.99),
                regular_market_volume: Some(52_000_000.0),
                fifty_two_week_high: Some(price * 1.2),
                fifty_two_week_low: Some(price * 0.75),
                market_cap: Some(cap),
                trailing_pe: Some(price / eps),
                forward_pe: Some(price / (eps * 1.1)),
                beta: Some(1.2),
                dividend_yield: if dividend > 0.0 { Some(dividend) } else { None },
                average_volume: Some(55_000_000.0),
                average_daily_volume_10_day: Some(50_000_000.0),
            });
            self.summaries.insert(symbol.to_string(), QuoteSummary {
                default_key_statistics: Some(KeyStatisticsModule {
                    trailing_eps: Some(eps),
                    last_fiscal_year_eps: Some(last_eps),
                    five_year_avg_dividend_yield: if dividend > 0.0 { Some(dividend * 100.0 * 0.9) } else { None },
                    beta: Some(1.2),
                }),
                financial_data: Some(FinancialDataModule::default()),
            });
        }
    }

    pub fn with_quote(mut self, quote: ProviderQuote) -> Self {
        self.quotes.insert(quote.symbol.to_uppercase(), quote);
        self
    }

    pub fn with_summary(mut self, symbol: &str, summary: QuoteSummary) -> Self {
        self.summaries.insert(symbol.to_uppercase(), summary);
        self
    }

    /// Serve these bars (filtered to the requested range) instead of generating them.
    pub fn with_bars(mut self, symbol: &str, bars: Vec<ProviderBar>) -> Self {
        self.bars.insert(symbol.to_uppercase(), bars);
        self
    }

    pub fn failing(mut self, call: MockCall) -> Self {
        self.failures.insert(call);
        self
    }

    /// Number of provider calls served so far, failed ones included.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn check(&self, call: MockCall, symbol: &str) -> Result<(), StockError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failures.contains(&call) {
            return Err(StockError::ProviderFetch(format!(
                "mock provider failure ({:?}) for {}",
                call, symbol
            )));
        }
        Ok(())
    }

    fn unknown(symbol: &str) -> StockError {
        StockError::ProviderFetch(format!("No data found for symbol {}", symbol))
    }

    fn generate_bars(&self, symbol: &str, range: &DateRange) -> Vec<ProviderBar> {
        let seed = symbol.bytes().fold(17u64, |acc, b| acc.wrapping_mul(31).wrapping_add(b as u64));
        let mut rng = StdRng::seed_from_u64(seed);
        let mut last_close = self
            .quotes
            .get(symbol)
            .and_then(|q| q.regular_market_price)
            .unwrap_or(100.0);

        let step = match range.interval {
            BarInterval::Daily => Duration::days(1),
            BarInterval::Weekly => Duration::weeks(1),
        };

        let mut bars = Vec::new();
        let mut day = range.start;
        while day <= range.end {
            let weekend = matches!(day.weekday(), Weekday::Sat | Weekday::Sun);
            if range.interval == BarInterval::Weekly || !weekend {
                let open = last_close;
                let close = (open * (1.0 + rng.gen_range(-0.02..0.02))).max(1.0);
                let high = open.max(close) * (1.0 + rng.gen_range(0.0..0.01));
                let low = open.min(close) * (1.0 - rng.gen_range(0.0..0.01));
                let volume = rng.gen_range(10_000_000.0..90_000_000.0_f64).round();
                bars.push(ProviderBar { date: day, open, high, low, close, volume });
                last_close = close;
            }
            day = day + step;
        }
        bars
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MarketDataProvider for MockProvider {
    async fn quote(&self, symbol: &str) -> Result<ProviderQuote, StockError> {
        self.check(MockCall::Quote, symbol)?;
        self.quotes
            .get(&symbol.to_uppercase())
            .cloned()
            .ok_or_else(|| Self::unknown(symbol))
    }

    async fn historical(&self, symbol: &str, range: &DateRange) -> Result<Vec<ProviderBar>, StockError> {
        self.check(MockCall::Historical, symbol)?;
        let key = symbol.to_uppercase();
        if let Some(bars) = self.bars.get(&key) {
            return Ok(bars
                .iter()
                .filter(|b| b.date >= range.start && b.date <= range.end)
                .cloned()
                .collect());
        }
        if !self.quotes.contains_key(&key) {
            return Err(Self::unknown(symbol));
        }
        Ok(self.generate_bars(&key, range))
    }

    async fn quote_summary(
        &self,
        symbol: &str,
        modules: &[SummaryModule],
    ) -> Result<QuoteSummary, StockError> {
        for module in modules {
            let call = match module {
                SummaryModule::DefaultKeyStatistics => MockCall::KeyStatistics,
                SummaryModule::FinancialData => MockCall::FinancialData,
            };
            self.check(call, symbol)?;
        }

        let full = self
            .summaries
            .get(&symbol.to_uppercase())
            .ok_or_else(|| Self::unknown(symbol))?;

        Ok(QuoteSummary {
            default_key_statistics: if modules.contains(&SummaryModule::DefaultKeyStatistics) {
                full.default_key_statistics.clone()
            } else {
                None
            },
            financial_data: if modules.contains(&SummaryModule::FinancialData) {
                full.financial_data.clone()
            } else {
                None
            },
        })
    }
}

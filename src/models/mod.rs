pub mod history;
pub mod key_stats;
pub mod provider;
pub mod quote;

pub use history::{BarInterval, DateRange, HistoricalData, Period};
pub use key_stats::KeyStats;
pub use provider::{
    FinancialDataModule, KeyStatisticsModule, ProviderBar, ProviderQuote, QuoteSummary,
    SummaryModule,
};
pub use quote::CompanyQuote;

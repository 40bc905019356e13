//! Data-shaping services
//!
//! Each service turns provider responses into one domain record. They share
//! nothing but the `MarketDataProvider` they are handed.

pub mod history;
pub mod key_stats;
pub mod overview;
pub mod quote;

pub use history::{build_series, fetch_historical_data, period_to_range, range_for};
pub use key_stats::{build_key_stats, eps_growth, merge_key_stats};
pub use overview::{fetch_overview, Overview, Section};
pub use quote::{fetch_quote, normalize_quote};

pub mod mocks;
pub mod traits;
pub mod yahoo;

pub use mocks::{MockCall, MockProvider};
pub use traits::MarketDataProvider;
pub use yahoo::YahooFinanceProvider;

use std::sync::Arc;

use crate::config::ProviderConfig;
use crate::error::StockError;

/// Build the provider selected by configuration.
pub fn from_config(cfg: &ProviderConfig) -> Result<Arc<dyn MarketDataProvider>, StockError> {
    if cfg.use_mock {
        log::info!("using mock market data provider");
        Ok(Arc::new(MockProvider::new()))
    } else {
        log::info!("using {} provider at {}", cfg.name, cfg.base_url);
        Ok(Arc::new(YahooFinanceProvider::new(cfg)?))
    }
}

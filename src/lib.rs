//! 주식 조회 서비스 라이브러리
//!
//! 시세, 가격 이력, 핵심 지표를 조회해 화면 표시용으로 가공합니다.

pub mod api;
pub mod config;
pub mod display;
pub mod error;
pub mod models;
pub mod provider;
pub mod services;
pub mod utils;

// 핵심 타입 재노출
pub use crate::error::StockError;
pub use crate::models::{CompanyQuote, HistoricalData, KeyStats, Period};
pub use crate::provider::MarketDataProvider;

/// 버전 정보
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

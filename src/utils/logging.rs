//! 로깅 유틸리티
//!
//! 로그 초기화 및 조회 로그 헬퍼

use env_logger::Builder;
use log::LevelFilter;
use std::env;

use crate::error::StockError;

/// 로깅 시스템 초기화. RUST_LOG가 있으면 설정 레벨보다 우선
pub fn init(default_level: &str) -> Result<(), StockError> {
    let log_level = env::var("RUST_LOG").unwrap_or_else(|_| default_level.to_string());

    let mut builder = Builder::new();
    builder
        .filter_level(parse_level(&log_level))
        .format_timestamp_millis();

    // RUST_LOG 모듈별 지시자 (예: "stocklens=debug,tower_http=info")
    if log_level.contains('=') {
        builder.parse_filters(&log_level);
    }

    builder
        .try_init()
        .map_err(|e| StockError::ConfigError(format!("logger already initialised: {}", e)))?;

    log::info!("로깅 시스템 초기화 완료: 레벨 = {}", log_level);
    Ok(())
}

fn parse_level(level: &str) -> LevelFilter {
    match level.to_lowercase().as_str() {
        "trace" => LevelFilter::Trace,
        "debug" => LevelFilter::Debug,
        "info" => LevelFilter::Info,
        "warn" => LevelFilter::Warn,
        "error" => LevelFilter::Error,
        "off" => LevelFilter::Off,
        _ => LevelFilter::Info,
    }
}

/// 조회 요청 로그
pub fn log_lookup(endpoint: &str, symbol: &str) {
    log::info!("조회 요청: {} - 심볼: {}", endpoint, symbol);
}

/// 오류 로그
pub fn log_error(context: &str, error: &StockError) {
    log::error!("오류 발생 - {}: {}", context, error);
}

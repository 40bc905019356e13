// 주식 조회 핸들러들

use axum::extract::{Query, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::Utc;
use serde::Deserialize;

use crate::api::routes::AppState;
use crate::display::{
  chart_series, csv_filename, key_metrics_view, paginate, quote_card, to_csv_string, ChartSeries,
  KeyMetricsView, QuoteCard, TablePage,
};
use crate::error::{ErrorMessage, StockError};
use crate::models::{CompanyQuote, HistoricalData, KeyStats};
use crate::services::{self, Overview};
use crate::utils::logging;

/// 기간 미지정 시 기본값
const DEFAULT_PERIOD: &str = "1m";

/// 공통 쿼리 파라미터
#[derive(Debug, Default, Deserialize)]
pub struct StockQuery {
  pub symbol: Option<String>,
  pub period: Option<String>,
  /// 숫자가 아니면 400 이므로 문자열로 받음
  pub page: Option<String>,
}

impl StockQuery {
  /// 공백 제거 후 대문자 심볼
  pub fn require_symbol(&self) -> Result<String, StockError> {
    let symbol = self.symbol.as_deref().map(str::trim).unwrap_or_default();
    if symbol.is_empty() {
      return Err(StockError::MissingParameter("Stock symbol is required".to_string()));
    }
    Ok(symbol.to_uppercase())
  }

  pub fn period(&self) -> &str {
    self.period.as_deref().unwrap_or(DEFAULT_PERIOD)
  }

  pub fn page(&self) -> Result<usize, StockError> {
    match self.page.as_deref().map(str::trim) {
      None | Some("") => Ok(0),
      Some(raw) => raw
        .parse::<usize>()
        .map_err(|_| StockError::InvalidParameter(format!("page must be a non-negative integer, got '{}'", raw))),
    }
  }
}

/// 라우트 경계에서만 `{message}` 봉투로 변환
#[derive(Debug)]
pub struct ApiError(pub StockError);

impl From<StockError> for ApiError {
  fn from(e: StockError) -> Self {
    ApiError(e)
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let status = if self.0.is_client_error() {
      StatusCode::BAD_REQUEST
    } else {
      logging::log_error("stock lookup", &self.0);
      StatusCode::INTERNAL_SERVER_ERROR
    };
    (status, Json(ErrorMessage::from(&self.0))).into_response()
  }
}

type ApiResult<T> = Result<Json<T>, ApiError>;

async fn load_history(state: &AppState, symbol: &str, period: &str) -> Result<HistoricalData, StockError> {
  services::fetch_historical_data(state.provider.as_ref(), symbol, period, Utc::now()).await
}

pub async fn get_quote(State(state): State<AppState>, Query(q): Query<StockQuery>) -> ApiResult<CompanyQuote> {
  let symbol = q.require_symbol()?;
  logging::log_lookup("quote", &symbol);
  Ok(Json(services::fetch_quote(state.provider.as_ref(), &symbol).await?))
}

pub async fn get_history(State(state): State<AppState>, Query(q): Query<StockQuery>) -> ApiResult<HistoricalData> {
  let symbol = q.require_symbol()?;
  logging::log_lookup("history", &symbol);
  Ok(Json(load_history(&state, &symbol, q.period()).await?))
}

pub async fn get_key_stats(State(state): State<AppState>, Query(q): Query<StockQuery>) -> ApiResult<KeyStats> {
  let symbol = q.require_symbol()?;
  logging::log_lookup("key-stats", &symbol);
  Ok(Json(services::build_key_stats(state.provider.as_ref(), &symbol).await?))
}

pub async fn get_overview(State(state): State<AppState>, Query(q): Query<StockQuery>) -> ApiResult<Overview> {
  let symbol = q.require_symbol()?;
  logging::log_lookup("overview", &symbol);
  Ok(Json(services::fetch_overview(state.provider.as_ref(), &symbol, q.period(), Utc::now()).await))
}

pub async fn get_table(State(state): State<AppState>, Query(q): Query<StockQuery>) -> ApiResult<TablePage> {
  let symbol = q.require_symbol()?;
  let page = q.page()?;
  logging::log_lookup("table", &symbol);
  let data = load_history(&state, &symbol, q.period()).await?;
  Ok(Json(paginate(&data, page)))
}

pub async fn get_chart(State(state): State<AppState>, Query(q): Query<StockQuery>) -> ApiResult<ChartSeries> {
  let symbol = q.require_symbol()?;
  logging::log_lookup("chart", &symbol);
  let data = load_history(&state, &symbol, q.period()).await?;
  Ok(Json(chart_series(&data)))
}

pub async fn get_key_metrics(State(state): State<AppState>, Query(q): Query<StockQuery>) -> ApiResult<KeyMetricsView> {
  let symbol = q.require_symbol()?;
  logging::log_lookup("key-metrics", &symbol);
  let stats = services::build_key_stats(state.provider.as_ref(), &symbol).await?;
  Ok(Json(key_metrics_view(&stats)))
}

pub async fn get_quote_card(State(state): State<AppState>, Query(q): Query<StockQuery>) -> ApiResult<QuoteCard> {
  let symbol = q.require_symbol()?;
  logging::log_lookup("quote-card", &symbol);
  let quote = services::fetch_quote(state.provider.as_ref(), &symbol).await?;
  Ok(Json(quote_card(&quote)))
}

/// CSV 다운로드
pub async fn export_csv(State(state): State<AppState>, Query(q): Query<StockQuery>) -> Result<Response, ApiError> {
  let symbol = q.require_symbol()?;
  logging::log_lookup("export", &symbol);
  let data = load_history(&state, &symbol, q.period()).await?;
  let body = to_csv_string(&data)?;
  let disposition = format!("attachment; filename=\"{}\"", csv_filename(&symbol));

  Ok((
    [
      (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
      (header::CONTENT_DISPOSITION, disposition),
    ],
    body,
  )
    .into_response())
}

#[cfg(test)]
mod tests {
  use super::*;
  use rstest::rstest;

  fn query(symbol: Option<&str>, page: Option<&str>) -> StockQuery {
    StockQuery {
      symbol: symbol.map(str::to_string),
      period: None,
      page: page.map(str::to_string),
    }
  }

  #[rstest]
  #[case(Some(" aapl "), Some("AAPL"))]
  #[case(Some("msft"), Some("MSFT"))]
  #[case(Some("   "), None)]
  #[case(None, None)]
  fn test_require_symbol(#[case] raw: Option<&str>, #[case] expected: Option<&str>) {
    let result = query(raw, None).require_symbol();
    match expected {
      Some(symbol) => assert_eq!(result.unwrap(), symbol),
      None => {
        let err = result.unwrap_err();
        assert!(err.is_client_error());
        assert_eq!(err.to_string(), "Stock symbol is required");
      }
    }
  }

  #[test]
  fn test_page_parsing() {
    assert_eq!(query(Some("AAPL"), None).page().unwrap(), 0);
    assert_eq!(query(Some("AAPL"), Some("2")).page().unwrap(), 2);
    assert!(query(Some("AAPL"), Some("-1")).page().unwrap_err().is_client_error());
    assert!(query(Some("AAPL"), Some("two")).page().is_err());
  }

  #[test]
  fn test_default_period() {
    assert_eq!(query(Some("AAPL"), None).period(), "1m");
  }

  #[test]
  fn test_error_status_codes() {
    let missing = ApiError(StockError::MissingParameter("Stock symbol is required".into())).into_response();
    assert_eq!(missing.status(), StatusCode::BAD_REQUEST);

    let upstream = ApiError(StockError::ProviderFetch("Failed to fetch quote data for AAPL".into())).into_response();
    assert_eq!(upstream.status(), StatusCode::INTERNAL_SERVER_ERROR);
  }
}

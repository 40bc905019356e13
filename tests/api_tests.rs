//! API 통합 테스트
//!
//! 모의 제공자로 라우터 전체를 호출해 상태 코드와 응답 본문 검증

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use chrono::{Duration, Utc};
use serde_json::Value;
use tower::ServiceExt;

use stocklens::api::{build_router, AppState};
use stocklens::models::ProviderBar;
use stocklens::provider::{MockCall, MockProvider};

fn app(provider: MockProvider) -> Router {
  build_router(AppState::new(Arc::new(provider)))
}

/// 최근 `n`일 일봉, 마지막 봉 종가 = 100 + n - 1
fn recent_bars(n: usize) -> Vec<ProviderBar> {
  let now = Utc::now();
  (0..n)
    .map(|i| {
      let base = 100.0 + i as f64;
      ProviderBar {
        date: now - Duration::days((n - i) as i64),
        open: base - 1.0,
        high: base + 1.0,
        low: base - 2.0,
        close: base,
        volume: 1_000_000.0 + i as f64,
      }
    })
    .collect()
}

async fn call(app: Router, uri: &str) -> (StatusCode, axum::http::HeaderMap, String) {
  let response = app
    .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
    .await
    .unwrap();
  let status = response.status();
  let headers = response.headers().clone();
  let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
  (status, headers, String::from_utf8(bytes.to_vec()).unwrap())
}

async fn call_json(app: Router, uri: &str) -> (StatusCode, Value) {
  let (status, _, body) = call(app, uri).await;
  (status, serde_json::from_str(&body).unwrap())
}

#[tokio::test]
async fn test_health() {
  let (status, body) = call_json(app(MockProvider::new()), "/health").await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_missing_symbol_is_bad_request() {
  for uri in ["/api/stocks/quote", "/api/stocks/history?symbol=%20%20", "/api/stocks/key-stats?symbol="] {
    let (status, body) = call_json(app(MockProvider::new()), uri).await;
    assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
    assert_eq!(body["message"], "Stock symbol is required");
  }
}

#[tokio::test]
async fn test_quote_lookup_normalizes_symbol() {
  let (status, body) = call_json(app(MockProvider::new()), "/api/stocks/quote?symbol=%20aapl%20").await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["symbol"], "AAPL");
  assert_eq!(body["shortName"], "Apple Inc.");
  assert_eq!(body["exchange"], "NasdaqGS");
  assert!(body["regularMarketChange"].as_f64().unwrap() < 0.0);
  assert!(body["regularMarketChangePercent"].as_f64().unwrap() < 0.0);
}

#[tokio::test]
async fn test_provider_failure_is_server_error_envelope() {
  let provider = MockProvider::new().failing(MockCall::Quote);
  let (status, body) = call_json(app(provider), "/api/stocks/quote?symbol=AAPL").await;
  assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
  assert!(!body["message"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn test_unknown_symbol_is_server_error() {
  let (status, body) = call_json(app(MockProvider::new()), "/api/stocks/quote?symbol=ZZZZ").await;
  assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
  assert!(body["message"].as_str().unwrap().contains("ZZZZ"));
}

#[tokio::test]
async fn test_history_defaults_to_one_month() {
  let provider = MockProvider::new().with_bars("AAPL", recent_bars(12));
  let (status, body) = call_json(app(provider), "/api/stocks/history?symbol=AAPL").await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["symbol"], "AAPL");
  assert_eq!(body["timestamps"].as_array().unwrap().len(), 12);
  assert_eq!(body["closes"][0], 100.0);
  assert_eq!(body["volumes"].as_array().unwrap().len(), 12);
}

#[tokio::test]
async fn test_history_failure_envelope() {
  let provider = MockProvider::new().failing(MockCall::Historical);
  let (status, body) = call_json(app(provider), "/api/stocks/history?symbol=AAPL&period=1y").await;
  assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
  assert!(body["message"].is_string());
}

#[tokio::test]
async fn test_key_stats_fail_when_financial_data_fails() {
  let (status, body) = call_json(app(MockProvider::new()), "/api/stocks/key-stats?symbol=MSFT").await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["symbol"], "MSFT");
  assert!(body["trailingEps"].is_number());
  assert!(body["epsTrailingTwelveMonthsGrowth"].is_number());

  let provider = MockProvider::new().failing(MockCall::FinancialData);
  let (status, _) = call_json(app(provider), "/api/stocks/key-stats?symbol=MSFT").await;
  assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_table_pagination() {
  let provider = MockProvider::new().with_bars("AAPL", recent_bars(12));
  let (status, body) = call_json(app(provider), "/api/stocks/table?symbol=AAPL&page=2").await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["page"], 2);
  assert_eq!(body["totalPages"], 3);
  assert_eq!(body["hasNextPage"], false);
  assert_eq!(body["hasPreviousPage"], true);
  let rows = body["rows"].as_array().unwrap();
  assert_eq!(rows.len(), 2);
  assert_eq!(rows[1]["close"], "$100.00");
}

#[tokio::test]
async fn test_table_rejects_malformed_page() {
  let provider = MockProvider::new().with_bars("AAPL", recent_bars(12));
  let (status, body) = call_json(app(provider), "/api/stocks/table?symbol=AAPL&page=abc").await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
  assert!(body["message"].as_str().unwrap().contains("page"));
}

#[tokio::test]
async fn test_chart_of_empty_history() {
  let provider = MockProvider::new().with_bars("AAPL", Vec::new());
  let (status, body) = call_json(app(provider), "/api/stocks/chart?symbol=AAPL").await;
  assert_eq!(status, StatusCode::OK);
  assert!(body["points"].as_array().unwrap().is_empty());
  assert!(body["yDomain"].is_null());
}

#[tokio::test]
async fn test_csv_export() {
  let provider = MockProvider::new().with_bars("TSLA", recent_bars(3));
  let (status, headers, body) = call(app(provider), "/api/stocks/export?symbol=tsla").await;
  assert_eq!(status, StatusCode::OK);
  assert!(headers[header::CONTENT_TYPE].to_str().unwrap().starts_with("text/csv"));
  assert_eq!(
    headers[header::CONTENT_DISPOSITION].to_str().unwrap(),
    "attachment; filename=\"TSLA_stock_data.csv\""
  );

  let lines: Vec<&str> = body.lines().collect();
  assert_eq!(lines.len(), 4);
  assert_eq!(lines[0], "Date,Open,High,Low,Close,Volume,Change (%)");
  // 최신 봉이 먼저
  assert!(lines[1].contains(",102.00,"));
  assert!(lines[1].ends_with("+0.99%"));
}

#[tokio::test]
async fn test_overview_sections_are_independent() {
  let provider = MockProvider::new().failing(MockCall::Quote);
  let (status, body) = call_json(app(provider), "/api/stocks/overview?symbol=AAPL&period=3m").await;
  assert_eq!(status, StatusCode::OK);
  assert!(body["quote"]["error"]["message"].is_string());
  assert!(body["history"]["data"]["closes"].is_array());
  assert!(body["keyStats"]["error"]["message"].is_string());
}

#[tokio::test]
async fn test_quote_card_and_key_metrics() {
  let (status, card) = call_json(app(MockProvider::new()), "/api/stocks/quote-card?symbol=AAPL").await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(card["price"], "$189.84");
  assert_eq!(card["change"]["isPositive"], false);
  assert!(card["change"]["text"].as_str().unwrap().starts_with("-1.23 ("));
  assert_eq!(card["logoUrl"], "https://logo.clearbit.com/apple.com");
  assert!(card["longBusinessSummary"].is_string());

  let (status, metrics) = call_json(app(MockProvider::new()), "/api/stocks/key-metrics?symbol=AAPL").await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(metrics["eps"], "$6.43");
  assert_eq!(metrics["dividendYield"], "0.51%");
  assert_eq!(metrics["dividendTrend"]["text"], "Above 5-year avg");
}

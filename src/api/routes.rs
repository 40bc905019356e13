use std::sync::Arc;

use axum::{routing::get, Json, Router};
use serde::Serialize;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::api::handlers;
use crate::provider::MarketDataProvider;

#[derive(Clone)]
pub struct AppState {
  pub provider: Arc<dyn MarketDataProvider>,
}

impl AppState {
  pub fn new(provider: Arc<dyn MarketDataProvider>) -> Self {
    AppState { provider }
  }
}

#[derive(Debug, Serialize)]
struct Health { status: &'static str }

pub fn build_router(state: AppState) -> Router {
  let cors = CorsLayer::new().allow_origin(Any).allow_headers(Any).allow_methods(Any);

  Router::new()
    .route("/health", get(|| async { Json(Health { status: "ok" }) }))
    .route("/api/stocks/quote", get(handlers::get_quote))
    .route("/api/stocks/history", get(handlers::get_history))
    .route("/api/stocks/key-stats", get(handlers::get_key_stats))
    // 서버 측 렌더링
    .route("/api/stocks/overview", get(handlers::get_overview))
    .route("/api/stocks/table", get(handlers::get_table))
    .route("/api/stocks/chart", get(handlers::get_chart))
    .route("/api/stocks/export", get(handlers::export_csv))
    .route("/api/stocks/key-metrics", get(handlers::get_key_metrics))
    .route("/api/stocks/quote-card", get(handlers::get_quote_card))
    .with_state(state)
    .layer(TraceLayer::new_for_http())
    .layer(cors)
}

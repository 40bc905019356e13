//! HTTP 경계
//!
//! 심볼/기간 파라미터를 받아 서비스 함수를 호출하고 JSON 또는 오류 봉투를 반환

pub mod handlers;
pub mod routes;

pub use handlers::{ApiError, StockQuery};
pub use routes::{build_router, AppState};

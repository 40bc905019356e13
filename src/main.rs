/**
* filename : main
* author : HAMA
* date: 2025. 5. 8.
* description: stock lookup HTTP server entry point
**/

use stocklens::api::{build_router, AppState};
use stocklens::config::Config;
use stocklens::provider;
use stocklens::utils::logging;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    // 설정 로드
    let config = Config::load()?;

    // 로깅 초기화
    logging::init(&config.logging.level)?;
    log::info!("stocklens {} 시작...", stocklens::VERSION);

    let provider = provider::from_config(&config.provider)?;
    let app = build_router(AppState::new(provider));

    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    log::info!("API 서버 시작: http://{}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}

// region:    --- Imports
use auction_webapp::auction::AuctionService;
use auction_webapp::config::Config;
use auction_webapp::database::DatabaseManager;
use auction_webapp::router;
use auction_webapp::state::AppState;
use auction_webapp::store::{AuctionStore, MemoryAuctionStore, PgAuctionStore};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info, warn};
// endregion: --- Imports

// region:    --- Main
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // .env 파일이 있으면 로드 (RUST_LOG 포함)
    dotenvy::dotenv().ok();

    // logging 초기화
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .without_time()
        .with_target(false)
        .init();

    let config = Config::from_env()?;

    // 저장소 선택: DATABASE_URL 이 없으면 인메모리
    let store: Arc<dyn AuctionStore> = match &config.database_url {
        Some(database_url) => {
            let db_manager = Arc::new(DatabaseManager::new(database_url, &config).await?);

            // 데이터베이스 초기화
            if let Err(e) = db_manager.initialize_database(config.reset_database).await {
                error!("{:<12} --> 데이터베이스 초기화 실패: {:?}", "Main", e);
                return Err(e.into());
            }
            info!("{:<12} --> 데이터베이스 초기화 성공", "Main");
            Arc::new(PgAuctionStore::new(db_manager))
        }
        None => {
            warn!(
                "{:<12} --> DATABASE_URL 미설정: 인메모리 저장소 사용",
                "Main"
            );
            Arc::new(MemoryAuctionStore::new())
        }
    };

    let service = Arc::new(AuctionService::new(store));
    let routes_all = router::app(AppState::new(service), config.secure_cookies);

    // 리스너 생성
    let listener = TcpListener::bind(&config.bind_addr).await?;
    info!(
        "{:<12} --> Web Server: Listening on {}",
        "Main",
        listener.local_addr()?
    );

    // 서버 실행
    if let Err(err) = axum::serve(listener, routes_all.into_make_service()).await {
        error!("{:<12} --> Server error: {}", "Main", err);
    }
    Ok(())
}
// endregion: --- Main

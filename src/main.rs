// region:    --- Imports
use mvp_auctions::config::Config;
use mvp_auctions::server;
use mvp_auctions::store::InMemoryAuctionStore;
use tokio::net::TcpListener;
use tracing::{error, info};
// endregion: --- Imports

// region:    --- Main
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // logging 초기화
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .without_time()
        .with_target(false)
        .init();

    let config = Config::load();

    // 기본 경매 목록으로 저장소 생성 (재시작하면 초기화된다)
    let store = InMemoryAuctionStore::with_defaults().shared();
    info!("{:<12} --> 기본 경매 목록 로드 완료", "Main");

    // 라우터 설정
    let routes_all = server::router(store, &config.static_root);

    // 리스너 생성
    let listener = TcpListener::bind(config.bind_address()).await?;
    info!(
        "{:<12} --> MVP Auctions 서버 시작 (static root: {})",
        "Main",
        config.static_root.display()
    );

    // 서버 실행
    if let Err(err) = server::serve(listener, routes_all).await {
        error!("{:<12} --> Server error: {}", "Main", err);
        return Err(err.into());
    }
    Ok(())
}
// endregion: --- Main

// region:    --- Imports
use crate::handlers;
use crate::store::SharedStore;
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::path::Path;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tracing::info;

// endregion: --- Imports

// region:    --- Router
/// API 라우터 + 정적 파일 서빙
///
/// API 경로가 아닌 요청은 `static_root` 에서 찾고, 없으면 `index.html` 을 돌려준다.
pub fn router(store: SharedStore, static_root: &Path) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let assets =
        ServeDir::new(static_root).fallback(ServeFile::new(static_root.join("index.html")));

    Router::new()
        .route("/api/auctions/trending", get(handlers::handle_get_trending))
        .route("/api/auctions/featured", get(handlers::handle_get_featured))
        .route("/api/auctions", post(handlers::handle_add_auction))
        .route("/api/signup", post(handlers::handle_signup))
        .fallback_service(assets)
        .layer(cors)
        .layer(DefaultBodyLimit::max(1024 * 1024))
        .with_state(store)
}
// endregion: --- Router

// region:    --- Serve
/// Ctrl+C 또는 SIGTERM 을 받을 때까지 서버 실행
pub async fn serve(listener: TcpListener, app: Router) -> std::io::Result<()> {
    info!(
        "{:<12} --> Web Server: Listening on {}",
        "Server",
        listener.local_addr()?
    );
    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("{:<12} --> Web Server: 종료", "Server");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if signal::ctrl_c().await.is_ok() {
            info!("{:<12} --> Ctrl+C 수신, 종료 중", "Server");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
                info!("{:<12} --> SIGTERM 수신, 종료 중", "Server");
            }
            Err(_) => std::future::pending::<()>().await,
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
// endregion: --- Serve

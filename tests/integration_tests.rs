use async_trait::async_trait;
use axum::http::StatusCode;
use mvp_auctions::auction::defaults::default_listings;
use mvp_auctions::auction::{Listing, Section};
use mvp_auctions::countdown::CountdownTicker;
use mvp_auctions::merger::{
    AuctionDataMerger, FallbackReason, FetchError, HttpRemoteSource, LocalStorage,
    MemoryStorage, OverlayOutcome, RemoteOutcome, RemoteSource,
};
use mvp_auctions::page::Page;
use mvp_auctions::sell::{ListingClient, NewAuction, SubmitError};
use mvp_auctions::server;
use mvp_auctions::store::{AuctionStore, InMemoryAuctionStore, SharedStore};
use reqwest::Client;
use serde_json::{json, Value};
use std::path::Path;
use std::sync::Arc;
use tokio::net::TcpListener;

/// 트레이싱 초기화
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .without_time()
        .with_target(false)
        .with_test_writer()
        .try_init();
}

/// 임의 포트에 서버를 띄우고 주소를 돌려준다
async fn spawn_server(store: SharedStore, static_root: &Path) -> String {
    init_tracing();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = server::router(store, static_root);
    tokio::spawn(async move {
        axum::serve(listener, app.into_make_service()).await.unwrap();
    });
    format!("http://{addr}")
}

async fn spawn_default_server() -> (String, SharedStore) {
    let store = InMemoryAuctionStore::with_defaults().shared();
    let base = spawn_server(Arc::clone(&store), Path::new("website")).await;
    (base, store)
}

async fn get_section(client: &Client, base: &str, section: Section) -> Vec<Listing> {
    client
        .get(format!("{base}{}", section.api_path()))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .unwrap()
}

// region:    --- API

/// 기본 경매 목록 조회
#[tokio::test]
async fn test_get_sections_return_defaults() {
    let (base, _) = spawn_default_server().await;
    let client = Client::new();

    for section in Section::ALL {
        let listings = get_section(&client, &base, section).await;
        assert_eq!(listings, default_listings(section));
    }
}

/// 경매 등록 후 끝에 추가되는지 확인
#[tokio::test]
async fn test_add_auction_appends_to_section() {
    let (base, _) = spawn_default_server().await;
    let client = Client::new();
    let before = get_section(&client, &base, Section::Trending).await;

    let response = client
        .post(format!("{base}/api/auctions"))
        .json(&json!({
            "section": "trending",
            "title": "X",
            "bid": "$1",
            "deadline": "2030-01-01T00:00:00"
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Auction added");
    assert_eq!(body["auction"]["title"], "X");

    let after = get_section(&client, &base, Section::Trending).await;
    assert_eq!(after.len(), before.len() + 1);
    assert_eq!(&after[..before.len()], &before[..]);
    assert_eq!(
        after.last(),
        Some(&Listing::new("X", "$1", "2030-01-01T00:00:00"))
    );
}

/// 필드 누락 시 400, 목록 변경 없음
#[tokio::test]
async fn test_add_auction_missing_field_is_rejected() {
    let (base, store) = spawn_default_server().await;
    let client = Client::new();

    for body in [
        json!({ "section": "trending", "bid": "$1", "deadline": "2030-01-01T00:00:00" }),
        json!({ "section": "trending", "title": "", "bid": "$1", "deadline": "2030-01-01T00:00:00" }),
        json!({ "title": "X", "bid": "$1", "deadline": "2030-01-01T00:00:00" }),
    ] {
        let response = client
            .post(format!("{base}/api/auctions"))
            .json(&body)
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let error: Value = response.json().await.unwrap();
        assert_eq!(error["error"], "Missing fields");
    }

    for section in Section::ALL {
        assert_eq!(store.list(section).await, default_listings(section));
    }
}

/// 알 수 없는 섹션은 400
#[tokio::test]
async fn test_add_auction_invalid_section_is_rejected() {
    let (base, store) = spawn_default_server().await;

    let response = Client::new()
        .post(format!("{base}/api/auctions"))
        .json(&json!({
            "section": "sold",
            "title": "X",
            "bid": "$1",
            "deadline": "2030-01-01T00:00:00"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let error: Value = response.json().await.unwrap();
    assert_eq!(error["error"], "Invalid section");

    for section in Section::ALL {
        assert_eq!(store.list(section).await.len(), 3);
    }
}

/// 잘못된 JSON 본문은 400
#[tokio::test]
async fn test_add_auction_malformed_body_is_rejected() {
    let (base, _) = spawn_default_server().await;

    let response = Client::new()
        .post(format!("{base}/api/auctions"))
        .header("Content-Type", "application/json")
        .body("{ not json")
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let error: Value = response.json().await.unwrap();
    assert!(error["error"]
        .as_str()
        .unwrap()
        .starts_with("Malformed payload"));
}

/// 회원가입
#[tokio::test]
async fn test_signup() {
    let (base, _) = spawn_default_server().await;
    let client = Client::new();

    let response = client
        .post(format!("{base}/api/signup"))
        .json(&json!({ "name": "Kim", "email": "kim@example.com", "password": "secret" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Signup successful");
    assert_eq!(
        body["user"],
        json!({ "name": "Kim", "email": "kim@example.com" })
    );

    let response = client
        .post(format!("{base}/api/signup"))
        .json(&json!({ "name": "Kim", "email": "kim@example.com" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Please provide name, email and password");
}

/// 정적 파일과 index 폴백
#[tokio::test]
async fn test_static_files_fall_back_to_index() {
    let root = tempfile::tempdir().unwrap();
    std::fs::write(root.path().join("index.html"), "<h1>MVP Auctions</h1>").unwrap();
    std::fs::write(root.path().join("styles.css"), "body {}").unwrap();

    let base = spawn_server(InMemoryAuctionStore::empty().shared(), root.path()).await;
    let client = Client::new();

    let css = client
        .get(format!("{base}/styles.css"))
        .send()
        .await
        .unwrap();
    assert_eq!(css.status(), StatusCode::OK);
    assert_eq!(css.text().await.unwrap(), "body {}");

    let page = client
        .get(format!("{base}/sell/new"))
        .send()
        .await
        .unwrap();
    assert_eq!(page.status(), StatusCode::OK);
    assert_eq!(page.text().await.unwrap(), "<h1>MVP Auctions</h1>");
}

// endregion: --- API

// region:    --- Merger

/// 고정 응답 원격 소스
struct StaticRemote(Value);

#[async_trait]
impl RemoteSource for StaticRemote {
    async fn fetch_section(&self, _section: Section) -> Result<Value, FetchError> {
        Ok(self.0.clone())
    }
}

/// 로컬 오버레이가 원격 값을 이긴다
#[tokio::test]
async fn test_merge_local_overlay_wins_over_remote() {
    let store = InMemoryAuctionStore::new(
        vec![Listing::new("Remote Card", "$500", "2031-01-01T00:00:00")],
        Vec::new(),
    )
    .shared();
    let base = spawn_server(store, Path::new("website")).await;

    let storage = Arc::new(MemoryStorage::new());
    storage
        .set("trendingAuctions", r#"[{"title":"Local Card"}]"#)
        .unwrap();

    let page = Page::with_defaults().shared();
    let merger = AuctionDataMerger::new(Arc::new(HttpRemoteSource::new(base)), storage);
    let merges = merger.merge_all(&page).await;

    let trending = merges
        .iter()
        .find(|m| m.section == Section::Trending)
        .unwrap();
    assert_eq!(trending.remote, RemoteOutcome::Applied(1));
    assert_eq!(trending.local, OverlayOutcome::Applied(1));

    let featured = merges
        .iter()
        .find(|m| m.section == Section::Featured)
        .unwrap();
    assert_eq!(featured.remote, RemoteOutcome::Applied(0));
    assert_eq!(featured.local, OverlayOutcome::Absent);

    let page = page.lock().await;
    let cards = page.cards(Section::Trending);
    assert_eq!(cards[0].title, "Local Card");
    assert_eq!(cards[0].bid, "$500");
    assert_eq!(cards[0].deadline.as_deref(), Some("2031-01-01T00:00:00"));

    let defaults = default_listings(Section::Trending);
    assert_eq!(cards[1].title, defaults[1].title);
    assert_eq!(cards[2].bid, defaults[2].bid);
    assert_eq!(page.cards(Section::Featured).len(), 3);
}

/// 원격 실패 시에도 로컬 오버레이는 적용된다
#[tokio::test]
async fn test_merge_network_failure_falls_back() {
    // 바인딩 후 바로 닫은 포트
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let storage = Arc::new(MemoryStorage::new());
    storage
        .set("featuredAuctions", r#"[{"bid":"$9"},{"deadline":"2032-05-05T05:05:05"}]"#)
        .unwrap();

    let page = Page::with_defaults().shared();
    let merger = AuctionDataMerger::new(
        Arc::new(HttpRemoteSource::new(format!("http://{addr}"))),
        storage,
    );
    let featured = merger.merge_section(Section::Featured, &page).await;

    assert!(matches!(
        featured.remote,
        RemoteOutcome::Fallback(FallbackReason::Network(_))
    ));
    assert_eq!(featured.local, OverlayOutcome::Applied(2));

    let page = page.lock().await;
    let cards = page.cards(Section::Featured);
    let defaults = default_listings(Section::Featured);
    assert_eq!(cards[0].bid, "$9");
    assert_eq!(cards[0].title, defaults[0].title);
    assert_eq!(cards[1].deadline.as_deref(), Some("2032-05-05T05:05:05"));
    assert_eq!(cards[1].bid, defaults[1].bid);
    assert_eq!(cards[2].title, defaults[2].title);
}

/// JSON 이 아닌 원격 응답은 해석 실패로 처리되고 로컬 오버레이는 적용된다
#[tokio::test]
async fn test_merge_decode_failure_falls_back() {
    let root = tempfile::tempdir().unwrap();
    std::fs::write(root.path().join("index.html"), "<h1>MVP Auctions</h1>").unwrap();
    let base = spawn_server(InMemoryAuctionStore::with_defaults().shared(), root.path()).await;

    let storage = Arc::new(MemoryStorage::new());
    storage
        .set("trendingAuctions", r#"[{"title":"Cached Title"}]"#)
        .unwrap();

    // API 경로 앞에 접두어를 붙여 index.html 폴백을 받게 한다
    let page = Page::with_defaults().shared();
    let merger = AuctionDataMerger::new(
        Arc::new(HttpRemoteSource::new(format!("{base}/static"))),
        storage,
    );
    let trending = merger.merge_section(Section::Trending, &page).await;

    assert!(matches!(
        trending.remote,
        RemoteOutcome::Fallback(FallbackReason::Decode(_))
    ));
    assert_eq!(trending.local, OverlayOutcome::Applied(1));

    let page = page.lock().await;
    let cards = page.cards(Section::Trending);
    let defaults = default_listings(Section::Trending);
    assert_eq!(cards[0].title, "Cached Title");
    assert_eq!(cards[0].bid, defaults[0].bid);
    assert_eq!(cards[1].title, defaults[1].title);
}

/// 배열이 아닌 원격 응답과 깨진 로컬 캐시는 무시된다
#[tokio::test]
async fn test_merge_ignores_non_array_and_malformed_cache() {
    let storage = Arc::new(MemoryStorage::new());
    storage.set("trendingAuctions", "{ not json").unwrap();
    storage.set("featuredAuctions", r#"{"title":"x"}"#).unwrap();

    let page = Page::with_defaults().shared();
    let merger = AuctionDataMerger::new(
        Arc::new(StaticRemote(json!({ "error": "Missing fields" }))),
        storage,
    );

    for merge in merger.merge_all(&page).await {
        assert_eq!(merge.remote, RemoteOutcome::Fallback(FallbackReason::NotAnArray));
        assert_eq!(merge.local, OverlayOutcome::Malformed);
    }

    let page = page.lock().await;
    for section in Section::ALL {
        let titles: Vec<&str> = page.cards(section).iter().map(|c| c.title.as_str()).collect();
        let defaults = default_listings(section);
        let expected: Vec<&str> = defaults.iter().map(|l| l.title.as_str()).collect();
        assert_eq!(titles, expected);
    }
}

// endregion: --- Merger

// region:    --- Countdown & Sell

/// 티커가 카운트다운을 채운다
#[tokio::test]
async fn test_ticker_renders_countdowns() {
    let page = Page::new(
        &[
            Listing::new("Open", "$1", "2099-01-01T00:00:00"),
            Listing::new("Done", "$1", "2000-01-01T00:00:00"),
        ],
        &[Listing::new("Broken", "$1", "someday")],
    )
    .shared();

    let ticker = CountdownTicker::new(Arc::clone(&page))
        .with_period(tokio::time::Duration::from_millis(20))
        .start();
    tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;
    ticker.abort();

    let page = page.lock().await;
    let trending = page.cards(Section::Trending);
    assert_eq!(trending[0].countdown.split(':').count(), 4);
    assert_eq!(trending[1].countdown, "Closed");
    assert_eq!(page.cards(Section::Featured)[0].countdown, "Closed");
}

/// 첫 판매만 경품 응모
#[tokio::test]
async fn test_sell_flow_enters_giveaway_once() {
    let (base, store) = spawn_default_server().await;
    let storage = Arc::new(MemoryStorage::new());
    let client = ListingClient::new(base, storage.clone());

    let auction = NewAuction {
        section: Section::Featured,
        title: "Game-Worn Jersey".to_string(),
        bid: "$4,100".to_string(),
        deadline: "2030-06-01T18:00:00".to_string(),
    };

    let first = client.submit(&auction).await.unwrap();
    assert!(first.first_listing);
    assert_eq!(first.auction.title, "Game-Worn Jersey");

    let second = client.submit(&auction).await.unwrap();
    assert!(!second.first_listing);

    let featured = store.list(Section::Featured).await;
    assert_eq!(featured.len(), 5);
    assert_eq!(storage.get("hasSoldBefore").as_deref(), Some("true"));
}

/// 거절된 등록은 경품 플래그를 남기지 않는다
#[tokio::test]
async fn test_sell_flow_rejected_listing() {
    let (base, _) = spawn_default_server().await;
    let storage = Arc::new(MemoryStorage::new());
    let client = ListingClient::new(base, storage.clone());

    let auction = NewAuction {
        section: Section::Trending,
        title: String::new(),
        bid: "$1".to_string(),
        deadline: "2030-01-01T00:00:00".to_string(),
    };

    match client.submit(&auction).await {
        Err(SubmitError::Rejected { status, message }) => {
            assert_eq!(status, 400);
            assert_eq!(message, "Missing fields");
        }
        other => panic!("expected rejection, got {other:?}"),
    }
    assert_eq!(storage.get("hasSoldBefore"), None);
}

// endregion: --- Countdown & Sell

// region:    --- Imports
use mvp_auctions::auction::Section;
use mvp_auctions::config::Config;
use mvp_auctions::countdown::CountdownTicker;
use mvp_auctions::merger::storage::{edit_cached_overlay, OverlayField};
use mvp_auctions::merger::{AuctionDataMerger, FileStorage, HttpRemoteSource, LocalStorage};
use mvp_auctions::page::Page;
use mvp_auctions::sell::{ListingClient, NewAuction};
use std::sync::Arc;
use tokio::time::{interval, Duration};
use tracing::info;
// endregion: --- Imports

const USAGE: &str = "usage:
  auction-board [watch]
  auction-board sell <trending|featured> <title> <bid> <deadline>
  auction-board edit <trending|featured> <index> <title|bid|deadline> <value>";

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
    let storage: Arc<dyn LocalStorage> = Arc::new(FileStorage::new(&config.local_storage_path));

    let args: Vec<String> = std::env::args().skip(1).collect();
    let args: Vec<&str> = args.iter().map(String::as_str).collect();
    match args.as_slice() {
        [] | ["watch"] => watch(&config, storage).await,
        ["sell", section, title, bid, deadline] => {
            let auction = NewAuction {
                section: section.parse()?,
                title: title.to_string(),
                bid: bid.to_string(),
                deadline: deadline.to_string(),
            };
            sell(&config, storage, auction).await
        }
        ["edit", section, index, field, value] => {
            let section: Section = section.parse()?;
            let field: OverlayField = field.parse()?;
            let overlays =
                edit_cached_overlay(storage.as_ref(), section, index.parse()?, field, value)?;
            println!("{}: {}", section.storage_key(), serde_json::to_string(&overlays)?);
            Ok(())
        }
        _ => {
            eprintln!("{USAGE}");
            Err("invalid arguments".into())
        }
    }
}
// endregion: --- Main

// region:    --- Commands
/// 기본 화면 -> 원격 데이터 -> 로컬 오버레이 순으로 그린 뒤 매초 다시 출력
async fn watch(
    config: &Config,
    storage: Arc<dyn LocalStorage>,
) -> Result<(), Box<dyn std::error::Error>> {
    let page = Page::with_defaults().shared();

    // 카운트다운 티커 시작
    let ticker = CountdownTicker::new(Arc::clone(&page)).start();

    // 원격 데이터 + 로컬 오버레이 병합
    let remote = Arc::new(HttpRemoteSource::new(config.base_url.clone()));
    let merger = AuctionDataMerger::new(remote, storage);
    for merge in merger.merge_all(&page).await {
        info!(
            "{:<12} --> {}: remote={:?}, local={:?}",
            "Board", merge.section, merge.remote, merge.local
        );
    }

    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);
    let mut display = interval(Duration::from_secs(1));
    loop {
        tokio::select! {
            _ = display.tick() => {
                let frame = page.lock().await.to_string();
                print!("\x1b[2J\x1b[H{frame}");
            }
            _ = &mut shutdown => break,
        }
    }

    ticker.abort();
    Ok(())
}

/// 판매 등록
async fn sell(
    config: &Config,
    storage: Arc<dyn LocalStorage>,
    auction: NewAuction,
) -> Result<(), Box<dyn std::error::Error>> {
    let client = ListingClient::new(config.base_url.clone(), storage);
    let submitted = client.submit(&auction).await?;
    println!(
        "Auction added: {} ({}, ends {})",
        submitted.auction.title, submitted.auction.bid, submitted.auction.deadline
    );
    if submitted.first_listing {
        println!("Thank you for your first listing! You have been entered into our giveaway.");
    }
    Ok(())
}
// endregion: --- Commands

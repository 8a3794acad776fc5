// region:    --- Imports
use crate::auction::defaults::default_listings;
use crate::auction::{Listing, Section};
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;

// endregion: --- Imports

// region:    --- Auction Store Trait
/// 경매 목록 저장소 트레이트
#[async_trait]
pub trait AuctionStore: Send + Sync {
    /// 섹션의 경매 목록을 삽입 순서대로 조회
    async fn list(&self, section: Section) -> Vec<Listing>;

    /// 섹션 끝에 경매 목록 추가
    async fn add(&self, section: Section, listing: Listing) -> Listing;
}

pub type SharedStore = Arc<dyn AuctionStore>;
// endregion: --- Auction Store Trait

// region:    --- In-Memory Store
/// 프로세스 메모리에만 존재하는 저장소 구현체. 재시작하면 사라진다.
#[derive(Default)]
pub struct InMemoryAuctionStore {
    trending: RwLock<Vec<Listing>>,
    featured: RwLock<Vec<Listing>>,
}

impl InMemoryAuctionStore {
    pub fn new(trending: Vec<Listing>, featured: Vec<Listing>) -> Self {
        Self {
            trending: RwLock::new(trending),
            featured: RwLock::new(featured),
        }
    }

    /// 기본 경매 목록으로 채운 저장소
    pub fn with_defaults() -> Self {
        Self::new(
            default_listings(Section::Trending),
            default_listings(Section::Featured),
        )
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn shared(self) -> SharedStore {
        Arc::new(self)
    }

    fn slot(&self, section: Section) -> &RwLock<Vec<Listing>> {
        match section {
            Section::Trending => &self.trending,
            Section::Featured => &self.featured,
        }
    }
}

#[async_trait]
impl AuctionStore for InMemoryAuctionStore {
    async fn list(&self, section: Section) -> Vec<Listing> {
        self.slot(section).read().await.clone()
    }

    async fn add(&self, section: Section, listing: Listing) -> Listing {
        let mut listings = self.slot(section).write().await;
        listings.push(listing.clone());
        info!(
            "{:<12} --> {} 섹션에 경매 추가 (총 {}건)",
            "Store",
            section,
            listings.len()
        );
        listing
    }
}
// endregion: --- In-Memory Store

//! 원격 경매 데이터와 로컬 캐시 오버레이를 화면에 순서대로 덮어쓰는 머저.
//!
//! 섹션마다 원격 조회가 끝난 뒤(성공이든 실패든) 로컬 오버레이를 적용하므로
//! 로컬 캐시가 지정한 필드는 항상 원격 값을 이긴다. 적용은 위치 기반이다.

// region:    --- Imports
use crate::auction::{ListingOverlay, Section};
use crate::page::SharedPage;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info};

// endregion: --- Imports

pub mod remote;
pub mod storage;

pub use remote::{FetchError, HttpRemoteSource, RemoteSource};
pub use storage::{FileStorage, LocalStorage, MemoryStorage, StorageError};

// region:    --- Outcomes
/// 원격 데이터를 쓰지 못하고 기존 화면을 유지한 이유
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FallbackReason {
    Network(String),
    Decode(String),
    NotAnArray,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteOutcome {
    /// 적용된 카드 수
    Applied(usize),
    Fallback(FallbackReason),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayOutcome {
    /// 적용된 카드 수
    Applied(usize),
    Absent,
    Malformed,
}

/// 섹션 하나의 병합 결과
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionMerge {
    pub section: Section,
    pub remote: RemoteOutcome,
    pub local: OverlayOutcome,
}
// endregion: --- Outcomes

// region:    --- Auction Data Merger
pub struct AuctionDataMerger {
    remote: Arc<dyn RemoteSource>,
    storage: Arc<dyn LocalStorage>,
}

impl AuctionDataMerger {
    pub fn new(remote: Arc<dyn RemoteSource>, storage: Arc<dyn LocalStorage>) -> Self {
        Self { remote, storage }
    }

    /// 두 섹션을 동시에 병합. 섹션 사이의 순서는 보장하지 않는다.
    pub async fn merge_all(&self, page: &SharedPage) -> Vec<SectionMerge> {
        let (trending, featured) = tokio::join!(
            self.merge_section(Section::Trending, page),
            self.merge_section(Section::Featured, page),
        );
        vec![trending, featured]
    }

    /// 섹션 병합: 원격 적용 후 로컬 오버레이 적용
    pub async fn merge_section(&self, section: Section, page: &SharedPage) -> SectionMerge {
        let remote = self.apply_remote(section, page).await;
        let local = self.apply_local(section, page).await;
        info!(
            "{:<12} --> {} 병합 완료: remote={:?}, local={:?}",
            "Merger", section, remote, local
        );
        SectionMerge {
            section,
            remote,
            local,
        }
    }

    async fn apply_remote(&self, section: Section, page: &SharedPage) -> RemoteOutcome {
        let document = match self.remote.fetch_section(section).await {
            Ok(document) => document,
            Err(FetchError::Http(e)) => {
                debug!("{:<12} --> {} 원격 조회 실패: {}", "Merger", section, e);
                return RemoteOutcome::Fallback(FallbackReason::Network(e.to_string()));
            }
            Err(FetchError::Decode(e)) => {
                debug!("{:<12} --> {} 원격 응답 해석 실패: {}", "Merger", section, e);
                return RemoteOutcome::Fallback(FallbackReason::Decode(e.to_string()));
            }
        };

        match overlays_from(&document) {
            Some(overlays) => {
                RemoteOutcome::Applied(page.lock().await.apply_overlay(section, &overlays))
            }
            None => RemoteOutcome::Fallback(FallbackReason::NotAnArray),
        }
    }

    async fn apply_local(&self, section: Section, page: &SharedPage) -> OverlayOutcome {
        let Some(raw) = self.storage.get(section.storage_key()) else {
            return OverlayOutcome::Absent;
        };

        let overlays = serde_json::from_str::<Value>(&raw)
            .ok()
            .and_then(|document| overlays_from(&document));
        match overlays {
            Some(overlays) => {
                OverlayOutcome::Applied(page.lock().await.apply_overlay(section, &overlays))
            }
            None => {
                debug!("{:<12} --> {} 로컬 오버레이 무시", "Merger", section);
                OverlayOutcome::Malformed
            }
        }
    }
}
// endregion: --- Auction Data Merger

/// JSON 배열이면 원소별 오버레이로, 아니면 None
fn overlays_from(document: &Value) -> Option<Vec<ListingOverlay>> {
    document
        .as_array()
        .map(|items| items.iter().map(ListingOverlay::from_value).collect())
}

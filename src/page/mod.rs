//! 화면 렌더 대상. 섹션 컨테이너(`trending-cards`, `featured-cards`)와 그 안의 카드들.

// region:    --- Imports
use crate::auction::defaults::default_listings;
use crate::auction::{Listing, ListingOverlay, Section};
use crate::countdown::{countdown_for, Countdown};
use chrono::{DateTime, Utc};
use std::fmt;
use std::sync::Arc;
use tokio::sync::Mutex;

// endregion: --- Imports

/// 티커와 머저가 함께 쓰는 렌더 대상
pub type SharedPage = Arc<Mutex<Page>>;

// region:    --- Listing Card
/// 화면에 그려진 경매 카드 하나
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingCard {
    pub title: String,
    pub bid: String,
    /// `data-deadline` 속성
    pub deadline: Option<String>,
    /// 카운트다운 텍스트
    pub countdown: String,
    // 마감 처리된 마감 시각 값. 같은 값이면 다시 계산하지 않는다.
    closed_for: Option<String>,
}

impl ListingCard {
    pub fn from_listing(listing: &Listing) -> Self {
        Self {
            title: listing.title.clone(),
            bid: listing.bid.clone(),
            deadline: Some(listing.deadline.clone()),
            countdown: String::new(),
            closed_for: None,
        }
    }

    /// 오버레이가 제공한 필드만 덮어쓴다. 빈 마감 시각은 무시.
    pub fn apply(&mut self, overlay: &ListingOverlay) {
        if let Some(title) = &overlay.title {
            self.title = title.clone();
        }
        if let Some(bid) = &overlay.bid {
            self.bid = bid.clone();
        }
        if let Some(deadline) = overlay.deadline.as_ref().filter(|d| !d.is_empty()) {
            self.deadline = Some(deadline.clone());
        }
    }

    /// 카운트다운 텍스트 갱신. 텍스트가 바뀌었으면 true.
    ///
    /// 한 번 마감된 마감 시각은 이후 시계가 흔들려도 계속 마감으로 남는다.
    pub fn refresh_countdown(&mut self, now: DateTime<Utc>) -> bool {
        // 빈 data-deadline 은 속성이 없는 것과 같다
        let Some(deadline) = self.deadline.as_deref().filter(|d| !d.is_empty()) else {
            return false;
        };

        let countdown = if self.closed_for.as_deref() == Some(deadline) {
            Countdown::Closed
        } else {
            self.closed_for = None;
            let countdown = countdown_for(deadline, now);
            if countdown.is_closed() {
                self.closed_for = Some(deadline.to_string());
            }
            countdown
        };

        let text = countdown.to_string();
        if text == self.countdown {
            return false;
        }
        self.countdown = text;
        true
    }

    pub fn is_closed(&self) -> bool {
        self.closed_for.is_some() && self.closed_for == self.deadline
    }
}
// endregion: --- Listing Card

// region:    --- Page
/// 두 섹션의 카드 목록
#[derive(Debug, Clone, Default)]
pub struct Page {
    trending: Vec<ListingCard>,
    featured: Vec<ListingCard>,
}

impl Page {
    pub fn new(trending: &[Listing], featured: &[Listing]) -> Self {
        Self {
            trending: trending.iter().map(ListingCard::from_listing).collect(),
            featured: featured.iter().map(ListingCard::from_listing).collect(),
        }
    }

    /// 기본 경매 목록으로 그린 화면
    pub fn with_defaults() -> Self {
        Self::new(
            &default_listings(Section::Trending),
            &default_listings(Section::Featured),
        )
    }

    pub fn shared(self) -> SharedPage {
        Arc::new(Mutex::new(self))
    }

    pub fn cards(&self, section: Section) -> &[ListingCard] {
        match section {
            Section::Trending => &self.trending,
            Section::Featured => &self.featured,
        }
    }

    pub fn cards_mut(&mut self, section: Section) -> &mut [ListingCard] {
        match section {
            Section::Trending => &mut self.trending,
            Section::Featured => &mut self.featured,
        }
    }

    /// 컨테이너 id 로 카드 조회
    pub fn container(&self, container_id: &str) -> Option<&[ListingCard]> {
        Section::ALL
            .into_iter()
            .find(|section| section.container_id() == container_id)
            .map(|section| self.cards(section))
    }

    /// i 번째 오버레이를 i 번째 카드에 적용. 카드 수를 넘는 오버레이는 버린다.
    ///
    /// 적용된 카드 수를 돌려준다.
    pub fn apply_overlay(&mut self, section: Section, overlays: &[ListingOverlay]) -> usize {
        let mut applied = 0;
        for (card, overlay) in self.cards_mut(section).iter_mut().zip(overlays) {
            card.apply(overlay);
            applied += 1;
        }
        applied
    }

    /// 모든 카드의 카운트다운 갱신. 바뀐 카드 수를 돌려준다.
    pub fn refresh_countdowns(&mut self, now: DateTime<Utc>) -> usize {
        let mut changed = 0;
        for card in self.trending.iter_mut().chain(self.featured.iter_mut()) {
            if card.refresh_countdown(now) {
                changed += 1;
            }
        }
        changed
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for section in Section::ALL {
            writeln!(f, "#{}", section.container_id())?;
            for card in self.cards(section) {
                writeln!(f, "  {:<34} {:>10}  {}", card.title, card.bid, card.countdown)?;
            }
        }
        Ok(())
    }
}
// endregion: --- Page

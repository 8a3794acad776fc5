/// 판매 등록 흐름
/// 1. 첫 판매자 경품 응모 플래그
/// 2. 경매 등록 요청
// region:    --- Imports
use crate::auction::{Listing, Section};
use crate::handlers::AuctionAdded;
use crate::merger::storage::HAS_SOLD_BEFORE_KEY;
use crate::merger::{LocalStorage, StorageError};
use reqwest::Client;
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

// endregion: --- Imports

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("listing rejected ({status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

// region:    --- Giveaway
/// 1. 첫 판매 등록이면 true 를 돌려주고 플래그를 남긴다.
pub fn register_listing_submission(storage: &dyn LocalStorage) -> Result<bool, StorageError> {
    if storage.get(HAS_SOLD_BEFORE_KEY).is_some() {
        return Ok(false);
    }
    storage.set(HAS_SOLD_BEFORE_KEY, "true")?;
    info!("{:<12} --> 첫 판매 등록: 경품 응모 완료", "Sell");
    Ok(true)
}
// endregion: --- Giveaway

// region:    --- Listing Client
/// 경매 등록 요청 본문
#[derive(Debug, Clone, Serialize)]
pub struct NewAuction {
    pub section: Section,
    pub title: String,
    pub bid: String,
    pub deadline: String,
}

/// 등록 결과
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmittedListing {
    pub auction: Listing,
    /// 첫 판매라서 경품에 응모되었는지
    pub first_listing: bool,
}

/// 2. 경매 등록 클라이언트
pub struct ListingClient {
    client: Client,
    base_url: String,
    storage: Arc<dyn LocalStorage>,
}

impl ListingClient {
    pub fn new(base_url: impl Into<String>, storage: Arc<dyn LocalStorage>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            storage,
        }
    }

    /// 경매 등록. 서버가 받아들인 경우에만 첫 판매 플래그를 남긴다.
    pub async fn submit(&self, auction: &NewAuction) -> Result<SubmittedListing, SubmitError> {
        info!("{:<12} --> 경매 등록 요청: {:?}", "Sell", auction);
        let response = self
            .client
            .post(format!("{}/api/auctions", self.base_url))
            .json(auction)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body: serde_json::Value = response.json().await.unwrap_or_default();
            let message = body["error"].as_str().unwrap_or("unknown error").to_string();
            warn!("{:<12} --> 경매 등록 거절: {}", "Sell", message);
            return Err(SubmitError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        let added: AuctionAdded = response.json().await?;
        let first_listing = register_listing_submission(self.storage.as_ref())?;
        Ok(SubmittedListing {
            auction: added.auction,
            first_listing,
        })
    }
}
// endregion: --- Listing Client

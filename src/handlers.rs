// region:    --- Imports
use crate::auction::{Listing, Section};
use crate::error::AppError;
use crate::store::SharedStore;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

// endregion: --- Imports

// region:    --- Payloads
/// 경매 등록 요청
#[derive(Debug, Deserialize)]
pub struct NewAuctionRequest {
    pub section: Option<String>,
    pub title: Option<String>,
    pub bid: Option<String>,
    pub deadline: Option<String>,
}

/// 경매 등록 응답
#[derive(Debug, Serialize, Deserialize)]
pub struct AuctionAdded {
    pub message: String,
    pub auction: Listing,
}

/// 회원가입 요청
#[derive(Deserialize)]
pub struct SignupRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SignupUser {
    pub name: String,
    pub email: String,
}

/// 회원가입 응답 (비밀번호는 돌려주지 않는다)
#[derive(Debug, Serialize, Deserialize)]
pub struct SignupAccepted {
    pub message: String,
    pub user: SignupUser,
}
// endregion: --- Payloads

// region:    --- Query Handlers

/// 트렌딩 경매 조회
pub async fn handle_get_trending(State(store): State<SharedStore>) -> Json<Vec<Listing>> {
    info!("{:<12} --> 트렌딩 경매 조회", "HandlerQuery");
    Json(store.list(Section::Trending).await)
}

/// 추천 경매 조회
pub async fn handle_get_featured(State(store): State<SharedStore>) -> Json<Vec<Listing>> {
    info!("{:<12} --> 추천 경매 조회", "HandlerQuery");
    Json(store.list(Section::Featured).await)
}

// endregion: --- Query Handlers

// region:    --- Command Handlers

/// 경매 등록 요청 처리
///
/// 모든 필드가 있는지 먼저 검사하고, 그 다음 섹션 이름을 검사한다.
/// 검증에 실패하면 어느 섹션에도 추가하지 않는다.
pub async fn handle_add_auction(
    State(store): State<SharedStore>,
    payload: Result<Json<NewAuctionRequest>, JsonRejection>,
) -> Result<Json<AuctionAdded>, AppError> {
    let Json(cmd) = payload.map_err(|e| AppError::MalformedPayload(e.body_text()))?;
    info!("{:<12} --> 경매 등록 요청 처리 시작: {:?}", "Command", cmd);

    let (Some(section), Some(title), Some(bid), Some(deadline)) = (
        required(cmd.section),
        required(cmd.title),
        required(cmd.bid),
        required(cmd.deadline),
    ) else {
        warn!("{:<12} --> 필수 필드 누락", "Command");
        return Err(AppError::MissingFields);
    };

    let section: Section = section.parse().map_err(|e| {
        warn!("{:<12} --> {}", "Command", e);
        AppError::InvalidSection
    })?;

    let auction = store
        .add(section, Listing::new(title, bid, deadline))
        .await;

    Ok(Json(AuctionAdded {
        message: "Auction added".to_string(),
        auction,
    }))
}

/// 회원가입 요청 처리 (저장하지 않고 사용자 정보만 돌려준다)
pub async fn handle_signup(
    payload: Result<Json<SignupRequest>, JsonRejection>,
) -> Result<Json<SignupAccepted>, AppError> {
    let Json(req) = payload.map_err(|e| AppError::MalformedPayload(e.body_text()))?;

    let (Some(name), Some(email), Some(_password)) = (
        required(req.name),
        required(req.email),
        required(req.password),
    ) else {
        warn!("{:<12} --> 회원가입 필드 누락", "Command");
        return Err(AppError::MissingSignupFields);
    };
    info!("{:<12} --> 회원가입 요청 처리: {}", "Command", email);

    Ok(Json(SignupAccepted {
        message: "Signup successful".to_string(),
        user: SignupUser { name, email },
    }))
}

// endregion: --- Command Handlers

/// 빈 문자열은 없는 값으로 취급
fn required(field: Option<String>) -> Option<String> {
    field.filter(|value| !value.is_empty())
}

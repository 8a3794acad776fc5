// region:    --- Imports
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

// endregion: --- Imports

// region:    --- Section
/// 경매 목록 섹션 (trending / featured)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    Trending,
    Featured,
}

impl Section {
    pub const ALL: [Section; 2] = [Section::Trending, Section::Featured];

    pub fn as_str(&self) -> &'static str {
        match self {
            Section::Trending => "trending",
            Section::Featured => "featured",
        }
    }

    /// 섹션 데이터를 제공하는 API 경로
    pub fn api_path(&self) -> &'static str {
        match self {
            Section::Trending => "/api/auctions/trending",
            Section::Featured => "/api/auctions/featured",
        }
    }

    /// 화면에서 카드들을 담는 컨테이너 id
    pub fn container_id(&self) -> &'static str {
        match self {
            Section::Trending => "trending-cards",
            Section::Featured => "featured-cards",
        }
    }

    /// 로컬 저장소에 캐시된 오버레이 키
    pub fn storage_key(&self) -> &'static str {
        match self {
            Section::Trending => "trendingAuctions",
            Section::Featured => "featuredAuctions",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown section: {0}")]
pub struct UnknownSection(pub String);

impl FromStr for Section {
    type Err = UnknownSection;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "trending" => Ok(Section::Trending),
            "featured" => Ok(Section::Featured),
            other => Err(UnknownSection(other.to_string())),
        }
    }
}
// endregion: --- Section

// region:    --- Listing
/// 경매 목록 하나. 식별자는 없고 섹션 안에서의 위치가 곧 식별자다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Listing {
    pub title: String,
    /// 이미 포맷된 입찰가 문자열 (예: "$2,750")
    pub bid: String,
    /// 로컬 시간 기준 ISO 8601 문자열
    pub deadline: String,
}

impl Listing {
    pub fn new(
        title: impl Into<String>,
        bid: impl Into<String>,
        deadline: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            bid: bid.into(),
            deadline: deadline.into(),
        }
    }
}
// endregion: --- Listing

// region:    --- Listing Overlay
/// 부분 경매 목록. 값이 있는 필드만 화면 카드에 덮어쓴다.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingOverlay {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline: Option<String>,
}

impl ListingOverlay {
    /// JSON 배열 원소 하나를 오버레이로 해석
    ///
    /// 객체가 아닌 원소는 아무 필드도 갖지 않는 오버레이가 된다.
    /// 숫자/불리언 필드는 문자열로 바꿔서 사용하고, null 은 없는 값으로 본다.
    pub fn from_value(value: &Value) -> Self {
        let Some(object) = value.as_object() else {
            return Self::default();
        };
        Self {
            title: object.get("title").and_then(text_field),
            bid: object.get("bid").and_then(text_field),
            deadline: object.get("deadline").and_then(deadline_field),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.bid.is_none() && self.deadline.is_none()
    }
}

fn text_field(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
/// 마감 시각은 0 / false 같은 거짓 값이면 적용하지 않는다
fn deadline_field(value: &Value) -> Option<String> {
    match value {
        Value::Bool(false) => None,
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        other => text_field(other),
    }
}
// endregion: --- Listing Overlay

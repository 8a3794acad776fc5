// region:    --- Imports
use crate::auction::Section;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use thiserror::Error;
use tracing::info;

// endregion: --- Imports

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Decode(#[from] serde_json::Error),
}

// region:    --- Remote Source Trait
/// 섹션별 경매 데이터를 제공하는 원격 소스
#[async_trait]
pub trait RemoteSource: Send + Sync {
    /// 섹션 경로의 JSON 문서를 그대로 가져온다. 배열인지는 호출자가 판단한다.
    async fn fetch_section(&self, section: Section) -> Result<Value, FetchError>;
}
// endregion: --- Remote Source Trait

// region:    --- HTTP Remote Source
/// 경매 API 서버에서 가져오는 원격 소스. 응답 상태 코드는 보지 않는다.
pub struct HttpRemoteSource {
    client: Client,
    base_url: String,
}

impl HttpRemoteSource {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl RemoteSource for HttpRemoteSource {
    async fn fetch_section(&self, section: Section) -> Result<Value, FetchError> {
        let url = format!("{}{}", self.base_url, section.api_path());
        info!("{:<12} --> 원격 경매 조회: {}", "Remote", url);
        let body = self.client.get(&url).send().await?.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}
// endregion: --- HTTP Remote Source

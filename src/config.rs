// region:    --- Imports
use std::env;
use std::fmt::Display;
use std::path::PathBuf;
use std::str::FromStr;
use tracing::{info, warn};

// endregion: --- Imports

const DEFAULT_PORT: &str = "3000";
const DEFAULT_STATIC_ROOT: &str = "website";
const DEFAULT_BASE_URL: &str = "http://127.0.0.1:3000";
const DEFAULT_LOCAL_STORAGE_PATH: &str = ".auction-board.json";

// region:    --- Config
/// 환경 변수 기반 설정. 값이 없거나 잘못되면 기본값을 사용한다.
#[derive(Debug, Clone)]
pub struct Config {
    /// 서버 포트 (PORT)
    pub port: u16,
    /// 정적 파일 루트 (STATIC_ROOT)
    pub static_root: PathBuf,
    /// 보드가 접속할 API 주소 (AUCTIONS_BASE_URL)
    pub base_url: String,
    /// 보드의 로컬 저장소 파일 (LOCAL_STORAGE_PATH)
    pub local_storage_path: PathBuf,
}

impl Config {
    pub fn load() -> Self {
        Self {
            port: try_load("PORT", DEFAULT_PORT),
            static_root: try_load("STATIC_ROOT", DEFAULT_STATIC_ROOT),
            base_url: try_load::<String>("AUCTIONS_BASE_URL", DEFAULT_BASE_URL)
                .trim_end_matches('/')
                .to_string(),
            local_storage_path: try_load("LOCAL_STORAGE_PATH", DEFAULT_LOCAL_STORAGE_PATH),
        }
    }

    pub fn bind_address(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 3000,
            static_root: PathBuf::from(DEFAULT_STATIC_ROOT),
            base_url: DEFAULT_BASE_URL.to_string(),
            local_storage_path: PathBuf::from(DEFAULT_LOCAL_STORAGE_PATH),
        }
    }
}
// endregion: --- Config

fn try_load<T: FromStr>(key: &str, default: &str) -> T
where
    T::Err: Display,
{
    let raw = env::var(key).unwrap_or_else(|_| {
        info!("{:<12} --> {key} 미설정, 기본값 사용: {default}", "Config");
        default.to_string()
    });
    match raw.parse() {
        Ok(value) => value,
        Err(e) => {
            warn!("{:<12} --> {key} 값이 잘못됨 ({e}), 기본값 사용: {default}", "Config");
            parse_default(default)
        }
    }
}

fn parse_default<T: FromStr>(default: &str) -> T
where
    T::Err: Display,
{
    match default.parse() {
        Ok(value) => value,
        Err(e) => unreachable!("built-in default {default:?} must parse: {e}"),
    }
}

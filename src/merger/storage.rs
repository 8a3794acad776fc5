//! 브라우저 localStorage 에 해당하는 키/값 저장소.

// region:    --- Imports
use crate::auction::{ListingOverlay, Section};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::{Mutex, PoisonError};
use thiserror::Error;
use tracing::warn;

// endregion: --- Imports

/// 첫 판매 여부 플래그 키
pub const HAS_SOLD_BEFORE_KEY: &str = "hasSoldBefore";

/// 캐시된 오버레이 배열의 최대 길이
pub const MAX_CACHED_OVERLAYS: usize = 100;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("overlay index {index} out of range (max {max})")]
    IndexOutOfRange { index: usize, max: usize },
}

// region:    --- Local Storage Trait
pub trait LocalStorage: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}
// endregion: --- Local Storage Trait

// region:    --- Memory Storage
/// 메모리 저장소
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl LocalStorage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}
// endregion: --- Memory Storage

// region:    --- File Storage
/// JSON 객체 파일 하나에 모든 키를 담는 저장소
///
/// 파일이 없으면 비어 있는 것으로 본다. 깨진 파일은 읽을 때는 비어 있는 것으로,
/// 쓸 때는 에러로 처리한다.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn load(&self) -> Result<Map<String, Value>, StorageError> {
        match fs::read_to_string(&self.path) {
            Ok(raw) if raw.trim().is_empty() => Ok(Map::new()),
            Ok(raw) => Ok(serde_json::from_str(&raw)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Map::new()),
            Err(e) => Err(e.into()),
        }
    }
}

impl LocalStorage for FileStorage {
    fn get(&self, key: &str) -> Option<String> {
        let entries = match self.load() {
            Ok(entries) => entries,
            Err(e) => {
                warn!(
                    "{:<12} --> 저장소 파일을 읽을 수 없음 ({}): {}",
                    "Storage",
                    self.path.display(),
                    e
                );
                return None;
            }
        };
        entries
            .get(key)
            .and_then(Value::as_str)
            .map(str::to_string)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self.load()?;
        entries.insert(key.to_string(), Value::String(value.to_string()));
        fs::write(&self.path, serde_json::to_string_pretty(&entries)?)?;
        Ok(())
    }
}
// endregion: --- File Storage

// region:    --- Cached Overlays
/// 관리 화면에서 수정하는 오버레이 필드
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayField {
    Title,
    Bid,
    Deadline,
}

impl std::str::FromStr for OverlayField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "title" => Ok(OverlayField::Title),
            "bid" => Ok(OverlayField::Bid),
            "deadline" => Ok(OverlayField::Deadline),
            other => Err(format!("unknown overlay field: {other}")),
        }
    }
}

/// 섹션의 캐시된 오버레이 저장
pub fn save_overlay(
    storage: &dyn LocalStorage,
    section: Section,
    overlays: &[ListingOverlay],
) -> Result<(), StorageError> {
    storage.set(section.storage_key(), &serde_json::to_string(overlays)?)
}

/// 캐시된 오버레이의 i 번째 항목 필드 하나를 수정
///
/// 기존 캐시가 없거나 깨져 있으면 빈 배열에서 시작한다. 모자란 앞쪽 항목은 빈 오버레이로 채운다.
/// 인덱스는 `MAX_CACHED_OVERLAYS` 미만이어야 한다.
pub fn edit_cached_overlay(
    storage: &dyn LocalStorage,
    section: Section,
    index: usize,
    field: OverlayField,
    value: &str,
) -> Result<Vec<ListingOverlay>, StorageError> {
    if index >= MAX_CACHED_OVERLAYS {
        return Err(StorageError::IndexOutOfRange {
            index,
            max: MAX_CACHED_OVERLAYS - 1,
        });
    }

    let mut overlays: Vec<ListingOverlay> = storage
        .get(section.storage_key())
        .and_then(|raw| serde_json::from_str::<Value>(&raw).ok())
        .and_then(|value| match value {
            Value::Array(items) => Some(items.iter().map(ListingOverlay::from_value).collect()),
            _ => None,
        })
        .unwrap_or_default();

    if overlays.len() <= index {
        overlays.resize(index + 1, ListingOverlay::default());
    }
    let slot = match field {
        OverlayField::Title => &mut overlays[index].title,
        OverlayField::Bid => &mut overlays[index].bid,
        OverlayField::Deadline => &mut overlays[index].deadline,
    };
    *slot = Some(value.to_string());

    save_overlay(storage, section, &overlays)?;
    Ok(overlays)
}
// endregion: --- Cached Overlays

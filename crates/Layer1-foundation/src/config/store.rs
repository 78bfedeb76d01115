//! Store Config - 저장소 설정
//!
//! 어떤 백엔드에 슬롯을 저장할지, 내보내기 파일 이름 등을 관리

use crate::storage::{
    JsonFileStorage, JsonStore, KeyValueStorage, MemoryStorage, SqliteStorage,
};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{debug, info};

/// 설정 파일명
pub const STORE_CONFIG_FILE: &str = "store.json";

/// 기본 내보내기 파일 접두사
pub const DEFAULT_EXPORT_PREFIX: &str = "location-maison-db";

// ============================================================================
// Storage Backend
// ============================================================================

/// 슬롯 저장 백엔드
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageBackend {
    /// 프로세스 메모리 (재시작 시 소멸)
    Memory,
    /// 슬롯당 JSON 파일
    #[default]
    Json,
    /// SQLite 데이터베이스
    Sqlite,
}

// ============================================================================
// Store Config
// ============================================================================

/// 저장소 설정
///
/// Every field is optional so that project settings can override only what
/// they name. Use the accessors for effective values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreConfig {
    /// 저장 백엔드
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backend: Option<StorageBackend>,

    /// 데이터 디렉토리 (기본: 플랫폼 데이터 디렉토리)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,

    /// 내보내기 파일 접두사
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub export_prefix: Option<String>,
}

impl StoreConfig {
    pub fn new() -> Self {
        Self::default()
    }

    // ========================================================================
    // Load / Save
    // ========================================================================

    /// 글로벌 + 프로젝트 병합 로드
    pub fn load() -> Result<Self> {
        let mut config = Self::new();

        // 1. 글로벌 설정
        if let Ok(global) = JsonStore::global() {
            if let Some(global_config) = global.load_optional::<StoreConfig>(STORE_CONFIG_FILE)? {
                debug!("Loaded global store config");
                config.merge(global_config);
            }
        }

        // 2. 프로젝트 설정
        if let Ok(project) = JsonStore::current_project() {
            if let Some(project_config) =
                project.load_optional::<StoreConfig>(STORE_CONFIG_FILE)?
            {
                debug!("Loaded project store config");
                config.merge(project_config);
            }
        }

        Ok(config)
    }

    /// 지정한 저장소에서만 로드
    pub fn load_from(store: &JsonStore) -> Self {
        store.load_or_default(STORE_CONFIG_FILE)
    }

    /// 지정한 저장소에 저장
    pub fn save_to(&self, store: &JsonStore) -> Result<()> {
        store.save(STORE_CONFIG_FILE, self)
    }

    // ========================================================================
    // Merge
    // ========================================================================

    /// 다른 설정과 병합 (other가 우선)
    pub fn merge(&mut self, other: StoreConfig) {
        if other.backend.is_some() {
            self.backend = other.backend;
        }
        if other.data_dir.is_some() {
            self.data_dir = other.data_dir;
        }
        if other.export_prefix.is_some() {
            self.export_prefix = other.export_prefix;
        }
    }

    // ========================================================================
    // Effective values
    // ========================================================================

    pub fn backend(&self) -> StorageBackend {
        self.backend.unwrap_or_default()
    }

    pub fn export_prefix(&self) -> &str {
        self.export_prefix
            .as_deref()
            .filter(|p| !p.is_empty())
            .unwrap_or(DEFAULT_EXPORT_PREFIX)
    }

    /// 실제 데이터 디렉토리
    pub fn data_dir(&self) -> Result<PathBuf> {
        match &self.data_dir {
            Some(dir) => Ok(dir.clone()),
            None => JsonStore::data().map(|store| store.base_dir().to_path_buf()),
        }
    }

    /// 설정된 백엔드 열기
    pub fn open_storage(&self) -> Result<Box<dyn KeyValueStorage>> {
        let backend = self.backend();
        let storage: Box<dyn KeyValueStorage> = match backend {
            StorageBackend::Memory => Box::new(MemoryStorage::new()),
            StorageBackend::Json => Box::new(JsonFileStorage::new(self.data_dir()?)),
            StorageBackend::Sqlite => Box::new(SqliteStorage::open(&self.data_dir()?)?),
        };

        info!("Opened {:?} storage backend", backend);
        Ok(storage)
    }

    // ========================================================================
    // Builder
    // ========================================================================

    pub fn with_backend(mut self, backend: StorageBackend) -> Self {
        self.backend = Some(backend);
        self
    }

    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = Some(dir.into());
        self
    }

    pub fn with_export_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.export_prefix = Some(prefix.into());
        self
    }

    /// 설정 값 검증
    pub fn validate(&self) -> Result<()> {
        if let Some(prefix) = &self.export_prefix {
            if prefix.contains(['/', '\\']) {
                return Err(Error::Config(format!(
                    "Export prefix must be a file name, got {:?}",
                    prefix
                )));
            }
        }
        Ok(())
    }
}

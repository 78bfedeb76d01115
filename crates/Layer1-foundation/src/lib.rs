//! # maison-foundation
//!
//! Foundation layer for Location Maison:
//! - Error: 공통 에러 타입 (검증, 저장소, 설정)
//! - Storage: `KeyValueStorage` 인터페이스 + Memory / JSON 파일 / SQLite 백엔드
//! - Config: 저장소 설정 (StoreConfig)
//! - Time: ISO-8601 타임스탬프
//!
//! ## 아키텍처
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │  Layer2-Store (LocalRecordStore)             │
//! │  houses / users / session 슬롯 읽기-수정-쓰기  │
//! ├──────────────────────────────────────────────┤
//! │  Layer1-Foundation (이 레이어)                │
//! │  KeyValueStorage: get / set / remove         │
//! │   ├── MemoryStorage                          │
//! │   ├── JsonFileStorage (JsonStore)            │
//! │   └── SqliteStorage                          │
//! └──────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod error;
pub mod storage;
pub mod time;

// ============================================================================
// Error
// ============================================================================
pub use error::{Error, Result};

// ============================================================================
// Config (설정)
// ============================================================================
pub use config::{StorageBackend, StoreConfig, DEFAULT_EXPORT_PREFIX, STORE_CONFIG_FILE};

// ============================================================================
// Storage (저장소)
// ============================================================================
pub use storage::{
    // Backends
    JsonFileStorage,
    JsonStore,
    MemoryStorage,
    SqliteStorage,
    // Interface
    KeyValueStorage,
    // Slot keys
    ALL_KEYS,
    LISTINGS_KEY,
    SESSION_KEY,
    USERS_KEY,
};

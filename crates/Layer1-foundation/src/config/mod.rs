//! Config - 저장소 설정 관리
//!
//! - `store.rs` - StoreConfig (백엔드, 데이터 디렉토리, 내보내기)

mod store;

pub use store::{StorageBackend, StoreConfig, DEFAULT_EXPORT_PREFIX, STORE_CONFIG_FILE};

//! Storage module for Location Maison
//!
//! - `KeyValueStorage`: 슬롯(키) 단위 텍스트 저장소 인터페이스
//! - `memory`: 프로세스 내 HashMap (테스트, 임시 세션)
//! - `json`: 슬롯당 JSON 파일 하나
//! - `db`: SQLite 슬롯 테이블
//!
//! Every backend stores opaque text under a key. Writers replace the whole
//! slot; there is no locking across processes, so two writers racing on the
//! same slot resolve as last-write-wins.

mod db;
mod json;
mod memory;

use crate::Result;
use std::sync::Arc;

// SQLite Storage
pub use db::SqliteStorage;

// JSON Storage
pub use json::{JsonFileStorage, JsonStore};

// In-memory Storage
pub use memory::MemoryStorage;

// ============================================================================
// Slot keys
// ============================================================================

/// Listings envelope slot
pub const LISTINGS_KEY: &str = "locationMaisonDB";

/// Users envelope slot
pub const USERS_KEY: &str = "locationMaisonUsersDB";

/// Active session slot
pub const SESSION_KEY: &str = "locationMaisonSession";

/// All slot keys owned by the record store
pub const ALL_KEYS: [&str; 3] = [LISTINGS_KEY, USERS_KEY, SESSION_KEY];

// ============================================================================
// KeyValueStorage
// ============================================================================

/// Synchronous key-value storage with whole-value reads and writes.
///
/// `get` returns `Ok(None)` for an absent key. `remove` on an absent key is a
/// no-op. Failures (quota, I/O, a poisoned connection) surface as errors and
/// are never retried here.
pub trait KeyValueStorage: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;

    fn set(&self, key: &str, value: &str) -> Result<()>;

    fn remove(&self, key: &str) -> Result<()>;

    fn contains(&self, key: &str) -> Result<bool> {
        Ok(self.get(key)?.is_some())
    }
}

impl<T: KeyValueStorage + ?Sized> KeyValueStorage for &T {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<()> {
        (**self).remove(key)
    }
}

impl<T: KeyValueStorage + ?Sized> KeyValueStorage for Box<T> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<()> {
        (**self).remove(key)
    }
}

impl<T: KeyValueStorage + ?Sized> KeyValueStorage for Arc<T> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<()> {
        (**self).remove(key)
    }
}

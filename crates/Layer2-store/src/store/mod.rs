//! LocalRecordStore - 슬롯 기반 레코드 저장소
//!
//! 세 개의 슬롯을 관리:
//! - listings (`locationMaisonDB`): 매물 envelope
//! - users (`locationMaisonUsersDB`): 사용자 envelope
//! - session (`locationMaisonSession`): 현재 로그인 세션
//!
//! Every operation reads the whole slot, changes it in memory and writes the
//! whole slot back. Nothing is locked: two stores sharing a backend overwrite
//! each other's changes, last write wins.

mod database;
mod houses;
mod users;

pub use database::DatabaseExport;

use crate::model::{Envelope, ListingsEnvelope, UsersEnvelope};
use maison_foundation::{time, Error, KeyValueStorage, Result, StoreConfig, DEFAULT_EXPORT_PREFIX};
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, info};

/// House listings, user accounts and the login session on top of a
/// [`KeyValueStorage`].
pub struct LocalRecordStore<S> {
    storage: S,
    export_prefix: String,
}

impl<S: KeyValueStorage> LocalRecordStore<S> {
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            export_prefix: DEFAULT_EXPORT_PREFIX.to_string(),
        }
    }

    /// 내보내기 파일 이름 접두사 변경
    pub fn with_export_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.export_prefix = prefix.into();
        self
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn into_storage(self) -> S {
        self.storage
    }

    // ========================================================================
    // Initialization
    // ========================================================================

    /// Write an empty envelope into each collection slot that is absent.
    /// Existing slots are never touched, so this is safe before every call.
    pub fn ensure_initialized(&self) -> Result<()> {
        self.init_slot::<ListingsEnvelope>()?;
        self.init_slot::<UsersEnvelope>()
    }

    fn init_slot<E: Envelope>(&self) -> Result<()> {
        if self.storage.contains(E::SLOT)? {
            return Ok(());
        }

        let now = time::now_iso();
        self.write_slot(E::SLOT, &E::empty(&now))?;
        info!("Initialized empty slot {}", E::SLOT);
        Ok(())
    }

    // ========================================================================
    // Slot I/O
    // ========================================================================

    fn read_slot<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        match self.storage.get(key)? {
            Some(text) => serde_json::from_str(&text)
                .map(Some)
                .map_err(|e| Error::corrupted(key, e)),
            None => Ok(None),
        }
    }

    fn write_slot<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        let text = serde_json::to_string(value)?;
        self.storage.set(key, &text)?;
        debug!("Persisted slot {} ({} bytes)", key, text.len());
        Ok(())
    }

    /// Initialize, then read a collection envelope
    fn load<E: Envelope>(&self) -> Result<E> {
        self.ensure_initialized()?;
        self.read_slot(E::SLOT)?
            .ok_or_else(|| Error::Storage(format!("Slot {} missing after initialization", E::SLOT)))
    }

    fn save<E: Envelope>(&self, envelope: &E) -> Result<()> {
        self.write_slot(E::SLOT, envelope)
    }
}

impl LocalRecordStore<Box<dyn KeyValueStorage>> {
    /// Open the configured backend and initialize its slots
    pub fn from_config(config: &StoreConfig) -> Result<Self> {
        config.validate()?;

        let store =
            Self::new(config.open_storage()?).with_export_prefix(config.export_prefix());
        store.ensure_initialized()?;
        Ok(store)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use maison_foundation::{MemoryStorage, StorageBackend, LISTINGS_KEY, USERS_KEY};

    #[test]
    fn test_ensure_initialized_is_idempotent() {
        let store = LocalRecordStore::new(MemoryStorage::new());
        store.ensure_initialized().unwrap();
        let first = store.storage().get(LISTINGS_KEY).unwrap();

        store.ensure_initialized().unwrap();
        assert_eq!(store.storage().get(LISTINGS_KEY).unwrap(), first);
        assert!(store.storage().contains(USERS_KEY).unwrap());
    }

    #[test]
    fn test_slots_initialize_independently() {
        let storage = MemoryStorage::new();
        storage
            .set(USERS_KEY, r#"{"users":[],"lastUserId":7}"#)
            .unwrap();

        let store = LocalRecordStore::new(&storage);
        store.ensure_initialized().unwrap();

        let users: UsersEnvelope = store.read_slot(USERS_KEY).unwrap().unwrap();
        assert_eq!(users.last_user_id, 7);
        assert!(storage.contains(LISTINGS_KEY).unwrap());
    }

    #[test]
    fn test_corrupted_slot_is_reported() {
        let storage = MemoryStorage::new();
        storage.set(LISTINGS_KEY, "{not json").unwrap();

        let store = LocalRecordStore::new(storage);
        let err = store.load::<ListingsEnvelope>().unwrap_err();
        assert!(matches!(err, Error::CorruptedSlot { .. }));
    }

    #[test]
    fn test_from_config_memory_backend() {
        let config = StoreConfig::new()
            .with_backend(StorageBackend::Memory)
            .with_export_prefix("maisons");
        let store = LocalRecordStore::from_config(&config).unwrap();

        assert!(store.storage().contains(LISTINGS_KEY).unwrap());
        assert_eq!(store.export_prefix, "maisons");
    }
}

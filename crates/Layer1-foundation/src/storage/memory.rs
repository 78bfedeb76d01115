//! In-memory slot storage

use super::KeyValueStorage;
use crate::{Error, Result};
use parking_lot::RwLock;
use std::collections::HashMap;

/// HashMap 기반 저장소
///
/// An optional byte quota mimics a browser storage limit: a `set` that would
/// push the total size of keys and values over the quota fails with
/// [`Error::Storage`] and leaves the previous value in place.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    slots: RwLock<HashMap<String, String>>,
    quota: Option<usize>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// 용량 제한이 있는 저장소
    pub fn with_quota(bytes: usize) -> Self {
        Self {
            slots: RwLock::new(HashMap::new()),
            quota: Some(bytes),
        }
    }

    pub fn len(&self) -> usize {
        self.slots.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.read().is_empty()
    }

    /// 저장된 키 목록 (정렬됨)
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.slots.read().keys().cloned().collect();
        keys.sort();
        keys
    }

    fn used_bytes(slots: &HashMap<String, String>) -> usize {
        slots.iter().map(|(k, v)| k.len() + v.len()).sum()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.slots.read().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut slots = self.slots.write();

        if let Some(quota) = self.quota {
            let current = slots.get(key).map(|v| key.len() + v.len()).unwrap_or(0);
            let projected = Self::used_bytes(&slots) - current + key.len() + value.len();
            if projected > quota {
                return Err(Error::Storage(format!(
                    "Quota exceeded writing {}: {} > {} bytes",
                    key, projected, quota
                )));
            }
        }

        slots.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.slots.write().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_remove() {
        let storage = MemoryStorage::new();
        assert_eq!(storage.get("a").unwrap(), None);

        storage.set("a", "1").unwrap();
        storage.set("a", "2").unwrap();
        assert_eq!(storage.get("a").unwrap().as_deref(), Some("2"));
        assert_eq!(storage.len(), 1);

        storage.remove("a").unwrap();
        storage.remove("a").unwrap();
        assert!(storage.is_empty());
    }

    #[test]
    fn test_quota_rejects_oversized_write() {
        let storage = MemoryStorage::with_quota(10);
        storage.set("k", "12345").unwrap();

        let err = storage.set("k", "1234567890").unwrap_err();
        assert!(matches!(err, Error::Storage(_)));
        assert_eq!(storage.get("k").unwrap().as_deref(), Some("12345"));

        // 같은 키 덮어쓰기는 기존 크기를 제외하고 계산
        storage.set("k", "123456789").unwrap();
    }
}

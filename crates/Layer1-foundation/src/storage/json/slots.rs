//! 슬롯당 JSON 파일 하나

use super::store::JsonStore;
use crate::storage::KeyValueStorage;
use crate::{Error, Result};
use std::path::{Path, PathBuf};
use tracing::debug;

/// File-per-slot storage: the slot `locationMaisonDB` lives in
/// `<dir>/locationMaisonDB.json`, holding the slot text verbatim.
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    store: JsonStore,
}

impl JsonFileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            store: JsonStore::new(dir),
        }
    }

    pub fn from_store(store: JsonStore) -> Self {
        Self { store }
    }

    pub fn base_dir(&self) -> &Path {
        self.store.base_dir()
    }

    fn file_name(key: &str) -> Result<String> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.')
            && !key.starts_with('.');
        if !valid {
            return Err(Error::InvalidInput(format!("Invalid slot key: {:?}", key)));
        }
        Ok(format!("{}.json", key))
    }
}

impl KeyValueStorage for JsonFileStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let file = Self::file_name(key)?;
        if !self.store.exists(&file) {
            return Ok(None);
        }
        self.store.read_text(&file).map(Some)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let file = Self::file_name(key)?;
        self.store.write_text(&file, value)?;
        debug!("Wrote slot {} ({} bytes)", key, value.len());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let file = Self::file_name(key)?;
        self.store.remove(&file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{LISTINGS_KEY, SESSION_KEY};

    #[test]
    fn test_slot_files() {
        let dir = tempfile::tempdir().unwrap();
        let storage = JsonFileStorage::new(dir.path());

        assert_eq!(storage.get(LISTINGS_KEY).unwrap(), None);
        storage.set(LISTINGS_KEY, r#"{"houses":[]}"#).unwrap();
        assert!(dir.path().join("locationMaisonDB.json").exists());
        assert_eq!(
            storage.get(LISTINGS_KEY).unwrap().as_deref(),
            Some(r#"{"houses":[]}"#)
        );

        storage.remove(LISTINGS_KEY).unwrap();
        storage.remove(SESSION_KEY).unwrap();
        assert_eq!(storage.get(LISTINGS_KEY).unwrap(), None);
    }

    #[test]
    fn test_rejects_path_like_keys() {
        let dir = tempfile::tempdir().unwrap();
        let storage = JsonFileStorage::new(dir.path());

        assert!(matches!(
            storage.set("../escape", "x"),
            Err(Error::InvalidInput(_))
        ));
        assert!(storage.get("").is_err());
    }
}

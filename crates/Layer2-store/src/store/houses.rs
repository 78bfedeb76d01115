//! House listing operations

use super::LocalRecordStore;
use crate::coerce::IntoRecordId;
use crate::model::{House, HouseFields, ListingsEnvelope, SearchFilters};
use maison_foundation::{time, Error, KeyValueStorage, Result};
use tracing::{debug, info, warn};

impl<S: KeyValueStorage> LocalRecordStore<S> {
    /// All listings. A missing or unreadable slot reads as no listings.
    pub fn list_houses(&self) -> Vec<House> {
        match self.load::<ListingsEnvelope>() {
            Ok(envelope) => envelope.houses,
            Err(e) => {
                warn!("Failed to read listings: {}", e);
                Vec::new()
            }
        }
    }

    pub fn get_house(&self, id: impl IntoRecordId) -> Option<House> {
        let id = id.into_record_id()?;
        self.list_houses().into_iter().find(|h| h.id() == Some(id))
    }

    /// Create a listing owned by the logged-in user.
    ///
    /// Fails with [`Error::Unauthenticated`] when nobody is logged in.
    pub fn add_house(&self, data: HouseFields) -> Result<House> {
        let mut envelope = self.load::<ListingsEnvelope>()?;
        let owner = self.get_current_user().ok_or(Error::Unauthenticated)?;

        let now = time::now_iso();
        let id = envelope.next_id()?;
        let house = House::create(id, owner.id, data, &now);

        envelope.houses.push(house.clone());
        envelope.touch(&now);
        self.save(&envelope)?;

        info!("Added house {} for user {}", id, owner.id);
        Ok(house)
    }

    /// Merge `patch` into a listing. `Ok(None)` if the id is unknown.
    pub fn update_house(&self, id: impl IntoRecordId, patch: HouseFields) -> Result<Option<House>> {
        let mut envelope = self.load::<ListingsEnvelope>()?;
        let Some(index) = id.into_record_id().and_then(|id| envelope.position(id)) else {
            debug!("Update skipped, no such house");
            return Ok(None);
        };

        let now = time::now_iso();
        let house = &mut envelope.houses[index];
        house.apply_patch(patch, &now);
        let updated = house.clone();

        envelope.touch(&now);
        self.save(&envelope)?;

        debug!("Updated house {:?}", updated.id());
        Ok(Some(updated))
    }

    /// Remove a listing. `Ok(false)` if the id is unknown.
    pub fn delete_house(&self, id: impl IntoRecordId) -> Result<bool> {
        let mut envelope = self.load::<ListingsEnvelope>()?;
        let Some(index) = id.into_record_id().and_then(|id| envelope.position(id)) else {
            debug!("Delete skipped, no such house");
            return Ok(false);
        };

        let removed = envelope.houses.remove(index);
        envelope.touch(&time::now_iso());
        self.save(&envelope)?;

        info!("Deleted house {:?}", removed.id());
        Ok(true)
    }

    pub fn search_houses(&self, filters: &SearchFilters) -> Vec<House> {
        filters.apply(self.list_houses())
    }

    pub fn get_houses_by_user_id(&self, user_id: impl IntoRecordId) -> Vec<House> {
        let Some(user_id) = user_id.into_record_id() else {
            return Vec::new();
        };

        self.list_houses()
            .into_iter()
            .filter(|h| h.user_id() == Some(user_id))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RegisterUser;
    use maison_foundation::{MemoryStorage, LISTINGS_KEY};
    use serde_json::{json, Value};

    fn fields(value: Value) -> HouseFields {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    fn logged_in_store() -> LocalRecordStore<MemoryStorage> {
        let store = LocalRecordStore::new(MemoryStorage::new());
        store
            .register_user(RegisterUser::new("Jean Dupont", "jean@example.fr", "secret"))
            .unwrap();
        store.login_user("jean@example.fr", "secret").unwrap().unwrap();
        store
    }

    #[test]
    fn test_add_requires_session() {
        let store = LocalRecordStore::new(MemoryStorage::new());
        let err = store.add_house(fields(json!({"city": "Lyon"}))).unwrap_err();
        assert!(matches!(err, Error::Unauthenticated));
        assert!(store.list_houses().is_empty());
    }

    #[test]
    fn test_add_assigns_id_and_owner() {
        let store = logged_in_store();
        let first = store.add_house(fields(json!({"city": "Lyon"}))).unwrap();
        let second = store.add_house(fields(json!({"city": "Nice"}))).unwrap();

        assert_eq!(first.id(), Some(1));
        assert_eq!(second.id(), Some(2));
        assert_eq!(second.user_id(), Some(1));
        assert_eq!(store.get_house("2").unwrap().city(), Some("Nice"));
    }

    #[test]
    fn test_update_and_delete_unknown_id() {
        let store = logged_in_store();
        store.add_house(fields(json!({"city": "Lyon"}))).unwrap();
        let before = store.storage().get(LISTINGS_KEY).unwrap();

        assert_eq!(store.update_house(42, fields(json!({"price": 1}))).unwrap(), None);
        assert!(!store.delete_house("abc").unwrap());
        assert_eq!(store.storage().get(LISTINGS_KEY).unwrap(), before);
    }

    #[test]
    fn test_list_houses_tolerates_corruption() {
        let storage = MemoryStorage::new();
        storage.set(LISTINGS_KEY, "[[[").unwrap();

        let store = LocalRecordStore::new(storage);
        assert!(store.list_houses().is_empty());
        assert!(store.get_house(1).is_none());
    }

    #[test]
    fn test_houses_by_user() {
        let store = logged_in_store();
        store.add_house(fields(json!({"city": "Lyon"}))).unwrap();

        assert_eq!(store.get_houses_by_user_id("1").len(), 1);
        assert!(store.get_houses_by_user_id(2).is_empty());
        assert!(store.get_houses_by_user_id("x").is_empty());
    }
}

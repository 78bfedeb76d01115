//! Collection envelopes
//!
//! Each collection slot holds one envelope: the items, a monotonic id counter
//! and bookkeeping timestamps. Counters only grow, so a deleted id is never
//! handed out again.

use super::house::House;
use super::user::User;
use crate::coerce;
use maison_foundation::{Error, Result, LISTINGS_KEY, USERS_KEY};
use serde::{de::DeserializeOwned, Deserialize, Serialize};

/// A collection persisted whole under one slot
pub trait Envelope: Serialize + DeserializeOwned {
    /// Slot key the envelope lives under
    const SLOT: &'static str;

    /// Fresh, empty envelope stamped with `now`
    fn empty(now: &str) -> Self;
}

fn bump(counter: i64, name: &str) -> Result<i64> {
    counter
        .checked_add(1)
        .ok_or_else(|| Error::Storage(format!("Id counter {} exhausted at {}", name, counter)))
}

// ============================================================================
// Listings
// ============================================================================

/// `{houses, lastId, createdAt, updatedAt}`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingsEnvelope {
    #[serde(default)]
    pub houses: Vec<House>,

    #[serde(default, deserialize_with = "coerce::lenient_int_or_zero")]
    pub last_id: i64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl Envelope for ListingsEnvelope {
    const SLOT: &'static str = LISTINGS_KEY;

    fn empty(now: &str) -> Self {
        Self {
            houses: Vec::new(),
            last_id: 0,
            created_at: Some(now.to_string()),
            updated_at: Some(now.to_string()),
        }
    }
}

impl ListingsEnvelope {
    /// Bump the counter and return the new id
    pub(crate) fn next_id(&mut self) -> Result<i64> {
        self.last_id = bump(self.last_id, "lastId")?;
        Ok(self.last_id)
    }

    pub(crate) fn position(&self, id: i64) -> Option<usize> {
        self.houses.iter().position(|h| h.id() == Some(id))
    }

    pub(crate) fn touch(&mut self, now: &str) {
        self.updated_at = Some(now.to_string());
    }

    pub fn stats(&self) -> DatabaseStats {
        DatabaseStats {
            total_houses: self.houses.len(),
            available_houses: self.houses.iter().filter(|h| h.is_available()).count(),
            created_at: self.created_at.clone(),
            updated_at: self.updated_at.clone(),
        }
    }
}

/// Listing counts and envelope timestamps
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatabaseStats {
    pub total_houses: usize,
    pub available_houses: usize,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

// ============================================================================
// Users
// ============================================================================

/// `{users, lastUserId, createdAt, updatedAt}`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsersEnvelope {
    #[serde(default)]
    pub users: Vec<User>,

    #[serde(default, deserialize_with = "coerce::lenient_int_or_zero")]
    pub last_user_id: i64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl Envelope for UsersEnvelope {
    const SLOT: &'static str = USERS_KEY;

    fn empty(now: &str) -> Self {
        Self {
            users: Vec::new(),
            last_user_id: 0,
            created_at: Some(now.to_string()),
            updated_at: Some(now.to_string()),
        }
    }
}

impl UsersEnvelope {
    pub(crate) fn next_id(&mut self) -> Result<i64> {
        self.last_user_id = bump(self.last_user_id, "lastUserId")?;
        Ok(self.last_user_id)
    }

    pub(crate) fn find(&self, id: i64) -> Option<&User> {
        self.users.iter().find(|u| u.id == id)
    }

    pub(crate) fn find_by_email(&self, email: &str) -> Option<&User> {
        self.users.iter().find(|u| u.has_email(email))
    }

    pub(crate) fn touch(&mut self, now: &str) {
        self.updated_at = Some(now.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_listings_wire_format() {
        let value = serde_json::to_value(ListingsEnvelope::empty("t")).unwrap();
        assert_eq!(
            value,
            json!({"houses": [], "lastId": 0, "createdAt": "t", "updatedAt": "t"})
        );
    }

    #[test]
    fn test_empty_users_wire_format() {
        let value = serde_json::to_value(UsersEnvelope::empty("t")).unwrap();
        assert_eq!(
            value,
            json!({"users": [], "lastUserId": 0, "createdAt": "t", "updatedAt": "t"})
        );
    }

    #[test]
    fn test_missing_fields_default() {
        let envelope: ListingsEnvelope = serde_json::from_str("{}").unwrap();
        assert!(envelope.houses.is_empty());
        assert_eq!(envelope.last_id, 0);
        assert!(envelope.created_at.is_none());
    }

    #[test]
    fn test_stats_counts_available() {
        let envelope: ListingsEnvelope = serde_json::from_value(json!({
            "houses": [
                {"id": 1, "status": "available"},
                {"id": 2, "status": "rented"},
                {"id": 3, "status": "available"}
            ],
            "lastId": 3
        }))
        .unwrap();

        let stats = envelope.stats();
        assert_eq!(stats.total_houses, 3);
        assert_eq!(stats.available_houses, 2);
        assert_eq!(envelope.position(2), Some(1));
        assert_eq!(envelope.position(9), None);
    }

    #[test]
    fn test_null_or_text_counter_is_lenient() {
        let envelope: ListingsEnvelope =
            serde_json::from_value(json!({"houses": [{"id": 1}], "lastId": null})).unwrap();
        assert_eq!(envelope.houses.len(), 1);
        assert_eq!(envelope.last_id, 0);

        let envelope: UsersEnvelope =
            serde_json::from_value(json!({"users": [], "lastUserId": "4"})).unwrap();
        assert_eq!(envelope.last_user_id, 4);
    }

    #[test]
    fn test_exhausted_counter_fails_without_wrapping() {
        let mut listings = ListingsEnvelope {
            last_id: i64::MAX,
            ..Default::default()
        };
        assert!(matches!(listings.next_id(), Err(Error::Storage(_))));
        assert_eq!(listings.last_id, i64::MAX);

        let mut users = UsersEnvelope {
            last_user_id: i64::MAX - 1,
            ..Default::default()
        };
        assert_eq!(users.next_id().unwrap(), i64::MAX);
        assert!(users.next_id().is_err());
    }
}

//! House listing record
//!
//! A listing is an open JSON object: the store owns `id`, `userId`, `status`,
//! `createdAt` and `updatedAt`, everything else (address, price, bedrooms,
//! propertyType, city, ...) belongs to the caller and is kept verbatim.

use crate::coerce;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Caller-supplied listing fields
pub type HouseFields = Map<String, Value>;

/// Status given to every new listing
pub const STATUS_AVAILABLE: &str = "available";

pub const FIELD_ID: &str = "id";
pub const FIELD_USER_ID: &str = "userId";
pub const FIELD_STATUS: &str = "status";
pub const FIELD_CREATED_AT: &str = "createdAt";
pub const FIELD_UPDATED_AT: &str = "updatedAt";
pub const FIELD_CITY: &str = "city";
pub const FIELD_PROPERTY_TYPE: &str = "propertyType";
pub const FIELD_PRICE: &str = "price";
pub const FIELD_BEDROOMS: &str = "bedrooms";

/// House listing
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct House(HouseFields);

impl House {
    /// Build a new listing with the store's field precedence:
    /// `id` and `userId` first, caller fields layered over them, then the
    /// timestamps and `status` forced last.
    pub(crate) fn create(id: i64, user_id: i64, data: HouseFields, now: &str) -> Self {
        let mut fields = HouseFields::new();
        fields.insert(FIELD_ID.to_string(), Value::from(id));
        fields.insert(FIELD_USER_ID.to_string(), Value::from(user_id));
        fields.extend(data);
        fields.insert(FIELD_CREATED_AT.to_string(), Value::from(now));
        fields.insert(FIELD_UPDATED_AT.to_string(), Value::from(now));
        fields.insert(FIELD_STATUS.to_string(), Value::from(STATUS_AVAILABLE));
        Self(fields)
    }

    /// Shallow merge of `patch` over this listing, then a fresh `updatedAt`
    pub(crate) fn apply_patch(&mut self, patch: HouseFields, now: &str) {
        self.0.extend(patch);
        self.0
            .insert(FIELD_UPDATED_AT.to_string(), Value::from(now));
    }

    // ========================================================================
    // Store-owned fields
    // ========================================================================

    pub fn id(&self) -> Option<i64> {
        self.0.get(FIELD_ID).and_then(coerce::exact_int)
    }

    pub fn user_id(&self) -> Option<i64> {
        self.0.get(FIELD_USER_ID).and_then(coerce::exact_int)
    }

    pub fn status(&self) -> Option<&str> {
        self.str_field(FIELD_STATUS)
    }

    pub fn created_at(&self) -> Option<&str> {
        self.str_field(FIELD_CREATED_AT)
    }

    pub fn updated_at(&self) -> Option<&str> {
        self.str_field(FIELD_UPDATED_AT)
    }

    pub fn is_available(&self) -> bool {
        self.status() == Some(STATUS_AVAILABLE)
    }

    // ========================================================================
    // Caller fields
    // ========================================================================

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    pub fn str_field(&self, field: &str) -> Option<&str> {
        self.0.get(field).and_then(Value::as_str)
    }

    pub fn city(&self) -> Option<&str> {
        self.str_field(FIELD_CITY)
    }

    pub fn property_type(&self) -> Option<&str> {
        self.str_field(FIELD_PROPERTY_TYPE)
    }

    /// `price` read as a decimal (`"950"` and `950` both give 950.0)
    pub fn price(&self) -> Option<f64> {
        self.0.get(FIELD_PRICE).and_then(coerce::float_of)
    }

    /// `bedrooms` read as an integer
    pub fn bedrooms(&self) -> Option<i64> {
        self.0.get(FIELD_BEDROOMS).and_then(coerce::int_of)
    }

    pub fn fields(&self) -> &HouseFields {
        &self.0
    }

    pub fn into_fields(self) -> HouseFields {
        self.0
    }
}

impl From<HouseFields> for House {
    fn from(fields: HouseFields) -> Self {
        Self(fields)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields(value: Value) -> HouseFields {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn test_create_precedence() {
        let data = fields(json!({
            "city": "Lyon",
            "status": "rented",
            "createdAt": "1999-01-01T00:00:00.000Z",
            "userId": 99
        }));
        let house = House::create(4, 1, data, "2026-10-19T08:00:00.000Z");

        assert_eq!(house.id(), Some(4));
        // 호출자 필드가 userId 위에 덮어씀
        assert_eq!(house.user_id(), Some(99));
        assert_eq!(house.status(), Some(STATUS_AVAILABLE));
        assert_eq!(house.created_at(), Some("2026-10-19T08:00:00.000Z"));
        assert_eq!(house.city(), Some("Lyon"));
    }

    #[test]
    fn test_apply_patch_is_shallow() {
        let mut house = House::create(1, 1, fields(json!({"price": 100})), "t0");
        house.apply_patch(fields(json!({"price": "120", "status": "rented"})), "t1");

        assert_eq!(house.price(), Some(120.0));
        assert_eq!(house.status(), Some("rented"));
        assert_eq!(house.created_at(), Some("t0"));
        assert_eq!(house.updated_at(), Some("t1"));
    }

    #[test]
    fn test_serializes_as_plain_object() {
        let house = House::create(2, 3, HouseFields::new(), "t");
        let value = serde_json::to_value(&house).unwrap();
        assert_eq!(value["id"], json!(2));
        assert_eq!(value["userId"], json!(3));
        assert_eq!(value["status"], json!("available"));
    }
}

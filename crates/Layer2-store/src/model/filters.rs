//! Listing search filters

use super::house::House;
use crate::coerce;
use serde::{Deserialize, Serialize};

/// Search criteria, combined with AND.
///
/// A criterion that is absent, an empty string or zero is ignored, so an
/// untouched search form matches everything. A listing whose field is
/// missing or not readable as a number fails that criterion.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchFilters {
    /// Substring of `city`, case-insensitive
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property_type: Option<String>,

    /// Upper bound on `price`, inclusive
    #[serde(
        default,
        deserialize_with = "coerce::lenient_float",
        skip_serializing_if = "Option::is_none"
    )]
    pub max_price: Option<f64>,

    /// Lower bound on `bedrooms`, inclusive
    #[serde(
        default,
        deserialize_with = "coerce::lenient_int",
        skip_serializing_if = "Option::is_none"
    )]
    pub min_bedrooms: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl SearchFilters {
    pub fn new() -> Self {
        Self::default()
    }

    // ========================================================================
    // Builder
    // ========================================================================

    pub fn city(mut self, city: impl Into<String>) -> Self {
        self.city = Some(city.into());
        self
    }

    pub fn property_type(mut self, property_type: impl Into<String>) -> Self {
        self.property_type = Some(property_type.into());
        self
    }

    pub fn max_price(mut self, max_price: f64) -> Self {
        self.max_price = Some(max_price);
        self
    }

    pub fn min_bedrooms(mut self, min_bedrooms: i64) -> Self {
        self.min_bedrooms = Some(min_bedrooms);
        self
    }

    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    // ========================================================================
    // Apply
    // ========================================================================

    /// Narrow `houses` criterion by criterion:
    /// city → propertyType → maxPrice → minBedrooms → status
    pub fn apply(&self, mut houses: Vec<House>) -> Vec<House> {
        if let Some(city) = non_empty(&self.city) {
            let needle = city.to_lowercase();
            houses.retain(|h| {
                h.city()
                    .is_some_and(|c| c.to_lowercase().contains(&needle))
            });
        }

        if let Some(property_type) = non_empty(&self.property_type) {
            houses.retain(|h| h.property_type() == Some(property_type));
        }

        if let Some(max_price) = self.max_price.filter(|p| *p != 0.0 && !p.is_nan()) {
            houses.retain(|h| h.price().is_some_and(|p| p <= max_price));
        }

        if let Some(min_bedrooms) = self.min_bedrooms.filter(|b| *b != 0) {
            houses.retain(|h| h.bedrooms().is_some_and(|b| b >= min_bedrooms));
        }

        if let Some(status) = non_empty(&self.status) {
            houses.retain(|h| h.status() == Some(status));
        }

        houses
    }

    pub fn is_empty(&self) -> bool {
        non_empty(&self.city).is_none()
            && non_empty(&self.property_type).is_none()
            && self.max_price.filter(|p| *p != 0.0 && !p.is_nan()).is_none()
            && self.min_bedrooms.filter(|b| *b != 0).is_none()
            && non_empty(&self.status).is_none()
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn houses(value: Value) -> Vec<House> {
        serde_json::from_value(value).unwrap()
    }

    fn ids(houses: &[House]) -> Vec<i64> {
        houses.iter().filter_map(House::id).collect()
    }

    fn sample() -> Vec<House> {
        houses(json!([
            {"id": 1, "city": "Lyon", "price": 100, "bedrooms": 2, "status": "available", "propertyType": "apartment"},
            {"id": 2, "city": "Lyon", "price": 300, "bedrooms": 1, "status": "rented", "propertyType": "house"},
            {"id": 3, "city": "Villeurbanne-lès-Lyon", "price": "250", "bedrooms": "4", "status": "available", "propertyType": "house"},
            {"id": 4, "price": 50, "bedrooms": 3, "status": "available"}
        ]))
    }

    #[test]
    fn test_city_and_price_compose() {
        let result = SearchFilters::new().city("lyon").max_price(150.0).apply(sample());
        assert_eq!(ids(&result), vec![1]);
    }

    #[test]
    fn test_city_is_substring_and_skips_missing_city() {
        let result = SearchFilters::new().city("LYON").apply(sample());
        assert_eq!(ids(&result), vec![1, 2, 3]);
    }

    #[test]
    fn test_numeric_fields_coerce_from_strings() {
        let result = SearchFilters::new().min_bedrooms(3).apply(sample());
        assert_eq!(ids(&result), vec![3, 4]);

        let result = SearchFilters::new().max_price(250.0).apply(sample());
        assert_eq!(ids(&result), vec![1, 3, 4]);
    }

    #[test]
    fn test_exact_matches() {
        let result = SearchFilters::new()
            .property_type("house")
            .status("available")
            .apply(sample());
        assert_eq!(ids(&result), vec![3]);
    }

    #[test]
    fn test_falsy_filters_are_ignored() {
        let filters = SearchFilters::new().city("").max_price(0.0).min_bedrooms(0);
        assert!(filters.is_empty());
        assert_eq!(filters.apply(sample()).len(), 4);
    }

    #[test]
    fn test_deserializes_form_payload() {
        let filters: SearchFilters =
            serde_json::from_value(json!({"city": "Paris", "minBedrooms": 2})).unwrap();
        assert_eq!(filters, SearchFilters::new().city("Paris").min_bedrooms(2));

        let filters: SearchFilters = serde_json::from_value(json!({
            "city": "Lyon",
            "maxPrice": "150",
            "minBedrooms": "2"
        }))
        .unwrap();
        assert_eq!(
            filters,
            SearchFilters::new().city("Lyon").max_price(150.0).min_bedrooms(2)
        );
        assert_eq!(ids(&filters.apply(sample())), vec![1]);
    }

    #[test]
    fn test_form_numbers_truncate_or_drop() {
        let filters: SearchFilters = serde_json::from_value(json!({
            "maxPrice": "",
            "minBedrooms": 2.5
        }))
        .unwrap();
        assert_eq!(filters.max_price, None);
        assert_eq!(filters.min_bedrooms, Some(2));

        let filters: SearchFilters =
            serde_json::from_value(json!({"maxPrice": "cheap", "minBedrooms": null})).unwrap();
        assert!(filters.is_empty());
    }
}

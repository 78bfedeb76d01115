//! Record model
//!
//! - `house`: 매물 (열린 JSON 객체)
//! - `user`: 사용자, 공개 사용자, 세션
//! - `envelope`: 컬렉션 슬롯 래퍼 + 통계
//! - `filters`: 매물 검색 조건

mod envelope;
mod filters;
mod house;
mod user;

pub use envelope::{DatabaseStats, Envelope, ListingsEnvelope, UsersEnvelope};
pub use filters::SearchFilters;
pub use house::{
    House, HouseFields, FIELD_BEDROOMS, FIELD_CITY, FIELD_CREATED_AT, FIELD_ID, FIELD_PRICE,
    FIELD_PROPERTY_TYPE, FIELD_STATUS, FIELD_UPDATED_AT, FIELD_USER_ID, STATUS_AVAILABLE,
};
pub use user::{PublicUser, RegisterUser, Session, User};

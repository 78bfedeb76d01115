//! # maison-store
//!
//! Local record store for Location Maison:
//! - Houses: 매물 CRUD, 검색, 사용자별 조회
//! - Users: 회원가입, 로그인/로그아웃, 현재 사용자
//! - Database: 내보내기/가져오기, 초기화, 통계
//!
//! ```no_run
//! use maison_foundation::MemoryStorage;
//! use maison_store::{LocalRecordStore, RegisterUser, SearchFilters};
//! use serde_json::json;
//!
//! # fn main() -> maison_store::Result<()> {
//! let store = LocalRecordStore::new(MemoryStorage::new());
//! store.register_user(RegisterUser::new("Jean", "jean@example.fr", "secret"))?;
//! store.login_user("jean@example.fr", "secret")?;
//!
//! let fields = json!({"city": "Lyon", "price": 950, "bedrooms": 2});
//! if let serde_json::Value::Object(fields) = fields {
//!     store.add_house(fields)?;
//! }
//!
//! let found = store.search_houses(&SearchFilters::new().city("lyon").max_price(1000.0));
//! assert_eq!(found.len(), 1);
//! # Ok(())
//! # }
//! ```

pub mod coerce;
pub mod model;
pub mod store;

pub use coerce::IntoRecordId;
pub use maison_foundation::{Error, Result};
pub use model::{
    DatabaseStats, House, HouseFields, ListingsEnvelope, PublicUser, RegisterUser, SearchFilters,
    Session, User, UsersEnvelope, STATUS_AVAILABLE,
};
pub use store::{DatabaseExport, LocalRecordStore};

//! JSON 파일 저장소
//!
//! - `store`: 타입 단위 JSON 로드/저장 (설정 파일)
//! - `slots`: 슬롯당 파일 하나인 `KeyValueStorage`

mod slots;
mod store;

pub use slots::JsonFileStorage;
pub use store::JsonStore;

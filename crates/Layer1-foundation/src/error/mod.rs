//! Error types for Location Maison
//!
//! 모든 에러를 중앙에서 관리

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Location Maison 에러 타입
#[derive(Error, Debug)]
pub enum Error {
    // ========================================================================
    // 인증 / 검증 (호출자에게 그대로 표시)
    // ========================================================================
    #[error("Vous devez être connecté pour ajouter une maison")]
    Unauthenticated,

    #[error("Cet email est déjà utilisé")]
    DuplicateEmail,

    #[error("Invalid database format: {0}")]
    InvalidFormat(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    // ========================================================================
    // 설정 관련
    // ========================================================================
    #[error("Configuration error: {0}")]
    Config(String),

    // ========================================================================
    // 저장소 관련
    // ========================================================================
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Corrupted slot {key}: {message}")]
    CorruptedSlot { key: String, message: String },

    // ========================================================================
    // 외부 에러 변환
    // ========================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    // ========================================================================
    // 기타
    // ========================================================================
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// 사용자에게 보여줄 수 있는 에러인지 확인
    pub fn is_user_facing(&self) -> bool {
        matches!(
            self,
            Error::Unauthenticated
                | Error::DuplicateEmail
                | Error::InvalidFormat(_)
                | Error::InvalidInput(_)
        )
    }

    /// 저장소 계층에서 발생한 에러인지 확인
    pub fn is_storage(&self) -> bool {
        matches!(
            self,
            Error::Storage(_) | Error::CorruptedSlot { .. } | Error::Io(_) | Error::Sqlite(_)
        )
    }

    /// 손상된 슬롯 에러 생성 헬퍼
    pub fn corrupted(key: impl Into<String>, message: impl ToString) -> Self {
        Error::CorruptedSlot {
            key: key.into(),
            message: message.to_string(),
        }
    }
}

impl From<String> for Error {
    fn from(s: String) -> Self {
        Error::Internal(s)
    }
}

impl From<&str> for Error {
    fn from(s: &str) -> Self {
        Error::Internal(s.to_string())
    }
}

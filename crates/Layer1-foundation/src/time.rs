//! Timestamp helpers
//!
//! 저장되는 모든 시각은 UTC ISO-8601 (밀리초, `Z` 접미사) 형식

use chrono::{SecondsFormat, Utc};

/// 현재 시각, 예: `2026-10-19T08:30:00.123Z`
pub fn now_iso() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// 오늘 날짜 (UTC), 예: `2026-10-19`
pub fn today() -> String {
    Utc::now().format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, NaiveDate};

    #[test]
    fn test_now_iso_format() {
        let now = now_iso();
        assert!(now.ends_with('Z'));
        assert_eq!(now.len(), "2026-10-19T08:30:00.123Z".len());
        assert!(DateTime::parse_from_rfc3339(&now).is_ok());
    }

    #[test]
    fn test_today_is_calendar_date() {
        let today = today();
        assert!(NaiveDate::parse_from_str(&today, "%Y-%m-%d").is_ok());
    }
}

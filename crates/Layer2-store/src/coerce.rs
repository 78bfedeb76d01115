//! Loose numeric coercion
//!
//! Listing fields arrive from HTML forms, so `price` may be `"950"` or `950`
//! and an id may come in as `"12"`. These helpers read the leading number of
//! a string the way form input is usually interpreted: leading whitespace is
//! skipped, trailing garbage is ignored, no digits means no number.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Leading integer of `input` (`"12abc"` → 12, `"0x1f"` → 31, `"abc"` → None)
pub fn parse_int(input: &str) -> Option<i64> {
    let s = input.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let (radix, digits) = if rest.starts_with("0x") || rest.starts_with("0X") {
        (16, &rest[2..])
    } else {
        (10, rest)
    };

    let end = digits
        .find(|c: char| !c.is_digit(radix))
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }

    let magnitude = i64::from_str_radix(&digits[..end], radix).ok()?;
    Some(if negative { -magnitude } else { magnitude })
}

/// Leading decimal number of `input` (`"99.5 €"` → 99.5, `"1e3x"` → 1000)
pub fn parse_float(input: &str) -> Option<f64> {
    let s = input.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end = 1;
    }
    if s[end..].starts_with("Infinity") {
        return Some(if s.starts_with('-') {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        });
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut mantissa_digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        mantissa_digits += frac_end - frac_start;
        end = frac_end;
    }

    if mantissa_digits == 0 {
        return None;
    }

    // 지수부는 숫자가 뒤따를 때만 포함
    if end < bytes.len() && (bytes[end] == b'e' || bytes[end] == b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && (bytes[exp_end] == b'+' || bytes[exp_end] == b'-') {
            exp_end += 1;
        }
        let exp_digits = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits {
            end = exp_end;
        }
    }

    s[..end].parse::<f64>().ok()
}

/// Integer reading of a JSON value: numbers truncate, strings use [`parse_int`]
pub fn int_of(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite())
                .map(|f| f.trunc() as i64)
        }),
        Value::String(s) => parse_int(s),
        _ => None,
    }
}

/// Float reading of a JSON value: strings use [`parse_float`]
pub fn float_of(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => parse_float(s),
        _ => None,
    }
}

/// Exact integer stored as a JSON number (`3` or `3.0`, never `"3"`)
pub fn exact_int(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite() && f.fract() == 0.0)
                .map(|f| f as i64)
        }),
        _ => None,
    }
}

// ============================================================================
// Serde adapters
// ============================================================================

/// `deserialize_with` for optional integers: `"2"`, `2.7` and `2` all read
/// as 2, anything not coercible reads as absent
pub fn lenient_int<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(int_of))
}

/// `deserialize_with` for optional floats, see [`lenient_int`]
pub fn lenient_float<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(float_of))
}

/// `deserialize_with` for counters: `null` or garbage reads as 0
pub fn lenient_int_or_zero<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_int(deserializer)?.unwrap_or(0))
}

// ============================================================================
// IntoRecordId
// ============================================================================

/// Anything a caller may pass as a record id.
///
/// Integers are taken as-is, strings go through [`parse_int`]. An id that
/// does not coerce yields `None` and matches no record.
pub trait IntoRecordId {
    fn into_record_id(self) -> Option<i64>;
}

macro_rules! impl_into_record_id_int {
    ($($ty:ty),*) => {
        $(
            impl IntoRecordId for $ty {
                fn into_record_id(self) -> Option<i64> {
                    i64::try_from(self).ok()
                }
            }
        )*
    };
}

impl_into_record_id_int!(i32, i64, u32, u64, usize);

impl IntoRecordId for f64 {
    fn into_record_id(self) -> Option<i64> {
        self.is_finite().then(|| self.trunc() as i64)
    }
}

impl IntoRecordId for &str {
    fn into_record_id(self) -> Option<i64> {
        parse_int(self)
    }
}

impl IntoRecordId for String {
    fn into_record_id(self) -> Option<i64> {
        parse_int(&self)
    }
}

impl IntoRecordId for &String {
    fn into_record_id(self) -> Option<i64> {
        parse_int(self)
    }
}

impl IntoRecordId for &Value {
    fn into_record_id(self) -> Option<i64> {
        int_of(self)
    }
}

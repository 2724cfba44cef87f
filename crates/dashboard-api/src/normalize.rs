//! Payload normalization for the module-analyze routes.
//!
//! The backend expects snake_case keys and ratios as decimal fractions, while
//! payloads assembled on the client arrive in mixed case with values such as
//! `"32.97%"` or `"123"`. Everything here is a pure transform over
//! [`serde_json::Value`].

use serde_json::{Map, Number, Value};

use crate::error::{NormalizeError, NormalizeResult};

/// Convert a camelCase / PascalCase key to snake_case.
///
/// An underscore is inserted before every ASCII uppercase letter except the
/// first character, then the whole key is lower-cased. Keys already in
/// snake_case come back unchanged.
pub fn to_canonical_key(key: &str) -> String {
    let mut out = String::with_capacity(key.len() + 4);
    for (i, ch) in key.chars().enumerate() {
        if i > 0 && ch.is_ascii_uppercase() {
            out.push('_');
        }
        out.push(ch);
    }
    out.to_lowercase()
}

/// Length of the leading `[+-]?\d+(\.\d+)?` in `s`, if `s` starts with one.
fn number_prefix_len(s: &str) -> Option<usize> {
    let bytes = s.as_bytes();
    let mut i = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        i += 1;
    }
    let int_start = i;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    if i == int_start {
        return None;
    }
    if i < bytes.len() && bytes[i] == b'.' {
        let frac_start = i + 1;
        let mut j = frac_start;
        while j < bytes.len() && bytes[j].is_ascii_digit() {
            j += 1;
        }
        if j > frac_start {
            i = j;
        }
    }
    Some(i)
}

fn percentage_number_len(s: &str) -> Option<usize> {
    number_prefix_len(s).filter(|&n| s[n..].trim_start() == "%")
}

fn is_percentage_str(s: &str) -> bool {
    percentage_number_len(s).is_some()
}

fn is_numeric_str(s: &str) -> bool {
    let trimmed = s.trim();
    number_prefix_len(trimmed) == Some(trimmed.len())
}

/// True for strings like `"32.97%"`, `"-5%"` or `"12 %"`.
pub fn is_percentage_token(value: &Value) -> bool {
    value.as_str().is_some_and(is_percentage_str)
}

/// True for strings that are a plain decimal number once trimmed (`" 123 "`,
/// `"-12.5"`). Unit suffixes such as `"12px"` do not qualify.
pub fn is_numeric_token(value: &Value) -> bool {
    value.as_str().is_some_and(is_numeric_str)
}

/// Parse `"32.97%"` into `0.3297`.
pub fn parse_percentage(value: &str) -> NormalizeResult<f64> {
    let len = percentage_number_len(value)
        .ok_or_else(|| NormalizeError::Format(value.to_string()))?;
    let number: f64 = value[..len]
        .parse()
        .map_err(|_| NormalizeError::Format(value.to_string()))?;
    Ok(number / 100.0)
}

/// Integers stay integers on the wire; anything with a fraction becomes f64.
fn parse_number(token: &str) -> Option<Number> {
    if !token.contains('.') {
        if let Ok(int) = token.parse::<i64>() {
            return Some(Number::from(int));
        }
    }
    token.parse::<f64>().ok().and_then(Number::from_f64)
}

fn normalize_string(s: String) -> Value {
    if is_percentage_str(&s) {
        if let Some(n) = parse_percentage(&s).ok().and_then(Number::from_f64) {
            return Value::Number(n);
        }
        return Value::String(s);
    }
    if is_numeric_str(&s) {
        if let Some(n) = parse_number(s.trim()) {
            return Value::Number(n);
        }
    }
    Value::String(s)
}

/// Normalize one value: percentage strings become fractions, numeric strings
/// become numbers, arrays and objects are normalized recursively, and
/// everything else is returned as is.
pub fn normalize_value(value: Value) -> Value {
    match value {
        Value::String(s) => normalize_string(s),
        Value::Array(items) => Value::Array(items.into_iter().map(normalize_value).collect()),
        Value::Object(map) => Value::Object(normalize_payload(map)),
        other => other,
    }
}

/// Canonicalize every key and normalize every value of `payload`.
///
/// When two keys collapse to the same canonical key the later one wins.
pub fn normalize_payload(payload: Map<String, Value>) -> Map<String, Value> {
    let mut normalized = Map::with_capacity(payload.len());
    for (key, value) in payload {
        let canonical = to_canonical_key(&key);
        if normalized.contains_key(&canonical) {
            tracing::warn!(
                key = %key,
                canonical = %canonical,
                "Payload keys collide after canonicalization; keeping the later value"
            );
        }
        normalized.insert(canonical, normalize_value(value));
    }
    normalized
}

/// Normalize a request body for the module-analyze routes.
///
/// Objects are normalized key by key and arrays element by element.
/// Primitives and `null` are passed through untouched.
pub fn normalize_financial_payload(payload: Value) -> Value {
    match payload {
        Value::Object(map) => Value::Object(normalize_payload(map)),
        Value::Array(_) => normalize_value(payload),
        other => other,
    }
}

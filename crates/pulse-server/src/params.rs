//! Helpers for pulling loosely-typed values out of request JSON.
//!
//! Clients send numbers both as JSON numbers and as strings ("20"), so the
//! numeric helpers accept either. A value that is present but unparseable is
//! reported as `Unparseable` so update handlers can keep the previous value.

/// Outcome of reading a numeric field from a JSON object.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum NumField<T> {
    /// Key not present in the payload.
    Absent,
    /// Key present with null or an empty string.
    Empty,
    /// Parsed successfully.
    Value(T),
    /// Present but not a number we can use.
    Unparseable,
}

pub fn optional_str<'a>(params: &'a serde_json::Value, key: &str) -> Option<&'a str> {
    params.get(key).and_then(|v| v.as_str())
}

pub fn float_field(params: &serde_json::Value, key: &str) -> NumField<f64> {
    let Some(value) = params.get(key) else {
        return NumField::Absent;
    };
    match value {
        serde_json::Value::Null => NumField::Empty,
        serde_json::Value::Number(n) => match n.as_f64() {
            Some(f) => NumField::Value(f),
            None => NumField::Unparseable,
        },
        serde_json::Value::String(s) if s.trim().is_empty() => NumField::Empty,
        serde_json::Value::String(s) => match s.trim().parse::<f64>() {
            Ok(f) => NumField::Value(f),
            Err(_) => NumField::Unparseable,
        },
        _ => NumField::Unparseable,
    }
}

pub fn int_field(params: &serde_json::Value, key: &str) -> NumField<i64> {
    let Some(value) = params.get(key) else {
        return NumField::Absent;
    };
    match value {
        serde_json::Value::Null => NumField::Empty,
        // Fractional JSON numbers are truncated.
        serde_json::Value::Number(n) => match n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)) {
            Some(i) => NumField::Value(i),
            None => NumField::Unparseable,
        },
        serde_json::Value::String(s) if s.trim().is_empty() => NumField::Empty,
        serde_json::Value::String(s) => match s.trim().parse::<i64>() {
            Ok(i) => NumField::Value(i),
            Err(_) => NumField::Unparseable,
        },
        _ => NumField::Unparseable,
    }
}

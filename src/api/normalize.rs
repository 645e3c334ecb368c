//! Key normalization for incoming request bodies.
//!
//! Upstream fixtures mix `Periodes`, `periodes` and `PERIODES`. Object keys
//! are lowercased once, before the body is deserialized into a request.

use serde_json::{Map, Value};

/// Recursively lowercases every object key in `value`.
///
/// String values are left untouched. When two keys collapse onto the same
/// lowercase key, the one appearing later in the object wins.
///
/// # Example
///
/// ```
/// use standby_engine::api::normalize_keys;
/// use serde_json::json;
///
/// let raw = json!({"Periodes": {"14.03.2022": {"Fra": "0000", "TIL": "2400"}}});
/// let normalized = normalize_keys(raw);
///
/// assert_eq!(normalized["periodes"]["14.03.2022"]["fra"], "0000");
/// assert_eq!(normalized["periodes"]["14.03.2022"]["til"], "2400");
/// ```
pub fn normalize_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(key, value)| (key.to_lowercase(), normalize_keys(value)))
                .collect::<Map<String, Value>>(),
        ),
        Value::Array(items) => Value::Array(items.into_iter().map(normalize_keys).collect()),
        other => other,
    }
}

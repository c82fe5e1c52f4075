//! Response envelope handling.
//!
//! Some endpoints nest their payload under a key (`{ "items": [...] }`).
//! Unwrapping is tolerant: when the key is absent the body is used as-is.

use serde::de::DeserializeOwned;
use serde_json::Value;

/// Takes `body[key]` when `key` is set and present, otherwise `body`.
pub fn unwrap(body: Value, key: Option<&str>) -> Value {
    match (key, body) {
        (Some(key), Value::Object(mut map)) if map.contains_key(key) => {
            map.remove(key).unwrap_or(Value::Null)
        }
        (_, body) => body,
    }
}

/// Unwraps and deserializes in one step.
pub fn decode<T: DeserializeOwned>(body: Value, key: Option<&str>) -> Result<T, serde_json::Error> {
    serde_json::from_value(unwrap(body, key))
}

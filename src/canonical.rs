//! Canonical JSON serialisation (spec §6.2, §4.6): "sorted keys, no
//! whitespace, UTF-8 NFC". Shared by [`crate::policy::Policy::canonical_json`]
//! and the trust bundle's manifest hashing so a policy fingerprint and a
//! receipt's `hashManifest` are reproducible by an independent verifier that
//! only has the wire JSON, not this crate's struct field order.
//!
//! `serde_json::to_string` on a struct walks its fields in declaration
//! order, not alphabetical order — round-tripping through [`serde_json::Value`]
//! first and re-sorting every object's keys, recursively, is what actually
//! gives sorted-key output regardless of field declaration order or the
//! `preserve_order` feature.

use serde::Serialize;
use serde_json::{Map, Value};

/// Serialises `value` to JSON with every object's keys sorted
/// lexicographically at every nesting depth, no inserted whitespace.
pub fn to_canonical_json<T: Serialize>(value: &T) -> Result<String, serde_json::Error> {
    let value = serde_json::to_value(value)?;
    serde_json::to_string(&sort_keys(value))
}

fn sort_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut keys: Vec<String> = map.keys().cloned().collect();
            keys.sort_unstable();
            let mut sorted = Map::new();
            for key in keys {
                let v = map.get(&key).cloned().unwrap_or(Value::Null);
                sorted.insert(key, sort_keys(v));
            }
            Value::Object(sorted)
        }
        Value::Array(items) => Value::Array(items.into_iter().map(sort_keys).collect()),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn sorts_top_level_keys() {
        let value = json!({"b": 1, "a": 2});
        assert_eq!(serde_json::to_string(&sort_keys(value)).unwrap(), r#"{"a":2,"b":1}"#);
    }

    #[test]
    fn sorts_nested_object_keys() {
        let value = json!({"z": {"y": 1, "x": 2}, "a": 1});
        let out = serde_json::to_string(&sort_keys(value)).unwrap();
        assert_eq!(out, r#"{"a":1,"z":{"x":2,"y":1}}"#);
    }

    #[test]
    fn preserves_array_element_order() {
        let value = json!({"a": [{"b": 1, "a": 2}, {"d": 1, "c": 2}]});
        let out = serde_json::to_string(&sort_keys(value)).unwrap();
        assert_eq!(out, r#"{"a":[{"a":2,"b":1},{"c":2,"d":1}]}"#);
    }
}

//! JSON blob types for typed records
//!
//! This module defines the schema-less payload carried by every stored record:
//! - DataBlob: Newtype wrapper around a JSON object (field name → value)
//! - is_truthy / is_falsy: value truthiness used to decide "unset" values

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Deref, DerefMut};

/// JSON object map used for blobs and API representations.
pub type JsonMap = serde_json::Map<String, serde_json::Value>;

/// Opaque data blob stored on a typed record
///
/// Newtype around a JSON object providing:
/// - Direct access to the underlying map via Deref/DerefMut
/// - Typed helpers for the `{field, value}` pairs stored by control records
/// - Transparent serialization (a blob serializes as a plain JSON object)
///
/// # Examples
///
/// ```
/// use survey_core::DataBlob;
///
/// let mut blob = DataBlob::new();
/// blob.insert("Prompt".to_string(), "What is X?".into());
///
/// assert_eq!(blob.get_str("Prompt"), Some("What is X?"));
/// assert_eq!(blob.get_str("Type"), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DataBlob(JsonMap);

impl DataBlob {
    /// Create an empty blob
    pub fn new() -> Self {
        DataBlob(JsonMap::new())
    }

    /// Create from an existing JSON object
    pub fn from_map(map: JsonMap) -> Self {
        DataBlob(map)
    }

    /// Create from a JSON value, returning None if it is not an object
    pub fn from_value(value: serde_json::Value) -> Option<Self> {
        match value {
            serde_json::Value::Object(map) => Some(DataBlob(map)),
            _ => None,
        }
    }

    /// Build the `{field: <key>, value: <value>}` blob of a control record
    pub fn control_pair(field: impl Into<String>, value: serde_json::Value) -> Self {
        let mut map = JsonMap::new();
        map.insert("field".to_string(), serde_json::Value::String(field.into()));
        map.insert("value".to_string(), value);
        DataBlob(map)
    }

    /// Get the underlying map
    pub fn into_inner(self) -> JsonMap {
        self.0
    }

    /// Get a reference to the underlying map
    pub fn as_map(&self) -> &JsonMap {
        &self.0
    }

    /// String value of a key, if present and a string
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(|v| v.as_str())
    }

    /// Value of `key`, or an empty JSON string when absent
    pub fn get_or_empty(&self, key: &str) -> serde_json::Value {
        self.0
            .get(key)
            .cloned()
            .unwrap_or_else(|| serde_json::Value::String(String::new()))
    }

    /// Merge every entry of `other` into this blob, overwriting duplicates
    pub fn merge(&mut self, other: DataBlob) {
        for (k, v) in other.0 {
            self.0.insert(k, v);
        }
    }
}

impl Deref for DataBlob {
    type Target = JsonMap;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for DataBlob {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl fmt::Display for DataBlob {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", serde_json::Value::Object(self.0.clone()))
    }
}

impl From<JsonMap> for DataBlob {
    fn from(map: JsonMap) -> Self {
        DataBlob(map)
    }
}

impl From<DataBlob> for serde_json::Value {
    fn from(blob: DataBlob) -> Self {
        serde_json::Value::Object(blob.0)
    }
}

impl FromIterator<(String, serde_json::Value)> for DataBlob {
    fn from_iter<I: IntoIterator<Item = (String, serde_json::Value)>>(iter: I) -> Self {
        DataBlob(iter.into_iter().collect())
    }
}

// =============================================================================
// Truthiness
// =============================================================================

/// Whether a JSON value counts as "set".
///
/// `null`, `false`, numeric zero, `""`, `[]` and `{}` are falsy; everything
/// else is truthy. A control value of `0` or `false` is therefore treated as
/// unset.
pub fn is_truthy(value: &serde_json::Value) -> bool {
    use serde_json::Value;
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                i != 0
            } else if let Some(u) = n.as_u64() {
                u != 0
            } else {
                n.as_f64().map_or(false, |f| f != 0.0)
            }
        }
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

/// Inverse of [`is_truthy`].
#[inline]
pub fn is_falsy(value: &serde_json::Value) -> bool {
    !is_truthy(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_falsy_values() {
        for v in [
            json!(null),
            json!(false),
            json!(0),
            json!(0.0),
            json!(""),
            json!([]),
            json!({}),
        ] {
            assert!(is_falsy(&v), "{} should be falsy", v);
        }
    }

    #[test]
    fn test_truthy_values() {
        for v in [
            json!(true),
            json!(1),
            json!(-3),
            json!(0.5),
            json!("0"),
            json!(" "),
            json!([0]),
            json!({"a": null}),
        ] {
            assert!(is_truthy(&v), "{} should be truthy", v);
        }
    }

    #[test]
    fn test_control_pair() {
        let blob = DataBlob::control_pair("Status", json!("Active"));
        assert_eq!(blob.get_str("field"), Some("Status"));
        assert_eq!(blob.get("value"), Some(&json!("Active")));
    }

    #[test]
    fn test_get_or_empty_defaults_to_empty_string() {
        let blob: DataBlob = vec![("Prompt".to_string(), json!("What is X?"))]
            .into_iter()
            .collect();
        assert_eq!(blob.get_or_empty("Prompt"), json!("What is X?"));
        assert_eq!(blob.get_or_empty("Type"), json!(""));
    }

    #[test]
    fn test_from_value_rejects_non_objects() {
        assert!(DataBlob::from_value(json!([1, 2])).is_none());
        assert!(DataBlob::from_value(json!("x")).is_none());
        assert!(DataBlob::from_value(json!({})).is_some());
    }

    #[test]
    fn test_merge_overwrites() {
        let mut a = DataBlob::from_value(json!({"x": 1, "y": 2})).unwrap();
        let b = DataBlob::from_value(json!({"y": 3, "z": 4})).unwrap();
        a.merge(b);
        assert_eq!(serde_json::Value::from(a), json!({"x": 1, "y": 3, "z": 4}));
    }

    #[test]
    fn test_blob_serialization_is_transparent() {
        let blob = DataBlob::control_pair("Researcher", json!("Bob"));
        let s = serde_json::to_string(&blob).unwrap();
        assert_eq!(s, r#"{"field":"Researcher","value":"Bob"}"#);
        let back: DataBlob = serde_json::from_str(&s).unwrap();
        assert_eq!(back, blob);
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        fn scalar() -> impl Strategy<Value = serde_json::Value> {
            prop_oneof![
                Just(serde_json::Value::Null),
                any::<bool>().prop_map(serde_json::Value::from),
                any::<i64>().prop_map(serde_json::Value::from),
                ".{0,6}".prop_map(serde_json::Value::from),
            ]
        }

        proptest! {
            #[test]
            fn merge_keeps_every_key(
                a in proptest::collection::btree_map("[a-d]", scalar(), 0..4),
                b in proptest::collection::btree_map("[a-d]", scalar(), 0..4),
            ) {
                let mut merged: DataBlob = a.clone().into_iter().collect();
                merged.merge(b.clone().into_iter().collect());
                for key in a.keys().chain(b.keys()) {
                    prop_assert!(merged.contains_key(key));
                }
                for (key, value) in &b {
                    prop_assert_eq!(merged.get(key), Some(value));
                }
            }

            #[test]
            fn strings_are_truthy_iff_non_empty(s in ".{0,8}") {
                prop_assert_eq!(is_truthy(&serde_json::Value::from(s.clone())), !s.is_empty());
            }
        }
    }
}

//! Shape checks on parsed JSON values.

use serde_json::Value;

/// Check if a JSON value is an object with an own property `key`.
///
/// Returns false if the value is not an object. A property holding `null`
/// still counts as present.
///
/// # Examples
///
/// ```
/// use richdoc_util::shape::has_own_property;
/// use serde_json::json;
///
/// assert!(has_own_property(&json!({"entityMap": null}), "entityMap"));
/// assert!(!has_own_property(&json!({"blocks": []}), "entityMap"));
/// assert!(!has_own_property(&json!([1, 2]), "0"));
/// ```
pub fn has_own_property(value: &Value, key: &str) -> bool {
    match value {
        Value::Object(map) => map.contains_key(key),
        _ => false,
    }
}

/// The array stored under `key`, if `value` is an object and the property
/// holds an array.
pub fn array_property<'a>(value: &'a Value, key: &str) -> Option<&'a Vec<Value>> {
    value.as_object()?.get(key)?.as_array()
}

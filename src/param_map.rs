//! Flat parameter mappings shared by route params and search params.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::QueryError;

/// A parameter value: one string, or an ordered list of strings.
///
/// Catch-all segments and repeated query keys use [`ParamValue::Many`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    /// A single value
    One(String),
    /// An ordered list of values
    Many(Vec<String>),
}

impl ParamValue {
    /// Returns the value if it is a single string.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::One(value) => Some(value.as_str()),
            Self::Many(_) => None,
        }
    }

    /// Returns all values in order; a single value is a one-element slice.
    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        match self {
            Self::One(value) => std::slice::from_ref(value),
            Self::Many(values) => values.as_slice(),
        }
    }

    /// Returns the number of values held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.as_slice().len()
    }

    /// Returns true for an empty list.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.as_slice().is_empty()
    }

    /// Adds a value, turning a single value into a list.
    pub fn push(&mut self, value: impl Into<String>) {
        let value = value.into();
        match self {
            Self::One(first) => *self = Self::Many(vec![std::mem::take(first), value]),
            Self::Many(values) => values.push(value),
        }
    }

    /// Converts into a JSON string or array of strings.
    #[must_use]
    pub fn to_json(&self) -> Value {
        match self {
            Self::One(value) => Value::String(value.clone()),
            Self::Many(values) => Value::Array(values.iter().cloned().map(Value::String).collect()),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        Self::One(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        Self::One(value)
    }
}

impl From<Vec<String>> for ParamValue {
    fn from(values: Vec<String>) -> Self {
        Self::Many(values)
    }
}

impl From<Vec<&str>> for ParamValue {
    fn from(values: Vec<&str>) -> Self {
        Self::Many(values.into_iter().map(str::to_string).collect())
    }
}

impl<const N: usize> From<[&str; N]> for ParamValue {
    fn from(values: [&str; N]) -> Self {
        Self::Many(values.iter().map(|v| (*v).to_string()).collect())
    }
}

/// A flat, insertion-ordered mapping from key to [`ParamValue`].
///
/// Used for the dynamic segment values of a route and for search params,
/// both before rendering and after decoding a query string.
///
/// # Examples
///
/// ```
/// use safe_navigation::{ParamMap, ParamValue};
///
/// let search = ParamMap::new()
///     .with("query", "john doe")
///     .with("filters", ["active", "is_admin"]);
///
/// assert_eq!(search.get("query"), Some(&ParamValue::from("john doe")));
/// assert_eq!(search.get("filters").map(ParamValue::len), Some(2));
/// assert_eq!(search.to_string(), "query=john+doe&filters=active&filters=is_admin");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParamMap {
    entries: IndexMap<String, ParamValue>,
}

impl ParamMap {
    /// Creates an empty mapping.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts an entry and returns the mapping, for chaining.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Inserts an entry, replacing and returning any previous value.
    ///
    /// A replaced key keeps its original position.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<ParamValue>,
    ) -> Option<ParamValue> {
        self.entries.insert(key.into(), value.into())
    }

    /// Appends a value under `key`, turning an existing single value into a
    /// list.
    pub fn append(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        match self.entries.get_mut(&key) {
            Some(existing) => existing.push(value),
            None => {
                self.entries.insert(key, ParamValue::One(value.into()));
            }
        }
    }

    /// Returns the value for `key`, if present.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.entries.get(key)
    }

    /// Returns true if `key` is present.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Returns true if the mapping is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the number of keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns an iterator over the entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Converts into a JSON object, the input format of schemas.
    #[must_use]
    pub fn to_json(&self) -> Value {
        let object: Map<String, Value> = self
            .entries
            .iter()
            .map(|(k, v)| (k.clone(), v.to_json()))
            .collect();
        Value::Object(object)
    }

    /// Flattens a JSON object into a mapping.
    ///
    /// Strings are kept verbatim, numbers and booleans are stringified,
    /// arrays of those become lists, and `null` entries are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::NotAnObject`] if `value` is not an object, or
    /// [`QueryError::UnsupportedValue`] for nested objects and arrays.
    pub fn from_json(value: &Value) -> Result<Self, QueryError> {
        let object = value.as_object().ok_or(QueryError::NotAnObject {
            found: json_type(value),
        })?;

        let mut map = Self::new();
        for (key, value) in object {
            let unsupported = |found: &Value| QueryError::UnsupportedValue {
                key: key.clone(),
                found: json_type(found),
            };

            match value {
                Value::Null => {}
                Value::Array(items) => {
                    let values = items
                        .iter()
                        .map(|item| scalar_to_string(item).ok_or_else(|| unsupported(item)))
                        .collect::<Result<Vec<_>, _>>()?;
                    map.insert(key.clone(), ParamValue::Many(values));
                }
                other => {
                    let value = scalar_to_string(other).ok_or_else(|| unsupported(other))?;
                    map.insert(key.clone(), ParamValue::One(value));
                }
            }
        }

        Ok(map)
    }
}

impl<K, V> FromIterator<(K, V)> for ParamMap
where
    K: Into<String>,
    V: Into<ParamValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (key, value) in iter {
            map.insert(key, value);
        }
        map
    }
}

impl<'a> IntoIterator for &'a ParamMap {
    type Item = (&'a String, &'a ParamValue);
    type IntoIter = indexmap::map::Iter<'a, String, ParamValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

pub(crate) fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn push_promotes_single_value() {
        let mut value = ParamValue::from("active");
        value.push("is_admin");
        assert_eq!(value, ParamValue::from(["active", "is_admin"]));
        assert_eq!(value.len(), 2);
        assert_eq!(value.as_str(), None);
    }

    #[test]
    fn append_groups_repeated_keys() {
        let mut map = ParamMap::new();
        map.append("filters", "active");
        map.append("q", "x");
        map.append("filters", "is_admin");

        let keys: Vec<_> = map.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["filters", "q"]);
        assert_eq!(
            map.get("filters").map(ParamValue::as_slice),
            Some(&["active".to_string(), "is_admin".to_string()][..])
        );
    }

    #[test]
    fn to_json_keeps_shape() {
        let map = ParamMap::new()
            .with("orgId", "org_123")
            .with("catch_all", ["channels"]);
        assert_eq!(
            map.to_json(),
            json!({ "orgId": "org_123", "catch_all": ["channels"] })
        );
    }

    #[test]
    fn from_json_stringifies_scalars() {
        let map = ParamMap::from_json(&json!({
            "page": 2,
            "archived": false,
            "tags": ["a", 1],
            "missing": null,
        }))
        .unwrap();

        assert_eq!(map.get("page"), Some(&ParamValue::from("2")));
        assert_eq!(map.get("archived"), Some(&ParamValue::from("false")));
        assert_eq!(map.get("tags"), Some(&ParamValue::from(["a", "1"])));
        assert!(!map.contains_key("missing"));
    }

    #[test]
    fn from_json_rejects_nested_values() {
        let result = ParamMap::from_json(&json!({ "filter": { "a": 1 } }));
        assert_eq!(
            result,
            Err(QueryError::UnsupportedValue {
                key: "filter".to_string(),
                found: "object",
            })
        );

        let result = ParamMap::from_json(&json!({ "filter": [[1]] }));
        assert!(matches!(result, Err(QueryError::UnsupportedValue { found: "array", .. })));
    }

    #[test]
    fn from_json_rejects_non_objects() {
        let result = ParamMap::from_json(&json!("orgId"));
        assert_eq!(result, Err(QueryError::NotAnObject { found: "string" }));
    }

    #[test]
    fn collects_from_pairs() {
        let map: ParamMap = [("a", "1"), ("b", "2")].into_iter().collect();
        assert_eq!(map.len(), 2);
        assert_eq!(map.get("b").and_then(ParamValue::as_str), Some("2"));
    }
}

//! Schemas backed by `garde` validation rules.

use std::fmt;
use std::marker::PhantomData;

use garde::Validate;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::schema::{Issue, PathItem, Schema, Validation};

/// A schema that deserializes its input into `T` and then checks `T`'s
/// `garde` rules.
///
/// # Examples
///
/// ```
/// use garde::Validate;
/// use safe_navigation::{GardeSchema, validate_sync};
/// use serde::{Deserialize, Serialize};
/// use serde_json::json;
///
/// #[derive(Serialize, Deserialize, Validate)]
/// struct TeamSearch {
///     #[garde(length(min = 1))]
///     q: String,
/// }
///
/// let schema = GardeSchema::<TeamSearch>::new();
/// assert!(validate_sync(&schema, &json!({ "q": "john" })).is_ok());
///
/// let err = validate_sync(&schema, &json!({ "q": "" })).unwrap_err();
/// assert!(err.to_string().starts_with("Validation failed: q: "));
/// ```
pub struct GardeSchema<T> {
    _marker: PhantomData<fn() -> T>,
}

impl<T> GardeSchema<T> {
    /// Creates the schema.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<T> Default for GardeSchema<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for GardeSchema<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GardeSchema<{}>", std::any::type_name::<T>())
    }
}

impl<T> Schema for GardeSchema<T>
where
    T: DeserializeOwned + Serialize + Validate,
    T::Context: Default,
{
    fn validate(&self, input: &Value) -> Validation {
        let value: T = match serde_json::from_value(input.clone()) {
            Ok(value) => value,
            Err(e) => return Validation::invalid(vec![Issue::new(e.to_string())]),
        };

        if let Err(report) = value.validate() {
            let issues = report
                .iter()
                .map(|(path, error)| issue_at(&path.to_string(), error.message()))
                .collect();
            return Validation::invalid(issues);
        }

        match serde_json::to_value(&value) {
            Ok(output) => Validation::valid(output),
            Err(e) => Validation::invalid(vec![Issue::new(e.to_string())]),
        }
    }
}

fn issue_at(path: &str, message: &str) -> Issue {
    let path: Vec<PathItem> = path
        .split(['.', '[', ']'])
        .filter(|item| !item.is_empty())
        .map(|item| match item.parse() {
            Ok(index) => PathItem::Index(index),
            Err(_) => PathItem::Key(item.to_string()),
        })
        .collect();

    Issue {
        message: message.to_string(),
        path: (!path.is_empty()).then_some(path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issue_paths_from_report_paths() {
        let issue = issue_at("filters[1]", "invalid");
        assert_eq!(
            issue.path,
            Some(vec![PathItem::Key("filters".to_string()), PathItem::Index(1)])
        );
        assert_eq!(issue.to_string(), "filters.1: invalid");

        assert_eq!(issue_at("", "invalid").to_string(), "root: invalid");
    }
}

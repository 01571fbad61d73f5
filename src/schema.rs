//! The schema contract used to validate route params and search params.
//!
//! Any validator can be plugged in by implementing [`Schema`]: given an
//! arbitrary JSON input it either produces a validated output value or a
//! list of [`Issue`]s. A validator may also declare that it needs
//! asynchronous resolution by returning [`Validation::Pending`]; the
//! synchronous entry points of this crate reject such validators with
//! [`SchemaError::AsyncValidation`].
//!
//! Ready-made adapters:
//!
//! - [`SerdeSchema`]: accepts whatever deserializes into a serde type
//! - [`FnSchema`]: wraps a closure
//! - [`Optional`]: accepts `null` in addition to what the inner schema accepts
//!
//! # Examples
//!
//! ```
//! use safe_navigation::{SchemaExt, SerdeSchema, validate_sync};
//! use serde::{Deserialize, Serialize};
//! use serde_json::json;
//!
//! #[derive(Serialize, Deserialize)]
//! #[serde(rename_all = "camelCase")]
//! struct OrgParams {
//!     org_id: String,
//! }
//!
//! let schema = SerdeSchema::<OrgParams>::new();
//! assert!(validate_sync(&schema, &json!({ "orgId": "org_123" })).is_ok());
//! assert!(validate_sync(&schema, &json!(null)).is_err());
//!
//! let optional = SerdeSchema::<OrgParams>::new().optional();
//! assert_eq!(validate_sync(&optional, &json!(null)).unwrap(), json!(null));
//! ```

use std::fmt;
use std::future::Future;
use std::marker::PhantomData;
use std::pin::Pin;
use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::SchemaError;

/// Outcome of a completed validation.
pub type ValidationResult = Result<Value, Vec<Issue>>;

/// A validation that still has to be awaited.
pub type PendingValidation = Pin<Box<dyn Future<Output = ValidationResult> + Send>>;

/// One problem reported by a schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
    /// Human readable description
    pub message: String,
    /// Location of the offending field, if known
    pub path: Option<Vec<PathItem>>,
}

/// One step of an [`Issue`] path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathItem {
    /// Object key
    Key(String),
    /// Array index
    Index(usize),
}

impl Issue {
    /// Creates an issue located at the root of the input.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            path: None,
        }
    }

    /// Appends an object key to the issue path.
    #[must_use]
    pub fn at_key(mut self, key: impl Into<String>) -> Self {
        self.path
            .get_or_insert_with(Vec::new)
            .push(PathItem::Key(key.into()));
        self
    }

    /// Appends an array index to the issue path.
    #[must_use]
    pub fn at_index(mut self, index: usize) -> Self {
        self.path
            .get_or_insert_with(Vec::new)
            .push(PathItem::Index(index));
        self
    }
}

impl fmt::Display for PathItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Key(key) => write!(f, "{key}"),
            Self::Index(index) => write!(f, "{index}"),
        }
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.path {
            Some(path) if !path.is_empty() => {
                for (i, item) in path.iter().enumerate() {
                    if i > 0 {
                        write!(f, ".")?;
                    }
                    write!(f, "{item}")?;
                }
            }
            _ => write!(f, "root")?,
        }
        write!(f, ": {}", self.message)
    }
}

/// What a schema returns for one input.
pub enum Validation {
    /// Validation completed synchronously
    Ready(ValidationResult),
    /// Validation needs to be awaited
    Pending(PendingValidation),
}

impl Validation {
    /// A successful validation with its output value.
    #[must_use]
    pub fn valid(value: Value) -> Self {
        Self::Ready(Ok(value))
    }

    /// A failed validation.
    #[must_use]
    pub fn invalid(issues: Vec<Issue>) -> Self {
        Self::Ready(Err(issues))
    }

    /// A validation that resolves later.
    pub fn pending<F>(future: F) -> Self
    where
        F: Future<Output = ValidationResult> + Send + 'static,
    {
        Self::Pending(Box::pin(future))
    }
}

impl fmt::Debug for Validation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ready(result) => f.debug_tuple("Ready").field(result).finish(),
            Self::Pending(_) => f.write_str("Pending(..)"),
        }
    }
}

/// A validator for route params or search params.
pub trait Schema: Send + Sync {
    /// Validates `input`, returning the output value or the issues found.
    fn validate(&self, input: &Value) -> Validation;
}

impl<S: Schema + ?Sized> Schema for Arc<S> {
    fn validate(&self, input: &Value) -> Validation {
        (**self).validate(input)
    }
}

impl<S: Schema + ?Sized> Schema for Box<S> {
    fn validate(&self, input: &Value) -> Validation {
        (**self).validate(input)
    }
}

/// Runs a schema that must complete synchronously.
///
/// # Errors
///
/// Returns [`SchemaError::AsyncValidation`] if the schema returned a pending
/// validation, or [`SchemaError::Issues`] if it rejected the input.
pub fn validate_sync<S: Schema + ?Sized>(schema: &S, input: &Value) -> Result<Value, SchemaError> {
    match schema.validate(input) {
        Validation::Ready(result) => result.map_err(SchemaError::Issues),
        Validation::Pending(_) => Err(SchemaError::AsyncValidation),
    }
}

/// Runs a schema, awaiting it if it resolves asynchronously.
///
/// # Errors
///
/// Returns [`SchemaError::Issues`] if the schema rejected the input.
pub async fn validate<S: Schema + ?Sized>(schema: &S, input: &Value) -> Result<Value, SchemaError> {
    let result = match schema.validate(input) {
        Validation::Ready(result) => result,
        Validation::Pending(pending) => pending.await,
    };
    result.map_err(SchemaError::Issues)
}

/// A schema backed by a closure.
///
/// # Examples
///
/// ```
/// use safe_navigation::{FnSchema, Issue, validate_sync};
/// use serde_json::{Value, json};
///
/// let non_empty = FnSchema::new(|input: &Value| match input.as_str() {
///     Some(s) if !s.is_empty() => Ok(input.clone()),
///     _ => Err(vec![Issue::new("expected a non-empty string")]),
/// });
///
/// assert!(validate_sync(&non_empty, &json!("org_123")).is_ok());
/// assert!(validate_sync(&non_empty, &json!("")).is_err());
/// ```
#[derive(Clone)]
pub struct FnSchema<F>(F);

impl<F> FnSchema<F>
where
    F: Fn(&Value) -> ValidationResult + Send + Sync,
{
    /// Wraps a validation closure.
    pub const fn new(validate: F) -> Self {
        Self(validate)
    }
}

impl<F> Schema for FnSchema<F>
where
    F: Fn(&Value) -> ValidationResult + Send + Sync,
{
    fn validate(&self, input: &Value) -> Validation {
        Validation::Ready((self.0)(input))
    }
}

impl<F> fmt::Debug for FnSchema<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("FnSchema(..)")
    }
}

/// A schema that accepts any input deserializable into `T`.
///
/// The output is `T` serialized back into JSON, so serde defaults and
/// renames are applied to the validated value.
pub struct SerdeSchema<T> {
    _marker: PhantomData<fn() -> T>,
}

impl<T> SerdeSchema<T> {
    /// Creates the schema.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<T> Default for SerdeSchema<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for SerdeSchema<T> {
    fn clone(&self) -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for SerdeSchema<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SerdeSchema<{}>", std::any::type_name::<T>())
    }
}

impl<T> Schema for SerdeSchema<T>
where
    T: DeserializeOwned + Serialize,
{
    fn validate(&self, input: &Value) -> Validation {
        let result = serde_json::from_value::<T>(input.clone())
            .and_then(serde_json::to_value)
            .map_err(|e| vec![Issue::new(e.to_string())]);
        Validation::Ready(result)
    }
}

/// Accepts `null` as valid (output `null`) and defers everything else to
/// the inner schema.
#[derive(Debug, Clone)]
pub struct Optional<S>(S);

impl<S: Schema> Schema for Optional<S> {
    fn validate(&self, input: &Value) -> Validation {
        if input.is_null() {
            Validation::valid(Value::Null)
        } else {
            self.0.validate(input)
        }
    }
}

/// Combinators available on every [`Schema`].
pub trait SchemaExt: Schema + Sized {
    /// Makes the schema accept a missing (`null`) input.
    fn optional(self) -> Optional<Self> {
        Optional(self)
    }
}

impl<S: Schema> SchemaExt for S {}

/// Returns true if the schema rejects a missing (`null`) input.
///
/// Schemas that only resolve asynchronously count as rejecting it.
pub(crate) fn requires_input<S: Schema + ?Sized>(schema: &S) -> bool {
    validate_sync(schema, &Value::Null).is_err()
}

//! Error types for route templates, query mappings, schemas, and the registry.

use std::error::Error;
use std::fmt;

use crate::schema::Issue;

/// Errors that can occur when parsing a path template or constructing a
/// route builder from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateError {
    /// The template that was rejected
    pub template: String,
    /// The specific error that occurred
    pub kind: TemplateErrorKind,
}

/// Specific template error types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateErrorKind {
    /// The template has dynamic segments but no params schema was supplied
    MissingParamsValidation,
    /// The template does not start with `/` and normalization is disabled
    MissingLeadingSlash,
    /// A `[` was never closed
    UnterminatedMarker {
        /// Byte offset of the opening bracket
        position: usize,
    },
    /// A marker with nothing between its brackets
    EmptyMarkerName {
        /// Byte offset of the opening bracket
        position: usize,
    },
    /// A marker name contains a forbidden character
    InvalidMarkerName {
        /// The offending name
        name: String,
        /// The forbidden character
        char: char,
    },
    /// Double brackets that do not wrap a catch-all (`[[...name]]`)
    OptionalWithoutCatchAll {
        /// Byte offset of the opening brackets
        position: usize,
    },
    /// A catch-all marker followed by more template text
    CatchAllNotLast {
        /// Name of the catch-all marker
        name: String,
    },
    /// Unexpected character at position
    UnexpectedChar {
        /// The unexpected character
        char: char,
        /// Byte offset in the template
        position: usize,
    },
}

impl TemplateError {
    pub(crate) fn new(template: &str, kind: TemplateErrorKind) -> Self {
        Self {
            template: template.to_string(),
            kind,
        }
    }
}

impl fmt::Display for TemplateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let template = &self.template;
        match &self.kind {
            TemplateErrorKind::MissingParamsValidation => {
                write!(f, "Validation missing for path params: \"{template}\"")
            }
            TemplateErrorKind::MissingLeadingSlash => {
                write!(f, "invalid path template \"{template}\": must start with '/'")
            }
            TemplateErrorKind::UnterminatedMarker { position } => write!(
                f,
                "invalid path template \"{template}\": marker opened at position {position} is never closed"
            ),
            TemplateErrorKind::EmptyMarkerName { position } => write!(
                f,
                "invalid path template \"{template}\": marker at position {position} has an empty name"
            ),
            TemplateErrorKind::InvalidMarkerName { name, char } => write!(
                f,
                "invalid path template \"{template}\": marker name '{name}' contains invalid character '{char}'"
            ),
            TemplateErrorKind::OptionalWithoutCatchAll { position } => write!(
                f,
                "invalid path template \"{template}\": double brackets at position {position} must wrap a catch-all, e.g. '[[...name]]'"
            ),
            TemplateErrorKind::CatchAllNotLast { name } => write!(
                f,
                "invalid path template \"{template}\": catch-all marker '{name}' must be the last part of the template"
            ),
            TemplateErrorKind::UnexpectedChar { char, position } => write!(
                f,
                "invalid path template \"{template}\": unexpected character '{char}' at position {position}"
            ),
        }
    }
}

impl Error for TemplateError {}

/// Errors for converting structured values into a flat parameter mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    /// The value is not a JSON object
    NotAnObject {
        /// JSON type that was found instead
        found: &'static str,
    },
    /// A value cannot be flattened into a string or list of strings
    UnsupportedValue {
        /// Key holding the value
        key: String,
        /// JSON type that was found
        found: &'static str,
    },
}

impl fmt::Display for QueryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotAnObject { found } => {
                write!(f, "expected an object of parameters, found {found}")
            }
            Self::UnsupportedValue { key, found } => {
                write!(
                    f,
                    "unsupported value for '{key}': {found} cannot be flattened into a string or list of strings"
                )
            }
        }
    }
}

impl Error for QueryError {}

/// Errors produced when running a schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    /// The schema rejected its input
    Issues(Vec<Issue>),
    /// The schema needs asynchronous resolution where only synchronous
    /// completion is supported
    AsyncValidation,
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Issues(issues) => {
                write!(f, "Validation failed: ")?;
                for (i, issue) in issues.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{issue}")?;
                }
                Ok(())
            }
            Self::AsyncValidation => write!(f, "Schema validation must be synchronous"),
        }
    }
}

impl Error for SchemaError {}

/// Errors raised by routes and the navigation registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationError {
    /// Name of the route the error refers to
    pub route: String,
    /// The specific error that occurred
    pub kind: NavigationErrorKind,
}

/// Specific navigation error types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationErrorKind {
    /// Route params failed the params schema
    InvalidParams(SchemaError),
    /// Search params failed the search schema
    InvalidSearch(SchemaError),
    /// The route was declared without a params schema
    MissingParamsValidation,
    /// The route was declared without a search schema
    MissingSearchValidation,
    /// No route with this name was declared
    UnknownRoute,
}

impl NavigationError {
    pub(crate) fn new(route: &str, kind: NavigationErrorKind) -> Self {
        Self {
            route: route.to_string(),
            kind,
        }
    }

    /// Returns true if the error comes from a schema that required
    /// asynchronous resolution.
    #[must_use]
    pub fn is_async_violation(&self) -> bool {
        matches!(
            self.kind,
            NavigationErrorKind::InvalidParams(SchemaError::AsyncValidation)
                | NavigationErrorKind::InvalidSearch(SchemaError::AsyncValidation)
        )
    }
}

impl fmt::Display for NavigationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let route = &self.route;
        match &self.kind {
            NavigationErrorKind::InvalidParams(e) => {
                write!(f, "Invalid route params for route \"{route}\": {e}")
            }
            NavigationErrorKind::InvalidSearch(e) => {
                write!(f, "Invalid search params for route \"{route}\": {e}")
            }
            NavigationErrorKind::MissingParamsValidation => {
                write!(f, "Route \"{route}\" does not have params validation")
            }
            NavigationErrorKind::MissingSearchValidation => {
                write!(f, "Route \"{route}\" does not have searchParams validation")
            }
            NavigationErrorKind::UnknownRoute => write!(f, "Route \"{route}\" is not declared"),
        }
    }
}

impl Error for NavigationError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match &self.kind {
            NavigationErrorKind::InvalidParams(e) | NavigationErrorKind::InvalidSearch(e) => {
                Some(e)
            }
            _ => None,
        }
    }
}

/// Errors raised while building a navigation config.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A route template was rejected
    Template(TemplateError),
    /// Two routes were declared under the same name
    DuplicateRoute {
        /// The repeated route name
        name: String,
    },
    /// The configured base path is malformed
    InvalidBasePath {
        /// The rejected base path
        base_path: String,
        /// Reason for invalidity
        reason: &'static str,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Template(e) => write!(f, "{e}"),
            Self::DuplicateRoute { name } => {
                write!(f, "route \"{name}\" is declared more than once")
            }
            Self::InvalidBasePath { base_path, reason } => {
                write!(f, "invalid base path '{base_path}': {reason}")
            }
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Template(e) => Some(e),
            _ => None,
        }
    }
}

impl From<TemplateError> for ConfigError {
    fn from(e: TemplateError) -> Self {
        Self::Template(e)
    }
}

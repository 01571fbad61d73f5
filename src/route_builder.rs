//! Route builders: path templates bound to their params and search schemas.
//!
//! A [`RouteBuilder`] renders concrete URLs from a template. Which arguments
//! it takes follows from the schemas it was declared with, as summarized by
//! [`RouteShape`]:
//!
//! | Params schema | Search schema | Shape |
//! |---------------|---------------|-------|
//! | no | no | [`RouteShape::NoArgs`] |
//! | yes | no | [`RouteShape::Params`] |
//! | no | yes | [`RouteShape::Search`] |
//! | yes | yes | [`RouteShape::ParamsAndSearch`] |
//!
//! Search is required unless its schema accepts a missing (`null`) input.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;
use tracing::debug;

use crate::config::NavigationSettings;
use crate::constants::{QUERY_SEPARATOR, SEARCH_KEY};
use crate::error::{ConfigError, QueryError, TemplateError, TemplateErrorKind};
use crate::param_map::{ParamMap, ParamValue, json_type};
use crate::query::encode_query;
use crate::schema::{Schema, requires_input};
use crate::template::PathTemplate;

/// The params and search schemas a route is declared with.
#[derive(Clone, Default)]
pub struct SchemaPair {
    params: Option<Arc<dyn Schema>>,
    search: Option<Arc<dyn Schema>>,
}

impl SchemaPair {
    /// Creates a pair with neither schema.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the schema for the template's dynamic segments.
    #[must_use]
    pub fn with_params(mut self, schema: impl Schema + 'static) -> Self {
        self.params = Some(Arc::new(schema));
        self
    }

    /// Sets the schema for the query string.
    #[must_use]
    pub fn with_search(mut self, schema: impl Schema + 'static) -> Self {
        self.search = Some(Arc::new(schema));
        self
    }

    /// Returns the params schema, if declared.
    #[must_use]
    pub fn params(&self) -> Option<&Arc<dyn Schema>> {
        self.params.as_ref()
    }

    /// Returns the search schema, if declared.
    #[must_use]
    pub fn search(&self) -> Option<&Arc<dyn Schema>> {
        self.search.as_ref()
    }
}

impl fmt::Debug for SchemaPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SchemaPair")
            .field("params", &self.params.is_some())
            .field("search", &self.search.is_some())
            .finish()
    }
}

/// Which arguments a route accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RouteShape {
    /// Neither params nor search
    NoArgs,
    /// Params only
    Params,
    /// Search only
    Search {
        /// Whether search must be supplied
        required: bool,
    },
    /// Params and search
    ParamsAndSearch {
        /// Whether search must be supplied
        required: bool,
    },
}

impl RouteShape {
    fn of(schemas: &SchemaPair) -> Self {
        let required = schemas
            .search
            .as_ref()
            .is_some_and(|schema| requires_input(schema.as_ref()));
        match (schemas.params.is_some(), schemas.search.is_some()) {
            (false, false) => Self::NoArgs,
            (true, false) => Self::Params,
            (false, true) => Self::Search { required },
            (true, true) => Self::ParamsAndSearch { required },
        }
    }

    /// Returns true if the route takes params.
    #[must_use]
    pub const fn takes_params(self) -> bool {
        matches!(self, Self::Params | Self::ParamsAndSearch { .. })
    }

    /// Returns true if the route takes search params.
    #[must_use]
    pub const fn takes_search(self) -> bool {
        matches!(self, Self::Search { .. } | Self::ParamsAndSearch { .. })
    }

    /// Returns true if search params must be supplied.
    #[must_use]
    pub const fn requires_search(self) -> bool {
        matches!(
            self,
            Self::Search { required: true } | Self::ParamsAndSearch { required: true }
        )
    }
}

/// Arguments for rendering a URL: params for the dynamic segments plus an
/// optional search mapping.
///
/// # Examples
///
/// ```
/// use safe_navigation::RouteOptions;
/// use serde_json::json;
///
/// let options = RouteOptions::new()
///     .param("orgId", "org_123")
///     .search_param("filters", ["active", "is_admin"]);
///
/// let same = RouteOptions::from_json(&json!({
///     "orgId": "org_123",
///     "search": { "filters": ["active", "is_admin"] },
/// }))
/// .unwrap();
///
/// assert_eq!(options, same);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteOptions {
    params: ParamMap,
    search: Option<ParamMap>,
}

impl RouteOptions {
    /// Creates options with no params and no search.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a dynamic segment value.
    #[must_use]
    pub fn param(mut self, name: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.params.insert(name, value);
        self
    }

    /// Replaces all dynamic segment values.
    #[must_use]
    pub fn with_params(mut self, params: ParamMap) -> Self {
        self.params = params;
        self
    }

    /// Adds a search param, creating the search mapping if needed.
    #[must_use]
    pub fn search_param(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.search.get_or_insert_with(ParamMap::new).insert(key, value);
        self
    }

    /// Replaces the search mapping.
    #[must_use]
    pub fn with_search(mut self, search: ParamMap) -> Self {
        self.search = Some(search);
        self
    }

    /// Returns the dynamic segment values.
    #[must_use]
    pub fn params(&self) -> &ParamMap {
        &self.params
    }

    /// Returns the search mapping, if one was supplied.
    #[must_use]
    pub fn search(&self) -> Option<&ParamMap> {
        self.search.as_ref()
    }

    /// Builds options from a JSON object whose `search` key holds the
    /// search mapping and whose other keys are params. `null` stands for
    /// no options.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError`] if the value is not an object or `null`, or
    /// if a value cannot be flattened into a string or list of strings.
    pub fn from_json(value: &Value) -> Result<Self, QueryError> {
        if value.is_null() {
            return Ok(Self::new());
        }

        let object = value.as_object().ok_or(QueryError::NotAnObject {
            found: json_type(value),
        })?;

        let mut params = serde_json::Map::new();
        let mut search = None;
        for (key, value) in object {
            if key == SEARCH_KEY {
                if !value.is_null() {
                    search = Some(ParamMap::from_json(value)?);
                }
            } else {
                params.insert(key.clone(), value.clone());
            }
        }
        let params = ParamMap::from_json(&Value::Object(params))?;

        Ok(Self { params, search })
    }
}

impl From<ParamMap> for RouteOptions {
    fn from(params: ParamMap) -> Self {
        Self::new().with_params(params)
    }
}

/// Renders URLs for one path template.
///
/// Created through [`make_route_builder`] or a [`RouteFactory`].
///
/// # Examples
///
/// ```
/// use safe_navigation::{RouteOptions, SchemaPair, SerdeSchema, make_route_builder};
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Serialize, Deserialize)]
/// #[serde(rename_all = "camelCase")]
/// struct OrgParams {
///     org_id: String,
/// }
///
/// let builder = make_route_builder(
///     "/organizations/[orgId]",
///     SchemaPair::new().with_params(SerdeSchema::<OrgParams>::new()),
/// )
/// .unwrap();
///
/// let href = builder.href(&RouteOptions::new().param("orgId", "org_123"));
/// assert_eq!(href, "/organizations/org_123");
/// ```
#[derive(Debug, Clone)]
pub struct RouteBuilder {
    template: PathTemplate,
    schemas: SchemaPair,
    shape: RouteShape,
    base_path: Option<Arc<str>>,
}

impl RouteBuilder {
    /// Renders the URL for `options`.
    ///
    /// No validation happens here: missing params leave their markers in
    /// place and unknown keys are ignored. The query string is appended
    /// only when the search mapping encodes to something non-empty.
    #[must_use]
    pub fn href(&self, options: &RouteOptions) -> String {
        compose_href(
            self.base_path.as_deref(),
            &self.template.render(options.params()),
            options.search(),
        )
    }

    /// Returns the schemas the route was declared with.
    #[must_use]
    pub fn schemas(&self) -> &SchemaPair {
        &self.schemas
    }

    /// Returns the path template.
    #[must_use]
    pub fn template(&self) -> &PathTemplate {
        &self.template
    }

    /// Returns which arguments the route accepts.
    #[must_use]
    pub fn shape(&self) -> RouteShape {
        self.shape
    }

    pub(crate) fn into_parts(self) -> RouteParts {
        RouteParts {
            template: self.template,
            schemas: self.schemas,
            shape: self.shape,
            base_path: self.base_path,
        }
    }
}

/// A route builder taken apart by the registry.
pub(crate) struct RouteParts {
    pub(crate) template: PathTemplate,
    pub(crate) schemas: SchemaPair,
    pub(crate) shape: RouteShape,
    pub(crate) base_path: Option<Arc<str>>,
}

/// Creates route builders that share one set of [`NavigationSettings`].
#[derive(Debug, Clone)]
pub struct RouteFactory {
    base_path: Option<Arc<str>>,
    normalize_leading_slash: bool,
}

impl Default for RouteFactory {
    fn default() -> Self {
        Self {
            base_path: None,
            normalize_leading_slash: true,
        }
    }
}

impl RouteFactory {
    /// Creates a factory from validated settings.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBasePath`] if the base path is malformed.
    pub fn new(settings: &NavigationSettings) -> Result<Self, ConfigError> {
        settings.validate()?;
        Ok(Self {
            base_path: settings.base_path.as_deref().map(Arc::from),
            normalize_leading_slash: settings.normalize_leading_slash,
        })
    }

    /// Creates a builder for a template without dynamic segments.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError`] if the template is malformed or has
    /// dynamic segments.
    pub fn define(&self, path: &str) -> Result<RouteBuilder, TemplateError> {
        self.define_with(path, SchemaPair::new())
    }

    /// Creates a builder for a template with the given schemas.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError`] if the template is malformed, or with
    /// [`TemplateErrorKind::MissingParamsValidation`] if it has dynamic
    /// segments but no params schema.
    pub fn define_with(&self, path: &str, schemas: SchemaPair) -> Result<RouteBuilder, TemplateError> {
        let template = PathTemplate::parse_with(path, self.normalize_leading_slash)?;

        if template.has_markers() && schemas.params.is_none() {
            return Err(TemplateError::new(
                template.as_str(),
                TemplateErrorKind::MissingParamsValidation,
            ));
        }

        let shape = RouteShape::of(&schemas);
        debug!(template = %template, ?shape, "route builder created");

        Ok(RouteBuilder {
            template,
            schemas,
            shape,
            base_path: self.base_path.clone(),
        })
    }
}

/// Creates a route builder with default settings.
///
/// A template without a leading `/` gets one prepended.
///
/// # Errors
///
/// Returns [`TemplateError`] if the template is malformed, or with
/// [`TemplateErrorKind::MissingParamsValidation`] if it has dynamic segments
/// but `schemas` has no params schema.
pub fn make_route_builder(path: &str, schemas: SchemaPair) -> Result<RouteBuilder, TemplateError> {
    RouteFactory::default().define_with(path, schemas)
}

pub(crate) fn compose_href(base_path: Option<&str>, path: &str, search: Option<&ParamMap>) -> String {
    let mut href = match base_path {
        Some(base) if path == "/" => base.to_string(),
        Some(base) => format!("{base}{path}"),
        None => path.to_string(),
    };

    let query = search.map(encode_query).unwrap_or_default();
    if !query.is_empty() {
        href.push(QUERY_SEPARATOR);
        href.push_str(&query);
    }

    href
}

//! Routes as exposed by a [`NavigationConfig`](crate::NavigationConfig).

use std::fmt;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{NavigationError, NavigationErrorKind, SchemaError};
use crate::param_map::ParamMap;
use crate::route_builder::{RouteBuilder, RouteOptions, RouteShape, compose_href};
use crate::schema::{Issue, Schema, validate, validate_sync};
use crate::template::PathTemplate;

/// Which part of a URL a [`RouteValidator`] checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidationTarget {
    /// Dynamic segment values
    Params,
    /// Search params
    Search,
}

impl ValidationTarget {
    fn error(self, route: &str, error: SchemaError) -> NavigationError {
        let kind = match self {
            Self::Params => NavigationErrorKind::InvalidParams(error),
            Self::Search => NavigationErrorKind::InvalidSearch(error),
        };
        NavigationError::new(route, kind)
    }
}

/// Runs one of a route's schemas, naming the route in every failure.
#[derive(Clone)]
pub struct RouteValidator {
    route: Arc<str>,
    target: ValidationTarget,
    schema: Arc<dyn Schema>,
}

impl RouteValidator {
    /// Returns what this validator checks.
    #[must_use]
    pub fn target(&self) -> ValidationTarget {
        self.target
    }

    /// Validates `input` synchronously and returns the schema's output.
    ///
    /// # Errors
    ///
    /// Returns [`NavigationErrorKind::InvalidParams`] or
    /// [`NavigationErrorKind::InvalidSearch`] if the schema rejects the
    /// input or needs asynchronous resolution.
    pub fn parse(&self, input: &Value) -> Result<Value, NavigationError> {
        validate_sync(self.schema.as_ref(), input).map_err(|e| self.target.error(&self.route, e))
    }

    /// Validates `input` and deserializes the output into `T`.
    ///
    /// # Errors
    ///
    /// Same as [`parse`](Self::parse); an output that does not deserialize
    /// into `T` is reported as a validation issue.
    pub fn parse_as<T: DeserializeOwned>(&self, input: &Value) -> Result<T, NavigationError> {
        let output = self.parse(input)?;
        self.deserialize(output)
    }

    /// Validates `input`, awaiting schemas that resolve asynchronously.
    ///
    /// # Errors
    ///
    /// Same as [`parse`](Self::parse), except that asynchronous schemas are
    /// accepted.
    pub async fn parse_async(&self, input: &Value) -> Result<Value, NavigationError> {
        validate(self.schema.as_ref(), input)
            .await
            .map_err(|e| self.target.error(&self.route, e))
    }

    fn deserialize<T: DeserializeOwned>(&self, output: Value) -> Result<T, NavigationError> {
        serde_json::from_value(output).map_err(|e| {
            self.target.error(
                &self.route,
                SchemaError::Issues(vec![Issue::new(e.to_string())]),
            )
        })
    }

    fn flatten(&self, output: &Value) -> Result<ParamMap, NavigationError> {
        ParamMap::from_json(output).map_err(|e| {
            self.target.error(
                &self.route,
                SchemaError::Issues(vec![Issue::new(e.to_string())]),
            )
        })
    }
}

impl fmt::Debug for RouteValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteValidator")
            .field("route", &self.route)
            .field("target", &self.target)
            .finish_non_exhaustive()
    }
}

/// A named route: renders URLs and exposes its validators.
///
/// The schemas themselves are not reachable from a `Route`; only the
/// [`params_validator`](Self::params_validator) and
/// [`search_validator`](Self::search_validator) wrappers are.
#[derive(Debug, Clone)]
pub struct Route {
    name: Arc<str>,
    template: PathTemplate,
    shape: RouteShape,
    base_path: Option<Arc<str>>,
    params: Option<RouteValidator>,
    search: Option<RouteValidator>,
}

impl Route {
    pub(crate) fn new(name: &str, builder: RouteBuilder) -> Self {
        let parts = builder.into_parts();
        let name: Arc<str> = Arc::from(name);
        let validator = |target, schema: &Arc<dyn Schema>| RouteValidator {
            route: Arc::clone(&name),
            target,
            schema: Arc::clone(schema),
        };

        let params = parts
            .schemas
            .params()
            .map(|schema| validator(ValidationTarget::Params, schema));
        let search = parts
            .schemas
            .search()
            .map(|schema| validator(ValidationTarget::Search, schema));

        Self {
            name: Arc::clone(&name),
            template: parts.template,
            shape: parts.shape,
            base_path: parts.base_path,
            params,
            search,
        }
    }

    /// Returns the name the route was registered under.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
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

    /// Renders the URL for `options` without validating them.
    #[must_use]
    pub fn href(&self, options: &RouteOptions) -> String {
        compose_href(
            self.base_path.as_deref(),
            &self.template.render(options.params()),
            options.search(),
        )
    }

    /// Validates `options` against the route's schemas, then renders the
    /// URL from the validated values.
    ///
    /// The search schema receives `null` when `options` carry no search
    /// mapping, so a route with required search fails here without one.
    ///
    /// # Errors
    ///
    /// Returns [`NavigationErrorKind::InvalidParams`] or
    /// [`NavigationErrorKind::InvalidSearch`] if a schema rejects its input,
    /// or produces an output that is not a flat mapping.
    pub fn checked_href(&self, options: &RouteOptions) -> Result<String, NavigationError> {
        let params = match &self.params {
            Some(validator) => {
                let output = validator.parse(&options.params().to_json())?;
                validator.flatten(&output)?
            }
            None => options.params().clone(),
        };

        let search = match &self.search {
            Some(validator) => {
                let input = options.search().map_or(Value::Null, ParamMap::to_json);
                let output = validator.parse(&input)?;
                if output.is_null() {
                    None
                } else {
                    Some(validator.flatten(&output)?)
                }
            }
            None => options.search().cloned(),
        };

        Ok(compose_href(
            self.base_path.as_deref(),
            &self.template.render(&params),
            search.as_ref(),
        ))
    }

    /// Returns the params validator, present iff the route was declared
    /// with a params schema.
    #[must_use]
    pub fn params_validator(&self) -> Option<&RouteValidator> {
        self.params.as_ref()
    }

    /// Returns the search validator, present iff the route was declared
    /// with a search schema.
    #[must_use]
    pub fn search_validator(&self) -> Option<&RouteValidator> {
        self.search.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use serde::{Deserialize, Serialize};
    use serde_json::json;

    use super::*;
    use crate::route_builder::{SchemaPair, make_route_builder};
    use crate::schema::{FnSchema, SchemaExt, SerdeSchema, Validation};

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    struct OrgParams {
        org_id: String,
    }

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct DocsParams {
        #[serde(default)]
        slug: Vec<String>,
    }

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct LogsSearch {
        order: String,
    }

    fn route(name: &str, path: &str, schemas: SchemaPair) -> Route {
        Route::new(name, make_route_builder(path, schemas).unwrap())
    }

    #[test]
    fn validators_follow_declared_schemas() {
        let about = route("about", "/about", SchemaPair::new());
        assert!(about.params_validator().is_none());
        assert!(about.search_validator().is_none());

        let org = route(
            "organization",
            "/organizations/[orgId]",
            SchemaPair::new().with_params(SerdeSchema::<OrgParams>::new()),
        );
        assert_eq!(
            org.params_validator().map(RouteValidator::target),
            Some(ValidationTarget::Params)
        );
        assert!(org.search_validator().is_none());
    }

    #[test]
    fn parse_returns_schema_output() {
        let org = route(
            "organization",
            "/organizations/[orgId]",
            SchemaPair::new().with_params(SerdeSchema::<OrgParams>::new()),
        );
        let validator = org.params_validator().unwrap();

        assert_eq!(
            validator.parse(&json!({ "orgId": "org_123" })).unwrap(),
            json!({ "orgId": "org_123" })
        );
        assert_eq!(
            validator.parse_as::<OrgParams>(&json!({ "orgId": "org_123" })).unwrap(),
            OrgParams {
                org_id: "org_123".to_string()
            }
        );
    }

    #[test]
    fn parse_failure_names_route() {
        let org = route(
            "organization",
            "/organizations/[orgId]",
            SchemaPair::new().with_params(FnSchema::new(|_: &Value| {
                Err(vec![Issue::new("Required").at_key("orgId")])
            })),
        );
        let err = org.params_validator().unwrap().parse(&json!({})).unwrap_err();
        assert_eq!(err.route, "organization");
        assert_eq!(
            err.to_string(),
            "Invalid route params for route \"organization\": Validation failed: orgId: Required"
        );
    }

    #[test]
    fn async_schema_rejected_synchronously() {
        struct Deferred;
        impl Schema for Deferred {
            fn validate(&self, input: &Value) -> Validation {
                let input = input.clone();
                Validation::pending(async move { Ok(input) })
            }
        }

        let users = route("users", "/users", SchemaPair::new().with_search(Deferred));
        let validator = users.search_validator().unwrap();

        let err = validator.parse(&json!({})).unwrap_err();
        assert!(err.is_async_violation());
        assert_eq!(
            err.to_string(),
            "Invalid search params for route \"users\": Schema validation must be synchronous"
        );

        let output = futures::executor::block_on(validator.parse_async(&json!({ "q": "x" })));
        assert_eq!(output.unwrap(), json!({ "q": "x" }));
    }

    #[test]
    fn checked_href_renders_validated_output() {
        let docs = route(
            "docs",
            "/docs/[[...slug]]",
            SchemaPair::new().with_params(SerdeSchema::<DocsParams>::new()),
        );

        assert_eq!(docs.checked_href(&RouteOptions::new()).unwrap(), "/docs");
        assert_eq!(docs.href(&RouteOptions::new()), "/docs/[[...slug]]");
        assert_eq!(
            docs.checked_href(&RouteOptions::new().param("slug", ["a", "b"]))
                .unwrap(),
            "/docs/a/b"
        );
    }

    #[test]
    fn checked_href_requires_search_when_schema_does() {
        let logs = route(
            "logs",
            "/logs",
            SchemaPair::new().with_search(SerdeSchema::<LogsSearch>::new()),
        );

        let err = logs.checked_href(&RouteOptions::new()).unwrap_err();
        assert!(matches!(err.kind, NavigationErrorKind::InvalidSearch(_)));

        let href = logs
            .checked_href(&RouteOptions::new().search_param("order", "date"))
            .unwrap();
        assert_eq!(href, "/logs?order=date");
    }

    #[test]
    fn checked_href_accepts_missing_optional_search() {
        let logs = route(
            "logs",
            "/logs",
            SchemaPair::new().with_search(SerdeSchema::<LogsSearch>::new().optional()),
        );
        assert_eq!(logs.checked_href(&RouteOptions::new()).unwrap(), "/logs");
    }

    #[test]
    fn checked_href_rejects_invalid_params() {
        let org = route(
            "organization",
            "/organizations/[orgId]",
            SchemaPair::new().with_params(SerdeSchema::<OrgParams>::new()),
        );
        let err = org.checked_href(&RouteOptions::new()).unwrap_err();
        assert!(matches!(err.kind, NavigationErrorKind::InvalidParams(_)));
        assert!(err.to_string().starts_with(
            "Invalid route params for route \"organization\": Validation failed: root: "
        ));
    }
}

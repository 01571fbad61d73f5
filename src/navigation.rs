//! The navigation config registry.
//!
//! A [`NavigationConfig`] is built once from a set of named
//! [`RouteBuilder`]s. Each builder's schemas are harvested at registration
//! and wrapped in per-route validators; afterwards the registry is
//! read-only and can be shared freely between threads.
//!
//! # Examples
//!
//! ```
//! use safe_navigation::{
//!     NavigationConfig, RouteOptions, SchemaExt, SchemaPair, SerdeSchema, StaticEnvironment,
//! };
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Debug, PartialEq, Serialize, Deserialize)]
//! #[serde(rename_all = "camelCase")]
//! struct OrgParams {
//!     org_id: String,
//! }
//!
//! #[derive(Debug, PartialEq, Serialize, Deserialize)]
//! struct TeamSearch {
//!     q: Option<String>,
//! }
//!
//! let config = NavigationConfig::create(|routes| {
//!     Ok([
//!         ("about", routes.define("/about")?),
//!         (
//!             "organization",
//!             routes.define_with(
//!                 "/organizations/[orgId]",
//!                 SchemaPair::new().with_params(SerdeSchema::<OrgParams>::new()),
//!             )?,
//!         ),
//!         (
//!             "team",
//!             routes.define_with(
//!                 "/team",
//!                 SchemaPair::new().with_search(SerdeSchema::<TeamSearch>::new().optional()),
//!             )?,
//!         ),
//!     ])
//! })
//! .unwrap();
//!
//! let routes = config.routes();
//! assert_eq!(routes["about"].href(&RouteOptions::new()), "/about");
//! assert_eq!(
//!     routes["organization"].href(&RouteOptions::new().param("orgId", "org_123")),
//!     "/organizations/org_123"
//! );
//!
//! let env = StaticEnvironment::new()
//!     .with_param("orgId", "org_123")
//!     .with_search("q=john+doe");
//!
//! let params: OrgParams = config.use_safe_params_as(&env, "organization").unwrap();
//! assert_eq!(params.org_id, "org_123");
//!
//! let search: Option<TeamSearch> = config.use_safe_search_params_as(&env, "team").unwrap();
//! assert_eq!(search, Some(TeamSearch { q: Some("john doe".to_string()) }));
//! ```

use std::ops::Index;

use indexmap::IndexMap;
use indexmap::map::Entry;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::config::NavigationSettings;
use crate::environment::NavigationEnvironment;
use crate::error::{ConfigError, NavigationError, NavigationErrorKind};
use crate::query::decode_query;
use crate::route::{Route, RouteValidator};
use crate::route_builder::{RouteBuilder, RouteFactory};

/// The routes of a [`NavigationConfig`], in declaration order.
#[derive(Debug, Clone, Default)]
pub struct Routes {
    routes: IndexMap<String, Route>,
}

impl Routes {
    /// Returns the route registered under `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Route> {
        self.routes.get(name)
    }

    /// Returns true if a route is registered under `name`.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.routes.contains_key(name)
    }

    /// Returns the route names in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.routes.keys().map(String::as_str)
    }

    /// Returns the routes in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &Route> {
        self.routes.values()
    }

    /// Returns the number of routes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Returns true if no route was declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

impl Index<&str> for Routes {
    type Output = Route;

    /// # Panics
    ///
    /// Panics if no route is registered under `name`.
    fn index(&self, name: &str) -> &Route {
        &self.routes[name]
    }
}

/// A registry of named routes plus read accessors that validate the
/// current location against them.
#[derive(Debug, Clone)]
pub struct NavigationConfig {
    routes: Routes,
}

impl NavigationConfig {
    /// Builds a registry with default settings.
    ///
    /// `declare` receives a [`RouteFactory`] and returns the named builders.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `declare` fails or a route name repeats.
    pub fn create<F, I, K>(declare: F) -> Result<Self, ConfigError>
    where
        F: FnOnce(&RouteFactory) -> Result<I, ConfigError>,
        I: IntoIterator<Item = (K, RouteBuilder)>,
        K: Into<String>,
    {
        Self::create_with(&NavigationSettings::default(), declare)
    }

    /// Builds a registry whose builders share `settings`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the settings are invalid, `declare`
    /// fails, or a route name repeats.
    pub fn create_with<F, I, K>(settings: &NavigationSettings, declare: F) -> Result<Self, ConfigError>
    where
        F: FnOnce(&RouteFactory) -> Result<I, ConfigError>,
        I: IntoIterator<Item = (K, RouteBuilder)>,
        K: Into<String>,
    {
        let factory = RouteFactory::new(settings)?;
        let mut routes = IndexMap::new();

        for (name, builder) in declare(&factory)? {
            let name = name.into();
            match routes.entry(name) {
                Entry::Occupied(entry) => {
                    return Err(ConfigError::DuplicateRoute {
                        name: entry.key().clone(),
                    });
                }
                Entry::Vacant(entry) => {
                    let route = Route::new(entry.key(), builder);
                    debug!(
                        route = route.name(),
                        template = %route.template(),
                        shape = ?route.shape(),
                        "route registered"
                    );
                    entry.insert(route);
                }
            }
        }

        Ok(Self {
            routes: Routes { routes },
        })
    }

    /// Returns the registered routes.
    #[must_use]
    pub fn routes(&self) -> &Routes {
        &self.routes
    }

    /// Returns the route registered under `name`.
    ///
    /// # Errors
    ///
    /// Returns [`NavigationErrorKind::UnknownRoute`] if no such route exists.
    pub fn route(&self, name: &str) -> Result<&Route, NavigationError> {
        self.routes
            .get(name)
            .ok_or_else(|| NavigationError::new(name, NavigationErrorKind::UnknownRoute))
    }

    /// Validates the environment's current route params against the params
    /// schema of `route`.
    ///
    /// # Errors
    ///
    /// Returns [`NavigationError`] if:
    /// - No route is registered under `route` (`UnknownRoute`)
    /// - The route has no params schema (`MissingParamsValidation`)
    /// - The params fail validation (`InvalidParams`)
    pub fn use_safe_params<E>(&self, env: &E, route: &str) -> Result<Value, NavigationError>
    where
        E: NavigationEnvironment + ?Sized,
    {
        let validator = self.params_validator(route)?;
        validator.parse(&env.params().to_json())
    }

    /// Same as [`use_safe_params`](Self::use_safe_params), deserializing the
    /// validated params into `T`.
    ///
    /// # Errors
    ///
    /// Same as [`use_safe_params`](Self::use_safe_params).
    pub fn use_safe_params_as<T, E>(&self, env: &E, route: &str) -> Result<T, NavigationError>
    where
        T: DeserializeOwned,
        E: NavigationEnvironment + ?Sized,
    {
        let validator = self.params_validator(route)?;
        validator.parse_as(&env.params().to_json())
    }

    /// Decodes the environment's current query string and validates it
    /// against the search schema of `route`.
    ///
    /// An absent query string is validated as an empty mapping.
    ///
    /// # Errors
    ///
    /// Returns [`NavigationError`] if:
    /// - No route is registered under `route` (`UnknownRoute`)
    /// - The route has no search schema (`MissingSearchValidation`)
    /// - The search params fail validation (`InvalidSearch`)
    pub fn use_safe_search_params<E>(&self, env: &E, route: &str) -> Result<Value, NavigationError>
    where
        E: NavigationEnvironment + ?Sized,
    {
        let validator = self.search_validator(route)?;
        validator.parse(&current_search(env))
    }

    /// Same as [`use_safe_search_params`](Self::use_safe_search_params),
    /// deserializing the validated search params into `T`.
    ///
    /// # Errors
    ///
    /// Same as [`use_safe_search_params`](Self::use_safe_search_params).
    pub fn use_safe_search_params_as<T, E>(&self, env: &E, route: &str) -> Result<T, NavigationError>
    where
        T: DeserializeOwned,
        E: NavigationEnvironment + ?Sized,
    {
        let validator = self.search_validator(route)?;
        validator.parse_as(&current_search(env))
    }

    fn params_validator(&self, route: &str) -> Result<&RouteValidator, NavigationError> {
        self.route(route)?.params_validator().ok_or_else(|| {
            NavigationError::new(route, NavigationErrorKind::MissingParamsValidation)
        })
    }

    fn search_validator(&self, route: &str) -> Result<&RouteValidator, NavigationError> {
        self.route(route)?.search_validator().ok_or_else(|| {
            NavigationError::new(route, NavigationErrorKind::MissingSearchValidation)
        })
    }
}

fn current_search<E: NavigationEnvironment + ?Sized>(env: &E) -> Value {
    decode_query(env.search().as_deref()).to_json()
}

/// Builds a navigation config with default settings.
///
/// Shorthand for [`NavigationConfig::create`].
///
/// # Errors
///
/// Returns [`ConfigError`] if `declare` fails or a route name repeats.
pub fn create_navigation_config<F, I, K>(declare: F) -> Result<NavigationConfig, ConfigError>
where
    F: FnOnce(&RouteFactory) -> Result<I, ConfigError>,
    I: IntoIterator<Item = (K, RouteBuilder)>,
    K: Into<String>,
{
    NavigationConfig::create(declare)
}

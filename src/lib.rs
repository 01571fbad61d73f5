//! Type-safe route builders with schema-validated route params and search
//! params.
//!
//! This crate turns path templates into URL builders and checks the params
//! of the current location against the schemas each route was declared
//! with.
//!
//! # Overview
//!
//! Routes are declared from path templates in the file-system routing
//! style:
//!
//! ```text
//! /organizations/[orgId]/docs/[[...slug]]?<search>
//! ```
//!
//! where `[name]` is a dynamic segment, `[...name]` a catch-all and
//! `[[...name]]` an optional catch-all. A template with dynamic segments
//! must be declared with a params schema; a search schema is optional.
//!
//! # Quick Start
//!
//! ```rust
//! use safe_navigation::{
//!     RouteOptions, SchemaPair, SerdeSchema, StaticEnvironment, create_navigation_config,
//! };
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Serialize, Deserialize)]
//! #[serde(rename_all = "camelCase")]
//! struct OrgParams {
//!     org_id: String,
//! }
//!
//! #[derive(Serialize, Deserialize)]
//! struct UsersSearch {
//!     query: Option<String>,
//!     #[serde(default)]
//!     filters: Vec<String>,
//! }
//!
//! let config = create_navigation_config(|routes| {
//!     Ok([
//!         ("home", routes.define("/")?),
//!         (
//!             "users",
//!             routes.define_with(
//!                 "/organizations/[orgId]/users",
//!                 SchemaPair::new()
//!                     .with_params(SerdeSchema::<OrgParams>::new())
//!                     .with_search(SerdeSchema::<UsersSearch>::new()),
//!             )?,
//!         ),
//!     ])
//! })
//! .unwrap();
//!
//! // Build URLs
//! let href = config.routes()["users"].href(
//!     &RouteOptions::new()
//!         .param("orgId", "org_123")
//!         .search_param("query", "john doe")
//!         .search_param("filters", ["active", "is_admin"]),
//! );
//! assert_eq!(
//!     href,
//!     "/organizations/org_123/users?query=john+doe&filters=active&filters=is_admin"
//! );
//!
//! // Read the current location back
//! let env = StaticEnvironment::new()
//!     .with_param("orgId", "org_123")
//!     .with_search("filters=active&filters=is_admin");
//! let search: UsersSearch = config.use_safe_search_params_as(&env, "users").unwrap();
//! assert_eq!(search.filters, vec!["active", "is_admin"]);
//! ```
//!
//! # Schemas
//!
//! Any validator implementing [`Schema`] can be used. Inputs and outputs
//! are [`serde_json::Value`]s; [`SerdeSchema`] accepts whatever
//! deserializes into a serde type, [`FnSchema`] wraps a closure, and
//! [`SchemaExt::optional`] additionally accepts a missing input. With the
//! `garde` feature, `GardeSchema` also checks `garde` rules.
//!
//! Schemas must complete synchronously when used through the registry;
//! [`validate`] is available for schemas that resolve asynchronously.
//!
//! # Query Strings
//!
//! | Mapping | Query string |
//! |---------|--------------|
//! | `q = "john doe"` | `q=john+doe` |
//! | `filters = ["active", "is_admin"]` | `filters=active&filters=is_admin` |
//! | `filters = []` | nothing |

#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

mod config;
mod constants;
mod environment;
mod error;
#[cfg(feature = "garde")]
mod garde_schema;
mod navigation;
mod param_map;
pub mod prelude;
mod query;
mod route;
mod route_builder;
mod schema;
mod template;
mod template_part;

pub use config::NavigationSettings;
pub use constants::SEARCH_KEY;
pub use environment::{NavigationEnvironment, StaticEnvironment};
pub use error::{
    ConfigError, NavigationError, NavigationErrorKind, QueryError, SchemaError, TemplateError,
    TemplateErrorKind,
};
#[cfg(feature = "garde")]
pub use garde_schema::GardeSchema;
pub use navigation::{NavigationConfig, Routes, create_navigation_config};
pub use param_map::{ParamMap, ParamValue};
pub use query::{decode_query, encode_query};
pub use route::{Route, RouteValidator, ValidationTarget};
pub use route_builder::{
    RouteBuilder, RouteFactory, RouteOptions, RouteShape, SchemaPair, make_route_builder,
};
pub use schema::{
    FnSchema, Issue, Optional, PathItem, PendingValidation, Schema, SchemaExt, SerdeSchema,
    Validation, ValidationResult, validate, validate_sync,
};
pub use template::PathTemplate;
pub use template_part::{MarkerKind, TemplatePart};

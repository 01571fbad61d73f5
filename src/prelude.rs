//! Convenient re-exports for glob imports.
//!
//! This module provides a single import for all common types, making it easy
//! to get started with the crate:
//!
//! ```rust
//! use safe_navigation::prelude::*;
//!
//! let builder = make_route_builder("/about", SchemaPair::new()).unwrap();
//! assert_eq!(builder.href(&RouteOptions::new()), "/about");
//! ```
//!
//! Template internals (`TemplatePart`, `MarkerKind`) and the async
//! validation types are left out.

pub use crate::{
    // Registry
    NavigationConfig, NavigationEnvironment, NavigationSettings, Route, RouteValidator, Routes,
    StaticEnvironment, create_navigation_config,
    // Builders
    PathTemplate, RouteBuilder, RouteFactory, RouteOptions, RouteShape, SchemaPair,
    make_route_builder,
    // Values
    ParamMap, ParamValue, decode_query, encode_query,
    // Schemas
    FnSchema, Issue, Schema, SchemaExt, SerdeSchema, validate_sync,
    // Errors
    ConfigError, NavigationError, NavigationErrorKind, QueryError, SchemaError, TemplateError,
    TemplateErrorKind,
};

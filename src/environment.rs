//! Access to the current route params and query string.

use crate::param_map::{ParamMap, ParamValue};

/// Source of the current location's route params and query string.
///
/// The read accessors of [`NavigationConfig`](crate::NavigationConfig) take
/// the environment explicitly. Implementations may wrap a router, an HTTP
/// request, or a fixed snapshot such as [`StaticEnvironment`].
pub trait NavigationEnvironment {
    /// Returns the dynamic segment values of the current location.
    ///
    /// Catch-all segments are lists; an absent optional catch-all is simply
    /// not present.
    fn params(&self) -> ParamMap;

    /// Returns the current query string, with or without a leading `?`.
    ///
    /// # Returns
    ///
    /// `None` if the location has no query string.
    fn search(&self) -> Option<String>;
}

impl<E: NavigationEnvironment + ?Sized> NavigationEnvironment for &E {
    fn params(&self) -> ParamMap {
        (**self).params()
    }

    fn search(&self) -> Option<String> {
        (**self).search()
    }
}

/// A fixed snapshot of route params and query string.
///
/// # Examples
///
/// ```
/// use safe_navigation::{NavigationEnvironment, StaticEnvironment};
///
/// let env = StaticEnvironment::new()
///     .with_param("orgId", "org_123")
///     .with_search("?tab=members");
///
/// assert_eq!(env.params().len(), 1);
/// assert_eq!(env.search().as_deref(), Some("?tab=members"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticEnvironment {
    params: ParamMap,
    search: Option<String>,
}

impl StaticEnvironment {
    /// Creates an environment with no params and no query string.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces all route params.
    #[must_use]
    pub fn with_params(mut self, params: ParamMap) -> Self {
        self.params = params;
        self
    }

    /// Adds one route param.
    #[must_use]
    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.params.insert(name, value);
        self
    }

    /// Sets the query string.
    #[must_use]
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }
}

impl NavigationEnvironment for StaticEnvironment {
    fn params(&self) -> ParamMap {
        self.params.clone()
    }

    fn search(&self) -> Option<String> {
        self.search.clone()
    }
}

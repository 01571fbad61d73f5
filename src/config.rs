//! Settings shared by every route of a navigation config.

use crate::constants::PATH_SEPARATOR;
use crate::error::ConfigError;

/// Settings applied to every route builder created through a
/// [`RouteFactory`](crate::RouteFactory) or a
/// [`NavigationConfig`](crate::NavigationConfig).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationSettings {
    /// Prefix added in front of every produced URL, e.g. `/app`.
    ///
    /// Must start with `/` and must not end with `/`.
    /// Default: None
    pub base_path: Option<String>,

    /// Whether templates without a leading `/` get one prepended.
    ///
    /// When disabled such templates are rejected.
    /// Default: true
    pub normalize_leading_slash: bool,
}

impl Default for NavigationSettings {
    fn default() -> Self {
        Self {
            base_path: None,
            normalize_leading_slash: true,
        }
    }
}

impl NavigationSettings {
    /// Creates settings with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the base path.
    #[must_use]
    pub fn with_base_path(mut self, base_path: impl Into<String>) -> Self {
        self.base_path = Some(base_path.into());
        self
    }

    /// Enables or disables leading slash normalization.
    #[must_use]
    pub const fn with_leading_slash_normalization(mut self, normalize: bool) -> Self {
        self.normalize_leading_slash = normalize;
        self
    }

    /// Checks the settings for consistency.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBasePath`] if the base path does not
    /// start with `/`, ends with `/`, or contains a query or fragment.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let Some(base_path) = &self.base_path else {
            return Ok(());
        };

        let invalid = |reason| ConfigError::InvalidBasePath {
            base_path: base_path.clone(),
            reason,
        };

        if !base_path.starts_with(PATH_SEPARATOR) {
            return Err(invalid("must start with '/'"));
        }
        if base_path.ends_with(PATH_SEPARATOR) {
            return Err(invalid("must not end with '/'"));
        }
        if base_path.contains(['?', '#']) {
            return Err(invalid("must not contain a query or fragment"));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_settings() {
        let settings = NavigationSettings::default();
        assert!(settings.base_path.is_none());
        assert!(settings.normalize_leading_slash);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn builder_pattern() {
        let settings = NavigationSettings::new()
            .with_base_path("/app")
            .with_leading_slash_normalization(false);

        assert_eq!(settings.base_path.as_deref(), Some("/app"));
        assert!(!settings.normalize_leading_slash);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn base_path_must_start_with_slash() {
        let err = NavigationSettings::new()
            .with_base_path("app")
            .validate()
            .unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidBasePath {
                base_path: "app".to_string(),
                reason: "must start with '/'",
            }
        );
    }

    #[test]
    fn base_path_must_not_end_with_slash() {
        assert!(NavigationSettings::new().with_base_path("/app/").validate().is_err());
        assert!(NavigationSettings::new().with_base_path("/").validate().is_err());
    }

    #[test]
    fn base_path_rejects_query() {
        assert!(NavigationSettings::new().with_base_path("/app?x=1").validate().is_err());
    }
}

//! Pieces of a path template: literal text and dynamic segment markers.

use std::fmt;

use crate::constants::{CATCH_ALL_PREFIX, MARKER_CLOSE, MARKER_OPEN, PATH_SEPARATOR};

/// The flavor of a dynamic segment marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarkerKind {
    /// `[name]`: one segment
    Single,
    /// `[...name]`: one or more trailing segments
    CatchAll,
    /// `[[...name]]`: zero or more trailing segments
    OptionalCatchAll,
}

impl MarkerKind {
    /// Returns true for both catch-all flavors.
    #[must_use]
    pub const fn is_catch_all(self) -> bool {
        matches!(self, Self::CatchAll | Self::OptionalCatchAll)
    }
}

/// One piece of a parsed path template.
///
/// # Examples
///
/// ```
/// use safe_navigation::{MarkerKind, PathTemplate, TemplatePart};
///
/// let template = PathTemplate::parse("/docs/[...slug]").unwrap();
/// assert_eq!(
///     template.parts(),
///     &[
///         TemplatePart::Literal("/docs/".to_string()),
///         TemplatePart::Marker { name: "slug".to_string(), kind: MarkerKind::CatchAll },
///     ]
/// );
/// assert_eq!(template.parts()[1].to_string(), "[...slug]");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TemplatePart {
    /// Text copied to the output unchanged
    Literal(String),
    /// A dynamic segment substituted at render time
    Marker {
        /// Bare name, without brackets or dots
        name: String,
        /// Marker flavor
        kind: MarkerKind,
    },
}

impl TemplatePart {
    /// Returns the marker name, or `None` for literal text.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Literal(_) => None,
            Self::Marker { name, .. } => Some(name.as_str()),
        }
    }

    /// Returns true if the part is a dynamic segment marker.
    #[must_use]
    pub const fn is_marker(&self) -> bool {
        matches!(self, Self::Marker { .. })
    }

    /// Returns true if the character may appear in a marker name.
    #[must_use]
    pub const fn is_valid_name_char(c: char) -> bool {
        !matches!(c, MARKER_OPEN | MARKER_CLOSE | PATH_SEPARATOR | '?' | '#')
    }
}

impl fmt::Display for TemplatePart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(text) => f.write_str(text),
            Self::Marker { name, kind } => match kind {
                MarkerKind::Single => write!(f, "[{name}]"),
                MarkerKind::CatchAll => write!(f, "[{CATCH_ALL_PREFIX}{name}]"),
                MarkerKind::OptionalCatchAll => write!(f, "[[{CATCH_ALL_PREFIX}{name}]]"),
            },
        }
    }
}

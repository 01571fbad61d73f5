//! Constants for path template syntax and URL composition.

/// Opening bracket of a dynamic segment marker.
pub const MARKER_OPEN: char = '[';

/// Closing bracket of a dynamic segment marker.
pub const MARKER_CLOSE: char = ']';

/// Prefix inside a marker that turns it into a catch-all.
pub const CATCH_ALL_PREFIX: &str = "...";

/// Separator between path segments.
pub const PATH_SEPARATOR: char = '/';

/// Separator between the rendered path and the encoded query string.
pub const QUERY_SEPARATOR: char = '?';

/// Key of the search sub-object inside a JSON options bag.
pub const SEARCH_KEY: &str = "search";

//! Conversion between [`ParamMap`] and query strings.
//!
//! Encoding follows `application/x-www-form-urlencoded` (space becomes `+`),
//! the same serialization browsers use for `URLSearchParams`, through the
//! `form_urlencoded` codec shipped with the `url` crate.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use url::form_urlencoded;

use crate::constants::QUERY_SEPARATOR;
use crate::param_map::ParamMap;

/// Encodes a mapping into a query string (without leading `?`).
///
/// Keys are emitted in insertion order; a list value emits one pair per
/// element, repeating the key. An empty mapping encodes to `""`.
///
/// # Examples
///
/// ```
/// use safe_navigation::{ParamMap, encode_query};
///
/// let search = ParamMap::new()
///     .with("query", "john doe")
///     .with("filters", ["active", "is_admin"]);
///
/// assert_eq!(
///     encode_query(&search),
///     "query=john+doe&filters=active&filters=is_admin"
/// );
/// assert_eq!(encode_query(&ParamMap::new()), "");
/// ```
#[must_use]
pub fn encode_query(params: &ParamMap) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for (key, value) in params.iter() {
        for item in value.as_slice() {
            serializer.append_pair(key, item);
        }
    }
    serializer.finish()
}

/// Decodes a query string into a mapping.
///
/// A key seen once yields a single value; a key seen several times yields
/// a list in order of appearance. A leading `?` is ignored, and both an
/// absent query and an empty one decode to an empty mapping.
///
/// # Examples
///
/// ```
/// use safe_navigation::{ParamValue, decode_query};
///
/// let search = decode_query(Some("query=john+doe&filters=active&filters=is_admin"));
/// assert_eq!(search.get("query"), Some(&ParamValue::from("john doe")));
/// assert_eq!(search.get("filters"), Some(&ParamValue::from(["active", "is_admin"])));
///
/// assert!(decode_query(None).is_empty());
/// assert!(decode_query(Some("")).is_empty());
/// ```
#[must_use]
pub fn decode_query(query: Option<&str>) -> ParamMap {
    let Some(query) = query else {
        return ParamMap::new();
    };
    let query = query.strip_prefix(QUERY_SEPARATOR).unwrap_or(query);

    let mut params = ParamMap::new();
    for (key, value) in form_urlencoded::parse(query.as_bytes()) {
        params.append(key, value);
    }
    params
}

impl fmt::Display for ParamMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&encode_query(self))
    }
}

impl FromStr for ParamMap {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(decode_query(Some(s)))
    }
}

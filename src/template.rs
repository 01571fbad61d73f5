//! Path templates with dynamic segment markers.

use std::fmt;
use std::str::FromStr;

use crate::constants::{CATCH_ALL_PREFIX, MARKER_CLOSE, MARKER_OPEN, PATH_SEPARATOR};
use crate::error::{TemplateError, TemplateErrorKind};
use crate::param_map::ParamMap;
use crate::template_part::{MarkerKind, TemplatePart};

/// A parsed path template such as `/organizations/[orgId]/c/[[...slug]]`.
///
/// # Syntax
///
/// | Pattern | Meaning |
/// |---------|---------|
/// | `/segment` | literal text |
/// | `[name]` | dynamic segment |
/// | `[...name]` | catch-all, one or more trailing segments |
/// | `[[...name]]` | optional catch-all, zero or more trailing segments |
///
/// Catch-all markers must end the template.
///
/// # Examples
///
/// ```
/// use safe_navigation::{ParamMap, PathTemplate};
///
/// let template = PathTemplate::parse("/organization/[orgId]/c/[...catch_all]").unwrap();
/// assert_eq!(template.param_names(), vec!["orgId", "catch_all"]);
///
/// let values = ParamMap::new()
///     .with("orgId", "org_123")
///     .with("catch_all", ["channels", "channel_123"]);
/// assert_eq!(
///     template.render(&values),
///     "/organization/org_123/c/channels/channel_123"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PathTemplate {
    raw: String,
    parts: Vec<TemplatePart>,
}

impl PathTemplate {
    /// Parses a template that starts with `/`.
    ///
    /// # Errors
    ///
    /// Returns `TemplateError` if:
    /// - The template does not start with `/`
    /// - A marker is unterminated, empty, or has an invalid name
    /// - Double brackets do not wrap a catch-all
    /// - A catch-all marker is followed by more text
    /// - A `]` appears outside a marker
    pub fn parse(input: &str) -> Result<Self, TemplateError> {
        Self::parse_with(input, false)
    }

    /// Parses a template, prepending `/` when it is missing and
    /// `normalize_leading_slash` is set.
    pub(crate) fn parse_with(
        input: &str,
        normalize_leading_slash: bool,
    ) -> Result<Self, TemplateError> {
        let raw = if input.starts_with(PATH_SEPARATOR) {
            input.to_string()
        } else if normalize_leading_slash {
            format!("{PATH_SEPARATOR}{input}")
        } else {
            return Err(TemplateError::new(
                input,
                TemplateErrorKind::MissingLeadingSlash,
            ));
        };

        let parts = parse_parts(&raw).map_err(|kind| TemplateError::new(&raw, kind))?;
        Ok(Self { raw, parts })
    }

    /// Returns the template text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Returns the parsed parts in order.
    #[must_use]
    pub fn parts(&self) -> &[TemplatePart] {
        &self.parts
    }

    /// Returns the bare marker names in order of first appearance, without
    /// duplicates.
    #[must_use]
    pub fn param_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for name in self.parts.iter().filter_map(TemplatePart::name) {
            if !names.contains(&name) {
                names.push(name);
            }
        }
        names
    }

    /// Returns true if the template has at least one marker.
    #[must_use]
    pub fn has_markers(&self) -> bool {
        self.parts.iter().any(TemplatePart::is_marker)
    }

    /// Substitutes `values` into the markers.
    ///
    /// List values are joined with `/`. An empty catch-all also drops the
    /// `/` before it, unless that would leave an empty path. Markers whose
    /// name is missing from `values` are left as written.
    #[must_use]
    pub fn render(&self, values: &ParamMap) -> String {
        let mut path = String::with_capacity(self.raw.len());

        for part in &self.parts {
            match part {
                TemplatePart::Literal(text) => path.push_str(text),
                TemplatePart::Marker { name, kind } => match values.get(name) {
                    None => path.push_str(&part.to_string()),
                    Some(value) if value.is_empty() && kind.is_catch_all() => {
                        if path.len() > 1 && path.ends_with(PATH_SEPARATOR) {
                            path.pop();
                        }
                    }
                    Some(value) => {
                        for (i, segment) in value.as_slice().iter().enumerate() {
                            if i > 0 {
                                path.push(PATH_SEPARATOR);
                            }
                            path.push_str(segment);
                        }
                    }
                },
            }
        }

        path
    }
}

fn parse_parts(template: &str) -> Result<Vec<TemplatePart>, TemplateErrorKind> {
    let bytes = template.as_bytes();
    let mut parts = Vec::new();
    let mut literal_start = 0;
    let mut i = 0;

    while i < bytes.len() {
        match char::from(bytes[i]) {
            MARKER_OPEN => {
                if literal_start < i {
                    parts.push(TemplatePart::Literal(template[literal_start..i].to_string()));
                }

                let (marker, end) = parse_marker(template, i)?;
                if let TemplatePart::Marker { name, kind } = &marker {
                    if kind.is_catch_all() && end < template.len() {
                        return Err(TemplateErrorKind::CatchAllNotLast { name: name.clone() });
                    }
                }

                parts.push(marker);
                i = end;
                literal_start = end;
            }
            MARKER_CLOSE => {
                return Err(TemplateErrorKind::UnexpectedChar {
                    char: MARKER_CLOSE,
                    position: i,
                });
            }
            _ => i += 1,
        }
    }

    if literal_start < template.len() {
        parts.push(TemplatePart::Literal(template[literal_start..].to_string()));
    }

    Ok(parts)
}

/// Parses the marker opening at byte `start`, returning it together with
/// the byte offset just past its closing bracket.
fn parse_marker(template: &str, start: usize) -> Result<(TemplatePart, usize), TemplateErrorKind> {
    let rest = &template[start..];
    let unterminated = TemplateErrorKind::UnterminatedMarker { position: start };

    if let Some(inner) = rest.strip_prefix("[[") {
        let body = inner
            .strip_prefix(CATCH_ALL_PREFIX)
            .ok_or(TemplateErrorKind::OptionalWithoutCatchAll { position: start })?;
        let close = body.find("]]").ok_or(unterminated)?;
        let name = validate_name(&body[..close], start)?;
        let end = start + 2 + CATCH_ALL_PREFIX.len() + close + 2;
        return Ok((
            TemplatePart::Marker {
                name,
                kind: MarkerKind::OptionalCatchAll,
            },
            end,
        ));
    }

    let body = &rest[1..];
    let close = body.find(MARKER_CLOSE).ok_or(unterminated)?;
    let inner = &body[..close];
    let (name, kind) = match inner.strip_prefix(CATCH_ALL_PREFIX) {
        Some(name) => (name, MarkerKind::CatchAll),
        None => (inner, MarkerKind::Single),
    };
    let name = validate_name(name, start)?;
    Ok((TemplatePart::Marker { name, kind }, start + 1 + close + 1))
}

fn validate_name(name: &str, position: usize) -> Result<String, TemplateErrorKind> {
    if name.is_empty() {
        return Err(TemplateErrorKind::EmptyMarkerName { position });
    }

    if name.starts_with('.') {
        return Err(TemplateErrorKind::InvalidMarkerName {
            name: name.to_string(),
            char: '.',
        });
    }

    if let Some(c) = name.chars().find(|&c| !TemplatePart::is_valid_name_char(c)) {
        return Err(TemplateErrorKind::InvalidMarkerName {
            name: name.to_string(),
            char: c,
        });
    }

    Ok(name.to_string())
}

impl fmt::Display for PathTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl FromStr for PathTemplate {
    type Err = TemplateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for PathTemplate {
    fn as_ref(&self) -> &str {
        &self.raw
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kind_of(input: &str) -> TemplateErrorKind {
        PathTemplate::parse(input).unwrap_err().kind
    }

    #[test]
    fn parse_static_template() {
        let template = PathTemplate::parse("/about").unwrap();
        assert!(!template.has_markers());
        assert!(template.param_names().is_empty());
        assert_eq!(template.render(&ParamMap::new()), "/about");
    }

    #[test]
    fn parse_single_marker() {
        let template = PathTemplate::parse("/organizations/[orgId]").unwrap();
        assert_eq!(template.param_names(), vec!["orgId"]);
        assert_eq!(template.parts().len(), 2);
    }

    #[test]
    fn parse_multiple_markers() {
        let template = PathTemplate::parse("/organizations/[orgId]/users/[userId]").unwrap();
        assert_eq!(template.param_names(), vec!["orgId", "userId"]);
    }

    #[test]
    fn catch_all_names_are_bare() {
        let template = PathTemplate::parse("/[...catch_all]").unwrap();
        assert_eq!(template.param_names(), vec!["catch_all"]);

        let template = PathTemplate::parse("/[[...catch_all]]").unwrap();
        assert_eq!(template.param_names(), vec!["catch_all"]);
        assert_eq!(
            template.parts()[1],
            TemplatePart::Marker {
                name: "catch_all".to_string(),
                kind: MarkerKind::OptionalCatchAll,
            }
        );
    }

    #[test]
    fn repeated_names_listed_once() {
        let template = PathTemplate::parse("/[id]/compare/[id]").unwrap();
        assert_eq!(template.param_names(), vec!["id"]);
    }

    #[test]
    fn inline_marker() {
        let template = PathTemplate::parse("/posts/[slug].json").unwrap();
        let values = ParamMap::new().with("slug", "hello");
        assert_eq!(template.render(&values), "/posts/hello.json");
    }

    #[test]
    fn render_single_marker() {
        let template = PathTemplate::parse("/organizations/[orgId]").unwrap();
        let values = ParamMap::new().with("orgId", "org_123");
        assert_eq!(template.render(&values), "/organizations/org_123");
    }

    #[test]
    fn render_catch_all() {
        let template = PathTemplate::parse("/[...catch_all]").unwrap();
        let values = ParamMap::new().with("catch_all", ["channels", "channel_123"]);
        assert_eq!(template.render(&values), "/channels/channel_123");
    }

    #[test]
    fn render_empty_optional_catch_all() {
        let template = PathTemplate::parse("/docs/[[...slug]]").unwrap();
        let values = ParamMap::new().with("slug", Vec::<String>::new());
        assert_eq!(template.render(&values), "/docs");

        let template = PathTemplate::parse("/[[...slug]]").unwrap();
        assert_eq!(template.render(&values), "/");
    }

    #[test]
    fn render_missing_value_keeps_marker() {
        let template = PathTemplate::parse("/organizations/[orgId]/c/[[...slug]]").unwrap();
        assert_eq!(
            template.render(&ParamMap::new()),
            "/organizations/[orgId]/c/[[...slug]]"
        );
    }

    #[test]
    fn render_ignores_unrelated_values() {
        let template = PathTemplate::parse("/about").unwrap();
        let values = ParamMap::new().with("orgId", "org_123");
        assert_eq!(template.render(&values), "/about");
    }

    #[test]
    fn parse_requires_leading_slash() {
        assert_eq!(kind_of("about"), TemplateErrorKind::MissingLeadingSlash);
    }

    #[test]
    fn parse_with_normalization_prepends_slash() {
        let template = PathTemplate::parse_with("about", true).unwrap();
        assert_eq!(template.as_str(), "/about");
    }

    #[test]
    fn parse_unterminated_fails() {
        assert_eq!(
            kind_of("/users/[id"),
            TemplateErrorKind::UnterminatedMarker { position: 7 }
        );
        assert_eq!(
            kind_of("/[[...slug]"),
            TemplateErrorKind::UnterminatedMarker { position: 1 }
        );
    }

    #[test]
    fn parse_empty_name_fails() {
        assert_eq!(
            kind_of("/users/[]"),
            TemplateErrorKind::EmptyMarkerName { position: 7 }
        );
        assert_eq!(
            kind_of("/[...]"),
            TemplateErrorKind::EmptyMarkerName { position: 1 }
        );
    }

    #[test]
    fn parse_invalid_name_fails() {
        assert!(matches!(
            kind_of("/[a[b]"),
            TemplateErrorKind::InvalidMarkerName { char: '[', .. }
        ));
    }

    #[test]
    fn parse_extra_dots_fail() {
        assert_eq!(
            kind_of("/docs/[....slug]"),
            TemplateErrorKind::InvalidMarkerName {
                name: ".slug".to_string(),
                char: '.',
            }
        );
        assert!(matches!(
            kind_of("/docs/[[....slug]]"),
            TemplateErrorKind::InvalidMarkerName { char: '.', .. }
        ));
        assert!(matches!(
            kind_of("/[..slug]"),
            TemplateErrorKind::InvalidMarkerName { char: '.', .. }
        ));
        assert!(PathTemplate::parse("/files/[name.ext]").is_ok());
    }

    #[test]
    fn parse_optional_without_catch_all_fails() {
        assert_eq!(
            kind_of("/[[id]]"),
            TemplateErrorKind::OptionalWithoutCatchAll { position: 1 }
        );
    }

    #[test]
    fn parse_catch_all_not_last_fails() {
        assert_eq!(
            kind_of("/[...slug]/edit"),
            TemplateErrorKind::CatchAllNotLast {
                name: "slug".to_string()
            }
        );
    }

    #[test]
    fn parse_stray_close_fails() {
        assert_eq!(
            kind_of("/users]"),
            TemplateErrorKind::UnexpectedChar {
                char: ']',
                position: 6
            }
        );
    }

    #[test]
    fn display_round_trips_source() {
        let input = "/organization/[orgId]/c/[[...catch_all]]";
        let template: PathTemplate = input.parse().unwrap();
        assert_eq!(template.to_string(), input);
    }
}

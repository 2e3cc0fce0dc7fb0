//! Path template parsing and matching.
//!
//! # Responsibilities
//! - Parse a template such as `/users/<int:user_id>/posts` into segments
//! - Match a concrete request path against a parsed template
//! - Convert parameter segments to their declared type
//!
//! # Design Decisions
//! - Segment-by-segment comparison, no regex
//! - Literal segments are case-sensitive
//! - A trailing slash is an empty final segment (strict slashes)
//! - A parameter that fails conversion means "no match", never an error
//! - Segments are percent-decoded after splitting, so `%2F` stays inside one
//!   segment; a segment that is not UTF-8 once decoded never matches

use std::borrow::Cow;
use std::fmt;

use percent_encoding::percent_decode_str;

use crate::routing::error::RouteError;
use crate::routing::params::{ParamValue, PathParams};

/// Declared type of a parameter segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamKind {
    /// Any non-empty segment.
    Str,
    /// One or more ASCII digits that fit in an `i64`.
    Int,
}

impl ParamKind {
    fn from_converter(name: &str) -> Option<Self> {
        match name {
            "str" | "string" => Some(ParamKind::Str),
            "int" => Some(ParamKind::Int),
            _ => None,
        }
    }

    /// Convert a raw path segment, or `None` if it does not fit this kind.
    pub fn convert(self, raw: &str) -> Option<ParamValue> {
        if raw.is_empty() {
            return None;
        }
        match self {
            ParamKind::Str => Some(ParamValue::Str(raw.to_string())),
            ParamKind::Int => {
                if !raw.bytes().all(|b| b.is_ascii_digit()) {
                    return None;
                }
                raw.parse::<i64>().ok().map(ParamValue::Int)
            }
        }
    }
}

/// One piece of a parsed template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Literal(String),
    Param { name: String, kind: ParamKind },
}

impl Segment {
    /// Whether two segments occupy the same slot for duplicate detection.
    ///
    /// Parameter names don't matter: `<int:id>` and `<int:user_id>` collide.
    fn same_shape(&self, other: &Segment) -> bool {
        match (self, other) {
            (Segment::Literal(a), Segment::Literal(b)) => a == b,
            (Segment::Param { kind: a, .. }, Segment::Param { kind: b, .. }) => a == b,
            _ => false,
        }
    }
}

/// A parsed, immutable path template.
#[derive(Debug, Clone)]
pub struct PathTemplate {
    raw: String,
    segments: Vec<Segment>,
}

impl PathTemplate {
    /// Parse a template string.
    pub fn parse(raw: &str) -> Result<Self, RouteError> {
        let invalid = |reason: &str| RouteError::InvalidTemplate {
            template: raw.to_string(),
            reason: reason.to_string(),
        };

        let rest = raw
            .strip_prefix('/')
            .ok_or_else(|| invalid("must start with '/'"))?;

        let mut segments = Vec::new();
        for piece in rest.split('/') {
            let segment = parse_segment(piece).map_err(|reason| invalid(&reason))?;
            if let Segment::Param { name, .. } = &segment {
                let taken = segments
                    .iter()
                    .any(|s| matches!(s, Segment::Param { name: n, .. } if n == name));
                if taken {
                    return Err(invalid(&format!("parameter '{}' appears twice", name)));
                }
            }
            segments.push(segment);
        }

        Ok(Self {
            raw: raw.to_string(),
            segments,
        })
    }

    /// The template as it was registered.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Names of the parameter segments, in order.
    pub fn param_names(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|s| match s {
            Segment::Param { name, .. } => Some(name.as_str()),
            Segment::Literal(_) => None,
        })
    }

    /// True if both templates accept exactly the same set of paths.
    pub fn same_shape(&self, other: &PathTemplate) -> bool {
        self.segments.len() == other.segments.len()
            && self
                .segments
                .iter()
                .zip(&other.segments)
                .all(|(a, b)| a.same_shape(b))
    }

    /// Match a concrete path (no query string) against this template.
    pub fn match_path(&self, path: &str) -> Option<PathParams> {
        let rest = path.strip_prefix('/')?;

        let mut params = PathParams::default();
        let mut pieces = rest.split('/');
        for segment in &self.segments {
            let piece = decode_segment(pieces.next()?)?;
            match segment {
                Segment::Literal(lit) => {
                    if lit.as_str() != piece {
                        return None;
                    }
                }
                Segment::Param { name, kind } => {
                    params.insert(name.clone(), kind.convert(&piece)?);
                }
            }
        }

        // Path has more segments than the template.
        if pieces.next().is_some() {
            return None;
        }
        Some(params)
    }
}

impl fmt::Display for PathTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

fn decode_segment(raw: &str) -> Option<Cow<'_, str>> {
    percent_decode_str(raw).decode_utf8().ok()
}

fn parse_segment(piece: &str) -> Result<Segment, String> {
    let inner = piece
        .strip_prefix('<')
        .and_then(|p| p.strip_suffix('>'))
        .map(split_angle)
        .or_else(|| {
            piece
                .strip_prefix('{')
                .and_then(|p| p.strip_suffix('}'))
                .map(split_brace)
        });

    match inner {
        Some((converter, name)) => {
            let kind = match converter {
                Some(c) => ParamKind::from_converter(c)
                    .ok_or_else(|| format!("unknown converter '{}'", c))?,
                None => ParamKind::Str,
            };
            if !is_identifier(name) {
                return Err(format!("invalid parameter name '{}'", name));
            }
            Ok(Segment::Param {
                name: name.to_string(),
                kind,
            })
        }
        None => {
            if piece.contains(['<', '>', '{', '}']) {
                return Err(format!("malformed segment '{}'", piece));
            }
            Ok(Segment::Literal(piece.to_string()))
        }
    }
}

/// `<int:name>` puts the converter first.
fn split_angle(inner: &str) -> (Option<&str>, &str) {
    match inner.split_once(':') {
        Some((converter, name)) => (Some(converter), name),
        None => (None, inner),
    }
}

/// `{name:int}` puts the converter last.
fn split_brace(inner: &str) -> (Option<&str>, &str) {
    match inner.split_once(':') {
        Some((name, converter)) => (Some(converter), name),
        None => (None, inner),
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_mixed_template() {
        let t = PathTemplate::parse("/users/<int:user_id>/posts").unwrap();
        assert_eq!(
            t.segments(),
            &[
                Segment::Literal("users".into()),
                Segment::Param {
                    name: "user_id".into(),
                    kind: ParamKind::Int
                },
                Segment::Literal("posts".into()),
            ]
        );
        assert_eq!(t.param_names().collect::<Vec<_>>(), vec!["user_id"]);
    }

    #[test]
    fn test_brace_syntax() {
        let t = PathTemplate::parse("/users/{id:int}").unwrap();
        let params = t.match_path("/users/7").unwrap();
        assert_eq!(params.get("id"), Some(&ParamValue::Int(7)));

        let t = PathTemplate::parse("/sessions/{session_id}").unwrap();
        let params = t.match_path("/sessions/abc").unwrap();
        assert_eq!(params.get("session_id"), Some(&ParamValue::Str("abc".into())));
    }

    #[test]
    fn test_rejects_bad_templates() {
        assert!(PathTemplate::parse("users").is_err());
        assert!(PathTemplate::parse("/users/<float:x>").is_err());
        assert!(PathTemplate::parse("/users/<int:>").is_err());
        assert!(PathTemplate::parse("/users/<1abc>").is_err());
        assert!(PathTemplate::parse("/a/<id>/b/<id>").is_err());
        assert!(PathTemplate::parse("/users/x<id>").is_err());
    }

    #[test]
    fn test_int_segment_conversion() {
        let t = PathTemplate::parse("/users/<int:id>").unwrap();
        assert_eq!(t.match_path("/users/42").unwrap().get("id"), Some(&ParamValue::Int(42)));
        assert!(t.match_path("/users/abc").is_none());
        assert!(t.match_path("/users/-1").is_none());
        assert!(t.match_path("/users/+1").is_none());
        assert!(t.match_path("/users/99999999999999999999").is_none());
        assert!(t.match_path("/users/").is_none());
    }

    #[test]
    fn test_segments_are_percent_decoded() {
        let t = PathTemplate::parse("/products/<name>").unwrap();
        let params = t.match_path("/products/caf%C3%A9%20x").unwrap();
        assert_eq!(params.str("name"), Some("café x"));

        // An encoded slash stays inside the segment.
        let params = t.match_path("/products/a%2Fb").unwrap();
        assert_eq!(params.str("name"), Some("a/b"));

        assert!(t.match_path("/products/%FF").is_none());
    }

    #[test]
    fn test_decoded_digits_and_literals() {
        let t = PathTemplate::parse("/users/<int:id>/posts").unwrap();
        let params = t.match_path("/%75sers/%34%32/posts").unwrap();
        assert_eq!(params.int("id"), Some(42));
        assert!(t.match_path("/users/4%20/posts").is_none());
    }

    #[test]
    fn test_segment_count_must_match() {
        let t = PathTemplate::parse("/products/<name>").unwrap();
        assert!(t.match_path("/products/widget").is_some());
        assert!(t.match_path("/products/widget/extra").is_none());
        assert!(t.match_path("/products").is_none());
    }

    #[test]
    fn test_strict_trailing_slash() {
        let t = PathTemplate::parse("/api/users/").unwrap();
        assert!(t.match_path("/api/users/").is_some());
        assert!(t.match_path("/api/users").is_none());

        let t = PathTemplate::parse("/health").unwrap();
        assert!(t.match_path("/health/").is_none());
    }

    #[test]
    fn test_root_template() {
        let t = PathTemplate::parse("/").unwrap();
        assert!(t.match_path("/").is_some());
        assert!(t.match_path("/x").is_none());
    }

    #[test]
    fn test_literals_are_case_sensitive() {
        let t = PathTemplate::parse("/health").unwrap();
        assert!(t.match_path("/Health").is_none());
    }

    #[test]
    fn test_same_shape_ignores_param_names() {
        let a = PathTemplate::parse("/users/<int:id>").unwrap();
        let b = PathTemplate::parse("/users/{user_id:int}").unwrap();
        let c = PathTemplate::parse("/users/<id>").unwrap();
        assert!(a.same_shape(&b));
        assert!(!a.same_shape(&c));
    }
}

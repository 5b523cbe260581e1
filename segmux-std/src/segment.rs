//! Route pattern parsing.
//!
//! A pattern is split on `/` into segments. Each segment is one of:
//!
//! | Syntax          | Segment                 | Matches                           |
//! |-----------------|-------------------------|-----------------------------------|
//! | `users`         | [`Segment::Literal`]    | exactly `users` (case-folded)     |
//! | `:id` / `{id}`  | [`Segment::Param`]      | any non-empty segment             |
//! | `{id:[0-9]+}`   | [`Segment::ParamRegex`] | a segment fully matching the regex |
//!
//! The leading `/` is optional. Literal text is lower-cased here, at
//! registration time.

use regex::Regex;
use segmux_core::RouteError;
use std::fmt;

/// One component of a route pattern.
#[derive(Debug, Clone)]
pub enum Segment {
    /// Exact text, lower-cased.
    Literal(String),
    /// Captures one path segment under `name`.
    Param {
        /// Parameter name.
        name: String,
    },
    /// Captures one path segment under `name` if it fully matches `regex`.
    ParamRegex {
        /// Parameter name.
        name: String,
        /// Anchored regex compiled from the pattern.
        regex: Regex,
        /// The regex as written in the pattern.
        source: String,
    },
}

impl Segment {
    /// Parameter name for dynamic segments.
    pub fn param_name(&self) -> Option<&str> {
        match self {
            Self::Literal(_) => None,
            Self::Param { name } | Self::ParamRegex { name, .. } => Some(name),
        }
    }

    /// True for [`Segment::Param`] and [`Segment::ParamRegex`].
    pub fn is_dynamic(&self) -> bool {
        !matches!(self, Self::Literal(_))
    }

    /// The constraint a dynamic segment puts on captured text.
    pub fn regex(&self) -> Option<&Regex> {
        match self {
            Self::ParamRegex { regex, .. } => Some(regex),
            _ => None,
        }
    }

    /// Whether two dynamic segments can share a tree node.
    ///
    /// They must agree on both name and constraint.
    pub fn same_capture(&self, other: &Segment) -> bool {
        match (self, other) {
            (Self::Param { name: a }, Self::Param { name: b }) => a == b,
            (
                Self::ParamRegex {
                    name: a, source: ra, ..
                },
                Self::ParamRegex {
                    name: b, source: rb, ..
                },
            ) => a == b && ra == rb,
            _ => false,
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(text) => f.write_str(text),
            Self::Param { name } => write!(f, "{{{name}}}"),
            Self::ParamRegex { name, source, .. } => write!(f, "{{{name}:{source}}}"),
        }
    }
}

/// Parse a route pattern into its segments.
///
/// `/` (or an empty pattern after a prefix was applied, see the router) parses
/// to no segments and addresses the tree root.
pub fn parse(pattern: &str) -> Result<Vec<Segment>, RouteError> {
    if pattern.is_empty() {
        return Err(RouteError::EmptyPattern);
    }

    let trimmed = pattern.strip_prefix('/').unwrap_or(pattern);
    if trimmed.is_empty() {
        return Ok(Vec::new());
    }

    let mut segments: Vec<Segment> = Vec::new();
    for raw in trimmed.split('/') {
        let segment = parse_segment(pattern, raw)?;
        if let Some(name) = segment.param_name() {
            if segments.iter().any(|s| s.param_name() == Some(name)) {
                return Err(RouteError::DuplicateParam {
                    name: name.to_string(),
                    pattern: pattern.to_string(),
                });
            }
        }
        segments.push(segment);
    }
    Ok(segments)
}

/// Split a request path the same way patterns are split.
///
/// `/` and the empty path yield no segments.
pub fn split_path(path: &str) -> impl Iterator<Item = &str> {
    let trimmed = path.strip_prefix('/').unwrap_or(path);
    trimmed.split('/').filter(move |_| !trimmed.is_empty())
}

fn parse_segment(pattern: &str, raw: &str) -> Result<Segment, RouteError> {
    if let Some(name) = raw.strip_prefix(':') {
        return param(pattern, name, None);
    }

    if let Some(inner) = raw.strip_prefix('{') {
        let inner = inner
            .strip_suffix('}')
            .ok_or_else(|| RouteError::UnclosedBrace {
                segment: raw.to_string(),
            })?;
        return match inner.split_once(':') {
            Some((name, regex)) => param(pattern, name, Some(regex)),
            None => param(pattern, inner, None),
        };
    }

    Ok(Segment::Literal(raw.to_lowercase()))
}

fn param(pattern: &str, name: &str, regex: Option<&str>) -> Result<Segment, RouteError> {
    if name.is_empty() {
        return Err(RouteError::EmptyParamName {
            pattern: pattern.to_string(),
        });
    }

    let Some(source) = regex else {
        return Ok(Segment::Param {
            name: name.to_string(),
        });
    };

    let regex = Regex::new(&format!("^(?:{source})$")).map_err(|e| RouteError::InvalidRegex {
        name: name.to_string(),
        regex: source.to_string(),
        reason: e.to_string(),
    })?;

    Ok(Segment::ParamRegex {
        name: name.to_string(),
        regex,
        source: source.to_string(),
    })
}

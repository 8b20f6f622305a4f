//! Route templates and segment-by-segment matching.
//!
//! A template is an ordered, fixed-length sequence of segments. A segment
//! written as `{name}` or `{name:type}` is a variable; anything else is a
//! literal compared byte-exact and case-sensitively. Matching is two-phase:
//! [`PathPattern::captures`] checks the path's shape and returns the raw
//! text of each variable segment, and [`PathPattern::convert`] applies the
//! declared converters. Keeping the phases apart is what lets the router
//! treat a conversion failure as "this route does not apply" rather than as
//! a server error.

use std::sync::Arc;

use thiserror::Error;

use crate::convert::{ConversionError, Converter, ConverterRegistry};
use crate::params::Params;
use crate::path;

/// A malformed route template, reported when the route is registered and
/// never deferred to request time.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvalidPatternError {
    /// Route templates must begin with `/`.
    #[error("expected pattern beginning with '/', found {pattern:?}")]
    MissingLeadingSlash { pattern: String },

    /// Unbalanced or nested braces, or an empty variable name or type tag.
    #[error("malformed segment {segment:?} in pattern {pattern:?}")]
    MalformedSegment { pattern: String, segment: String },

    /// The same variable name appears twice in one pattern.
    #[error("duplicate variable {name:?} in pattern {pattern:?}")]
    DuplicateVariable { pattern: String, name: String },

    /// The type tag has no converter registered for it.
    #[error("unknown type tag {tag:?} in pattern {pattern:?}")]
    UnknownTag { pattern: String, tag: String },
}

/// One `/`-delimited component of a route template.
pub(crate) enum PathSegment {
    /// Must match the request segment byte-exact.
    Literal(String),
    /// Accepts any non-empty request segment and converts it.
    Variable {
        name: String,
        tag: String,
        convert: Arc<Converter>,
    },
}

/// A parsed route template.
///
/// The segment count is fixed: a pattern only ever matches paths with
/// exactly as many segments, so `/users/{id}` matches neither `/users` nor
/// `/users/42/extra`. The root template `/` has zero segments and matches
/// only the root path.
pub struct PathPattern {
    template: String,
    segments: Vec<PathSegment>,
}

impl std::fmt::Debug for PathPattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PathPattern")
            .field("template", &self.template)
            .finish()
    }
}

impl PathPattern {
    /// Parse a template, resolving every type tag against `registry`.
    ///
    /// The converter is bound into the segment here, which is what makes an
    /// unknown tag a registration-time error and keeps request-time
    /// matching independent of the registry.
    pub(crate) fn parse(
        raw: &str,
        registry: &ConverterRegistry,
    ) -> Result<Self, InvalidPatternError> {
        if !raw.trim().starts_with('/') {
            return Err(InvalidPatternError::MissingLeadingSlash {
                pattern: raw.to_owned(),
            });
        }

        let template = path::normalize(raw);
        let mut segments = Vec::new();
        let mut seen_names: Vec<String> = Vec::new();

        for seg in path::segments(&template) {
            let parsed = Self::parse_segment(&template, seg, registry)?;

            if let PathSegment::Variable { ref name, .. } = parsed {
                if seen_names.iter().any(|n| n == name) {
                    return Err(InvalidPatternError::DuplicateVariable {
                        pattern: template.clone(),
                        name: name.clone(),
                    });
                }
                seen_names.push(name.clone());
            }

            segments.push(parsed);
        }

        Ok(Self { template, segments })
    }

    fn parse_segment(
        template: &str,
        seg: &str,
        registry: &ConverterRegistry,
    ) -> Result<PathSegment, InvalidPatternError> {
        let malformed = || InvalidPatternError::MalformedSegment {
            pattern: template.to_owned(),
            segment: seg.to_owned(),
        };

        if !seg.contains('{') && !seg.contains('}') {
            return Ok(PathSegment::Literal(seg.to_owned()));
        }

        // a brace anywhere means the whole segment must be `{name}` or
        // `{name:tag}`
        if !seg.starts_with('{') || !seg.ends_with('}') || seg.len() < 2 {
            return Err(malformed());
        }

        let inner = &seg[1..seg.len() - 1];
        if inner.contains('{') || inner.contains('}') {
            return Err(malformed());
        }

        let (name, tag) = match inner.find(':') {
            Some(idx) => (&inner[..idx], &inner[idx + 1..]),
            None => (inner, "str"),
        };

        if name.is_empty() || tag.is_empty() {
            return Err(malformed());
        }

        let convert = registry
            .get(tag)
            .ok_or_else(|| InvalidPatternError::UnknownTag {
                pattern: template.to_owned(),
                tag: tag.to_owned(),
            })?;

        Ok(PathSegment::Variable {
            name: name.to_owned(),
            tag: tag.to_owned(),
            convert,
        })
    }

    /// The normalized template string.
    pub fn template(&self) -> &str {
        &self.template
    }

    /// Structurally match an already-normalized request path, returning the
    /// raw text captured by each variable segment.
    ///
    /// `None` means the shape does not fit: the segment counts differ, a
    /// literal differs, or a variable segment is empty.
    pub(crate) fn captures<'p>(&self, normalized: &'p str) -> Option<Vec<(&str, &'p str)>> {
        let path_segments = path::segments(normalized);
        if path_segments.len() != self.segments.len() {
            return None;
        }

        let mut captured = Vec::new();
        for (pattern_seg, path_seg) in self.segments.iter().zip(path_segments) {
            match pattern_seg {
                PathSegment::Literal(text) => {
                    if text != path_seg {
                        return None;
                    }
                }
                PathSegment::Variable { name, .. } => {
                    if path_seg.is_empty() {
                        return None;
                    }
                    captured.push((name.as_str(), path_seg));
                }
            }
        }

        Some(captured)
    }

    /// Convert the raw captures of [`captures`](Self::captures) into typed
    /// parameters, in pattern order.
    pub(crate) fn convert(&self, captured: &[(&str, &str)]) -> Result<Params, ConversionError> {
        let mut params = Params::default();
        let mut raws = captured.iter();

        for seg in &self.segments {
            if let PathSegment::Variable { name, convert, .. } = seg {
                // captures() emits exactly one raw value per variable
                let raw = match raws.next() {
                    Some((_, raw)) => *raw,
                    None => break,
                };
                params.push(name.clone(), convert(raw)?);
            }
        }

        Ok(params)
    }

    /// Prepend `prefix_segments` (all literals) to this pattern, producing
    /// the flattened pattern of a mounted route.
    pub(crate) fn prefixed(&self, prefix: &str, prefix_segments: &[String]) -> Self {
        let template = if self.template == "/" {
            prefix.to_owned()
        } else if prefix == "/" {
            self.template.clone()
        } else {
            format!("{}{}", prefix, self.template)
        };

        let mut segments: Vec<PathSegment> = prefix_segments
            .iter()
            .map(|s| PathSegment::Literal(s.clone()))
            .collect();
        segments.extend(self.segments.iter().map(|seg| match seg {
            PathSegment::Literal(text) => PathSegment::Literal(text.clone()),
            PathSegment::Variable { name, tag, convert } => PathSegment::Variable {
                name: name.clone(),
                tag: tag.clone(),
                convert: Arc::clone(convert),
            },
        }));

        Self { template, segments }
    }
}

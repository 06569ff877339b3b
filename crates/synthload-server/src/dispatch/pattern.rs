//! Path patterns: `/literal/{param}` with an optional trailing `/` that
//! claims the whole subtree below it.
//!
//! Request paths are split on the raw `/` and each segment is then
//! percent-decoded, so `%2F` stays inside its segment.

use std::borrow::Cow;

use percent_encoding::percent_decode_str;
use synthload_core::error::{Result, SynthLoadError};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Param(String),
}

/// Path parameters bound by a matched pattern.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathParams(Vec<(String, String)>);

impl PathParams {
    /// Value bound to `name`, or `""` when the pattern has no such parameter.
    pub fn get(&self, name: &str) -> &str {
        self.0
            .iter()
            .find(|(k, _)| k == name)
            .map_or("", |(_, v)| v.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Ordering key; larger is more specific.
pub(crate) type Specificity = (bool, usize, usize);

#[derive(Debug, Clone)]
pub struct Pattern {
    raw: String,
    segments: Vec<Segment>,
    subtree: bool,
}

impl Pattern {
    pub fn parse(raw: &str) -> Result<Self> {
        let bad = |why: &str| {
            SynthLoadError::Config(format!("invalid route pattern {raw:?}: {why}"))
        };

        let rest = raw.strip_prefix('/').ok_or_else(|| bad("must start with '/'"))?;
        if rest.is_empty() {
            return Ok(Self {
                raw: raw.to_string(),
                segments: Vec::new(),
                subtree: true,
            });
        }

        let (body, subtree) = match rest.strip_suffix('/') {
            Some(body) => (body, true),
            None => (rest, false),
        };

        let mut segments = Vec::new();
        for seg in body.split('/') {
            if seg.is_empty() {
                return Err(bad("empty segment"));
            }
            let segment = match seg.strip_prefix('{').and_then(|s| s.strip_suffix('}')) {
                Some(name) if name.is_empty() => return Err(bad("unnamed parameter")),
                Some(name) => {
                    if segments.contains(&Segment::Param(name.to_string())) {
                        return Err(bad("duplicate parameter"));
                    }
                    Segment::Param(name.to_string())
                }
                None if seg.contains(['{', '}']) => return Err(bad("stray brace")),
                None => Segment::Literal(seg.to_string()),
            };
            segments.push(segment);
        }

        Ok(Self {
            raw: raw.to_string(),
            segments,
            subtree,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn is_subtree(&self) -> bool {
        self.subtree
    }

    pub(crate) fn specificity(&self) -> Specificity {
        let literals = self
            .segments
            .iter()
            .filter(|s| matches!(s, Segment::Literal(_)))
            .count();
        (!self.subtree, self.segments.len(), literals)
    }

    /// Match a request path; parameters only bind non-empty segments.
    pub fn matches(&self, path: &str) -> Option<PathParams> {
        let parts = split_path(path)?;
        let fits = if self.subtree {
            parts.len() > self.segments.len()
        } else {
            parts.len() == self.segments.len()
        };
        if !fits {
            return None;
        }
        self.bind(&parts[..self.segments.len()])
    }

    /// True when `path` is this subtree's root without the trailing slash,
    /// e.g. `/wait` for `/wait/`.
    pub fn wants_trailing_slash(&self, path: &str) -> bool {
        if !self.subtree || self.segments.is_empty() {
            return false;
        }
        match split_path(path) {
            Some(parts) => parts.len() == self.segments.len() && self.bind(&parts).is_some(),
            None => false,
        }
    }

    fn bind(&self, parts: &[Cow<'_, str>]) -> Option<PathParams> {
        let mut params = Vec::new();
        for (seg, part) in self.segments.iter().zip(parts) {
            match seg {
                Segment::Literal(lit) if lit.as_str() == part.as_ref() => {}
                Segment::Param(name) if !part.is_empty() => {
                    params.push((name.clone(), part.to_string()));
                }
                _ => return None,
            }
        }
        Some(PathParams(params))
    }
}

/// Segments that are not valid UTF-8 once decoded are kept as sent.
fn split_path(path: &str) -> Option<Vec<Cow<'_, str>>> {
    let rest = path.strip_prefix('/')?;
    Some(
        rest.split('/')
            .map(|seg| percent_decode_str(seg).decode_utf8().unwrap_or(Cow::Borrowed(seg)))
            .collect(),
    )
}

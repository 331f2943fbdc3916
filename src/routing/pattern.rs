//! Path patterns.
//!
//! # Responsibilities
//! - Parse `/users/:id/edit`-style patterns into static and dynamic segments
//! - Match a normalized request path and extract parameters
//! - Fill parameters back in when generating a path
//!
//! # Design Decisions
//! - Static segments are case-sensitive
//! - Only a trailing run of dynamic segments may be optional
//! - No regex: matching is a single segment-by-segment walk
//! - Dynamic values are percent-encoded on generation and decoded on
//!   recognition, so a generated path recognizes back to the same params

use std::collections::{BTreeMap, HashSet};
use std::fmt;

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, CONTROLS};

use crate::error::{Result, RoutingError};

/// Bytes escaped inside a single path segment.
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Parameters extracted during recognition or supplied for generation.
pub type Params = BTreeMap<String, String>;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Static(String),
    Dynamic { name: String, optional: bool },
}

/// A parsed route path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPattern {
    source: String,
    segments: Vec<Segment>,
}

impl PathPattern {
    /// Parse a pattern. `is_optional` decides, for each trailing dynamic
    /// segment, whether it may be left out of a request path.
    pub fn parse(path: &str, is_optional: impl Fn(&str) -> bool) -> Result<Self> {
        let source = normalize_path(path);
        let mut segments = Vec::new();
        let mut seen = HashSet::new();

        for raw in split_segments(&source) {
            if let Some(name) = raw.strip_prefix(':') {
                if name.is_empty() {
                    return Err(RoutingError::InvalidPattern {
                        pattern: path.to_string(),
                        reason: "dynamic segment without a name".to_string(),
                    });
                }
                if !seen.insert(name.to_string()) {
                    return Err(RoutingError::InvalidPattern {
                        pattern: path.to_string(),
                        reason: format!("parameter {:?} appears twice", name),
                    });
                }
                segments.push(Segment::Dynamic {
                    name: name.to_string(),
                    optional: false,
                });
            } else {
                segments.push(Segment::Static(raw.to_string()));
            }
        }

        // Walk back from the end; the first required segment stops the run.
        for segment in segments.iter_mut().rev() {
            match segment {
                Segment::Dynamic { name, optional } if is_optional(name.as_str()) => *optional = true,
                _ => break,
            }
        }

        Ok(Self { source, segments })
    }

    /// The normalized pattern source, e.g. `/users/:id`.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Names of the dynamic segments, in path order.
    pub fn param_names(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Dynamic { name, .. } => Some(name.as_str()),
            Segment::Static(_) => None,
        })
    }

    /// Match a request path, returning the dynamic segment values.
    ///
    /// `path` is normalized first, so `/items/2/` matches `/items/:id`.
    pub fn matches(&self, path: &str) -> Option<Params> {
        let path = normalize_path(path);
        let parts: Vec<&str> = split_segments(&path).collect();
        if parts.len() > self.segments.len() {
            return None;
        }

        let mut params = Params::new();
        for (index, segment) in self.segments.iter().enumerate() {
            match (segment, parts.get(index)) {
                (Segment::Static(expected), Some(actual)) if expected.as_str() == *actual => {}
                (Segment::Dynamic { name, .. }, Some(actual)) => {
                    let value = percent_decode_str(actual).decode_utf8_lossy();
                    params.insert(name.clone(), value.into_owned());
                }
                (Segment::Dynamic { optional: true, .. }, None) => {}
                _ => return None,
            }
        }
        Some(params)
    }

    /// Fill the pattern from `params`.
    ///
    /// Values are percent-encoded as path segments. Optional trailing segments
    /// without a value are dropped. On failure the name of the first missing
    /// parameter is returned.
    pub fn generate(&self, params: &Params) -> std::result::Result<String, String> {
        let mut path = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Static(value) => {
                    path.push('/');
                    path.push_str(value);
                }
                Segment::Dynamic { name, optional } => match params.get(name) {
                    Some(value) => {
                        path.push('/');
                        path.extend(utf8_percent_encode(value, SEGMENT));
                    }
                    None if *optional => break,
                    None => return Err(name.clone()),
                },
            }
        }
        if path.is_empty() {
            path.push('/');
        }
        Ok(path)
    }
}

impl fmt::Display for PathPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

/// Normalize a request or pattern path: leading slash, no repeated or
/// trailing slashes.
pub fn normalize_path(path: &str) -> String {
    let joined = split_segments(path).collect::<Vec<_>>().join("/");
    format!("/{}", joined)
}

/// Join a scope prefix and a route path.
pub fn join_paths(prefix: Option<&str>, path: &str) -> String {
    match prefix {
        Some(prefix) => normalize_path(&format!("{}/{}", prefix, path)),
        None => normalize_path(path),
    }
}

fn split_segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|segment| !segment.is_empty())
}

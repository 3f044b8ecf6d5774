use std::collections::BTreeMap;

use crate::error::RouteTableError;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Static(String),
    Param(String),
}

/// PathPattern
///
/// A compiled route path such as `/teacher/courses/:courseId`. Static segments match
/// ASCII case-insensitively; a `:name` segment captures exactly one non-empty segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPattern {
    raw: String,
    segments: Vec<Segment>,
}

impl PathPattern {
    pub fn parse(raw: &str) -> Result<Self, RouteTableError> {
        let invalid = |reason| RouteTableError::InvalidPattern {
            pattern: raw.to_string(),
            reason,
        };

        let rest = raw.strip_prefix('/').ok_or_else(|| invalid("must start with '/'"))?;
        if rest.contains(['?', '#']) {
            return Err(invalid("must not contain a query or fragment"));
        }

        let mut segments = Vec::new();
        for segment in split_segments(rest) {
            if segment.is_empty() {
                return Err(invalid("empty segment"));
            }
            match segment.strip_prefix(':') {
                Some(name) => {
                    if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
                        return Err(invalid("parameter names must be alphanumeric"));
                    }
                    if segments.contains(&Segment::Param(name.to_string())) {
                        return Err(invalid("duplicate parameter name"));
                    }
                    segments.push(Segment::Param(name.to_string()));
                }
                None => segments.push(Segment::Static(segment.to_string())),
            }
        }

        Ok(Self {
            raw: raw.to_string(),
            segments,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Parameter names in declaration order.
    pub fn params(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Param(name) => Some(name.as_str()),
            Segment::Static(_) => None,
        })
    }

    /// The pattern in the router's `{name}` capture syntax.
    pub fn mount_path(&self) -> String {
        let mut path = String::new();
        for segment in &self.segments {
            path.push('/');
            match segment {
                Segment::Static(s) => path.push_str(s),
                Segment::Param(name) => {
                    path.push('{');
                    path.push_str(name);
                    path.push('}');
                }
            }
        }
        if path.is_empty() {
            path.push('/');
        }
        path
    }

    /// matches
    ///
    /// Matches a request path, ignoring any query string or fragment and a single
    /// trailing slash. Captured values are returned verbatim.
    pub fn matches(&self, path: &str) -> Option<BTreeMap<String, String>> {
        let rest = strip_suffixes(path).strip_prefix('/')?;
        let rest = rest.strip_suffix('/').unwrap_or(rest);

        let mut params = BTreeMap::new();
        let mut candidate = split_segments(rest);
        for segment in &self.segments {
            let value = candidate.next()?;
            match segment {
                Segment::Static(expected) => {
                    if !expected.eq_ignore_ascii_case(value) {
                        return None;
                    }
                }
                Segment::Param(name) => {
                    if value.is_empty() {
                        return None;
                    }
                    params.insert(name.clone(), value.to_string());
                }
            }
        }

        candidate.next().is_none().then_some(params)
    }

    /// True when some path would be matched by both patterns.
    pub fn conflicts_with(&self, other: &PathPattern) -> bool {
        self.segments.len() == other.segments.len()
            && self
                .segments
                .iter()
                .zip(&other.segments)
                .all(|pair| match pair {
                    (Segment::Static(a), Segment::Static(b)) => a.eq_ignore_ascii_case(b),
                    _ => true,
                })
    }

    /// Substitutes parameters into the pattern. Returns the name of the first
    /// missing parameter on failure.
    pub fn fill(&self, params: &BTreeMap<String, String>) -> Result<String, String> {
        if self.segments.is_empty() {
            return Ok("/".to_string());
        }
        let mut path = String::new();
        for segment in &self.segments {
            path.push('/');
            match segment {
                Segment::Static(s) => path.push_str(s),
                Segment::Param(name) => match params.get(name) {
                    Some(value) if !value.is_empty() => path.push_str(value),
                    _ => return Err(name.clone()),
                },
            }
        }
        Ok(path)
    }
}

/// The root path has no segments at all.
fn split_segments(rest: &str) -> std::str::Split<'_, char> {
    let mut split = rest.split('/');
    if rest.is_empty() {
        split.next();
    }
    split
}

/// Drops the query string and fragment.
pub fn strip_suffixes(path: &str) -> &str {
    path.split(['?', '#']).next().unwrap_or(path)
}

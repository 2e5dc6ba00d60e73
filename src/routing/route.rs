use crate::http::request::Method;
use std::collections::HashMap;

/// One `/`-delimited piece of a path pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Matches exactly, case-sensitively.
    Literal(String),
    /// `:name`: matches any segment, capturing it under `name`.
    Param(String),
    /// A lone `:`: matches any segment, capturing nothing.
    Anonymous,
}

/// A single route: a parsed path pattern, the methods it accepts, and the
/// name of the handler it dispatches to.
///
/// Routes are built once at site construction and never mutated; a deploy
/// replaces the whole table.
#[derive(Debug, Clone)]
pub struct Route {
    pattern: Vec<Segment>,
    methods: Vec<Method>,
    handler: String,
}

impl Route {
    pub fn new(pattern: &str, methods: &[Method], handler: impl Into<String>) -> Self {
        Self {
            pattern: parse_pattern(pattern),
            methods: methods.to_vec(),
            handler: handler.into(),
        }
    }

    pub fn methods(&self) -> &[Method] {
        &self.methods
    }

    pub fn allows(&self, method: Method) -> bool {
        self.methods.contains(&method)
    }

    pub fn handler(&self) -> &str {
        &self.handler
    }

    /// Walks the pattern and the path in lockstep. Literals must match
    /// exactly, parameter segments capture, and both must run out at the
    /// same time; there are no trailing wildcards.
    ///
    /// Returns the captured parameters on a match, `None` otherwise.
    pub fn capture(&self, path: &str) -> Option<HashMap<String, String>> {
        let segments: Vec<&str> = path_segments(path).collect();
        if segments.len() != self.pattern.len() {
            return None;
        }

        let mut params = HashMap::new();
        for (pattern, segment) in self.pattern.iter().zip(&segments) {
            match pattern {
                Segment::Literal(literal) => {
                    if literal != segment {
                        return None;
                    }
                }
                Segment::Param(name) => {
                    params.insert(name.clone(), (*segment).to_string());
                }
                Segment::Anonymous => {}
            }
        }

        Some(params)
    }
}

fn parse_pattern(pattern: &str) -> Vec<Segment> {
    path_segments(pattern)
        .map(|segment| {
            if segment == ":" {
                Segment::Anonymous
            } else if let Some(name) = segment.strip_prefix(':') {
                Segment::Param(name.to_string())
            } else {
                Segment::Literal(segment.to_string())
            }
        })
        .collect()
}

/// The non-empty `/`-delimited components of a path.
pub fn path_segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|segment| !segment.is_empty())
}

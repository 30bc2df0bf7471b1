//! Method and path matching for the admin API.
//!
//! A route pattern is a `/`-separated list of segments. A segment that starts with `:` captures exactly one path
//! segment under the name that follows the colon; every other segment must match literally (case-sensitive). There are
//! no wildcards, so a pattern only ever matches paths with the same number of segments.
//!
//! Routes are tried in registration order and the first full match wins. Registering the same method and pattern
//! twice is an error, but overlapping patterns (say `/posts/:id` and `/posts/latest`) are allowed, and then the
//! order of registration decides.

use std::{
    collections::BTreeMap,
    fmt::{self, Display},
    str::FromStr,
};

use log::trace;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouterError {
    #[error("Route {0} {1} is already registered")]
    DuplicateRoute(RouteMethod, String),
    #[error("Invalid route pattern '{0}'. {1}")]
    InvalidPattern(String, String),
    #[error("Unsupported HTTP method: {0}")]
    UnsupportedMethod(String),
}

//--------------------------------------------   RouteMethod   -------------------------------------------------------
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RouteMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl RouteMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }
}

impl Display for RouteMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RouteMethod {
    type Err = RouterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "GET" => Ok(Self::Get),
            "POST" => Ok(Self::Post),
            "PUT" => Ok(Self::Put),
            "PATCH" => Ok(Self::Patch),
            "DELETE" => Ok(Self::Delete),
            _ => Err(RouterError::UnsupportedMethod(s.to_string())),
        }
    }
}

//--------------------------------------------   PathParams   --------------------------------------------------------
/// Values captured from the request path, keyed by parameter name. Values are percent-decoded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathParams(BTreeMap<String, String>);

impl PathParams {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for PathParams {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

//--------------------------------------------   RoutePattern   ------------------------------------------------------
#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Capture(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutePattern {
    raw: String,
    segments: Vec<Segment>,
}

fn split_path(path: &str) -> impl Iterator<Item = &str> {
    path.strip_prefix('/').unwrap_or(path).split('/')
}

impl RoutePattern {
    pub fn parse(pattern: &str) -> Result<Self, RouterError> {
        let invalid = |reason: &str| RouterError::InvalidPattern(pattern.to_string(), reason.to_string());
        if !pattern.starts_with('/') {
            return Err(invalid("Patterns must start with '/'"));
        }
        let mut segments = Vec::new();
        for segment in split_path(pattern) {
            match segment.strip_prefix(':') {
                Some("") => return Err(invalid("Captured segments need a name")),
                Some(name) => {
                    if segments.iter().any(|s| matches!(s, Segment::Capture(n) if n == name)) {
                        return Err(invalid(&format!("Parameter '{name}' appears more than once")));
                    }
                    segments.push(Segment::Capture(name.to_string()));
                },
                None => segments.push(Segment::Literal(segment.to_string())),
            }
        }
        Ok(Self { raw: pattern.to_string(), segments })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    /// Matches `path` against this pattern, returning the captured parameters on success.
    ///
    /// A captured segment that is not valid percent-encoded UTF-8 makes the whole pattern fail to match.
    pub fn matches(&self, path: &str) -> Option<PathParams> {
        let parts = split_path(path).collect::<Vec<_>>();
        if parts.len() != self.segments.len() {
            return None;
        }
        let mut params = BTreeMap::new();
        for (segment, part) in self.segments.iter().zip(parts) {
            match segment {
                Segment::Literal(literal) if literal == part => {},
                Segment::Literal(_) => return None,
                Segment::Capture(name) => {
                    let value = urlencoding::decode(part)
                        .map_err(|e| trace!("Could not decode path segment '{part}' for :{name}. {e}"))
                        .ok()?;
                    params.insert(name.clone(), value.into_owned());
                },
            }
        }
        Some(PathParams(params))
    }
}

impl Display for RoutePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

//--------------------------------------------   RouteTable   --------------------------------------------------------
#[derive(Debug, Clone)]
pub struct Route<H> {
    pub method: RouteMethod,
    pub pattern: RoutePattern,
    pub handler: H,
}

/// The result of a successful lookup: the matched route and the parameters captured from the path.
#[derive(Debug)]
pub struct RouteMatch<'a, H> {
    pub route: &'a Route<H>,
    pub params: PathParams,
}

impl<'a, H> RouteMatch<'a, H> {
    pub fn handler(&self) -> &'a H {
        &self.route.handler
    }
}

/// An ordered, immutable-once-built list of routes.
#[derive(Debug, Clone)]
pub struct RouteTable<H> {
    routes: Vec<Route<H>>,
}

impl<H> Default for RouteTable<H> {
    fn default() -> Self {
        Self { routes: Vec::new() }
    }
}

impl<H> RouteTable<H> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a route. Fails if the pattern is invalid or the exact method and pattern are already registered.
    pub fn add(&mut self, method: RouteMethod, pattern: &str, handler: H) -> Result<&mut Self, RouterError> {
        let pattern = RoutePattern::parse(pattern)?;
        if self.routes.iter().any(|r| r.method == method && r.pattern == pattern) {
            return Err(RouterError::DuplicateRoute(method, pattern.raw));
        }
        self.routes.push(Route { method, pattern, handler });
        Ok(self)
    }

    /// Builder-style version of [`RouteTable::add`].
    pub fn route(mut self, method: RouteMethod, pattern: &str, handler: H) -> Result<Self, RouterError> {
        self.add(method, pattern, handler)?;
        Ok(self)
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Route<H>> {
        self.routes.iter()
    }

    /// Finds the first route that matches `method` and `path`.
    pub fn find(&self, method: RouteMethod, path: &str) -> Option<RouteMatch<'_, H>> {
        self.routes.iter().filter(|r| r.method == method).find_map(|route| {
            let params = route.pattern.matches(path)?;
            trace!("Matched {method} {path} to {}", route.pattern);
            Some(RouteMatch { route, params })
        })
    }

    /// As [`RouteTable::find`], but with the method given as its HTTP name. Unknown methods never match.
    pub fn find_by_name(&self, method: &str, path: &str) -> Option<RouteMatch<'_, H>> {
        let method = method.parse::<RouteMethod>().ok()?;
        self.find(method, path)
    }
}

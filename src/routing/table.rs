use crate::http::request::Method;
use crate::routing::route::Route;
use std::collections::HashMap;

/// A successful match: the route and the path parameters it captured.
#[derive(Debug)]
pub struct RouteMatch<'a> {
    pub route: &'a Route,
    pub path_params: HashMap<String, String>,
}

/// An ordered collection of routes.
///
/// Matching is first-match-wins in declaration order; overlapping
/// patterns are resolved by that order alone.
#[derive(Debug, Clone, Default)]
pub struct RoutingTable {
    routes: Vec<Route>,
}

impl RoutingTable {
    pub fn new(routes: Vec<Route>) -> Self {
        Self { routes }
    }

    /// Finds the first route whose method set contains `method` and whose
    /// pattern matches `path`. No match is a routing failure for the
    /// caller to surface; there is no fallback route.
    pub fn match_route(&self, method: Method, path: &str) -> Option<RouteMatch<'_>> {
        for route in &self.routes {
            if !route.allows(method) {
                continue;
            }
            if let Some(path_params) = route.capture(path) {
                return Some(RouteMatch { route, path_params });
            }
        }
        None
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

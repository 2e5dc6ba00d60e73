//! The dispatcher boundary between the transport core and application
//! logic.
//!
//! A [`Site`] is a routing table plus an explicit `handler name -> callable`
//! registry, assembled once at startup. The core never inspects handler
//! internals, it only invokes the registered function. The server swaps
//! the active site wholesale on deploy.

use std::collections::HashMap;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use crate::errors::StatusError;
use crate::http::request::{Method, Request};
use crate::http::response::Response;
use crate::routing::{Route, RoutingTable};

/// The uniform function-shaped contract application handlers implement.
///
/// A handler may fail with a [`StatusError`] to pick the response status
/// itself; any other error (or a panic) becomes a 500 with the cause
/// logged, never sent to the client.
pub type Handler = Arc<dyn Fn(&Request) -> anyhow::Result<Response> + Send + Sync>;

/// Rejected site definitions, caught at build time rather than at dispatch.
#[derive(Debug, thiserror::Error)]
pub enum InvalidSiteError {
    #[error("route for handler {handler:?} has an empty method set")]
    EmptyMethods { handler: String },
    #[error("route references unregistered handler {handler:?}")]
    UnknownHandler { handler: String },
}

/// An application: routes plus the handlers they dispatch to.
pub struct Site {
    table: RoutingTable,
    handlers: HashMap<String, Handler>,
}

impl Site {
    pub fn builder() -> SiteBuilder {
        SiteBuilder {
            routes: Vec::new(),
            handlers: HashMap::new(),
        }
    }

    pub fn routes(&self) -> &RoutingTable {
        &self.table
    }

    /// Produces the response for a parsed request.
    ///
    /// Looks up the route (no match is a 404 failure), attaches the
    /// captured path parameters to the request (the single point where
    /// they are populated) and invokes the handler. A handler-raised
    /// [`StatusError`] propagates with its code authoritative; anything
    /// else, including a panic, maps to 500.
    pub fn service(&self, request: &mut Request) -> Result<Response, StatusError> {
        let Some(found) = self.table.match_route(request.method(), request.path()) else {
            return Err(StatusError::not_found());
        };

        let handler = self
            .handlers
            .get(found.route.handler())
            .cloned()
            .ok_or_else(|| {
                StatusError::internal(anyhow::anyhow!(
                    "handler {:?} missing from registry",
                    found.route.handler()
                ))
            })?;
        request.set_path_params(found.path_params);

        match panic::catch_unwind(AssertUnwindSafe(|| handler(request))) {
            Ok(Ok(response)) => Ok(response),
            Ok(Err(err)) => match err.downcast::<StatusError>() {
                Ok(status_err) => Err(status_err),
                Err(other) => Err(StatusError::internal(other)),
            },
            Err(payload) => Err(StatusError::internal(anyhow::anyhow!(
                "handler panicked: {}",
                panic_message(&payload)
            ))),
        }
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message
    } else {
        "unknown panic payload"
    }
}

/// Assembles a [`Site`] from ordered route declarations and a handler
/// registry.
///
/// # Example
///
/// ```ignore
/// let site = Site::builder()
///     .route(&[Method::GET], "/users/:id", "show_user")
///     .handler("show_user", |req| {
///         let id = req.path_param("id").unwrap_or("?");
///         Ok(Response::ok(format!("user {id}")))
///     })
///     .build()?;
/// ```
pub struct SiteBuilder {
    routes: Vec<Route>,
    handlers: HashMap<String, Handler>,
}

impl SiteBuilder {
    /// Declares a route. Declaration order is dispatch order: the first
    /// matching route wins, so declare most-specific routes first.
    pub fn route(mut self, methods: &[Method], pattern: &str, handler: &str) -> Self {
        self.routes.push(Route::new(pattern, methods, handler));
        self
    }

    /// Registers the callable a route's handler name resolves to.
    pub fn handler<F>(mut self, name: &str, handler: F) -> Self
    where
        F: Fn(&Request) -> anyhow::Result<Response> + Send + Sync + 'static,
    {
        self.handlers.insert(name.to_string(), Arc::new(handler));
        self
    }

    /// Validates the definition and builds the site: every route must
    /// name a registered handler and carry at least one method.
    pub fn build(self) -> Result<Site, InvalidSiteError> {
        for route in &self.routes {
            if route.methods().is_empty() {
                return Err(InvalidSiteError::EmptyMethods {
                    handler: route.handler().to_string(),
                });
            }
            if !self.handlers.contains_key(route.handler()) {
                return Err(InvalidSiteError::UnknownHandler {
                    handler: route.handler().to_string(),
                });
            }
        }

        Ok(Site {
            table: RoutingTable::new(self.routes),
            handlers: self.handlers,
        })
    }
}

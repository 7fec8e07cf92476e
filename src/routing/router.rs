//! Route table and dispatch.
//!
//! # Responsibilities
//! - Store registered endpoints keyed by (method, path pattern)
//! - Reject duplicate registrations at startup
//! - Look up the endpoint for a request, or report why there is none
//!
//! # Design Decisions
//! - Built once at startup, then shared behind `Arc` without locks
//! - Routes are scanned in registration order; first match wins
//! - A path match with the wrong method is 405, not 404

use std::sync::Arc;

use axum::http::Method;

use crate::http::Endpoint;
use crate::routing::matcher::{normalize_path, ExactPath, PathMatcher};

/// Routing failures, both at registration and at lookup.
#[derive(Debug, thiserror::Error)]
pub enum RouteError {
    /// The (method, pattern) pair is already registered.
    #[error("route conflict: {method} {pattern} is already registered")]
    Conflict { method: Method, pattern: String },

    /// No registered pattern matches the path.
    #[error("no route matches the request path")]
    NotFound,

    /// The path matches, but not for this method.
    #[error("method not allowed")]
    MethodNotAllowed { allowed: Vec<Method> },
}

#[derive(Debug)]
struct RouteEntry {
    matcher: Box<dyn PathMatcher>,
    methods: Vec<(Method, Arc<dyn Endpoint>)>,
}

/// Maps (method, path) to endpoints.
#[derive(Debug, Default)]
pub struct Router {
    routes: Vec<RouteEntry>,
}

impl Router {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `endpoint` for an exact path.
    pub fn register<E>(&mut self, method: Method, path: &str, endpoint: E) -> Result<(), RouteError>
    where
        E: Endpoint,
    {
        self.register_matcher(method, Box::new(ExactPath::new(path)), Arc::new(endpoint))
    }

    /// Register `endpoint` under an arbitrary path matching strategy.
    pub fn register_matcher(
        &mut self,
        method: Method,
        matcher: Box<dyn PathMatcher>,
        endpoint: Arc<dyn Endpoint>,
    ) -> Result<(), RouteError> {
        let existing = self.routes.iter().position(|entry| {
            entry.matcher.strategy() == matcher.strategy()
                && entry.matcher.pattern() == matcher.pattern()
        });

        let index = match existing {
            Some(index) => index,
            None => {
                self.routes.push(RouteEntry {
                    matcher,
                    methods: Vec::new(),
                });
                self.routes.len() - 1
            }
        };
        let entry = &mut self.routes[index];

        if entry.methods.iter().any(|(m, _)| *m == method) {
            return Err(RouteError::Conflict {
                method,
                pattern: entry.matcher.pattern().to_string(),
            });
        }

        tracing::debug!(
            method = %method,
            pattern = %entry.matcher.pattern(),
            strategy = entry.matcher.strategy(),
            operation = endpoint.name(),
            "Route registered"
        );
        entry.methods.push((method, endpoint));
        Ok(())
    }

    /// Find the endpoint for `method` and `path`.
    pub fn dispatch(&self, method: &Method, path: &str) -> Result<Arc<dyn Endpoint>, RouteError> {
        let path = normalize_path(path);
        let mut allowed: Vec<Method> = Vec::new();

        for entry in self.routes.iter().filter(|e| e.matcher.matches(&path)) {
            for (registered, endpoint) in &entry.methods {
                if registered == method {
                    return Ok(Arc::clone(endpoint));
                }
                if !allowed.contains(registered) {
                    allowed.push(registered.clone());
                }
            }
        }

        if allowed.is_empty() {
            Err(RouteError::NotFound)
        } else {
            Err(RouteError::MethodNotAllowed { allowed })
        }
    }

    /// Number of registered (method, pattern) pairs.
    pub fn len(&self) -> usize {
        self.routes.iter().map(|e| e.methods.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

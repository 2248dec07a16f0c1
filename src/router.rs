//! Radix-tree request router.
//!
//! One [`matchit`] tree per HTTP method, plus one tree for routes that take
//! any method. Built once at startup, then shared read-only by every
//! connection task.

use std::collections::HashMap;

use http::Method;
use matchit::Router as MatchitRouter;

use crate::handler::{Handler, SharedHandler, share};

/// The application router.
///
/// ```rust
/// # use hostecho::{Request, Response, Router};
/// # async fn greet(_: Request) -> Response { Response::text("") }
/// # async fn echo(_: Request) -> Response { Response::text("") }
/// Router::new()
///     .any("/", greet)
///     .post("/echo", echo);
/// ```
///
/// A path registered for specific methods belongs to those methods: asking
/// for it with another method is a `405`, even when an any-method route
/// (such as a catch-all) would also match it.
pub struct Router {
    /// Method-specific routes.
    routes: HashMap<Method, MatchitRouter<SharedHandler>>,
    /// Routes that answer every method; consulted after `routes`.
    any: MatchitRouter<SharedHandler>,
}

/// Outcome of routing one request.
pub(crate) enum Lookup {
    Found(SharedHandler),
    /// The path is registered, but not for this method. Carries the methods
    /// it does accept, sorted, for the `allow` header.
    MethodNotAllowed(Vec<Method>),
    NotFound,
}

impl Router {
    pub fn new() -> Self {
        Self { routes: HashMap::new(), any: MatchitRouter::new() }
    }

    /// Register a handler for a method + path pair.
    ///
    /// # Panics
    ///
    /// Panics if `path` is malformed or already registered for `method`.
    /// Routes are fixed at startup, so this is a programming error.
    pub fn on(mut self, method: Method, path: &str, handler: impl Handler) -> Self {
        self.routes
            .entry(method)
            .or_default()
            .insert(path, share(handler))
            .unwrap_or_else(|e| panic!("invalid route `{path}`: {e}"));
        self
    }

    pub fn post(self, path: &str, handler: impl Handler) -> Self {
        self.on(Method::POST, path, handler)
    }

    /// Register a handler that answers every method on `path`.
    ///
    /// `path` may end in a catch-all segment (`/{*rest}`) to claim a whole
    /// subtree.
    pub fn any(mut self, path: &str, handler: impl Handler) -> Self {
        self.any
            .insert(path, share(handler))
            .unwrap_or_else(|e| panic!("invalid route `{path}`: {e}"));
        self
    }

    pub(crate) fn lookup(&self, method: &Method, path: &str) -> Lookup {
        if let Some(matched) = self.routes.get(method).and_then(|tree| tree.at(path).ok()) {
            return Lookup::Found(SharedHandler::clone(matched.value));
        }

        let mut allowed: Vec<Method> = self
            .routes
            .iter()
            .filter(|(_, tree)| tree.at(path).is_ok())
            .map(|(m, _)| m.clone())
            .collect();
        if !allowed.is_empty() {
            allowed.sort_by(|a, b| a.as_str().cmp(b.as_str()));
            return Lookup::MethodNotAllowed(allowed);
        }

        match self.any.at(path) {
            Ok(matched) => Lookup::Found(SharedHandler::clone(matched.value)),
            Err(_) => Lookup::NotFound,
        }
    }
}

impl Default for Router {
    fn default() -> Self { Self::new() }
}

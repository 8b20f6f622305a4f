//! The application-level dispatcher.
//!
//! An [`App`] ties one root [`Router`] to the two fallback handlers and
//! turns a resolved request into the `(status line, body)` tuple the
//! transport writes back. There is no global application: every `App` is an
//! independent value, so several can coexist in one process (one per
//! virtual host, say) without interfering.

use std::sync::Arc;

use tracing::trace;

use crate::handler::{Handler, Response};
use crate::request::Request;
use crate::router::{Endpoint, Resolution, Router};

fn default_not_found(_: &Request) -> Response {
    ("404 NOT FOUND".to_owned(), "Page not found".to_owned())
}

fn default_method_not_allowed(req: &Request) -> Response {
    (
        "405 METHOD NOT ALLOWED".to_owned(),
        format!("Method {} not allowed", req.method),
    )
}

/// An application: a root router plus 404/405 fallback handlers.
///
/// ```rust
/// use hyper::Method;
/// use pathrouter::{App, Request, Response, Router};
///
/// fn index(_: &Request) -> Response {
///     ("200 OK".to_owned(), "Hello, World!".to_owned())
/// }
///
/// let app = App::new(Router::default().get("/", index));
///
/// let (status, body) = app.handle(Request::new(Method::GET, "/"));
/// assert_eq!(status, "200 OK");
/// assert_eq!(body, "Hello, World!");
///
/// let (status, _) = app.handle(Request::new(Method::GET, "/missing"));
/// assert_eq!(status, "404 NOT FOUND");
/// ```
///
/// The transport collaborator calls [`handle`](App::handle) once per
/// request and owns everything around it: socket handling, header parsing,
/// response framing. `handle` always returns a well-formed response tuple;
/// the only way it can unwind is a panic out of application handler code,
/// which is deliberately not caught here.
pub struct App {
    router: Router,
    not_found: Arc<dyn Handler>,
    method_not_allowed: Arc<dyn Handler>,
}

impl Default for App {
    fn default() -> Self {
        Self::new(Router::default())
    }
}

impl App {
    /// An application serving the given routes with the default fallbacks.
    pub fn new(router: Router) -> Self {
        Self {
            router,
            not_found: Arc::new(default_not_found),
            method_not_allowed: Arc::new(default_method_not_allowed),
        }
    }

    /// Replace the handler invoked when no route matches.
    pub fn not_found(mut self, handler: impl Handler + 'static) -> Self {
        self.not_found = Arc::new(handler);
        self
    }

    /// Replace the handler invoked when a route matches the path but not
    /// the method. The request's `allowed` field carries the permitted
    /// methods when this handler runs.
    pub fn method_not_allowed(mut self, handler: impl Handler + 'static) -> Self {
        self.method_not_allowed = Arc::new(handler);
        self
    }

    /// The root router.
    pub fn router(&self) -> &Router {
        &self.router
    }

    /// Dispatch one request to its handler, or to a fallback.
    ///
    /// The request's path is normalized and its `params` are filled in
    /// before the handler runs. A matched class-based view is dispatched to
    /// the operation named after the method; if the view declared the
    /// method but implements no such operation, the 405 fallback answers
    /// instead.
    pub fn handle(&self, mut req: Request) -> Response {
        req.path = crate::path::normalize(&req.path);

        match self.router.resolve(&req.method, &req.path) {
            Resolution::Matched { endpoint, params } => {
                req.params = params;
                match endpoint {
                    Endpoint::Function(handler) => handler.call(&req),
                    Endpoint::View(view) => match view.dispatch(&req) {
                        Some(response) => response,
                        // declared but unimplemented verb
                        None => {
                            trace!(method = %req.method, path = %req.path, "view lacks verb");
                            self.method_not_allowed.call(&req)
                        }
                    },
                }
            }
            Resolution::NotFound => self.not_found.call(&req),
            Resolution::MethodNotAllowed { allowed } => {
                req.allowed = allowed;
                self.method_not_allowed.call(&req)
            }
        }
    }
}

//! The request context handed to handlers.

use std::collections::HashMap;

use hyper::Method;

use crate::params::Params;

/// Everything a handler gets to see about the incoming request.
///
/// The transport collaborator constructs one of these per request from
/// whatever it parsed off the wire (headers, query string, body) and passes
/// it to [`App::handle`](crate::App::handle). This core only guarantees the
/// `method`, the normalized `path` and the typed `params` mapping; `query`,
/// `headers` and `body` are carried through untouched for the handler's
/// benefit.
pub struct Request {
    pub method: Method,
    /// The request path. Normalized by the dispatcher before any handler
    /// runs.
    pub path: String,
    /// Parameters captured from variable path segments, already converted
    /// to their declared types.
    pub params: Params,
    /// Query parameters, as parsed by the transport.
    pub query: HashMap<String, String>,
    /// Request headers, as parsed by the transport.
    pub headers: HashMap<String, String>,
    /// Raw request body, as read by the transport.
    pub body: String,
    /// The allowed methods for the requested path. Populated only when the
    /// method-not-allowed fallback runs, so custom 405 handlers can surface
    /// it (e.g. as an `Allow` header); empty otherwise.
    pub allowed: Vec<Method>,
}

impl Request {
    /// A bare request context with just a method and path, which is all the
    /// router itself ever needs.
    ///
    /// ```rust
    /// use hyper::Method;
    /// use pathrouter::Request;
    ///
    /// let req = Request::new(Method::GET, "/users/42");
    /// assert!(req.params.is_empty());
    /// ```
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            params: Params::default(),
            query: HashMap::new(),
            headers: HashMap::new(),
            body: String::new(),
            allowed: Vec::new(),
        }
    }
}

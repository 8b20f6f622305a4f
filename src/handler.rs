//! Handler and view contracts.

use hyper::Method;

use crate::request::Request;

/// What every handler produces: a status line and a body.
///
/// This tuple is the only wire-facing artifact of the router; turning it
/// into actual HTTP framing (headers, content-length, byte encoding) is the
/// transport collaborator's job.
pub type Response = (String, String);

/// A request handler.
///
/// The trait is implemented for any `Fn(&Request) -> Response`, so plain
/// functions and closures register directly and remain callable as plain
/// functions in tests:
///
/// ```rust
/// use pathrouter::{Handler, Request, Response};
/// use hyper::Method;
///
/// fn index(_: &Request) -> Response {
///     ("200 OK".to_owned(), "Hello, World!".to_owned())
/// }
///
/// let handler: Box<dyn Handler> = Box::new(index);
/// let req = Request::new(Method::GET, "/");
/// assert_eq!(handler.call(&req), index(&req));
/// ```
pub trait Handler: Send + Sync {
    fn call(&self, req: &Request) -> Response;
}

impl<F> Handler for F
where
    F: Fn(&Request) -> Response + Send + Sync,
{
    fn call(&self, req: &Request) -> Response {
        self(req)
    }
}

/// A class-based view: one object handling several verbs on one path.
///
/// Each verb operation defaults to `None` ("this view does not implement
/// that verb"); implement the ones the view supports and override
/// [`methods`](View::methods) to the same set so the route's declared
/// methods stay consistent with what [`dispatch`](View::dispatch) can
/// actually answer. A declared verb whose operation still returns `None` is
/// answered by the application's method-not-allowed fallback.
///
/// ```rust
/// use hyper::Method;
/// use pathrouter::{Request, Response, View};
///
/// struct ItemView;
///
/// impl View for ItemView {
///     fn methods(&self) -> Vec<Method> {
///         vec![Method::GET, Method::POST]
///     }
///
///     fn get(&self, _: &Request) -> Option<Response> {
///         Some(("200 OK".to_owned(), "item".to_owned()))
///     }
///
///     fn post(&self, _: &Request) -> Option<Response> {
///         Some(("201 CREATED".to_owned(), "created".to_owned()))
///     }
/// }
///
/// let view = ItemView;
/// assert!(view.dispatch(&Request::new(Method::GET, "/item")).is_some());
/// assert!(view.dispatch(&Request::new(Method::DELETE, "/item")).is_none());
/// ```
pub trait View: Send + Sync {
    /// The verbs this view answers. Used by
    /// [`Router::view`](crate::Router::view) to derive the route's allowed
    /// methods. The default is the full standard set, mirroring a route
    /// registered with no method restriction.
    fn methods(&self) -> Vec<Method> {
        vec![
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::HEAD,
            Method::OPTIONS,
        ]
    }

    fn get(&self, _req: &Request) -> Option<Response> {
        None
    }

    fn post(&self, _req: &Request) -> Option<Response> {
        None
    }

    fn put(&self, _req: &Request) -> Option<Response> {
        None
    }

    fn patch(&self, _req: &Request) -> Option<Response> {
        None
    }

    fn delete(&self, _req: &Request) -> Option<Response> {
        None
    }

    fn head(&self, _req: &Request) -> Option<Response> {
        None
    }

    fn options(&self, _req: &Request) -> Option<Response> {
        None
    }

    /// Route the request to the operation named after its method.
    ///
    /// `None` means the view has no operation for that verb.
    fn dispatch(&self, req: &Request) -> Option<Response> {
        match req.method {
            Method::GET => self.get(req),
            Method::POST => self.post(req),
            Method::PUT => self.put(req),
            Method::PATCH => self.patch(req),
            Method::DELETE => self.delete(req),
            Method::HEAD => self.head(req),
            Method::OPTIONS => self.options(req),
            _ => None,
        }
    }
}

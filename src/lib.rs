//! # PathRouter
//!
//! PathRouter is a lightweight HTTP request router and dispatcher with
//! typed path parameters.
//!
//! This router matches an incoming `(method, path)` pair against routes
//! registered in an explicit order, converts variable path segments to
//! their declared types, and falls back to configurable 404/405 handlers
//! when nothing matches. It owns no sockets and parses no wire bytes: an
//! external transport hands it a method and a path and writes back whatever
//! `(status line, body)` tuple it returns, which keeps resolution a pure,
//! synchronous, in-memory computation.
//!
//! ## Features
//!
//! **Typed parameters in your routing pattern:** a segment written as
//! `{name}` or `{name:type}` captures one path segment and converts it
//! before your handler runs. The built-in types are `str`, `int` and
//! `float`, and the converter registry is extensible. An unknown type tag
//! is an error at registration time, never at request time.
//!
//! **First match wins:** routes are tried in the order they were
//! registered, with no specificity scoring and no surprise priority rules.
//! When both `/users/admin` and `/users/{name}` could match, whichever was
//! registered first is chosen, so register the more specific route first.
//!
//! **Sub-routers:** a router can be mounted under a prefix, and mounted
//! routers flatten transitively, so route trees compose out of independent
//! pieces.
//!
//! **No global state:** every [`Router`] and [`App`] is an explicit value.
//! Two applications in one process never interfere, which keeps tests
//! honest.
//!
//! Of course you can also set custom [`not_found`](App::not_found) and
//! [`method_not_allowed`](App::method_not_allowed) fallback handlers.
//!
//! ## Usage
//!
//! Here is a simple example:
//!
//! ```rust
//! use hyper::Method;
//! use pathrouter::{App, Request, Response, Router};
//!
//! fn index(_: &Request) -> Response {
//!     ("200 OK".to_owned(), "Hello, World!".to_owned())
//! }
//!
//! fn hello(req: &Request) -> Response {
//!     let user = req.params.get("user").and_then(|v| v.as_str()).unwrap();
//!     ("200 OK".to_owned(), format!("Hello, {}", user))
//! }
//!
//! let app = App::new(
//!     Router::default()
//!         .get("/", index)
//!         .get("/hello/{user}", hello),
//! );
//!
//! let (status, body) = app.handle(Request::new(Method::GET, "/hello/gordon"));
//! assert_eq!(status, "200 OK");
//! assert_eq!(body, "Hello, gordon");
//! ```
//!
//! ### Typed parameters
//!
//! As you can see, `{user}` is a *variable segment*. A variable matches any
//! single non-empty path segment; with a type tag it must also convert:
//!
//! ```ignore
//! Pattern: /users/{id:int}
//!
//!  /users/42                 match, params["id"] == 42 (an integer)
//!  /users/abc                no match (conversion failure)
//!  /users/42/extra           no match (segment count)
//!  /users                    no match (segment count)
//! ```
//!
//! A conversion failure is indistinguishable from "this route does not
//! apply": resolution moves on to the next candidate, and if nothing else
//! matches the request is a plain 404, never a server error.
//!
//! ### Path normalization
//!
//! Templates and request paths are normalized the same way: surrounding
//! whitespace is trimmed and a trailing slash is dropped, so `/users` and
//! `/users/` are the same route. The root path `/` is preserved as-is and
//! is its own valid pattern, matching only `/`.
//!
//! ### Methods
//!
//! A route is registered per verb (`get`, `post`, `put`, `patch`,
//! `delete`, `head`, `options`) or for an explicit set via
//! [`route`](Router::route). Registering the same path again for another
//! verb extends the existing entry rather than duplicating it:
//!
//! ```rust
//! use pathrouter::{Request, Response, Router};
//!
//! fn items(_: &Request) -> Response {
//!     ("200 OK".to_owned(), "items".to_owned())
//! }
//!
//! let router = Router::default()
//!     .get("/items", items)
//!     .post("/items", items);
//!
//! assert_eq!(router.len(), 1); // one entry, allowed methods {GET, POST}
//! ```
//!
//! A request whose path matches but whose method does not is answered by
//! the 405 fallback, with the union of the allowed methods of every
//! matching route available to it.
//!
//! ### Mounting
//!
//! Does your application split into areas? Build each one as its own
//! router and mount them:
//!
//! ```rust
//! use hyper::Method;
//! use pathrouter::{Request, Resolution, Response, Router};
//!
//! fn blog_index(_: &Request) -> Response {
//!     ("200 OK".to_owned(), "blog".to_owned())
//! }
//!
//! fn post_by_id(req: &Request) -> Response {
//!     let id = req.params.get("id").and_then(|v| v.as_int()).unwrap();
//!     ("200 OK".to_owned(), format!("post {}", id))
//! }
//!
//! let blog = Router::default()
//!     .get("/", blog_index)
//!     .get("/posts/{id:int}", post_by_id);
//!
//! let router = Router::default().mount("/blog", blog);
//!
//! assert!(matches!(
//!     router.resolve(&Method::GET, "/blog"),
//!     Resolution::Matched { .. }
//! ));
//! assert!(matches!(
//!     router.resolve(&Method::GET, "/blog/posts/7"),
//!     Resolution::Matched { .. }
//! ));
//! ```
//!
//! ### Class-based views
//!
//! One object can answer several verbs on one path by implementing
//! [`View`]; the route's allowed methods are derived from the view, so the
//! declaration cannot drift from the implementation. See the [`View`]
//! documentation for an example.
//!
//! ### Custom converters
//!
//! ```rust
//! use hyper::Method;
//! use pathrouter::{ConversionError, ParamValue, Resolution, Request, Response, Router};
//!
//! fn show(_: &Request) -> Response {
//!     ("200 OK".to_owned(), String::new())
//! }
//!
//! let router = Router::default()
//!     .converter("hex", |raw| {
//!         i64::from_str_radix(raw, 16)
//!             .map(ParamValue::Int)
//!             .map_err(|_| ConversionError {
//!                 tag: "hex".to_owned(),
//!                 value: raw.to_owned(),
//!             })
//!     })
//!     .get("/blobs/{digest:hex}", show);
//!
//! assert!(matches!(
//!     router.resolve(&Method::GET, "/blobs/ff"),
//!     Resolution::Matched { .. }
//! ));
//! assert!(matches!(
//!     router.resolve(&Method::GET, "/blobs/zz"),
//!     Resolution::NotFound
//! ));
//! ```
//!
//! Converters are build-phase configuration: register them before the
//! routes that use them, and before the application starts serving.
//!
//! ## Lifecycle and concurrency
//!
//! Registration and mounting form a build phase that completes before the
//! first request. From then on the router is immutable: `resolve` and
//! [`App::handle`] never mutate shared state, take no locks, and can run
//! concurrently on as many threads as the transport cares to use.

#![forbid(unsafe_code)]

pub mod path;

mod app;
mod convert;
mod handler;
mod params;
mod pattern;
mod request;

#[doc(hidden)]
pub mod router;

#[doc(inline)]
pub use app::App;

#[doc(inline)]
pub use convert::{ConversionError, Converter, ConverterRegistry, ParamValue};

#[doc(inline)]
pub use handler::{Handler, Response, View};

#[doc(inline)]
pub use params::{Param, Params};

#[doc(inline)]
pub use pattern::{InvalidPatternError, PathPattern};

#[doc(inline)]
pub use request::Request;

#[doc(inline)]
pub use router::{Endpoint, Resolution, Router};

// test the code examples in README.md
#[cfg(doctest)]
mod test_readme {
    macro_rules! doc_comment {
        ($x:expr) => {
            #[doc = $x]
            extern "C" {}
        };
    }

    doc_comment!(include_str!("../README.md"));
}

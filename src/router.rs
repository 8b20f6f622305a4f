//! Route registration, mounting and resolution.
//!
//! A [`Router`] is an ordered list of route entries. Resolution scans the
//! list in registration order and the first entry whose pattern matches the
//! path, structurally and after type conversion, is authoritative. There
//! is no specificity scoring: when two patterns can match the same path
//! (say `/users/admin` and `/users/{name}`), the one registered first wins,
//! so register the more specific route first.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use hyper::Method;
use tracing::{debug, trace};

use crate::convert::{ConversionError, ConverterRegistry, ParamValue};
use crate::handler::{Handler, View};
use crate::params::Params;
use crate::path;
use crate::pattern::{InvalidPatternError, PathPattern};

/// The verbs a route is registered for when no explicit set is given.
pub(crate) const STANDARD_METHODS: [Method; 7] = [
    Method::GET,
    Method::POST,
    Method::PUT,
    Method::PATCH,
    Method::DELETE,
    Method::HEAD,
    Method::OPTIONS,
];

/// The target a route points at: a plain function or a class-based view.
#[derive(Clone)]
pub enum Endpoint {
    Function(Arc<dyn Handler>),
    View(Arc<dyn View>),
}

impl fmt::Debug for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endpoint::Function(_) => f.write_str("Endpoint::Function"),
            Endpoint::View(_) => f.write_str("Endpoint::View"),
        }
    }
}

/// One registered route: a pattern, the methods it answers, its endpoint.
pub(crate) struct RouteEntry {
    pattern: PathPattern,
    methods: HashSet<Method>,
    endpoint: Endpoint,
}

/// The outcome of resolving a `(method, path)` pair.
#[derive(Debug)]
pub enum Resolution {
    /// A route matched and permits the method.
    Matched { endpoint: Endpoint, params: Params },
    /// No route matched the path.
    NotFound,
    /// At least one route matched the path, but none permits the method.
    /// `allowed` is the union of the matching routes' method sets, sorted.
    MethodNotAllowed { allowed: Vec<Method> },
}

/// An ordered collection of routes.
///
/// Routes are registered with the consuming builder methods, which panic on
/// a malformed template (a malformed template is a programmer error, caught
/// the moment the application is built), or with the fallible `try_`
/// variants:
///
/// ```rust
/// use hyper::Method;
/// use pathrouter::{Request, Resolution, Response, Router};
///
/// fn index(_: &Request) -> Response {
///     ("200 OK".to_owned(), "Hello, World!".to_owned())
/// }
///
/// fn show_user(req: &Request) -> Response {
///     let id = req.params.get("id").and_then(|v| v.as_int()).unwrap();
///     ("200 OK".to_owned(), format!("user {}", id))
/// }
///
/// let router = Router::default()
///     .get("/", index)
///     .get("/users/{id:int}", show_user);
///
/// assert!(matches!(
///     router.resolve(&Method::GET, "/users/42"),
///     Resolution::Matched { .. }
/// ));
/// assert!(matches!(
///     router.resolve(&Method::GET, "/users/abc"),
///     Resolution::NotFound
/// ));
/// ```
///
/// Registration is a build-phase activity: once the application starts
/// serving, the router is read-only and can be shared freely across worker
/// threads. [`resolve`](Self::resolve) never mutates.
pub struct Router {
    registry: ConverterRegistry,
    entries: Vec<RouteEntry>,
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

impl Router {
    /// An empty router with the built-in `str`, `int` and `float`
    /// converters.
    pub fn new() -> Self {
        Self::with_registry(ConverterRegistry::default())
    }

    /// An empty router with a custom converter registry.
    pub fn with_registry(registry: ConverterRegistry) -> Self {
        Self {
            registry,
            entries: Vec::new(),
        }
    }

    /// A router built from an explicit list of `(pattern, handler)` pairs,
    /// each registered for the standard verb set.
    ///
    /// # Panics
    ///
    /// Panics if any pattern is malformed.
    pub fn with_routes(routes: Vec<(&str, Box<dyn Handler>)>) -> Self {
        let mut router = Self::new();
        for (pattern, handler) in routes {
            let endpoint = Endpoint::Function(Arc::from(handler));
            if let Err(err) = router.register(pattern, &STANDARD_METHODS, endpoint) {
                panic!("{}", err);
            }
        }
        router
    }

    /// Register an extra converter under `tag`, for use by patterns
    /// registered afterwards.
    pub fn converter<F>(mut self, tag: impl Into<String>, convert: F) -> Self
    where
        F: Fn(&str) -> Result<ParamValue, ConversionError> + Send + Sync + 'static,
    {
        self.registry.register(tag, convert);
        self
    }

    /// Register `handler` for `path` and the given methods. An empty
    /// method list means no restriction: the route answers the whole
    /// standard verb set.
    ///
    /// Registering the same normalized template twice extends the existing
    /// entry's method set instead of appending a duplicate, so a path can
    /// be registered verb by verb; the handler of the first registration is
    /// kept.
    ///
    /// # Panics
    ///
    /// Panics if the template is malformed; see
    /// [`try_route`](Self::try_route) for the fallible form.
    pub fn route(
        mut self,
        path: &str,
        methods: &[Method],
        handler: impl Handler + 'static,
    ) -> Self {
        if let Err(err) = self.try_route(path, methods, handler) {
            panic!("{}", err);
        }
        self
    }

    /// Fallible form of [`route`](Self::route).
    pub fn try_route(
        &mut self,
        path: &str,
        methods: &[Method],
        handler: impl Handler + 'static,
    ) -> Result<(), InvalidPatternError> {
        self.register(path, methods, Endpoint::Function(Arc::new(handler)))
    }

    /// Register a handler for `GET` requests.
    pub fn get(self, path: &str, handler: impl Handler + 'static) -> Self {
        self.route(path, &[Method::GET], handler)
    }

    /// Register a handler for `POST` requests.
    pub fn post(self, path: &str, handler: impl Handler + 'static) -> Self {
        self.route(path, &[Method::POST], handler)
    }

    /// Register a handler for `PUT` requests.
    pub fn put(self, path: &str, handler: impl Handler + 'static) -> Self {
        self.route(path, &[Method::PUT], handler)
    }

    /// Register a handler for `PATCH` requests.
    pub fn patch(self, path: &str, handler: impl Handler + 'static) -> Self {
        self.route(path, &[Method::PATCH], handler)
    }

    /// Register a handler for `DELETE` requests.
    pub fn delete(self, path: &str, handler: impl Handler + 'static) -> Self {
        self.route(path, &[Method::DELETE], handler)
    }

    /// Register a handler for `HEAD` requests.
    pub fn head(self, path: &str, handler: impl Handler + 'static) -> Self {
        self.route(path, &[Method::HEAD], handler)
    }

    /// Register a handler for `OPTIONS` requests.
    pub fn options(self, path: &str, handler: impl Handler + 'static) -> Self {
        self.route(path, &[Method::OPTIONS], handler)
    }

    /// Register a class-based view for `path`.
    ///
    /// The allowed methods are derived from [`View::methods`], so the
    /// declared set cannot drift from the view itself.
    ///
    /// # Panics
    ///
    /// Panics if the template is malformed; see
    /// [`try_view`](Self::try_view) for the fallible form.
    pub fn view(mut self, path: &str, view: impl View + 'static) -> Self {
        if let Err(err) = self.try_view(path, view) {
            panic!("{}", err);
        }
        self
    }

    /// Fallible form of [`view`](Self::view).
    pub fn try_view(
        &mut self,
        path: &str,
        view: impl View + 'static,
    ) -> Result<(), InvalidPatternError> {
        let methods = view.methods();
        self.register(path, &methods, Endpoint::View(Arc::new(view)))
    }

    /// Mount every route of `child` under `prefix`.
    ///
    /// The child's entries are flattened into this router at mount time,
    /// appended in mount-call order, with `prefix` prepended to each
    /// template (`/` mounted under `/blog` becomes `/blog`; a trailing
    /// slash on the prefix is ignored). Mounting is transitive: whatever
    /// the child had itself mounted comes along already flattened.
    ///
    /// # Panics
    ///
    /// Panics if the prefix is malformed; see
    /// [`try_mount`](Self::try_mount) for the fallible form.
    pub fn mount(mut self, prefix: &str, child: Router) -> Self {
        if let Err(err) = self.try_mount(prefix, child) {
            panic!("{}", err);
        }
        self
    }

    /// Fallible form of [`mount`](Self::mount).
    pub fn try_mount(&mut self, prefix: &str, child: Router) -> Result<(), InvalidPatternError> {
        if !prefix.trim().starts_with('/') {
            return Err(InvalidPatternError::MissingLeadingSlash {
                pattern: prefix.to_owned(),
            });
        }

        let prefix = path::normalize(prefix);
        let prefix_segments: Vec<String> = path::segments(&prefix)
            .into_iter()
            .map(str::to_owned)
            .collect();

        // prefixes are literal-only; variables belong in route templates
        for seg in &prefix_segments {
            if seg.contains('{') || seg.contains('}') || seg.is_empty() {
                return Err(InvalidPatternError::MalformedSegment {
                    pattern: prefix.clone(),
                    segment: seg.clone(),
                });
            }
        }

        debug!(prefix = %prefix, routes = child.entries.len(), "mounting router");

        // mounted entries are appended as-is, never unioned into existing
        // entries: two mounts contributing the same effective path must
        // both stay visible so resolve() can aggregate their method sets
        for entry in child.entries {
            self.entries.push(RouteEntry {
                pattern: entry.pattern.prefixed(&prefix, &prefix_segments),
                methods: entry.methods,
                endpoint: entry.endpoint,
            });
        }

        Ok(())
    }

    fn register(
        &mut self,
        path: &str,
        methods: &[Method],
        endpoint: Endpoint,
    ) -> Result<(), InvalidPatternError> {
        let pattern = PathPattern::parse(path, &self.registry)?;

        // a route's method set is never empty; no restriction means the
        // standard verb set
        let methods: &[Method] = if methods.is_empty() {
            &STANDARD_METHODS
        } else {
            methods
        };

        debug!(template = %pattern.template(), ?methods, "registered route");

        // re-registration of the same template extends the method set
        if let Some(existing) = self
            .entries
            .iter_mut()
            .find(|e| e.pattern.template() == pattern.template())
        {
            existing.methods.extend(methods.iter().cloned());
            return Ok(());
        }

        self.entries.push(RouteEntry {
            pattern,
            methods: methods.iter().cloned().collect(),
            endpoint,
        });

        Ok(())
    }

    /// The number of registered entries, mounted ones included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Resolve a `(method, path)` pair against the registered routes.
    ///
    /// The path is normalized, then the entries are scanned in registration
    /// order. An entry is a candidate when its pattern matches structurally
    /// and every captured segment converts to its declared type; a failed
    /// conversion disqualifies the entry exactly as a shape mismatch would.
    /// The first candidate permitting the method wins outright. Candidates
    /// permitting only other methods are remembered, and if the scan ends
    /// without a winner their combined method sets are reported via
    /// [`Resolution::MethodNotAllowed`]; with no candidates at all the
    /// result is [`Resolution::NotFound`].
    pub fn resolve(&self, method: &Method, raw_path: &str) -> Resolution {
        let path = path::normalize(raw_path);
        let mut allowed: HashSet<Method> = HashSet::new();

        for entry in &self.entries {
            let captured = match entry.pattern.captures(&path) {
                Some(captured) => captured,
                None => continue,
            };

            let params = match entry.pattern.convert(&captured) {
                Ok(params) => params,
                // a type mismatch means this route does not apply here
                Err(_) => continue,
            };

            if entry.methods.contains(method) {
                trace!(%method, %path, template = %entry.pattern.template(), "matched");
                return Resolution::Matched {
                    endpoint: entry.endpoint.clone(),
                    params,
                };
            }

            allowed.extend(entry.methods.iter().cloned());
        }

        if allowed.is_empty() {
            trace!(%method, %path, "no route matched");
            Resolution::NotFound
        } else {
            let mut allowed: Vec<Method> = allowed.into_iter().collect();
            allowed.sort_by(|a, b| a.as_str().cmp(b.as_str()));
            trace!(%method, %path, ?allowed, "method not allowed");
            Resolution::MethodNotAllowed { allowed }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handler::Response;
    use crate::request::Request;

    fn ok(body: &str) -> impl Fn(&Request) -> Response {
        let body = body.to_owned();
        move |_: &Request| ("200 OK".to_owned(), body.clone())
    }

    fn call(resolution: Resolution, req: &Request) -> Response {
        match resolution {
            Resolution::Matched { endpoint, .. } => match endpoint {
                Endpoint::Function(h) => h.call(req),
                Endpoint::View(v) => v.dispatch(req).unwrap(),
            },
            other => panic!("expected a match, got {:?}", other),
        }
    }

    #[test]
    fn first_registered_route_wins() {
        let router = Router::default()
            .get("/users/admin", ok("admin"))
            .get("/users/{name}", ok("variable"));

        let req = Request::new(Method::GET, "/users/admin");
        let (_, body) = call(router.resolve(&Method::GET, "/users/admin"), &req);
        assert_eq!(body, "admin");

        let (_, body) = call(router.resolve(&Method::GET, "/users/gordon"), &req);
        assert_eq!(body, "variable");
    }

    #[test]
    fn registration_order_beats_specificity() {
        // registered the "wrong" way round: the variable route shadows the
        // literal one, by documented convention
        let router = Router::default()
            .get("/users/{name}", ok("variable"))
            .get("/users/admin", ok("literal"));

        let req = Request::new(Method::GET, "/users/admin");
        let (_, body) = call(router.resolve(&Method::GET, "/users/admin"), &req);
        assert_eq!(body, "variable");
    }

    #[test]
    fn conversion_failure_falls_through_to_not_found() {
        let router = Router::default().get("/users/{id:int}", ok("user"));

        assert!(matches!(
            router.resolve(&Method::GET, "/users/abc"),
            Resolution::NotFound
        ));
        assert!(matches!(
            router.resolve(&Method::GET, "/users/42"),
            Resolution::Matched { .. }
        ));
    }

    #[test]
    fn conversion_failure_lets_a_later_route_match() {
        let router = Router::default()
            .get("/ids/{id:int}", ok("int"))
            .get("/ids/{name}", ok("str"));

        let req = Request::new(Method::GET, "/ids/abc");
        let (_, body) = call(router.resolve(&Method::GET, "/ids/abc"), &req);
        assert_eq!(body, "str");

        let (_, body) = call(router.resolve(&Method::GET, "/ids/42"), &req);
        assert_eq!(body, "int");
    }

    #[test]
    fn method_mismatch_collects_allowed_union() {
        let router = Router::default()
            .get("/items", ok("get"))
            .post("/items", ok("post"));

        match router.resolve(&Method::DELETE, "/items") {
            Resolution::MethodNotAllowed { allowed } => {
                assert_eq!(allowed, vec![Method::GET, Method::POST]);
            }
            other => panic!("expected MethodNotAllowed, got {:?}", other),
        }
    }

    #[test]
    fn redecoration_unions_methods_into_one_entry() {
        let router = Router::default()
            .get("/items", ok("first"))
            .post("/items", ok("second"));

        assert_eq!(router.len(), 1);

        // the first handler is kept
        let req = Request::new(Method::POST, "/items");
        let (_, body) = call(router.resolve(&Method::POST, "/items"), &req);
        assert_eq!(body, "first");
    }

    #[test]
    fn redecoration_matches_on_the_normalized_template() {
        let router = Router::default()
            .get("/items", ok("h"))
            .post("/items/", ok("h2"));

        assert_eq!(router.len(), 1);
    }

    #[test]
    fn trailing_slash_equivalence() {
        let router = Router::default().get("/users", ok("users"));

        assert!(matches!(
            router.resolve(&Method::GET, "/users"),
            Resolution::Matched { .. }
        ));
        assert!(matches!(
            router.resolve(&Method::GET, "/users/"),
            Resolution::Matched { .. }
        ));
    }

    #[test]
    fn root_pattern_matches_only_root() {
        let router = Router::default().get("/", ok("root"));

        assert!(matches!(
            router.resolve(&Method::GET, "/"),
            Resolution::Matched { .. }
        ));
        assert!(matches!(
            router.resolve(&Method::GET, "/anything"),
            Resolution::NotFound
        ));
    }

    #[test]
    fn segment_count_mismatch_is_not_found() {
        let router = Router::default().get("/users/{id:int}", ok("user"));

        for path in &["/users", "/users/42/extra", "/"] {
            assert!(
                matches!(router.resolve(&Method::GET, path), Resolution::NotFound),
                "path {:?} should not match",
                path
            );
        }
    }

    #[test]
    fn typed_params_are_bound() {
        let router = Router::default().get("/users/{id:int}", ok("user"));

        match router.resolve(&Method::GET, "/users/42") {
            Resolution::Matched { params, .. } => {
                assert_eq!(params.get("id"), Some(&ParamValue::Int(42)));
            }
            other => panic!("expected a match, got {:?}", other),
        }
    }

    #[test]
    fn mounted_routes_are_prefixed() {
        let blog = Router::default()
            .get("/", ok("blog index"))
            .get("/posts/{id:int}", ok("post"));

        let router = Router::default().get("/", ok("root")).mount("/blog", blog);

        let req = Request::new(Method::GET, "/blog");
        let (_, body) = call(router.resolve(&Method::GET, "/blog"), &req);
        assert_eq!(body, "blog index");

        let (_, body) = call(router.resolve(&Method::GET, "/blog/posts/7"), &req);
        assert_eq!(body, "post");

        let (_, body) = call(router.resolve(&Method::GET, "/"), &req);
        assert_eq!(body, "root");

        // the child's unprefixed paths are not reachable
        assert!(matches!(
            router.resolve(&Method::GET, "/posts/7"),
            Resolution::NotFound
        ));
    }

    #[test]
    fn mount_prefix_trailing_slash_is_ignored() {
        let child = || Router::default().get("/", ok("index"));

        let a = Router::default().mount("/blog", child());
        let b = Router::default().mount("/blog/", child());

        assert!(matches!(
            a.resolve(&Method::GET, "/blog"),
            Resolution::Matched { .. }
        ));
        assert!(matches!(
            b.resolve(&Method::GET, "/blog"),
            Resolution::Matched { .. }
        ));
    }

    #[test]
    fn mounting_is_transitive() {
        let grandchild = Router::default().get("/leaf", ok("leaf"));
        let child = Router::default().mount("/mid", grandchild);
        let router = Router::default().mount("/top", child);

        assert!(matches!(
            router.resolve(&Method::GET, "/top/mid/leaf"),
            Resolution::Matched { .. }
        ));
    }

    #[test]
    fn mounted_entries_aggregate_allowed_methods() {
        let reads = Router::default().get("/things", ok("read"));
        let writes = Router::default().post("/things", ok("write"));

        let router = Router::default().mount("/api", reads).mount("/api", writes);

        match router.resolve(&Method::DELETE, "/api/things") {
            Resolution::MethodNotAllowed { allowed } => {
                assert_eq!(allowed, vec![Method::GET, Method::POST]);
            }
            other => panic!("expected MethodNotAllowed, got {:?}", other),
        }
    }

    #[test]
    fn mount_rejects_bad_prefixes() {
        let mut router = Router::default();
        assert!(router.try_mount("blog", Router::default()).is_err());
        assert!(router.try_mount("/{var}", Router::default()).is_err());
    }

    #[test]
    fn custom_converter_in_mounted_child_survives_the_mount() {
        let child = Router::default()
            .converter("even", |raw| {
                let n: i64 = raw.parse().map_err(|_| ConversionError {
                    tag: "even".to_owned(),
                    value: raw.to_owned(),
                })?;
                if n % 2 == 0 {
                    Ok(ParamValue::Int(n))
                } else {
                    Err(ConversionError {
                        tag: "even".to_owned(),
                        value: raw.to_owned(),
                    })
                }
            })
            .get("/n/{n:even}", ok("even"));

        // the parent has no "even" converter, but the child's patterns
        // carry their converters along
        let router = Router::default().mount("/math", child);

        assert!(matches!(
            router.resolve(&Method::GET, "/math/n/4"),
            Resolution::Matched { .. }
        ));
        assert!(matches!(
            router.resolve(&Method::GET, "/math/n/3"),
            Resolution::NotFound
        ));
    }

    #[test]
    fn unknown_tag_fails_at_registration() {
        let mut router = Router::default();
        let err = router.try_route("/x/{id:uuid}", &[Method::GET], ok("x"));
        assert!(matches!(err, Err(InvalidPatternError::UnknownTag { .. })));
    }

    #[test]
    #[should_panic(expected = "unknown type tag")]
    fn builder_panics_on_unknown_tag() {
        let _ = Router::default().get("/x/{id:uuid}", ok("x"));
    }

    #[test]
    fn routers_are_independent() {
        let a = Router::default().get("/only-in-a", ok("a"));
        let b = Router::default().get("/only-in-b", ok("b"));

        assert!(matches!(
            a.resolve(&Method::GET, "/only-in-b"),
            Resolution::NotFound
        ));
        assert!(matches!(
            b.resolve(&Method::GET, "/only-in-a"),
            Resolution::NotFound
        ));
    }

    #[test]
    fn empty_method_list_means_no_restriction() {
        let router = Router::default().route("/open", &[], ok("open"));

        for method in &STANDARD_METHODS {
            assert!(matches!(
                router.resolve(method, "/open"),
                Resolution::Matched { .. }
            ));
        }
    }

    #[test]
    fn with_routes_registers_for_all_standard_verbs() {
        fn page(_: &Request) -> Response {
            ("200 OK".to_owned(), "page".to_owned())
        }

        let router = Router::with_routes(vec![
            ("/one", Box::new(page) as Box<dyn Handler>),
            ("/two", Box::new(page) as Box<dyn Handler>),
        ]);

        assert_eq!(router.len(), 2);
        for method in &STANDARD_METHODS {
            assert!(matches!(
                router.resolve(method, "/one"),
                Resolution::Matched { .. }
            ));
        }
    }
}

//! Router that resolves a method and path to a target.

use http::Method;

use crate::method_router::MethodRouter;
use crate::node::Node;
use crate::params::Params;

/// Outcome of matching a request against a [`Router`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Match<'a, T> {
    /// Path and method both matched.
    Found {
        /// The registered target.
        target: &'a T,
        /// Captured path parameters.
        params: Params,
    },
    /// The path is known but does not accept the method.
    MethodNotAllowed {
        /// Methods the path does accept.
        allowed: Vec<Method>,
    },
    /// No route matches the path.
    NotFound,
}

/// Path router generic over its target type.
///
/// Patterns use `{name}` for parameter segments. A literal segment takes
/// precedence over a parameter at the same position.
///
/// # Example
///
/// ```rust
/// use galley_router::{Match, MethodRouter, Router};
/// use http::Method;
///
/// let mut router = Router::new();
/// router.insert("/dishes", MethodRouter::new().get("list").post("create"));
/// router.insert("/dishes/{dishId}", MethodRouter::new().get("read").put("update"));
///
/// match router.match_route(&Method::PUT, "/dishes/3") {
///     Match::Found { target, params } => {
///         assert_eq!(*target, "update");
///         assert_eq!(params.get("dishId"), Some("3"));
///     }
///     other => panic!("unexpected {other:?}"),
/// }
///
/// assert!(matches!(
///     router.match_route(&Method::DELETE, "/dishes/3"),
///     Match::MethodNotAllowed { .. }
/// ));
/// assert_eq!(router.match_route(&Method::GET, "/menus"), Match::NotFound);
/// ```
#[derive(Debug, Clone)]
pub struct Router<T> {
    root: Node<T>,
    route_count: usize,
}

impl<T> Default for Router<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Router<T> {
    /// Creates an empty router.
    #[must_use]
    pub fn new() -> Self {
        Self {
            root: Node::default(),
            route_count: 0,
        }
    }

    /// Registers `methods` under `pattern`.
    ///
    /// Inserting the same pattern twice merges the method tables; methods
    /// already present are kept.
    pub fn insert(&mut self, pattern: &str, methods: MethodRouter<T>) {
        self.root.insert(pattern, methods);
        self.route_count += 1;
    }

    /// Matches a method and path.
    #[must_use]
    pub fn match_route(&self, method: &Method, path: &str) -> Match<'_, T> {
        let Some((methods, params)) = self.root.lookup(path) else {
            return Match::NotFound;
        };
        match methods.target(method) {
            Some(target) => Match::Found { target, params },
            None => Match::MethodNotAllowed {
                allowed: methods.allowed_methods(),
            },
        }
    }

    /// Returns the number of `insert` calls made.
    #[must_use]
    pub fn len(&self) -> usize {
        self.route_count
    }

    /// Returns true if nothing has been inserted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.route_count == 0
    }
}

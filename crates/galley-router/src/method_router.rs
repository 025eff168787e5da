//! Per-path method dispatch.

use http::Method;
use smallvec::SmallVec;

/// Maps HTTP methods to targets for a single path.
///
/// # Example
///
/// ```rust
/// use galley_router::MethodRouter;
/// use http::Method;
///
/// let methods = MethodRouter::new().get("list").post("create");
///
/// assert_eq!(methods.target(&Method::GET), Some(&"list"));
/// assert_eq!(methods.target(&Method::DELETE), None);
/// assert_eq!(methods.allowed_methods(), vec![Method::GET, Method::POST]);
/// ```
#[derive(Debug, Clone)]
pub struct MethodRouter<T> {
    entries: SmallVec<[(Method, T); 4]>,
}

impl<T> Default for MethodRouter<T> {
    fn default() -> Self {
        Self {
            entries: SmallVec::new(),
        }
    }
}

impl<T> MethodRouter<T> {
    /// Creates a router with no methods.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a GET target.
    #[must_use]
    pub fn get(self, target: T) -> Self {
        self.on(Method::GET, target)
    }

    /// Registers a POST target.
    #[must_use]
    pub fn post(self, target: T) -> Self {
        self.on(Method::POST, target)
    }

    /// Registers a PUT target.
    #[must_use]
    pub fn put(self, target: T) -> Self {
        self.on(Method::PUT, target)
    }

    /// Registers a DELETE target.
    #[must_use]
    pub fn delete(self, target: T) -> Self {
        self.on(Method::DELETE, target)
    }

    /// Registers a target for any method, replacing an earlier one.
    #[must_use]
    pub fn on(mut self, method: Method, target: T) -> Self {
        self.set(method, target);
        self
    }

    fn set(&mut self, method: Method, target: T) {
        if let Some(slot) = self.entries.iter_mut().find(|(m, _)| *m == method) {
            slot.1 = target;
        } else {
            self.entries.push((method, target));
        }
    }

    /// Returns the target registered for `method`.
    #[must_use]
    pub fn target(&self, method: &Method) -> Option<&T> {
        self.entries
            .iter()
            .find(|(m, _)| m == method)
            .map(|(_, t)| t)
    }

    /// Returns registered methods in registration order.
    #[must_use]
    pub fn allowed_methods(&self) -> Vec<Method> {
        self.entries.iter().map(|(m, _)| m.clone()).collect()
    }

    /// Returns true if no method is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Converts every target, keeping method order.
    pub fn map<U, F>(self, mut f: F) -> MethodRouter<U>
    where
        F: FnMut(T) -> U,
    {
        MethodRouter {
            entries: self
                .entries
                .into_iter()
                .map(|(method, target)| (method, f(target)))
                .collect(),
        }
    }

    /// Adds methods from `other` that are not already registered here.
    pub fn merge(&mut self, other: MethodRouter<T>) {
        for (method, target) in other.entries {
            if self.target(&method).is_none() {
                self.entries.push((method, target));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_targets_by_method() {
        let methods = MethodRouter::new().get(1).put(2).delete(3);
        assert_eq!(methods.target(&Method::GET), Some(&1));
        assert_eq!(methods.target(&Method::PUT), Some(&2));
        assert_eq!(methods.target(&Method::DELETE), Some(&3));
        assert_eq!(methods.target(&Method::POST), None);
    }

    #[test]
    fn test_on_replaces_existing() {
        let methods = MethodRouter::new().get(1).on(Method::GET, 2);
        assert_eq!(methods.target(&Method::GET), Some(&2));
        assert_eq!(methods.allowed_methods().len(), 1);
    }

    #[test]
    fn test_merge_keeps_existing() {
        let mut methods = MethodRouter::new().get("a");
        methods.merge(MethodRouter::new().get("b").post("c"));

        assert_eq!(methods.target(&Method::GET), Some(&"a"));
        assert_eq!(methods.target(&Method::POST), Some(&"c"));
    }

    #[test]
    fn test_map_keeps_order() {
        let methods = MethodRouter::new().post(2).get(1).map(|n| n * 10);
        assert_eq!(methods.target(&Method::GET), Some(&10));
        assert_eq!(methods.allowed_methods(), vec![Method::POST, Method::GET]);
    }

    #[test]
    fn test_empty() {
        let methods: MethodRouter<()> = MethodRouter::new();
        assert!(methods.is_empty());
        assert!(methods.allowed_methods().is_empty());
    }
}

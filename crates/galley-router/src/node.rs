//! Segment tree used for path matching.

use crate::method_router::MethodRouter;
use crate::params::Params;

/// One path segment of a route pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Segment {
    /// Literal text.
    Static(String),
    /// `{name}` placeholder.
    Param(String),
}

impl Segment {
    fn parse(raw: &str) -> Self {
        match raw.strip_prefix('{').and_then(|s| s.strip_suffix('}')) {
            Some(name) => Self::Param(name.to_string()),
            None => Self::Static(raw.to_string()),
        }
    }
}

/// Splits a path into its non-empty segments.
///
/// Empty segments are dropped, so `/dishes/` and `/dishes` are equivalent.
pub(crate) fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty())
}

/// Percent-decodes a captured segment.
///
/// A segment that does not decode to UTF-8 is captured as sent.
fn decode_capture(raw: &str) -> String {
    urlencoding::decode(raw).map_or_else(|_| raw.to_string(), |decoded| decoded.into_owned())
}

#[derive(Debug, Clone)]
pub(crate) struct Node<T> {
    methods: Option<MethodRouter<T>>,
    static_children: Vec<(String, Node<T>)>,
    param_child: Option<(String, Box<Node<T>>)>,
}

impl<T> Default for Node<T> {
    fn default() -> Self {
        Self {
            methods: None,
            static_children: Vec::new(),
            param_child: None,
        }
    }
}

impl<T> Node<T> {
    pub(crate) fn insert(&mut self, pattern: &str, methods: MethodRouter<T>) {
        let mut node = self;
        for raw in segments(pattern) {
            node = match Segment::parse(raw) {
                Segment::Static(text) => node.static_child(text),
                Segment::Param(name) => node.param_child(name),
            };
        }
        match &mut node.methods {
            Some(existing) => existing.merge(methods),
            None => node.methods = Some(methods),
        }
    }

    fn static_child(&mut self, text: String) -> &mut Node<T> {
        let index = match self.static_children.iter().position(|(s, _)| *s == text) {
            Some(index) => index,
            None => {
                self.static_children.push((text, Node::default()));
                self.static_children.len() - 1
            }
        };
        &mut self.static_children[index].1
    }

    fn param_child(&mut self, name: String) -> &mut Node<T> {
        // A later pattern reusing the position keeps the first name.
        let (_, child) = self
            .param_child
            .get_or_insert_with(|| (name, Box::default()));
        child
    }

    /// Finds the method table for `path`, capturing parameters.
    ///
    /// Static segments win over parameters at the same depth.
    pub(crate) fn lookup(&self, path: &str) -> Option<(&MethodRouter<T>, Params)> {
        let parts: Vec<&str> = segments(path).collect();
        let mut params = Params::new();
        let methods = self.walk(&parts, &mut params)?;
        Some((methods, params))
    }

    fn walk<'a>(&'a self, parts: &[&str], params: &mut Params) -> Option<&'a MethodRouter<T>> {
        let Some((head, rest)) = parts.split_first() else {
            return self.methods.as_ref();
        };

        if let Some((_, child)) = self.static_children.iter().find(|(s, _)| s == head) {
            if let Some(found) = child.walk(rest, params) {
                return Some(found);
            }
        }

        if let Some((name, child)) = &self.param_child {
            let mark = params.len();
            params.push(name.clone(), decode_capture(head));
            if let Some(found) = child.walk(rest, params) {
                return Some(found);
            }
            params.truncate(mark);
        }

        None
    }
}

//! Segment radix tree for one method.
//!
//! Each node stands for the path up to and including one segment. Children
//! are split in two groups:
//!
//! - literal children, keyed by their exact (lower-cased) text
//! - at most one dynamic child (`{name}` or `{name:regex}`)
//!
//! # Matching
//!
//! Lookup walks one request segment per level. A literal child always wins
//! over the dynamic child, and the walk never backtracks: with `/foo/bar/baz`
//! and `/foo/{x}/qux` registered, `/foo/bar/qux` does not match, because the
//! `bar` literal is taken and then dead-ends. A dynamic child whose regex
//! rejects the segment ends the lookup as well.

use crate::{
    chain::HandlerChain,
    segment::{self, Segment},
};
use http::{HeaderMap, HeaderName, HeaderValue, Method};
use segmux_core::{Params, RouteError};
use std::{collections::HashMap, fmt};

/// Which requests a tree serves.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MethodFilter {
    /// Requests of any method not otherwise routed.
    Any,
    /// Requests of exactly this method.
    Exact(Method),
}

impl From<Method> for MethodFilter {
    fn from(method: Method) -> Self {
        Self::Exact(method)
    }
}

impl From<&Method> for MethodFilter {
    fn from(method: &Method) -> Self {
        Self::Exact(method.clone())
    }
}

impl fmt::Display for MethodFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Any => f.write_str("*"),
            Self::Exact(method) => f.write_str(method.as_str()),
        }
    }
}

#[derive(Debug, Clone)]
struct Node {
    segment: Segment,
    literals: HashMap<String, Node>,
    dynamic: Option<Box<Node>>,
    guard: HeaderMap,
    chain: Option<HandlerChain>,
}

impl Node {
    fn new(segment: Segment) -> Self {
        Self {
            segment,
            literals: HashMap::new(),
            dynamic: None,
            guard: HeaderMap::new(),
            chain: None,
        }
    }

    fn literal(&self, part: &str) -> Option<&Node> {
        self.literals.get(part).or_else(|| {
            if part.chars().any(char::is_uppercase) {
                self.literals.get(&part.to_lowercase())
            } else {
                None
            }
        })
    }

    fn child_mut(&mut self, segment: Segment) -> &mut Node {
        let key = match &segment {
            Segment::Literal(text) => Some(text.clone()),
            _ => None,
        };
        match key {
            Some(key) => self
                .literals
                .entry(key)
                .or_insert_with(|| Node::new(segment)),
            None => &mut **self
                .dynamic
                .get_or_insert_with(|| Box::new(Node::new(segment))),
        }
    }

    fn count(&self) -> usize {
        usize::from(self.chain.is_some())
            + self.literals.values().map(Node::count).sum::<usize>()
            + self.dynamic.as_ref().map_or(0, |node| node.count())
    }
}

/// A successful lookup.
#[derive(Debug)]
pub struct Match<'a> {
    /// The chain registered at the matched leaf.
    pub chain: &'a HandlerChain,
    /// Values captured by dynamic segments, in path order.
    pub params: Params,
}

/// Radix tree of route patterns for one [`MethodFilter`].
#[derive(Debug, Clone)]
pub struct RouteTree {
    method: MethodFilter,
    root: Node,
}

impl RouteTree {
    /// Create an empty tree.
    pub fn new(method: impl Into<MethodFilter>) -> Self {
        Self {
            method: method.into(),
            root: Node::new(Segment::Literal(String::new())),
        }
    }

    /// The method filter this tree serves.
    pub fn method(&self) -> &MethodFilter {
        &self.method
    }

    /// Number of patterns with a chain attached.
    pub fn len(&self) -> usize {
        self.root.count()
    }

    /// True when no pattern has a chain attached.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Attach `chain` to `pattern`, replacing any chain already there.
    ///
    /// On error the tree is left exactly as it was.
    pub fn insert(&mut self, pattern: &str, chain: HandlerChain) -> Result<(), RouteError> {
        let node = self.node_mut(pattern)?;
        node.chain = Some(chain);
        Ok(())
    }

    /// Require header `name` to equal `value` for requests matching `pattern`
    /// or any pattern below it.
    ///
    /// A guard on a deeper node overrides an ancestor's guard for the same header.
    pub fn guard(
        &mut self,
        pattern: &str,
        name: HeaderName,
        value: HeaderValue,
    ) -> Result<(), RouteError> {
        let node = self.node_mut(pattern)?;
        node.guard.insert(name, value);
        Ok(())
    }

    /// Find the chain for `path`, binding dynamic segments on the way.
    ///
    /// Returns `None` when no pattern matches, when the matched node has no
    /// chain, or when a header guard on the path is not satisfied.
    pub fn lookup(&self, path: &str, headers: &HeaderMap) -> Option<Match<'_>> {
        let mut node = &self.root;
        let mut params = Params::new();
        let mut guard = Vec::new();
        merge_guard(&mut guard, node);

        for part in segment::split_path(path) {
            node = match node.literal(part) {
                Some(child) => child,
                None => {
                    let child = node.dynamic.as_deref()?;
                    if part.is_empty() {
                        return None;
                    }
                    if let Some(regex) = child.segment.regex() {
                        if !regex.is_match(part) {
                            return None;
                        }
                    }
                    if let Some(name) = child.segment.param_name() {
                        params.insert(name, part);
                    }
                    child
                }
            };
            merge_guard(&mut guard, node);
        }

        let chain = node.chain.as_ref()?;
        let satisfied = guard
            .iter()
            .all(|(name, value)| headers.get(*name) == Some(*value));
        satisfied.then_some(Match { chain, params })
    }

    /// Walk to the node for `pattern`, creating missing nodes.
    ///
    /// The pattern is fully validated against the tree before anything is
    /// created.
    fn node_mut(&mut self, pattern: &str) -> Result<&mut Node, RouteError> {
        let segments = segment::parse(pattern)?;
        self.check(pattern, &segments)?;

        let mut node = &mut self.root;
        for segment in segments {
            node = node.child_mut(segment);
        }
        Ok(node)
    }

    fn check(&self, pattern: &str, segments: &[Segment]) -> Result<(), RouteError> {
        let mut node = &self.root;
        for segment in segments {
            let next = match segment {
                Segment::Literal(text) => node.literals.get(text),
                dynamic => match node.dynamic.as_deref() {
                    Some(existing) if existing.segment.same_capture(dynamic) => Some(existing),
                    Some(existing) => {
                        return Err(RouteError::AmbiguousParam {
                            existing: existing.segment.to_string(),
                            new: dynamic.to_string(),
                            pattern: pattern.to_string(),
                        });
                    }
                    None => None,
                },
            };
            match next {
                Some(child) => node = child,
                // Everything below is new and cannot conflict.
                None => return Ok(()),
            }
        }
        Ok(())
    }
}

fn merge_guard<'a>(acc: &mut Vec<(&'a HeaderName, &'a HeaderValue)>, node: &'a Node) {
    for (name, value) in &node.guard {
        match acc.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = value,
            None => acc.push((name, value)),
        }
    }
}

impl fmt::Display for RouteTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.method)?;
        fmt_node(f, &self.root, 0)
    }
}

fn fmt_node(f: &mut fmt::Formatter<'_>, node: &Node, depth: usize) -> fmt::Result {
    write!(f, "{:indent$}/{}", "", node.segment, indent = depth * 2)?;
    if let Some(chain) = &node.chain {
        write!(f, " [{} handlers]", chain.len())?;
    }
    for (name, value) in &node.guard {
        write!(f, " ({}: {})", name, value.to_str().unwrap_or("<binary>"))?;
    }
    writeln!(f)?;

    let mut literals: Vec<_> = node.literals.iter().collect();
    literals.sort_by(|a, b| a.0.cmp(b.0));
    for (_, child) in literals {
        fmt_node(f, child, depth + 1)?;
    }
    if let Some(child) = &node.dynamic {
        fmt_node(f, child, depth + 1)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::CountingHandler;

    fn chain(len: usize) -> HandlerChain {
        (0..len)
            .map(|_| segmux_core::boxed(CountingHandler::new()))
            .collect()
    }

    fn tree(patterns: &[&str]) -> RouteTree {
        let mut tree = RouteTree::new(Method::GET);
        for (i, pattern) in patterns.iter().enumerate() {
            tree.insert(pattern, chain(i + 1)).unwrap();
        }
        tree
    }

    fn matched_len(tree: &RouteTree, path: &str) -> Option<usize> {
        tree.lookup(path, &HeaderMap::new()).map(|m| m.chain.len())
    }

    #[test]
    fn test_literal_routes() {
        let tree = tree(&["/", "/foo", "/foo/bar"]);
        assert_eq!(matched_len(&tree, "/"), Some(1));
        assert_eq!(matched_len(&tree, "/foo"), Some(2));
        assert_eq!(matched_len(&tree, "/foo/bar"), Some(3));
        assert_eq!(matched_len(&tree, "/foo/baz"), None);
        assert_eq!(matched_len(&tree, "/foo/bar/baz"), None);
        assert_eq!(tree.len(), 3);
    }

    #[test]
    fn test_intermediate_node_without_chain() {
        let tree = tree(&["/a/b/c"]);
        assert_eq!(matched_len(&tree, "/a/b"), None);
        assert_eq!(matched_len(&tree, "/a/b/c"), Some(1));
    }

    #[test]
    fn test_params_are_bound() {
        let tree = tree(&["/foo/:bar/:baz"]);
        let m = tree.lookup("/foo/123/456", &HeaderMap::new()).unwrap();
        assert_eq!(m.params.get("bar"), Some("123"));
        assert_eq!(m.params.get("baz"), Some("456"));
        assert!(tree.lookup("/foo/123", &HeaderMap::new()).is_none());
    }

    #[test]
    fn test_param_keeps_request_case() {
        let tree = tree(&["/users/:name"]);
        let m = tree.lookup("/users/Alice", &HeaderMap::new()).unwrap();
        assert_eq!(m.params.get("name"), Some("Alice"));
    }

    #[test]
    fn test_param_rejects_empty_segment() {
        let tree = tree(&["/users/:name"]);
        assert_eq!(matched_len(&tree, "/users/"), None);
    }

    #[test]
    fn test_literal_matching_is_case_insensitive() {
        let tree = tree(&["/Foo/Bar"]);
        assert_eq!(matched_len(&tree, "/foo/bar"), Some(1));
        assert_eq!(matched_len(&tree, "/FOO/bar"), Some(1));
    }

    #[test]
    fn test_regex_constraint() {
        let tree = tree(&["/users/{id:[0-9]+}"]);
        let m = tree.lookup("/users/42", &HeaderMap::new()).unwrap();
        assert_eq!(m.params.get("id"), Some("42"));
        assert_eq!(matched_len(&tree, "/users/abc"), None);
        assert_eq!(matched_len(&tree, "/users/42abc"), None);
    }

    #[test]
    fn test_literal_wins_over_dynamic() {
        let tree = tree(&["/foo/bar", "/foo/:x"]);
        let m = tree.lookup("/foo/bar", &HeaderMap::new()).unwrap();
        assert_eq!(m.chain.len(), 1);
        assert!(m.params.is_empty());

        let m = tree.lookup("/foo/other", &HeaderMap::new()).unwrap();
        assert_eq!(m.chain.len(), 2);
        assert_eq!(m.params.get("x"), Some("other"));
    }

    #[test]
    fn test_no_backtracking_after_literal() {
        let tree = tree(&["/foo/bar/baz", "/foo/:x/qux"]);
        assert_eq!(matched_len(&tree, "/foo/bar/qux"), None);
        assert_eq!(matched_len(&tree, "/foo/zip/qux"), Some(2));
    }

    #[test]
    fn test_reinsert_replaces_chain() {
        let mut tree = tree(&["/foo"]);
        tree.insert("/foo", chain(5)).unwrap();
        assert_eq!(matched_len(&tree, "/foo"), Some(5));
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn test_shared_dynamic_node() {
        let tree = tree(&["/users/:id", "/users/:id/posts"]);
        assert_eq!(matched_len(&tree, "/users/1"), Some(1));
        assert_eq!(matched_len(&tree, "/users/1/posts"), Some(2));
    }

    #[test]
    fn test_ambiguous_dynamic_siblings_rejected() {
        let mut tree = tree(&["/users/:id"]);
        let err = tree.insert("/users/:name/posts", chain(1)).unwrap_err();
        assert!(matches!(err, RouteError::AmbiguousParam { .. }));

        let err = tree.insert("/users/{id:[0-9]+}", chain(1)).unwrap_err();
        assert!(matches!(err, RouteError::AmbiguousParam { .. }));
    }

    #[test]
    fn test_rejected_pattern_leaves_tree_untouched() {
        let mut tree = tree(&["/a/:x"]);
        let before = tree.to_string();

        assert!(tree.insert("/a/:y/b/c", chain(1)).is_err());
        assert!(tree.insert("/new/{bad:[}", chain(1)).is_err());

        assert_eq!(tree.to_string(), before);
        assert_eq!(matched_len(&tree, "/new/x"), None);
    }

    #[test]
    fn test_header_guard() {
        let mut tree = tree(&["/api/items"]);
        tree.guard(
            "/api/items",
            HeaderName::from_static("x-app"),
            HeaderValue::from_static("demo"),
        )
        .unwrap();

        assert_eq!(matched_len(&tree, "/api/items"), None);

        let mut headers = HeaderMap::new();
        headers.insert("x-app", HeaderValue::from_static("demo"));
        assert!(tree.lookup("/api/items", &headers).is_some());

        headers.insert("x-app", HeaderValue::from_static("other"));
        assert!(tree.lookup("/api/items", &headers).is_none());
    }

    #[test]
    fn test_deeper_guard_overrides_ancestor() {
        let mut tree = tree(&["/api/items"]);
        let name = HeaderName::from_static("x-version");
        tree.guard("/api", name.clone(), HeaderValue::from_static("1"))
            .unwrap();
        tree.guard("/api/items", name, HeaderValue::from_static("2"))
            .unwrap();

        let mut headers = HeaderMap::new();
        headers.insert("x-version", HeaderValue::from_static("2"));
        assert!(tree.lookup("/api/items", &headers).is_some());

        headers.insert("x-version", HeaderValue::from_static("1"));
        assert!(tree.lookup("/api/items", &headers).is_none());
    }

    #[test]
    fn test_display() {
        let tree = tree(&["/foo/:bar", "/foo/baz"]);
        assert_eq!(
            tree.to_string(),
            "GET\n/\n  /foo\n    /baz [2 handlers]\n    /{bar} [1 handlers]\n"
        );
    }
}

//! # Parameter Context
//!
//! Per-request values produced by routing and read by handlers.
//!
//! - [`Params`] - Dynamic path segments bound during route lookup
//! - [`params`] / [`local`] / [`set_local`] - Free accessors over a [`Request`]
//!
//! Params are filled in exactly once, by the dispatcher, before the first
//! handler of a chain runs. Handlers only get shared access to them. Locals are
//! the opposite: a typed scratch space that earlier handlers in a chain write
//! and later handlers read.

use crate::request::Request;
use std::collections::HashMap;

/// Parameters bound from the dynamic segments of a matched route.
///
/// Ordered by depth in the path: for `/users/:id/posts/:post`, `id` comes first.
///
/// # Example
///
/// ```rust,ignore
/// // Route: GET /users/:id
/// // Request: GET /users/42
/// assert_eq!(params(&req).get("id"), Some("42"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params {
    entries: Vec<(String, String)>,
}

impl Params {
    /// Create an empty parameter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `name` to `value`, replacing any earlier binding of `name`.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    /// Value bound to `name`, if any.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Whether `name` was bound.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Number of bound parameters.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when the matched route had no dynamic segments.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over `(name, value)` pairs in path order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    /// Copy the bindings into a map.
    pub fn to_map(&self) -> HashMap<String, String> {
        self.entries.iter().cloned().collect()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Params {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut params = Params::new();
        for (name, value) in iter {
            params.insert(name, value);
        }
        params
    }
}

impl<'a> IntoIterator for &'a Params {
    type Item = (&'a str, &'a str);
    type IntoIter = Box<dyn Iterator<Item = (&'a str, &'a str)> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}

/// Parameters bound for the in-flight request.
///
/// Empty when the matched route has no dynamic segments.
pub fn params(req: &Request) -> &Params {
    req.params()
}

/// Store a typed value on the request for later handlers in the same chain.
///
/// A second call with the same type replaces the first value.
pub fn set_local<T: Clone + Send + Sync + 'static>(req: &mut Request, value: T) {
    req.extensions_mut().insert(value);
}

/// Read a value stored with [`set_local`].
pub fn local<T: Send + Sync + 'static>(req: &Request) -> Option<&T> {
    req.extensions().get::<T>()
}

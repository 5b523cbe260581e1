//! Prefix-scoped staging of routes.
//!
//! A [`Subrouter`] collects `(path, method) -> handlers` bindings without
//! building any tree. It is merged into a [`Router`](crate::Router) (or into
//! another subrouter) with `use_subrouter`, at which point the receiver's
//! prefix is prepended to every staged path.
//!
//! ```rust,ignore
//! let mut users = Subrouter::new().with_prefix("/users");
//! users.handle(Method::GET, "/:id", show_user)?;
//!
//! let mut api = Subrouter::new().with_prefix("/api");
//! api.use_subrouter(&users)?;
//!
//! router.use_subrouter(&api)?; // GET /api/users/:id
//! ```

use crate::{
    router::{join_path, normalize_prefix},
    segment,
    tree::MethodFilter,
};
use segmux_core::{BoxHandler, Handler, IntoServeResult, Request, Response, RouteError, boxed};
use std::{
    collections::{BTreeMap, HashMap},
    fmt,
};

/// Staged routes under a common prefix.
#[derive(Clone, Default)]
pub struct Subrouter {
    prefix: String,
    routes: BTreeMap<String, HashMap<MethodFilter, Vec<BoxHandler>>>,
}

impl Subrouter {
    /// Create an empty subrouter with no prefix.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the prefix applied to every later staging call.
    ///
    /// `/` clears the prefix; one trailing `/` is dropped.
    pub fn with_prefix(mut self, prefix: impl AsRef<str>) -> Self {
        self.prefix = normalize_prefix(prefix.as_ref());
        self
    }

    /// The current prefix.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Stage a single handler.
    pub fn handle(
        &mut self,
        method: impl Into<MethodFilter>,
        path: &str,
        handler: impl Handler,
    ) -> Result<(), RouteError> {
        self.handle_chain(method, path, [boxed(handler)])
    }

    /// Stage a closure.
    pub fn handle_func<F, Out>(
        &mut self,
        method: impl Into<MethodFilter>,
        path: &str,
        f: F,
    ) -> Result<(), RouteError>
    where
        F: Fn(&mut Request, &mut Response) -> Out + Send + Sync + 'static,
        Out: IntoServeResult + 'static,
    {
        self.handle_chain(method, path, [boxed(f)])
    }

    /// Stage a chain of handlers under `prefix + path`.
    ///
    /// The pattern is checked for syntax errors now; conflicts with other
    /// routes surface when the subrouter is merged. Staging the same method
    /// and path again replaces the earlier chain. An empty chain stages
    /// nothing.
    pub fn handle_chain(
        &mut self,
        method: impl Into<MethodFilter>,
        path: &str,
        handlers: impl IntoIterator<Item = BoxHandler>,
    ) -> Result<(), RouteError> {
        let full = join_path(&self.prefix, path)?;
        let handlers: Vec<BoxHandler> = handlers.into_iter().collect();
        if handlers.is_empty() {
            return Ok(());
        }

        segment::parse(&full)?;
        self.stage(full, method.into(), handlers);
        Ok(())
    }

    /// Copy every binding of `other` into this subrouter under this prefix.
    ///
    /// `other` is left untouched and can be merged elsewhere too.
    pub fn use_subrouter(&mut self, other: &Subrouter) -> Result<(), RouteError> {
        let mut staged = Vec::with_capacity(other.len());
        for (path, method, handlers) in other.bindings() {
            let full = join_path(&self.prefix, path)?;
            segment::parse(&full)?;
            staged.push((full, method.clone(), handlers.to_vec()));
        }
        for (full, method, handlers) in staged {
            self.stage(full, method, handlers);
        }
        Ok(())
    }

    /// Every staged binding as `(path, method, handlers)`, ordered by path.
    pub fn bindings(&self) -> impl Iterator<Item = (&str, &MethodFilter, &[BoxHandler])> {
        self.routes.iter().flat_map(|(path, methods)| {
            methods
                .iter()
                .map(move |(method, handlers)| (path.as_str(), method, handlers.as_slice()))
        })
    }

    /// Number of staged bindings.
    pub fn len(&self) -> usize {
        self.routes.values().map(HashMap::len).sum()
    }

    /// True when nothing is staged.
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    fn stage(&mut self, path: String, method: MethodFilter, handlers: Vec<BoxHandler>) {
        self.routes.entry(path).or_default().insert(method, handlers);
    }
}

impl fmt::Debug for Subrouter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subrouter")
            .field("prefix", &self.prefix)
            .field("routes", &self.len())
            .finish()
    }
}

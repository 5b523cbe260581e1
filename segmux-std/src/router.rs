//! The router: one [`RouteTree`] per method filter, plus registration state.
//!
//! # Example
//!
//! ```rust,ignore
//! let mut router = Router::new().with_prefix("/api");
//! router.handle_func(Method::GET, "/users/:id", |req: &mut Request, res: &mut Response| {
//!     res.write(format!("user {}", req.params().get("id").unwrap_or_default()));
//! })?;
//!
//! let mut res = Response::new();
//! let outcome = router.dispatch(request, &mut res).await;
//! ```

use crate::{
    chain::HandlerChain,
    subrouter::Subrouter,
    tree::{Match, MethodFilter, RouteTree},
};
use http::{HeaderMap, HeaderName, HeaderValue, Method};
use segmux_core::{
    BoxHandler, FaultHandler, Handler, IntoServeResult, Outcome, PanicOnFault, Request, Response,
    RouteError, SharedFaultHandler, boxed,
};
use std::{collections::HashMap, fmt, io, sync::Arc};

/// Join a prefix and a path.
///
/// The leading `/` of `path` is optional. A path of `/` contributes nothing,
/// so `/api` + `/` is `/api`. An empty result addresses the root. An empty
/// `path` is rejected.
pub(crate) fn join_path(prefix: &str, path: &str) -> Result<String, RouteError> {
    let full = match path {
        "" => return Err(RouteError::EmptyPattern),
        "/" => prefix.to_string(),
        p if p.starts_with('/') => format!("{prefix}{p}"),
        p => format!("{prefix}/{p}"),
    };
    Ok(if full.is_empty() { "/".to_string() } else { full })
}

/// Normalize a user-supplied prefix.
///
/// `/` means no prefix. A missing leading `/` is added and one trailing `/`
/// is dropped, so `api/` becomes `/api`.
pub(crate) fn normalize_prefix(prefix: &str) -> String {
    let trimmed = prefix.strip_suffix('/').unwrap_or(prefix);
    if trimmed.is_empty() || trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{trimmed}")
    }
}

/// Routes requests to handler chains.
///
/// Registration takes `&mut self`; dispatch takes `&self`, so a built router
/// can be shared (for example behind an `Arc`) across concurrent requests.
pub struct Router {
    prefix: String,
    trees: HashMap<MethodFilter, RouteTree>,
    common: Vec<BoxHandler>,
    fault: SharedFaultHandler,
}

impl Router {
    /// Create an empty router with no prefix and the panicking fault handler.
    pub fn new() -> Self {
        Self {
            prefix: String::new(),
            trees: HashMap::new(),
            common: Vec::new(),
            fault: Arc::new(PanicOnFault),
        }
    }

    /// Set the prefix applied to every later registration.
    ///
    /// `/` clears the prefix; one trailing `/` is dropped.
    pub fn with_prefix(mut self, prefix: impl AsRef<str>) -> Self {
        self.prefix = normalize_prefix(prefix.as_ref());
        self
    }

    /// Replace the handler that receives dispatch faults.
    pub fn with_fault_handler(mut self, fault: impl FaultHandler) -> Self {
        self.fault = Arc::new(fault);
        self
    }

    /// The current prefix.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Replace the handlers prepended to every later registration.
    ///
    /// Routes registered before this call keep the list they were built with.
    pub fn set_common(&mut self, handlers: impl IntoIterator<Item = BoxHandler>) {
        self.common = handlers.into_iter().collect();
    }

    /// Register a single handler.
    pub fn handle(
        &mut self,
        method: impl Into<MethodFilter>,
        path: &str,
        handler: impl Handler,
    ) -> Result<(), RouteError> {
        self.handle_chain(method, path, [boxed(handler)])
    }

    /// Register a closure.
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

    /// Register a chain of handlers, run in order after the common handlers.
    ///
    /// An empty chain registers nothing. Registering the same method and path
    /// again replaces the earlier chain. An empty `path` is rejected with
    /// [`RouteError::EmptyPattern`].
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

        let method = method.into();
        let chain = HandlerChain::with_common(&self.common, &handlers);
        #[cfg(feature = "tracing")]
        let len = chain.len();

        self.trees
            .entry(method.clone())
            .or_insert_with(|| RouteTree::new(method.clone()))
            .insert(&full, chain)?;

        #[cfg(feature = "tracing")]
        tracing::debug!(method = %method, path = %full, handlers = len, "route registered");
        Ok(())
    }

    /// Require header `name` to equal `value` on requests matching `path`
    /// (under the current prefix) or any route below it.
    pub fn guard(
        &mut self,
        method: impl Into<MethodFilter>,
        path: &str,
        name: HeaderName,
        value: HeaderValue,
    ) -> Result<(), RouteError> {
        let method = method.into();
        let full = join_path(&self.prefix, path)?;
        self.trees
            .entry(method.clone())
            .or_insert_with(|| RouteTree::new(method))
            .guard(&full, name, value)
    }

    /// Merge the routes staged in `sub`.
    ///
    /// Each staged path gets this router's prefix and each chain gets the
    /// current common handlers. Either every staged route is registered or,
    /// on error, none is.
    pub fn use_subrouter(&mut self, sub: &Subrouter) -> Result<(), RouteError> {
        let mut trees = self.trees.clone();

        for (path, method, handlers) in sub.bindings() {
            let full = join_path(&self.prefix, path)?;
            let chain = HandlerChain::with_common(&self.common, handlers);
            trees
                .entry(method.clone())
                .or_insert_with(|| RouteTree::new(method.clone()))
                .insert(&full, chain)?;
        }

        self.trees = trees;
        #[cfg(feature = "tracing")]
        tracing::debug!(prefix = %self.prefix, routes = sub.len(), "subrouter merged");
        Ok(())
    }

    /// Find the chain for a request without running it.
    ///
    /// The tree for `method` is consulted first, then the any-method tree.
    pub fn lookup(&self, method: &Method, path: &str, headers: &HeaderMap) -> Option<Match<'_>> {
        self.trees
            .get(&MethodFilter::Exact(method.clone()))
            .and_then(|tree| tree.lookup(path, headers))
            .or_else(|| self.trees.get(&MethodFilter::Any)?.lookup(path, headers))
    }

    /// The tree for a method filter, if any route was registered for it.
    pub fn tree(&self, method: &MethodFilter) -> Option<&RouteTree> {
        self.trees.get(method)
    }

    /// Dispatch one request.
    ///
    /// Without a matching route the canonical 404 is written to `res`.
    /// Otherwise the bound params are attached to the request and the chain
    /// runs. A failing handler is reported to the fault handler.
    pub async fn dispatch(&self, req: Request, res: &mut Response) -> Outcome {
        let Some(found) = self.lookup(req.method(), req.path(), req.headers()) else {
            #[cfg(feature = "tracing")]
            tracing::debug!(method = %req.method(), path = req.path(), "no route matched");
            res.not_found();
            return Outcome::NotFound;
        };

        let mut req = req.with_params(found.params);
        match found.chain.execute(&mut req, res).await {
            Ok(outcome) => outcome,
            Err(error) => {
                #[cfg(feature = "tracing")]
                tracing::error!(%error, "handler failed");
                self.fault.on_fault(&error);
                Outcome::Failed
            }
        }
    }

    /// Write every route tree to `out`, one after another, ordered by method.
    pub fn dump(&self, out: &mut impl io::Write) -> io::Result<()> {
        let mut trees: Vec<_> = self.trees.values().collect();
        trees.sort_by_key(|tree| tree.method().to_string());
        for tree in trees {
            write!(out, "{tree}")?;
        }
        Ok(())
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Router {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Router")
            .field("prefix", &self.prefix)
            .field("methods", &self.trees.keys().collect::<Vec<_>>())
            .field("common", &self.common.len())
            .finish_non_exhaustive()
    }
}

//! Handler chains and their execution.
//!
//! A chain is the ordered list of handlers bound to one (method, path) leaf:
//! the router's common handlers first, then the route's own handlers in
//! registration order.

use segmux_core::{BoxHandler, DispatchError, Outcome, Request, Response};
use std::{fmt, sync::Arc};

/// An ordered, shareable list of handlers.
///
/// Cloning is cheap: the handlers are behind an `Arc`.
#[derive(Clone)]
pub struct HandlerChain {
    handlers: Arc<[BoxHandler]>,
}

impl HandlerChain {
    /// Create a chain from handlers in execution order.
    pub fn new(handlers: impl IntoIterator<Item = BoxHandler>) -> Self {
        Self {
            handlers: handlers.into_iter().collect(),
        }
    }

    /// Create a chain that runs `common` before `handlers`.
    pub fn with_common(common: &[BoxHandler], handlers: &[BoxHandler]) -> Self {
        Self::new(common.iter().chain(handlers).cloned())
    }

    /// Number of handlers.
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// True when the chain has no handlers.
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// The handlers in execution order.
    pub fn handlers(&self) -> &[BoxHandler] {
        &self.handlers
    }

    /// Run the chain against one request.
    ///
    /// After each handler returns, the request's cancel flag is checked; once
    /// set, no later handler runs. A handler error stops the chain as well
    /// and is returned to the caller.
    pub async fn execute(
        &self,
        req: &mut Request,
        res: &mut Response,
    ) -> Result<Outcome, DispatchError> {
        for (index, handler) in self.handlers.iter().enumerate() {
            handler
                .serve_dyn(req, res)
                .await
                .map_err(|source| DispatchError::Handler {
                    index,
                    method: req.method().clone(),
                    path: req.path().to_string(),
                    source,
                })?;

            if req.is_cancelled() {
                #[cfg(feature = "tracing")]
                tracing::trace!(
                    method = %req.method(),
                    path = req.path(),
                    at = index,
                    "chain cancelled"
                );
                return Ok(Outcome::Cancelled { at: index });
            }
        }
        Ok(Outcome::Completed)
    }
}

impl fmt::Debug for HandlerChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerChain")
            .field("len", &self.handlers.len())
            .finish()
    }
}

impl FromIterator<BoxHandler> for HandlerChain {
    fn from_iter<T: IntoIterator<Item = BoxHandler>>(iter: T) -> Self {
        Self::new(iter)
    }
}

/// Build a `Vec<BoxHandler>` from handlers of different types.
///
/// # Example
/// ```ignore
/// router.handle_chain(Method::GET, "/admin", handlers![LoggingHandler, auth, admin_page])?;
/// ```
#[macro_export]
macro_rules! handlers {
    () => { ::std::vec::Vec::<$crate::__private::BoxHandler>::new() };
    ($($handler:expr),+ $(,)?) => {
        ::std::vec![$($crate::__private::boxed($handler)),+]
    };
}

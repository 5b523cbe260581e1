//! # Handler Layer
//!
//! A handler is one step of a route's chain. It observes the [`Request`],
//! writes into the [`Response`] and may [`cancel`](Request::cancel) the rest
//! of the chain.
//!
//! # Usage Patterns
//!
//! 1. **Closure**: `|req: &mut Request, res: &mut Response| res.write("hi")`
//! 2. **Struct implementation**: `impl Handler for MyHandler`
//! 3. **Type-erased**: [`BoxHandler`] for storage in chains
//!
//! Closures may return `()` or a `Result`; see [`IntoServeResult`].

use crate::{error::BoxError, request::Request, response::Response};
use futures::future::BoxFuture;
use std::{future::Future, sync::Arc};

/// One step of a handler chain.
///
/// # Static vs Dynamic Dispatch
///
/// This trait uses native `async fn` for static dispatch.
/// Chains store handlers as [`BoxHandler`] through [`DynHandler`].
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a segmux `Handler`",
    label = "missing `Handler` implementation",
    note = "Implement `Handler`, or pass a closure `Fn(&mut Request, &mut Response)`."
)]
pub trait Handler: Send + Sync + 'static {
    /// Serve the request, writing into `res`.
    ///
    /// Returning an error stops the chain and reports the error to the
    /// router's fault handler.
    fn serve(
        &self,
        req: &mut Request,
        res: &mut Response,
    ) -> impl Future<Output = Result<(), BoxError>> + Send;
}

/// Dynamic object-safe version of [`Handler`].
pub trait DynHandler: Send + Sync + 'static {
    /// Serve the request (dynamic dispatch version).
    fn serve_dyn<'a>(
        &'a self,
        req: &'a mut Request,
        res: &'a mut Response,
    ) -> BoxFuture<'a, Result<(), BoxError>>;
}

// Any Handler is a DynHandler.
impl<T: Handler> DynHandler for T {
    fn serve_dyn<'a>(
        &'a self,
        req: &'a mut Request,
        res: &'a mut Response,
    ) -> BoxFuture<'a, Result<(), BoxError>> {
        Box::pin(self.serve(req, res))
    }
}

/// A shared, type-erased handler.
pub type BoxHandler = Arc<dyn DynHandler>;

/// Erase a handler's type for storage in a chain.
pub fn boxed<H: Handler>(handler: H) -> BoxHandler {
    Arc::new(handler)
}

/// Conversion from a closure's return value into a handler result.
///
/// # Default Implementations
///
/// - `()` → `Ok(())`
/// - `Result<T, E>` → delegates to `T` or boxes the error
pub trait IntoServeResult {
    /// Convert into the handler result.
    fn into_serve_result(self) -> Result<(), BoxError>;
}

impl IntoServeResult for () {
    fn into_serve_result(self) -> Result<(), BoxError> {
        Ok(())
    }
}

impl<T, E> IntoServeResult for Result<T, E>
where
    T: IntoServeResult,
    E: std::error::Error + Send + Sync + 'static,
{
    fn into_serve_result(self) -> Result<(), BoxError> {
        match self {
            Ok(t) => t.into_serve_result(),
            Err(e) => Err(Box::new(e)),
        }
    }
}

// Blanket impl for synchronous closures
impl<F, Out> Handler for F
where
    F: Fn(&mut Request, &mut Response) -> Out + Send + Sync + 'static,
    Out: IntoServeResult,
{
    async fn serve(&self, req: &mut Request, res: &mut Response) -> Result<(), BoxError> {
        (self)(req, res).into_serve_result()
    }
}

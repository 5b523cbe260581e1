//! Tower integration for segmux.
//!
//! [`MuxService`] exposes a built [`Router`] as a `tower::Service` over
//! `http::Request`, so any tower-based server (hyper, axum, tonic) can drive
//! it and wrap it in tower middleware.
//!
//! # Example
//!
//! ```rust,ignore
//! use segmux::tower::MuxService;
//!
//! let service = MuxService::new(router);
//! let with_timeout = tower::timeout::Timeout::new(service, Duration::from_secs(5));
//! ```
//!
//! Request bodies are dropped: handlers only see the request head.

use crate::router::Router;
use segmux_core::{Request, Response};
use std::{
    convert::Infallible,
    future::Future,
    pin::Pin,
    sync::Arc,
    task::{Context, Poll},
};

/// Wraps a [`Router`] as a tower `Service`.
///
/// Cloning is cheap; clones share the router.
#[derive(Debug, Clone)]
pub struct MuxService {
    router: Arc<Router>,
}

impl MuxService {
    /// Create a service from a fully built router.
    pub fn new(router: Router) -> Self {
        Self {
            router: Arc::new(router),
        }
    }

    /// Get a reference to the inner router.
    pub fn router(&self) -> &Router {
        &self.router
    }
}

impl From<Arc<Router>> for MuxService {
    fn from(router: Arc<Router>) -> Self {
        Self { router }
    }
}

impl<B> ::tower::Service<http::Request<B>> for MuxService {
    type Response = http::Response<Vec<u8>>;
    type Error = Infallible;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        // Routers are always ready
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, request: http::Request<B>) -> Self::Future {
        let router = Arc::clone(&self.router);
        let request = Request::from(request);
        Box::pin(async move {
            let mut response = Response::new();
            router.dispatch(request, &mut response).await;
            Ok(response.into_http())
        })
    }
}

//! The in-flight request handed to every handler of a chain.

use crate::context::Params;
use http::{Extensions, HeaderMap, Method, Uri, request::Parts};

/// An HTTP request as seen by the dispatcher and its handlers.
///
/// Holds the request head (method, URI, headers, extensions), the
/// [`Params`] bound during route lookup and the cancellation flag for the
/// running chain. The body is not kept: the dispatcher never reads it.
///
/// A `Request` is owned by exactly one dispatch. Handlers receive it by
/// `&mut`, which lets them [`cancel`](Request::cancel) the chain, set locals
/// or adjust headers for later handlers, but not rebind the params.
#[derive(Debug)]
pub struct Request {
    head: Parts,
    params: Params,
    cancelled: bool,
}

impl Request {
    /// Build a request from an `http` request head.
    pub fn from_parts(head: Parts) -> Self {
        Self {
            head,
            params: Params::new(),
            cancelled: false,
        }
    }

    /// Build a request for `method` and `uri`.
    pub fn try_new(method: Method, uri: &str) -> Result<Self, http::Error> {
        let request = http::Request::builder().method(method).uri(uri).body(())?;
        Ok(request.into())
    }

    /// Attach the parameters bound by route lookup.
    ///
    /// Consumes the request so that only its owner (the dispatcher) can do it.
    pub fn with_params(mut self, params: Params) -> Self {
        self.params = params;
        self
    }

    /// The request method.
    pub fn method(&self) -> &Method {
        &self.head.method
    }

    /// The full request URI.
    pub fn uri(&self) -> &Uri {
        &self.head.uri
    }

    /// The URL path, without query string.
    pub fn path(&self) -> &str {
        self.head.uri.path()
    }

    /// Request headers.
    pub fn headers(&self) -> &HeaderMap {
        &self.head.headers
    }

    /// Mutable request headers, visible to later handlers in the chain.
    pub fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.head.headers
    }

    /// Typed per-request values, see [`set_local`](crate::set_local).
    pub fn extensions(&self) -> &Extensions {
        &self.head.extensions
    }

    /// Mutable typed per-request values.
    pub fn extensions_mut(&mut self) -> &mut Extensions {
        &mut self.head.extensions
    }

    /// Parameters bound from the matched route's dynamic segments.
    pub fn params(&self) -> &Params {
        &self.params
    }

    /// Stop the chain once the current handler returns.
    ///
    /// The response written so far is kept as is.
    pub fn cancel(&mut self) {
        self.cancelled = true;
    }

    /// Whether a handler has cancelled the chain.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    /// Give back the request head.
    pub fn into_parts(self) -> Parts {
        self.head
    }
}

impl<B> From<http::Request<B>> for Request {
    fn from(request: http::Request<B>) -> Self {
        let (head, _body) = request.into_parts();
        Self::from_parts(head)
    }
}

/// Mark the in-flight request as cancelled.
///
/// No further handler of the current chain runs after the caller returns.
pub fn cancel(req: &mut Request) {
    req.cancel();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_try_new_splits_path_and_query() {
        let req = Request::try_new(Method::GET, "/foo/bar?x=1").unwrap();
        assert_eq!(req.method(), Method::GET);
        assert_eq!(req.path(), "/foo/bar");
        assert_eq!(req.uri().query(), Some("x=1"));
        assert!(req.params().is_empty());
    }

    #[test]
    fn test_cancel_sets_flag() {
        let mut req = Request::try_new(Method::POST, "/").unwrap();
        assert!(!req.is_cancelled());
        cancel(&mut req);
        assert!(req.is_cancelled());
    }

    #[test]
    fn test_from_http_request_keeps_headers() {
        let http_req = http::Request::builder()
            .uri("/h")
            .header("x-app", "demo")
            .body("ignored body")
            .unwrap();
        let req = Request::from(http_req);
        assert_eq!(req.headers()["x-app"], "demo");
    }

    #[test]
    fn test_with_params() {
        let params: Params = [("id", "7")].into_iter().collect();
        let req = Request::try_new(Method::GET, "/users/7")
            .unwrap()
            .with_params(params);
        assert_eq!(req.params().get("id"), Some("7"));
    }
}

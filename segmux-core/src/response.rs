//! Response sink written by handlers.

use http::{HeaderMap, HeaderValue, StatusCode, header};

/// Body written for every unmatched request.
pub const NOT_FOUND_BODY: &[u8] = b"404 page not found\n";

/// An in-memory HTTP response that handlers write into.
///
/// Every handler of a chain writes into the same sink, in order. The status
/// defaults to `200 OK`; the body accumulates across writes.
#[derive(Debug, Clone, Default)]
pub struct Response {
    status: StatusCode,
    headers: HeaderMap,
    body: Vec<u8>,
}

impl Response {
    /// Create an empty `200 OK` response.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current status code.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Replace the status code.
    pub fn set_status(&mut self, status: StatusCode) {
        self.status = status;
    }

    /// Response headers.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Mutable response headers.
    pub fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }

    /// Bytes written so far.
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Append bytes to the body.
    pub fn write(&mut self, bytes: impl AsRef<[u8]>) {
        self.body.extend_from_slice(bytes.as_ref());
    }

    /// Overwrite this response with the canonical "not found" reply.
    ///
    /// Status 404, `text/plain` body `"404 page not found\n"`.
    pub fn not_found(&mut self) {
        self.status = StatusCode::NOT_FOUND;
        self.headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("text/plain; charset=utf-8"),
        );
        self.headers.insert(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        );
        self.body.clear();
        self.body.extend_from_slice(NOT_FOUND_BODY);
    }

    /// Convert into an `http` response for the outer server.
    pub fn into_http(self) -> http::Response<Vec<u8>> {
        let mut response = http::Response::new(self.body);
        *response.status_mut() = self.status;
        *response.headers_mut() = self.headers;
        response
    }
}

impl std::fmt::Write for Response {
    fn write_str(&mut self, s: &str) -> std::fmt::Result {
        self.write(s);
        Ok(())
    }
}

impl From<Response> for http::Response<Vec<u8>> {
    fn from(response: Response) -> Self {
        response.into_http()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_empty_ok() {
        let res = Response::new();
        assert_eq!(res.status(), StatusCode::OK);
        assert!(res.body().is_empty());
    }

    #[test]
    fn test_not_found_bytes() {
        let mut res = Response::new();
        res.write("partial");
        res.not_found();

        assert_eq!(res.status(), StatusCode::NOT_FOUND);
        assert_eq!(res.body(), b"404 page not found\n");
        assert_eq!(res.headers()[header::X_CONTENT_TYPE_OPTIONS], "nosniff");
    }

    #[test]
    fn test_into_http() {
        use std::fmt::Write;

        let mut res = Response::new();
        res.set_status(StatusCode::CREATED);
        write!(res, "id={}", 5).unwrap();

        let http_res = res.into_http();
        assert_eq!(http_res.status(), StatusCode::CREATED);
        assert_eq!(http_res.body(), b"id=5");
    }
}

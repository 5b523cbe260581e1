//! Logging handler for request observation.

use segmux_core::{BoxError, Handler, Request, Response};

/// A handler that logs each request it sees and lets the chain continue.
///
/// Put it first in a chain, or in the router's common handlers, to log every
/// matched request together with its bound params.
///
/// # Example
///
/// ```rust,ignore
/// router.set_common(handlers![LoggingHandler::named("api")]);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct LoggingHandler {
    name: &'static str,
}

impl LoggingHandler {
    /// Create a `LoggingHandler` with the default name.
    pub fn new() -> Self {
        Self { name: "request" }
    }

    /// Create a `LoggingHandler` with a custom name.
    ///
    /// The name identifies the chain in log lines.
    pub fn named(name: &'static str) -> Self {
        Self { name }
    }

    /// The name used in log lines.
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl Default for LoggingHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl Handler for LoggingHandler {
    async fn serve(&self, req: &mut Request, _res: &mut Response) -> Result<(), BoxError> {
        #[cfg(feature = "tracing")]
        {
            tracing::info!(
                name = %self.name,
                method = %req.method(),
                path = req.path(),
                params = ?req.params(),
                "serving request"
            );
        }
        #[cfg(not(feature = "tracing"))]
        {
            let _ = req;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::request;
    use http::Method;

    #[tokio::test]
    async fn test_passes_through() {
        let handler = LoggingHandler::named("test");
        let mut req = request(Method::GET, "/logged");
        let mut res = Response::new();

        handler.serve(&mut req, &mut res).await.unwrap();
        assert!(!req.is_cancelled());
        assert!(res.body().is_empty());
        assert_eq!(handler.name(), "test");
    }

    #[test]
    fn test_default_name() {
        assert_eq!(LoggingHandler::default().name(), "request");
    }
}

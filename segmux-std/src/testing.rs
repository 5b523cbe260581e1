//! Testing utilities for segmux.
//!
//! Handlers that observe or steer a chain, for use in unit and integration tests.
//!
//! # Features
//!
//! - [`RecordingHandler`]: Records the path and bound params of every request
//! - [`CountingHandler`]: Counts invocations
//! - [`CancelHandler`]: Cancels the rest of the chain
//! - [`WriteHandler`]: Writes a fixed status and body
//! - [`FailingHandler`]: Always returns an error
//! - [`request`]: Build a bare request for a method and path

use http::{Method, StatusCode};
use segmux_core::{BoxError, Handler, Request, Response};
use std::{
    collections::HashMap,
    sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    },
};

/// Build a request with no headers and no body.
///
/// # Panics
///
/// Panics if `path` is not a valid URI.
pub fn request(method: Method, path: &str) -> Request {
    Request::try_new(method, path).expect("valid request uri")
}

// ============================================================================
// Recording Handler
// ============================================================================

/// One request seen by a [`RecordingHandler`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recorded {
    /// Request method.
    pub method: Method,
    /// Request path.
    pub path: String,
    /// Params bound during lookup.
    pub params: HashMap<String, String>,
}

/// A handler that records every request it serves.
///
/// # Example
///
/// ```rust,ignore
/// let recorder = RecordingHandler::new();
/// router.handle(Method::GET, "/users/:id", recorder.clone())?;
///
/// router.dispatch(request(Method::GET, "/users/7"), &mut Response::new()).await;
///
/// assert_eq!(recorder.last().unwrap().params["id"], "7");
/// ```
#[derive(Clone, Default)]
pub struct RecordingHandler {
    seen: Arc<Mutex<Vec<Recorded>>>,
}

impl RecordingHandler {
    /// Create a new recording handler.
    pub fn new() -> Self {
        Self::default()
    }

    /// All recorded requests, oldest first.
    pub fn seen(&self) -> Vec<Recorded> {
        self.seen.lock().unwrap().clone()
    }

    /// The most recent request.
    pub fn last(&self) -> Option<Recorded> {
        self.seen.lock().unwrap().last().cloned()
    }

    /// Number of recorded requests.
    pub fn count(&self) -> usize {
        self.seen.lock().unwrap().len()
    }

    /// Clear all recorded requests.
    pub fn clear(&self) {
        self.seen.lock().unwrap().clear();
    }
}

impl Handler for RecordingHandler {
    async fn serve(&self, req: &mut Request, _res: &mut Response) -> Result<(), BoxError> {
        self.seen.lock().unwrap().push(Recorded {
            method: req.method().clone(),
            path: req.path().to_string(),
            params: req.params().to_map(),
        });
        Ok(())
    }
}

// ============================================================================
// Counting Handler
// ============================================================================

/// A handler that counts invocations.
///
/// Clones share the same counter.
#[derive(Clone, Default)]
pub struct CountingHandler {
    count: Arc<AtomicUsize>,
}

impl CountingHandler {
    /// Create a new counting handler.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the current count.
    pub fn count(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }

    /// Reset the counter.
    pub fn reset(&self) {
        self.count.store(0, Ordering::SeqCst);
    }
}

impl Handler for CountingHandler {
    async fn serve(&self, _req: &mut Request, _res: &mut Response) -> Result<(), BoxError> {
        self.count.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

// ============================================================================
// Cancel Handler
// ============================================================================

/// A handler that cancels the remainder of the chain.
#[derive(Debug, Clone, Copy, Default)]
pub struct CancelHandler;

impl CancelHandler {
    /// Create a new cancel handler.
    pub fn new() -> Self {
        Self
    }
}

impl Handler for CancelHandler {
    async fn serve(&self, req: &mut Request, _res: &mut Response) -> Result<(), BoxError> {
        req.cancel();
        Ok(())
    }
}

// ============================================================================
// Write Handler
// ============================================================================

/// A handler that sets a status and appends a fixed body.
#[derive(Debug, Clone)]
pub struct WriteHandler {
    status: StatusCode,
    body: Vec<u8>,
}

impl WriteHandler {
    /// Respond `200 OK` with `body`.
    pub fn new(body: impl Into<Vec<u8>>) -> Self {
        Self::with_status(StatusCode::OK, body)
    }

    /// Respond with `status` and `body`.
    pub fn with_status(status: StatusCode, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

impl Handler for WriteHandler {
    async fn serve(&self, _req: &mut Request, res: &mut Response) -> Result<(), BoxError> {
        res.set_status(self.status);
        res.write(&self.body);
        Ok(())
    }
}

// ============================================================================
// Failing Handler
// ============================================================================

/// A handler that always fails with the given message.
#[derive(Debug, Clone)]
pub struct FailingHandler {
    message: String,
}

impl FailingHandler {
    /// Create a handler failing with `message`.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl Handler for FailingHandler {
    async fn serve(&self, _req: &mut Request, _res: &mut Response) -> Result<(), BoxError> {
        Err(self.message.clone().into())
    }
}

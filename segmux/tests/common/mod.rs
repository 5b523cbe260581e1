#![allow(dead_code)]

use segmux::{Outcome, Request, Response, Router, http::Method, testing::request};
use std::sync::{Arc, Mutex};

// ============================================================================
// Dispatch helpers
// ============================================================================

pub async fn get(router: &Router, path: &str) -> (Outcome, Response) {
    send(router, Method::GET, path).await
}

pub async fn send(router: &Router, method: Method, path: &str) -> (Outcome, Response) {
    dispatch(router, request(method, path)).await
}

pub async fn dispatch(router: &Router, req: Request) -> (Outcome, Response) {
    let mut res = Response::new();
    let outcome = router.dispatch(req, &mut res).await;
    (outcome, res)
}

pub fn body(res: &Response) -> &str {
    std::str::from_utf8(res.body()).unwrap()
}

// ============================================================================
// Test Handlers
// ============================================================================

/// Appends its id to a shared log, so tests can assert execution order.
pub struct OrderRecordingHandler {
    pub id: usize,
    pub order: Arc<Mutex<Vec<usize>>>,
}

impl segmux::Handler for OrderRecordingHandler {
    async fn serve(
        &self,
        _req: &mut Request,
        _res: &mut Response,
    ) -> Result<(), segmux::BoxError> {
        self.order.lock().unwrap().push(self.id);
        Ok(())
    }
}

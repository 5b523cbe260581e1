//! Fault reporting for dispatch-time failures.
//!
//! A router owns exactly one [`FaultHandler`], injected when it is built.
//! Failures that reach it are configuration or programming errors, not bad
//! requests, so the default reaction is to panic.

use crate::error::DispatchError;
use std::sync::Arc;

/// Receives errors raised while a matched chain runs.
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot receive dispatch faults",
    label = "missing `FaultHandler` implementation",
    note = "Implement `FaultHandler`, or pass a closure `Fn(&DispatchError)`."
)]
pub trait FaultHandler: Send + Sync + 'static {
    /// Called once per failed dispatch.
    fn on_fault(&self, error: &DispatchError);
}

impl<F> FaultHandler for F
where
    F: Fn(&DispatchError) + Send + Sync + 'static,
{
    fn on_fault(&self, error: &DispatchError) {
        (self)(error)
    }
}

/// The default fault handler: panics with the error message.
#[derive(Debug, Clone, Copy, Default)]
pub struct PanicOnFault;

impl FaultHandler for PanicOnFault {
    fn on_fault(&self, error: &DispatchError) {
        panic!("segmux: {error}");
    }
}

/// A shared fault handler.
pub type SharedFaultHandler = Arc<dyn FaultHandler>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    fn handler_error() -> DispatchError {
        DispatchError::Handler {
            index: 1,
            method: http::Method::GET,
            path: "/x".to_string(),
            source: "bad state".into(),
        }
    }

    #[test]
    fn test_closure_fault_handler() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let handler: SharedFaultHandler = Arc::new(move |err: &DispatchError| {
            sink.lock().unwrap().push(err.to_string());
        });

        handler.on_fault(&handler_error());
        assert_eq!(
            seen.lock().unwrap().as_slice(),
            ["handler 1 failed on GET /x: bad state".to_string()]
        );
    }

    #[test]
    #[should_panic(expected = "segmux: handler 1 failed")]
    fn test_panic_on_fault() {
        PanicOnFault.on_fault(&handler_error());
    }
}

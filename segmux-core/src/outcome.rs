//! # Dispatch Outcome
//!
//! The result of running one request through a router. Executing a chain is a
//! small state machine:
//!
//! ```text
//! Running(0) ─► Running(1) ─► … ─► Running(n-1) ─► Completed
//!     │             │                   │
//!     └─────────────┴──── cancel() ─────┴──► Cancelled { at }
//! ```
//!
//! The flag raised by [`Request::cancel`](crate::Request::cancel) is checked
//! after each handler returns, never while one is running.

/// What happened to a dispatched request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Every handler of the chain ran.
    Completed,
    /// The handler at index `at` cancelled the chain; later handlers did not run.
    Cancelled {
        /// Index of the cancelling handler in the chain.
        at: usize,
    },
    /// No route matched; the canonical 404 was written.
    NotFound,
    /// A handler failed and the fault handler was invoked.
    Failed,
}

impl Outcome {
    /// True when a route matched, whether or not its chain finished.
    pub const fn is_matched(&self) -> bool {
        !matches!(self, Self::NotFound)
    }

    /// True when the chain was cut short by a handler.
    pub const fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled { .. })
    }
}

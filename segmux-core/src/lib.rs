//! # segmux-core
//!
//! Core types and traits for the segmux request dispatcher.
//!
//! This crate has minimal dependencies and is meant to be imported by handler
//! libraries that don't need the route tree or the router themselves.
//!
//! # Building Blocks
//!
//! - [`Request`] - The in-flight request: head, bound [`Params`], cancel flag
//! - [`Response`] - The in-memory sink handlers write into
//! - [`Handler`] - One step of a route's chain ([`DynHandler`] / [`BoxHandler`] for storage)
//! - [`FaultHandler`] - Receiver for dispatch-time failures
//! - [`Outcome`] - What happened to a dispatched request
//!
//! # Error Types
//!
//! - [`MuxError`] - Top-level error type
//! - [`RouteError`] - Registration errors
//! - [`DispatchError`] - Dispatch-time errors

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

mod context;
mod error;
mod fault;
mod handler;
mod outcome;
mod request;
mod response;

// Re-exports
pub use context::{Params, local, params, set_local};
pub use error::{BoxError, DispatchError, MuxError, RouteError};
pub use fault::{FaultHandler, PanicOnFault, SharedFaultHandler};
pub use handler::{BoxHandler, DynHandler, Handler, IntoServeResult, boxed};
pub use outcome::Outcome;
pub use request::{Request, cancel};
pub use response::{NOT_FOUND_BODY, Response};

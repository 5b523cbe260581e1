//! # segmux-std
//!
//! Route trees, the router and standard handlers for the segmux request
//! dispatcher.
//!
//! This crate provides:
//! - **Pattern parsing**: [`segment::parse`], [`Segment`]
//! - **Route trees**: [`RouteTree`], [`MethodFilter`], [`Match`]
//! - **Chains**: [`HandlerChain`], [`handlers!`] macro
//! - **Routing**: [`Router`], [`Subrouter`]
//! - **Standard handlers**: [`LoggingHandler`](handlers::LoggingHandler)
//! - **Tower adapter**: `MuxService` (feature `tower`)

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

// Re-export core traits
pub use segmux_core;

// Modules
pub mod chain;
pub mod handlers;
pub mod router;
pub mod segment;
pub mod subrouter;
pub mod testing;
#[cfg(feature = "tower")]
pub mod tower;
pub mod tree;

pub use chain::HandlerChain;
pub use router::Router;
pub use segment::Segment;
pub use subrouter::Subrouter;
pub use tree::{Match, MethodFilter, RouteTree};

#[doc(hidden)]
pub mod __private {
    pub use segmux_core::{BoxHandler, boxed};
}

//! # segmux - Segment Radix Tree Request Dispatcher
//!
//! `segmux` maps an incoming request (method + path) to an ordered chain of
//! handlers. Routes are patterns such as `/users/:id` or `/files/{name:[a-z]+}`
//! stored in one radix tree per method. Handlers run in order and any of them
//! may cancel the rest of the chain.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use segmux::prelude::*;
//!
//! let mut router = Router::new();
//! router.handle_func(Method::GET, "/users/:id", |req: &mut Request, res: &mut Response| {
//!     res.write(format!("user {}", params(req).get("id").unwrap_or_default()));
//! })?;
//!
//! let mut users = Subrouter::new().with_prefix("/admin");
//! users.handle_chain(Method::GET, "/", handlers![LoggingHandler::new(), admin_page])?;
//! router.use_subrouter(&users)?;
//!
//! let mut res = Response::new();
//! match router.dispatch(request, &mut res).await {
//!     Outcome::NotFound => { /* res already holds the 404 */ }
//!     _ => {}
//! }
//! ```
//!
//! ## Matching rules
//!
//! - Literal segments win over dynamic ones, without backtracking.
//! - Literal segments are matched case-insensitively; captured values keep
//!   their case.
//! - A `{name:regex}` segment must match the whole path segment.
//!
//! ## Features
//!
//! - `tracing` (default): log registration, merges, misses and failures
//! - `tower`: [`tower::MuxService`] adapter for tower-based servers

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

pub use http;

pub use segmux_core::{
    // Errors
    BoxError,
    // Handler
    BoxHandler,
    DispatchError,
    DynHandler,
    // Faults
    FaultHandler,
    Handler,
    IntoServeResult,
    MuxError,
    NOT_FOUND_BODY,
    // Dispatch results
    Outcome,
    PanicOnFault,
    // Request context
    Params,
    Request,
    // Response
    Response,
    RouteError,
    SharedFaultHandler,
    boxed,
    cancel,
    local,
    params,
    set_local,
};

// Routing. `handlers` is both the standard handler module and the chain macro.
pub use segmux_std::{
    HandlerChain, Match, MethodFilter, RouteTree, Router, Segment, Subrouter, handlers,
};

/// Route pattern parsing.
pub mod segment {
    pub use segmux_std::segment::{Segment, parse, split_path};
}

/// Testing utilities.
pub mod testing {
    #![allow(clippy::wildcard_imports)]
    pub use segmux_std::testing::*;
}

/// Tower integration.
#[cfg(feature = "tower")]
pub mod tower {
    pub use segmux_std::tower::MuxService;
}

/// Prelude module - common imports for segmux.
///
/// # Usage
///
/// ```rust,ignore
/// use segmux::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        BoxError, Handler, MethodFilter, Outcome, Params, Request, Response, RouteError, Router,
        Subrouter, cancel, handlers, handlers::LoggingHandler, http::Method, local, params,
        set_local,
    };
}

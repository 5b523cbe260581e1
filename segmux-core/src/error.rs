//! Error types for segmux.
//!
//! This module provides a structured error hierarchy using `thiserror`:
//!
//! - [`MuxError`] - Top-level error type for all segmux operations
//! - [`RouteError`] - Errors raised while registering routes
//! - [`DispatchError`] - Errors raised while serving a matched request

use thiserror::Error;

/// A boxed error type for dynamic error handling.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Top-level error type for all segmux operations.
#[derive(Error, Debug)]
pub enum MuxError {
    /// A route could not be registered.
    #[error("route error: {0}")]
    Route(#[from] RouteError),

    /// A matched request failed while its chain was running.
    #[error("dispatch error: {0}")]
    Dispatch(#[from] DispatchError),
}

/// Errors that can occur while registering a route pattern.
///
/// A pattern that fails with any of these leaves the route tree untouched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RouteError {
    /// The pattern was the empty string.
    #[error("route pattern is empty")]
    EmptyPattern,

    /// A dynamic segment has no name, e.g. `/users/:` or `/users/{}`.
    #[error("dynamic segment without a name in pattern {pattern:?}")]
    EmptyParamName {
        /// The offending pattern.
        pattern: String,
    },

    /// A `{` was opened but never closed within its segment.
    #[error("unclosed `{{` in segment {segment:?}")]
    UnclosedBrace {
        /// The offending segment.
        segment: String,
    },

    /// The regular expression attached to a dynamic segment does not compile.
    #[error("invalid regex {regex:?} for parameter {name:?}: {reason}")]
    InvalidRegex {
        /// Parameter the regex constrains.
        name: String,
        /// The regex source as written in the pattern.
        regex: String,
        /// Compiler message.
        reason: String,
    },

    /// The same parameter name was used twice in one pattern.
    #[error("parameter {name:?} appears more than once in pattern {pattern:?}")]
    DuplicateParam {
        /// The repeated name.
        name: String,
        /// The offending pattern.
        pattern: String,
    },

    /// Two different dynamic segments would be siblings at the same depth.
    #[error("dynamic segment {new} conflicts with existing {existing} in pattern {pattern:?}")]
    AmbiguousParam {
        /// The dynamic segment already in the tree.
        existing: String,
        /// The dynamic segment being registered.
        new: String,
        /// The pattern being registered.
        pattern: String,
    },
}

/// Errors that can occur while a matched request is being served.
///
/// These are reported to the router's [`FaultHandler`](crate::FaultHandler)
/// instead of being turned into an HTTP response.
#[derive(Error, Debug)]
pub enum DispatchError {
    /// A handler in the chain returned an error.
    #[error("handler {index} failed on {method} {path}: {source}")]
    Handler {
        /// Position of the failing handler in its chain.
        index: usize,
        /// Request method.
        method: http::Method,
        /// Request path.
        path: String,
        /// The error returned by the handler.
        #[source]
        source: BoxError,
    },
}

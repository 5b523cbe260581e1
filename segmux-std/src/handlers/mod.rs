//! Standard handlers.

mod logging;

pub use logging::LoggingHandler;

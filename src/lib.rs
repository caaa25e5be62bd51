//! Tracekit - call instrumentation and module introspection utilities
//!
//! This crate provides two small developer toolsets: higher-order call
//! wrappers that redirect print-style output and standard-facade logging
//! into a unified `tracing` logger (with timing and a memoizing
//! recursion guard), and a namespace walker that collects name/version
//! pairs from reachable module-like objects.

#![warn(missing_docs)]

// Public modules
pub mod config;
pub mod error;
pub mod inspect;
pub mod intercept;
pub mod types;
pub mod wrap;

#[cfg(test)]
mod test_support;

/// Crate version, declared the conventional way.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Re-exports for public API
pub use config::{parse_level, InterceptConfig};
pub use error::{Result, TracekitError};
pub use inspect::{get_imports, get_version, has_version, walk};
pub use intercept::{
    current_sink, setup_logging, write_out, LogBridge, LogConfig, LogInterceptor, OutputSink,
    SinkGuard, StdoutSink,
};
pub use types::{Module, Namespace, Value, VersionValue};
pub use wrap::{logprint, timed, Memoized};

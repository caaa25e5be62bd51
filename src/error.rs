use thiserror::Error;

/// Result type used throughout the crate.
pub type Result<T> = std::result::Result<T, TracekitError>;

/// Errors surfaced by the introspection and interception layers.
///
/// Most operations in this crate deliberately do not error: version
/// extraction yields `None` on absence, the module walker swallows
/// per-member failures, and wrapped-function panics propagate untouched.
/// The variants here cover the places where a caller can actually act on
/// the failure.
#[derive(Debug, Error)]
pub enum TracekitError {
    /// A deferred attribute failed to resolve when forced.
    #[error("failed to resolve attribute `{attribute}`: {message}")]
    Attribute {
        /// Attribute name that was being resolved.
        attribute: String,
        /// Human-readable cause.
        message: String,
    },

    /// A severity level string matched neither a known name nor a
    /// numeric verbosity value.
    #[error("invalid log level `{0}`")]
    InvalidLevel(String),

    /// The global tracing subscriber could not be installed.
    #[error("failed to initialize logging: {0}")]
    Subscriber(String),

    /// The standard logging facade already has a registered logger.
    #[error("failed to install logging bridge: {0}")]
    Bridge(#[from] log::SetLoggerError),

    /// Configuration could not be parsed.
    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
}

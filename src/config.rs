use serde::{Deserialize, Serialize};
use tracing::Level;

use crate::error::{Result, TracekitError};

/// Configuration for a stream interceptor.
///
/// The level may be a conventional severity name (`"info"`, case
/// insensitive) or a numeric verbosity value (`"1"` = error through
/// `"5"` = trace), mirroring how unknown severity names fall back to
/// their numeric level.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterceptConfig {
    /// Minimum severity for captured output.
    pub level: String,

    /// Tag prefixed to every captured line.
    pub name: String,
}

impl Default for InterceptConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            name: String::new(),
        }
    }
}

impl InterceptConfig {
    /// Interceptor at the given severity with no name tag.
    pub fn at_level(level: Level) -> Self {
        Self {
            level: level.to_string().to_lowercase(),
            ..Default::default()
        }
    }

    /// Attach a name tag.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Parsed severity; defaults to `INFO` when the configured string is
    /// unusable. Call [`InterceptConfig::validate`] first to reject bad
    /// configuration explicitly.
    pub fn severity(&self) -> Level {
        parse_level(&self.level).unwrap_or_else(|error| {
            tracing::debug!(%error, "unusable level in config, falling back to INFO");
            Level::INFO
        })
    }

    /// Load from a JSON document.
    pub fn from_json(raw: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configuration whose level is neither a known severity name
    /// nor a numeric verbosity value.
    pub fn validate(&self) -> Result<()> {
        parse_level(&self.level)?;
        Ok(())
    }
}

/// Parse a severity level from a name or a numeric verbosity value.
///
/// Names are matched case-insensitively. A string that is not a known
/// name falls back to the numeric interpretation; anything else is an
/// [`TracekitError::InvalidLevel`].
pub fn parse_level(raw: &str) -> Result<Level> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "error" => Ok(Level::ERROR),
        "warn" | "warning" => Ok(Level::WARN),
        "info" => Ok(Level::INFO),
        "debug" => Ok(Level::DEBUG),
        "trace" => Ok(Level::TRACE),
        "1" => Ok(Level::ERROR),
        "2" => Ok(Level::WARN),
        "3" => Ok(Level::INFO),
        "4" => Ok(Level::DEBUG),
        "5" => Ok(Level::TRACE),
        other => Err(TracekitError::InvalidLevel(other.to_string())),
    }
}

use std::fs::OpenOptions;
use std::sync::Once;

use lazy_static::lazy_static;
use parking_lot::Mutex;
use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, EnvFilter};

use crate::error::{Result, TracekitError};
use crate::intercept::bridge::LogBridge;

static INIT: Once = Once::new();

lazy_static! {
    // Keeps the non-blocking writer's worker alive for the life of the
    // process so buffered lines are flushed on exit.
    static ref FLUSH_GUARD: Mutex<Option<WorkerGuard>> = Mutex::new(None);
}

/// Logging configuration options.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Minimum log level.
    pub level: Level,
    /// Whether to include timestamps.
    pub timestamps: bool,
    /// Whether to include source code locations.
    pub source_location: bool,
    /// Output file path (`None` for stdout).
    pub file_path: Option<String>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            timestamps: true,
            source_location: true,
            file_path: None,
        }
    }
}

/// Initialize the logging system: one sink (stdout or file) at the
/// configured level, with non-blocking enqueue delivery, plus the bridge
/// from the standard logging facade.
///
/// Safe to call repeatedly; only the first call does the work.
pub fn setup_logging(config: LogConfig) -> Result<()> {
    let mut result = Ok(());

    INIT.call_once(|| {
        result = setup_logging_internal(config);
    });

    result
}

fn setup_logging_internal(config: LogConfig) -> Result<()> {
    let filter = EnvFilter::from_default_env().add_directive(config.level.into());

    let (writer, guard) = match &config.file_path {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|e| TracekitError::Subscriber(format!("failed to open log file: {}", e)))?;
            tracing_appender::non_blocking(file)
        }
        None => tracing_appender::non_blocking(std::io::stdout()),
    };
    *FLUSH_GUARD.lock() = Some(guard);

    let builder = fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(config.source_location)
        .with_line_number(config.source_location)
        .with_writer(writer);

    // set_global_default rather than try_init so the facade bridge below
    // stays the single `log` adapter in the process.
    if config.timestamps {
        tracing::subscriber::set_global_default(builder.finish())
            .map_err(|e| TracekitError::Subscriber(e.to_string()))?;
    } else {
        tracing::subscriber::set_global_default(builder.without_time().finish())
            .map_err(|e| TracekitError::Subscriber(e.to_string()))?;
    }

    // Standard-facade calls anywhere in the process get re-emitted
    // through the subscriber installed above.
    if LogBridge::init(max_level_for(config.level)).is_err() {
        tracing::debug!("standard logging facade already has a logger, leaving it in place");
    }

    Ok(())
}

fn max_level_for(level: Level) -> log::LevelFilter {
    match level {
        Level::ERROR => log::LevelFilter::Error,
        Level::WARN => log::LevelFilter::Warn,
        Level::INFO => log::LevelFilter::Info,
        Level::DEBUG => log::LevelFilter::Debug,
        Level::TRACE => log::LevelFilter::Trace,
    }
}

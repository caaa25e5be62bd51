use tracing::Level;

use crate::error::Result;

/// Bridge from the standard logging facade into `tracing`.
///
/// Every record logged through the `log` crate is re-emitted as a
/// `tracing` event at the equivalent severity. The original callsite
/// (target, file, line) is carried as structured fields so display-layer
/// formatting can point at the true caller rather than this shim.
/// Records whose callsite metadata is missing are still forwarded with
/// the fields defaulted; metadata resolution never fails the bridge.
pub struct LogBridge;

static BRIDGE: LogBridge = LogBridge;

impl LogBridge {
    /// Register the bridge as the process-wide logger for the standard
    /// facade. Fails if another logger is already registered.
    pub fn init(max_level: log::LevelFilter) -> Result<()> {
        log::set_logger(&BRIDGE)?;
        log::set_max_level(max_level);
        Ok(())
    }
}

impl log::Log for LogBridge {
    fn enabled(&self, _metadata: &log::Metadata<'_>) -> bool {
        // Severity filtering belongs to the tracing subscriber.
        true
    }

    fn log(&self, record: &log::Record<'_>) {
        let target = record.target();
        let file = record.file().unwrap_or("<unknown>");
        let line = record.line().unwrap_or(0);

        match severity_for(record.level()) {
            Level::ERROR => tracing::error!(
                log.target = target,
                log.file = file,
                log.line = line,
                "{}",
                record.args()
            ),
            Level::WARN => tracing::warn!(
                log.target = target,
                log.file = file,
                log.line = line,
                "{}",
                record.args()
            ),
            Level::INFO => tracing::info!(
                log.target = target,
                log.file = file,
                log.line = line,
                "{}",
                record.args()
            ),
            Level::DEBUG => tracing::debug!(
                log.target = target,
                log.file = file,
                log.line = line,
                "{}",
                record.args()
            ),
            Level::TRACE => tracing::trace!(
                log.target = target,
                log.file = file,
                log.line = line,
                "{}",
                record.args()
            ),
        }
    }

    fn flush(&self) {}
}

fn severity_for(level: log::Level) -> Level {
    match level {
        log::Level::Error => Level::ERROR,
        log::Level::Warn => Level::WARN,
        log::Level::Info => Level::INFO,
        log::Level::Debug => Level::DEBUG,
        log::Level::Trace => Level::TRACE,
    }
}

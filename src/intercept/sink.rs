use std::cell::RefCell;
use std::io::Write;
use std::sync::Arc;

use tracing::Level;

use crate::config::InterceptConfig;
use crate::intercept::logging::{self, LogConfig};

/// Destination for captured output lines.
pub trait OutputSink: Send + Sync {
    /// Deliver one piece of output text.
    fn write(&self, text: &str);
}

/// Default sink: plain process stdout.
pub struct StdoutSink;

impl OutputSink for StdoutSink {
    fn write(&self, text: &str) {
        let stdout = std::io::stdout();
        let mut handle = stdout.lock();
        let _ = writeln!(handle, "{}", text);
    }
}

/// Sink forwarding every written line to the structured logger at a
/// configured severity, tagged with a name and a `|print` marker.
///
/// Construction re-initializes the global tracing subscriber (single
/// stdout sink at the configured level, non-blocking delivery) on a
/// best-effort basis, then announces the tag once at the same level.
pub struct LogInterceptor {
    level: Level,
    name: String,
}

impl LogInterceptor {
    /// Build an interceptor from configuration.
    pub fn new(config: &InterceptConfig) -> Self {
        let level = config.severity();
        if let Err(error) = logging::setup_logging(LogConfig {
            level,
            ..Default::default()
        }) {
            tracing::debug!(%error, "subscriber already installed, reusing it");
        }

        emit(level, &config.name);

        Self {
            level,
            name: config.name.clone(),
        }
    }

    /// The severity this interceptor captures at.
    pub fn level(&self) -> Level {
        self.level
    }
}

impl OutputSink for LogInterceptor {
    fn write(&self, text: &str) {
        emit(self.level, &format!("{}|print\n{}", self.name, text));
    }
}

/// Emit a message at a runtime-chosen level.
pub(crate) fn emit(level: Level, message: &str) {
    match level {
        Level::ERROR => tracing::error!("{}", message),
        Level::WARN => tracing::warn!("{}", message),
        Level::INFO => tracing::info!("{}", message),
        Level::DEBUG => tracing::debug!("{}", message),
        Level::TRACE => tracing::trace!("{}", message),
    }
}

thread_local! {
    // Per-thread so concurrent logprint wrappers on different threads
    // cannot race on each other's sink.
    static CURRENT_SINK: RefCell<Arc<dyn OutputSink>> =
        RefCell::new(Arc::new(StdoutSink) as Arc<dyn OutputSink>);
}

/// The sink output currently flows through on this thread.
pub fn current_sink() -> Arc<dyn OutputSink> {
    CURRENT_SINK.with(|sink| Arc::clone(&sink.borrow()))
}

fn swap_sink(replacement: Arc<dyn OutputSink>) -> Arc<dyn OutputSink> {
    CURRENT_SINK.with(|sink| std::mem::replace(&mut *sink.borrow_mut(), replacement))
}

/// Write one line through the current sink.
pub fn write_out(text: &str) {
    current_sink().write(text);
}

/// Write a formatted line through the current sink, print-style.
#[macro_export]
macro_rules! outln {
    ($($arg:tt)*) => {
        $crate::intercept::write_out(&format!($($arg)*))
    };
}

/// Scoped sink swap: installs a replacement sink and restores the
/// previous one on drop, on every exit path including panics.
#[must_use = "dropping the guard immediately restores the previous sink"]
pub struct SinkGuard {
    previous: Option<Arc<dyn OutputSink>>,
}

impl SinkGuard {
    /// Swap in a replacement sink for the lifetime of the guard.
    pub fn install(sink: Arc<dyn OutputSink>) -> Self {
        Self {
            previous: Some(swap_sink(sink)),
        }
    }
}

impl Drop for SinkGuard {
    fn drop(&mut self) {
        if let Some(previous) = self.previous.take() {
            swap_sink(previous);
        }
    }
}

/// Sink recording every line in memory, for assertions.
#[cfg(test)]
pub(crate) struct CaptureSink {
    lines: parking_lot::Mutex<Vec<String>>,
}

#[cfg(test)]
impl CaptureSink {
    pub(crate) fn new() -> Arc<Self> {
        Arc::new(Self {
            lines: parking_lot::Mutex::new(Vec::new()),
        })
    }

    pub(crate) fn lines(&self) -> Vec<String> {
        self.lines.lock().clone()
    }
}

#[cfg(test)]
impl OutputSink for CaptureSink {
    fn write(&self, text: &str) {
        self.lines.lock().push(text.to_string());
    }
}

//! Shared helpers for tests.

use std::io::Write;
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::Level;
use tracing_subscriber::fmt::MakeWriter;

/// An in-memory `Write` target that can be cloned into a subscriber.
#[derive(Clone, Default)]
pub(crate) struct SharedBuf(Arc<Mutex<Vec<u8>>>);

impl Write for SharedBuf {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for SharedBuf {
    type Writer = SharedBuf;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// Runs a closure under a thread-scoped fmt subscriber writing into a
/// buffer, so tests can assert on structured log output
/// deterministically regardless of the global subscriber.
pub(crate) struct CapturingSubscriber {
    buf: SharedBuf,
}

impl CapturingSubscriber {
    pub(crate) fn new() -> Self {
        Self {
            buf: SharedBuf::default(),
        }
    }

    pub(crate) fn scoped<T>(&self, f: impl FnOnce() -> T) -> T {
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(Level::TRACE)
            .with_ansi(false)
            .with_writer(self.buf.clone())
            .finish();
        tracing::subscriber::with_default(subscriber, f)
    }

    pub(crate) fn output(&self) -> String {
        String::from_utf8_lossy(&self.buf.0.lock()).into_owned()
    }
}

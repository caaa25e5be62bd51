//! Output capture: the sink layer, the tracing bootstrap, and the bridge
//! from the standard logging facade.

mod bridge;
mod logging;
mod sink;

pub use bridge::LogBridge;
pub use logging::{setup_logging, LogConfig};
pub use sink::{current_sink, write_out, LogInterceptor, OutputSink, SinkGuard, StdoutSink};

#[cfg(test)]
pub(crate) use sink::CaptureSink;

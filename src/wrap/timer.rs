use std::time::Instant;

use crate::outln;

/// Run `f`, printing timing lines through the active output sink.
///
/// Emits the start line before invoking `f`, then wall-clock and
/// monotonic-counter elapsed lines after it returns. Panics from `f`
/// propagate unchanged; the start line still prints, the completion
/// lines do not.
pub fn timed<T, F: FnOnce() -> T>(name: &str, f: F) -> T {
    let wall_start = chrono::Local::now();
    let counter_start = Instant::now();
    outln!("{} started at {}.", name, wall_start);

    let result = f();

    let wall_elapsed = chrono::Local::now() - wall_start;
    outln!("Time elapsed: {}.", wall_elapsed);
    outln!("Seconds elapsed: {}s.", counter_start.elapsed().as_secs_f64());
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intercept::{CaptureSink, SinkGuard};

    #[test]
    fn test_returns_result_unchanged() {
        let capture = CaptureSink::new();
        let _guard = SinkGuard::install(capture.clone());

        let value = timed("compute", || 41 + 1);
        assert_eq!(value, 42);

        let lines = capture.lines();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("compute started at "));
        assert!(lines[1].starts_with("Time elapsed: "));
        assert!(lines[2].starts_with("Seconds elapsed: "));
        assert!(lines[2].ends_with("s."));
    }

    #[test]
    fn test_panic_propagates_without_completion_lines() {
        let capture = CaptureSink::new();
        let _guard = SinkGuard::install(capture.clone());

        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            timed("explode", || panic!("boom"))
        }));
        assert!(result.is_err());

        let lines = capture.lines();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].starts_with("explode started at "));
    }
}

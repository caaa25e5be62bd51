use std::sync::Arc;

use crate::config::InterceptConfig;
use crate::intercept::{LogInterceptor, SinkGuard};
use crate::wrap::timed;

/// Run `f` with print-style output redirected into the structured
/// logger.
///
/// For the duration of the call, the thread's active output sink is
/// swapped for a fresh [`LogInterceptor`] built from `config`, the call
/// runs through [`timed`], and the prior sink is restored on every exit
/// path, panics included.
pub fn logprint<T, F: FnOnce() -> T>(config: &InterceptConfig, func_name: &str, f: F) -> T {
    let interceptor = Arc::new(LogInterceptor::new(config));
    let _guard = SinkGuard::install(interceptor);
    timed(func_name, f)
}

//! Call wrappers: timing, scoped output capture, and the memoizing
//! recursion guard. Each wrapper is an explicit higher-order function
//! (or a value holding one) that receives the inner call as a closure.

mod logprint;
mod memo;
mod timer;

pub use logprint::logprint;
pub use memo::Memoized;
pub use timer::timed;

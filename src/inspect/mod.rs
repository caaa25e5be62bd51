//! Module introspection: version extraction and the namespace walker.

mod version;
mod walker;

pub use version::{get_version, has_version, VERSION_ATTRS};
pub use walker::{get_imports, walk, WalkContext};

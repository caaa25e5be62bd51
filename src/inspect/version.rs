use crate::types::{Module, VersionValue};

/// Conventional version attribute names, in priority order. The first
/// strategy that yields a version wins.
pub const VERSION_ATTRS: [&str; 3] = ["__version__", "VERSION", "version"];

/// Extract a module's declared version, if any.
///
/// Presence wins over truthiness: a version of `0` or `""` is still a
/// version. A present attribute that fails to resolve or is not a scalar
/// does not match, and lookup falls through to the next strategy.
pub fn get_version(module: &Module) -> Option<VersionValue> {
    VERSION_ATTRS
        .iter()
        .find_map(|attr| lookup(module, attr))
}

/// Whether a module declares a *truthy* version.
///
/// Deliberately asymmetric with [`get_version`]: an empty-string version
/// is treated as "no version" here.
pub fn has_version(module: &Module) -> bool {
    get_version(module).is_some_and(|v| v.is_truthy())
}

fn lookup(module: &Module, attr: &str) -> Option<VersionValue> {
    match module.resolve_attr(attr)? {
        Ok(value) => value.as_version(),
        Err(error) => {
            tracing::debug!(
                module = module.declared_name().unwrap_or("<anonymous>"),
                attr,
                %error,
                "version attribute failed to resolve"
            );
            None
        }
    }
}

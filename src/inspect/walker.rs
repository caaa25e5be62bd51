use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

use crate::inspect::version::{get_version, has_version};
use crate::types::{Module, Namespace, Value, VersionValue};

/// State for one namespace walk: the visited set and the versions found
/// so far. A fresh context is created per top-level [`walk`] call, which
/// keeps the walker reentrant; nothing here is process-wide.
#[derive(Debug, Default)]
pub struct WalkContext {
    visited: HashSet<String>,
    found: BTreeMap<String, VersionValue>,
}

impl WalkContext {
    fn new() -> Self {
        Self::default()
    }

    /// Names visited so far, including modules without a version.
    pub fn visited(&self) -> &HashSet<String> {
        &self.visited
    }

    fn process_binding(&mut self, binding: &str, value: &Value) {
        // Non-module namespace values are skipped, not an error.
        if let Some(module) = value.as_module() {
            self.process_module(binding, module);
        }
    }

    fn process_module(&mut self, binding: &str, module: &Arc<Module>) {
        let canonical = module.declared_name().unwrap_or(binding).to_string();

        // Cycle break: each module contributes at most once per walk.
        if !self.visited.insert(canonical.clone()) {
            return;
        }

        if has_version(module) {
            if let Some(version) = get_version(module) {
                self.found.insert(canonical, version);
            }
        }

        for (member_name, resolved) in module.members() {
            match resolved {
                Ok(value) => self.process_binding(&member_name, &value),
                Err(error) => {
                    // Broken lazy attributes must not abort the walk.
                    tracing::debug!(
                        module = module.declared_name().unwrap_or(binding),
                        member = %member_name,
                        %error,
                        "skipping member that failed to resolve"
                    );
                }
            }
        }
    }
}

/// Walk a namespace and collect `name -> version` for every reachable
/// module that declares a truthy version. Visits each module at most
/// once, so cyclic module graphs terminate.
pub fn walk(namespace: &Namespace) -> BTreeMap<String, VersionValue> {
    let mut cx = WalkContext::new();
    for (name, value) in namespace {
        cx.process_binding(name, value);
    }
    cx.found
}

/// Convenience view over [`walk`]: the collected module names,
/// deduplicated, sorted ascending, joined with a comma.
pub fn get_imports(namespace: &Namespace) -> String {
    walk(namespace)
        .keys()
        .cloned()
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TracekitError;
    use pretty_assertions::assert_eq;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn namespace_of(bindings: Vec<(&str, Value)>) -> Namespace {
        bindings
            .into_iter()
            .map(|(n, v)| (n.to_string(), v))
            .collect()
    }

    #[test]
    fn test_collects_versions_from_nested_modules() {
        let outer = Module::new("outer");
        outer.set_attr("__version__", "1.0");
        let inner = Module::new("inner");
        inner.set_attr("VERSION", 2i64);
        outer.set_attr("inner", Arc::clone(&inner));

        let ns = namespace_of(vec![("outer", Value::Module(outer))]);
        let found = walk(&ns);

        let mut expected = BTreeMap::new();
        expected.insert("outer".to_string(), VersionValue::Str("1.0".into()));
        expected.insert("inner".to_string(), VersionValue::Int(2));
        assert_eq!(found, expected);
    }

    #[test]
    fn test_cycle_terminates_and_visits_once() {
        // A has a version; B has none but points back at A.
        let a = Module::new("a");
        a.set_attr("__version__", "1");
        let b = Module::new("b");
        b.set_attr("a", Arc::clone(&a));
        a.set_attr("b", Arc::clone(&b));

        // Count how often A's members are enumerated via a deferred attr.
        static FORCED: AtomicUsize = AtomicUsize::new(0);
        a.set_attr(
            "probe",
            Value::Deferred(Arc::new(|| {
                FORCED.fetch_add(1, Ordering::SeqCst);
                Ok(Value::Bool(true))
            })),
        );

        let ns = namespace_of(vec![("a", Value::Module(a))]);
        let found = walk(&ns);

        let mut expected = BTreeMap::new();
        expected.insert("a".to_string(), VersionValue::Str("1".into()));
        assert_eq!(found, expected);
        assert_eq!(FORCED.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_non_module_values_skipped() {
        let m = Module::new("real");
        m.set_attr("__version__", "3");
        let ns = namespace_of(vec![
            ("real", Value::Module(m)),
            ("answer", Value::Int(42)),
            ("flag", Value::Bool(false)),
        ]);

        let found = walk(&ns);
        assert_eq!(found.len(), 1);
        assert!(found.contains_key("real"));
    }

    #[test]
    fn test_versionless_modules_not_recorded() {
        let m = Module::new("plain");
        m.set_attr("data", 1i64);
        let ns = namespace_of(vec![("plain", Value::Module(m))]);
        assert!(walk(&ns).is_empty());
    }

    #[test]
    fn test_falsy_version_not_recorded() {
        // get_version would return "", but the walker records only
        // modules passing the has_version predicate.
        let m = Module::new("hollow");
        m.set_attr("__version__", "");
        let ns = namespace_of(vec![("hollow", Value::Module(m))]);
        assert!(walk(&ns).is_empty());
    }

    #[test]
    fn test_binding_name_fallback_for_anonymous_modules() {
        let m = Module::anonymous();
        m.set_attr("__version__", "9");
        let ns = namespace_of(vec![("bound_as", Value::Module(m))]);

        let found = walk(&ns);
        assert_eq!(
            found.get("bound_as"),
            Some(&VersionValue::Str("9".into()))
        );
    }

    #[test]
    fn test_broken_member_does_not_abort_walk() {
        let parent = Module::new("parent");
        parent.set_attr("__version__", "1");
        parent.set_attr(
            "broken",
            Value::Deferred(Arc::new(|| {
                Err(TracekitError::Attribute {
                    attribute: "broken".to_string(),
                    message: "permission denied".to_string(),
                })
            })),
        );
        let sibling = Module::new("sibling");
        sibling.set_attr("version", "2");
        parent.set_attr("sibling", Arc::clone(&sibling));

        let found = walk(&namespace_of(vec![("parent", Value::Module(parent))]));
        assert_eq!(found.len(), 2);
        assert!(found.contains_key("parent"));
        assert!(found.contains_key("sibling"));
    }

    #[test]
    fn test_get_imports_sorted_and_joined() {
        let zeta = Module::new("zeta");
        zeta.set_attr("__version__", "1");
        let alpha = Module::new("alpha");
        alpha.set_attr("__version__", "2");

        let ns = namespace_of(vec![
            ("zeta", Value::Module(zeta)),
            ("alpha", Value::Module(alpha)),
        ]);
        assert_eq!(get_imports(&ns), "alpha,zeta");
    }

    #[test]
    fn test_get_imports_empty_namespace() {
        assert_eq!(get_imports(&Namespace::new()), "");
    }
}

use std::fmt;
use std::hash::Hash;

use dashmap::DashMap;

use crate::outln;

/// A memoizing recursion guard around a function.
///
/// The wrapped function receives the `Memoized` handle so recursive
/// calls flow through the cache: a call whose key was already seen
/// returns the cached result without invoking the body again, emitting
/// a short "caught cycle" diagnostic through the current sink. A key is
/// marked in the table *before* its body runs (with `V::default()` as
/// the in-flight value), so a recursive self-call with the identical
/// argument short-circuits instead of recursing unboundedly. Entries
/// never expire; the table lives as long as the wrapper.
pub struct Memoized<K: 'static, V: 'static> {
    cache: DashMap<K, V>,
    func: Box<dyn Fn(&Memoized<K, V>, &K) -> V + Send + Sync>,
}

impl<K, V> Memoized<K, V>
where
    K: Eq + Hash + Clone + fmt::Debug + 'static,
    V: Clone + Default + 'static,
{
    /// Wrap a function with a fresh, empty memoization table.
    pub fn new(func: impl Fn(&Memoized<K, V>, &K) -> V + Send + Sync + 'static) -> Self {
        Self {
            cache: DashMap::new(),
            func: Box::new(func),
        }
    }

    /// Invoke the wrapped function for `key`, short-circuiting to the
    /// cached (or in-flight) result when the key was seen before.
    pub fn call(&self, key: K) -> V {
        if let Some(hit) = self.cache.get(&key) {
            let value = hit.value().clone();
            drop(hit);
            outln!("Caught cycle for {:?}.", key);
            tracing::debug!(key = ?key, "memoized call short-circuited");
            return value;
        }

        // Mark the key before running the body: an identical-argument
        // self-call inside the body takes the hit branch above instead
        // of re-entering forever.
        self.cache.insert(key.clone(), V::default());
        let value = (self.func)(self, &key);
        self.cache.insert(key, value.clone());
        value
    }

    /// Whether a result for `key` is already cached.
    pub fn is_cached(&self, key: &K) -> bool {
        self.cache.contains_key(key)
    }

    /// Number of cached results.
    pub fn cached_len(&self) -> usize {
        self.cache.len()
    }
}

//! In-memory resolution cache.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use launchpath_core::CommandResolution;

/// Resolutions keyed by `cache_key(command, args)`.
///
/// Lives as long as its `Resolver`. Entries are never evicted; `clear` is the
/// only way to force re-resolution.
#[derive(Debug, Default)]
pub struct ResolutionCache {
    entries: Mutex<HashMap<String, CommandResolution>>,
}

impl ResolutionCache {
    pub fn new() -> Self {
        Self::default()
    }

    // A panic while holding the lock cannot leave a half-written entry, so a
    // poisoned map is still consistent.
    fn lock(&self) -> MutexGuard<'_, HashMap<String, CommandResolution>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn get(&self, key: &str) -> Option<CommandResolution> {
        self.lock().get(key).cloned()
    }

    /// Store a resolution, replacing any previous one for `key`.
    pub fn put(&self, key: impl Into<String>, resolution: CommandResolution) {
        self.lock().insert(key.into(), resolution);
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    /// Snapshot of every cached entry.
    pub fn entries(&self) -> HashMap<String, CommandResolution> {
        self.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use launchpath_core::cache_key;

    #[test]
    fn test_put_get_clear() {
        let cache = ResolutionCache::new();
        let args = vec!["-y".to_string(), "pkg".to_string()];
        let key = cache_key("npx", &args);

        assert!(cache.get(&key).is_none());

        let resolution = CommandResolution::direct("npx", args, Some("/usr/bin/npx".into()));
        cache.put(key.clone(), resolution.clone());
        assert_eq!(cache.get(&key), Some(resolution));
        assert_eq!(cache.len(), 1);

        cache.clear();
        assert!(cache.get(&key).is_none());
        assert!(cache.is_empty());
    }

    #[test]
    fn test_put_overwrites() {
        let cache = ResolutionCache::new();
        cache.put("x a", CommandResolution::unavailable("x", vec!["a".into()]));
        cache.put("x a", CommandResolution::direct("x", vec!["a".into()], None));

        assert!(cache.get("x a").unwrap().available);
        assert_eq!(cache.entries().len(), 1);
    }
}

//! Key/value adapter that never fails.
//!
//! Writes go to the primary [`KvBackend`]; when a write is refused the value
//! is kept in a process-local map instead. Entries in that map shadow the
//! primary backend until a later write to the same key succeeds or the key
//! is removed, so a read always observes the most recent write.

use std::collections::HashMap;

use tracing::{debug, warn};

use super::KvBackend;

pub struct SafeStorage<B: KvBackend> {
    primary: B,
    fallback: HashMap<String, String>,
}

impl<B: KvBackend> SafeStorage<B> {
    pub fn new(primary: B) -> Self {
        Self {
            primary,
            fallback: HashMap::new(),
        }
    }

    /// Read a key. Backend errors are treated as "absent".
    pub fn get(&self, key: &str) -> Option<String> {
        if let Some(value) = self.fallback.get(key) {
            return Some(value.clone());
        }
        match self.primary.get(key) {
            Ok(value) => value,
            Err(e) => {
                warn!(key, error = %e, "primary storage read failed");
                None
            }
        }
    }

    /// Write a key, falling back to memory when the primary backend refuses.
    pub fn set(&mut self, key: &str, value: &str) {
        match self.primary.set(key, value) {
            Ok(()) => {
                self.fallback.remove(key);
            }
            Err(e) => {
                warn!(key, error = %e, "primary storage write failed, keeping value in memory");
                self.fallback.insert(key.to_string(), value.to_string());
            }
        }
    }

    /// Remove a key from both layers. Primary failures are ignored.
    pub fn remove(&mut self, key: &str) {
        if let Err(e) = self.primary.remove(key) {
            debug!(key, error = %e, "primary storage remove failed");
        }
        self.fallback.remove(key);
    }

    /// Whether `key` is currently served from the in-memory fallback.
    pub fn is_degraded(&self, key: &str) -> bool {
        self.fallback.contains_key(key)
    }

    pub fn primary(&self) -> &B {
        &self.primary
    }

    pub fn into_primary(self) -> B {
        self.primary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StorageError;
    use crate::storage::MemoryBackend;

    /// Backend whose writes fail while `broken` is set.
    #[derive(Default)]
    struct Flaky {
        inner: MemoryBackend,
        broken: bool,
        fail_reads: bool,
    }

    impl KvBackend for Flaky {
        fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
            if self.fail_reads {
                return Err(StorageError::Unavailable("denied".into()));
            }
            self.inner.get(key)
        }

        fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
            if self.broken {
                return Err(StorageError::Unavailable("quota exceeded".into()));
            }
            self.inner.set(key, value)
        }

        fn remove(&mut self, key: &str) -> Result<(), StorageError> {
            if self.broken {
                return Err(StorageError::Unavailable("denied".into()));
            }
            self.inner.remove(key)
        }
    }

    #[test]
    fn healthy_backend_passthrough() {
        let mut storage = SafeStorage::new(MemoryBackend::new());
        storage.set("k", "v");
        assert_eq!(storage.get("k").as_deref(), Some("v"));
        assert!(!storage.is_degraded("k"));
        assert_eq!(storage.primary().get("k").unwrap().as_deref(), Some("v"));
    }

    #[test]
    fn failed_write_is_served_from_memory() {
        let mut storage = SafeStorage::new(Flaky {
            broken: true,
            ..Default::default()
        });
        storage.set("k", "v");
        assert_eq!(storage.get("k").as_deref(), Some("v"));
        assert!(storage.is_degraded("k"));
    }

    #[test]
    fn failed_write_shadows_stale_primary_value() {
        let mut storage = SafeStorage::new(Flaky::default());
        storage.set("k", "old");
        storage.primary.broken = true;
        storage.set("k", "new");
        assert_eq!(storage.get("k").as_deref(), Some("new"));

        storage.primary.broken = false;
        storage.set("k", "newest");
        assert!(!storage.is_degraded("k"));
        assert_eq!(storage.get("k").as_deref(), Some("newest"));
    }

    #[test]
    fn read_errors_become_absent() {
        let storage = SafeStorage::new(Flaky {
            fail_reads: true,
            ..Default::default()
        });
        assert!(storage.get("k").is_none());
    }

    #[test]
    fn remove_clears_memory_even_when_primary_fails() {
        let mut storage = SafeStorage::new(Flaky {
            broken: true,
            ..Default::default()
        });
        storage.set("k", "v");
        storage.remove("k");
        assert!(storage.get("k").is_none());
    }
}

//! Process-wide default fields appended to every log call
//!
//! The registry is copy-on-write: readers clone an `Arc` snapshot under a
//! short read lock and compose without holding it, writers rebuild the list
//! and swap it in under the write lock.
use crate::errors::{Error, Result};
use crate::value::Value;
use std::sync::{Arc, PoisonError, RwLock};

#[derive(Debug, Clone, PartialEq)]
pub struct PrefixEntry {
    pub key: String,
    pub value: Value,
}

#[derive(Debug, Default)]
pub struct PrefixRegistry {
    entries: RwLock<Arc<Vec<PrefixEntry>>>,
}

lazy_static! {
    static ref G_PREFIXES: PrefixRegistry = PrefixRegistry::new();
}

/// The registry consulted by the dispatch entry points.
pub fn global_prefixes() -> &'static PrefixRegistry {
    &G_PREFIXES
}

impl PrefixRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends alternating keys and values.
    ///
    /// An odd number of values is rejected and nothing is registered.
    /// Registering a key a second time replaces its default value but keeps
    /// the position of the first registration.
    pub fn register(&self, kvs: &[Value]) -> Result<()> {
        if kvs.len() % 2 != 0 {
            return Err(Error::OddPrefixPairs(kvs.len()));
        }
        if kvs.is_empty() {
            return Ok(());
        }
        let mut guard = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        let mut entries = Vec::clone(&guard);
        for pair in kvs.chunks_exact(2) {
            let key = pair[0].to_string();
            let value = pair[1].clone();
            if let Some(idx) = entries.iter().position(|e| e.key == key) {
                entries[idx].value = value;
            } else {
                entries.push(PrefixEntry { key, value });
            }
        }
        *guard = Arc::new(entries);
        Ok(())
    }

    pub(crate) fn snapshot(&self) -> Arc<Vec<PrefixEntry>> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::thread;

    fn keys(registry: &PrefixRegistry) -> Vec<String> {
        registry.snapshot().iter().map(|e| e.key.clone()).collect()
    }

    #[test]
    fn test_registration_order() {
        let registry = PrefixRegistry::new();
        registry
            .register(&["service".into(), "checkout".into(), "region".into(), "eu".into()])
            .unwrap();
        registry.register(&["version".into(), 3.into()]).unwrap();
        assert_eq!(keys(&registry), vec!["service", "region", "version"]);
    }

    #[test]
    fn test_reregistration_replaces_in_place() {
        let registry = PrefixRegistry::new();
        registry
            .register(&["a".into(), 1.into(), "b".into(), 2.into()])
            .unwrap();
        registry.register(&["a".into(), 3.into()]).unwrap();
        let snapshot = registry.snapshot();
        assert_eq!(
            *snapshot,
            vec![
                PrefixEntry {
                    key: "a".to_owned(),
                    value: Value::from(3)
                },
                PrefixEntry {
                    key: "b".to_owned(),
                    value: Value::from(2)
                },
            ]
        );
    }

    #[test]
    fn test_odd_registration_is_rejected() {
        let registry = PrefixRegistry::new();
        registry.register(&["a".into(), 1.into()]).unwrap();
        assert_eq!(
            registry.register(&["b".into(), 2.into(), "c".into()]),
            Err(Error::OddPrefixPairs(3))
        );
        assert_eq!(keys(&registry), vec!["a"]);
    }

    #[test]
    fn test_snapshot_is_stable_across_writes() {
        let registry = PrefixRegistry::new();
        registry.register(&["a".into(), 1.into()]).unwrap();
        let before = registry.snapshot();
        registry.register(&["b".into(), 2.into()]).unwrap();
        assert_eq!(before.len(), 1);
        assert_eq!(registry.snapshot().len(), 2);
    }

    #[test]
    fn test_concurrent_registration() {
        let registry = Arc::new(PrefixRegistry::new());
        let mut threads = Vec::new();
        for t in 0..8 {
            let registry = registry.clone();
            threads.push(thread::spawn(move || {
                for i in 0..64 {
                    registry
                        .register(&[format!("k{t}_{i}").into(), i.into()])
                        .unwrap();
                    let _ = registry.snapshot();
                }
            }));
        }
        for t in threads {
            t.join().unwrap();
        }
        assert_eq!(registry.snapshot().len(), 8 * 64);
    }
}

//! Keyed registry tables
//!
//! A [`RegistryTable<T>`] maps registry keys to shared values. Entries are
//! insert-if-absent: the first value stored under a key stays there for the
//! lifetime of the table. Tables are internally synchronized so that a
//! shared reference is enough to register from any thread.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::error::RegistryResult;
use crate::identifier::Identifier;
use crate::key::{Registrable, RegistryKey};

struct TableInner<T> {
    /// Location to position in `entries`
    index: HashMap<Identifier, usize>,
    /// Entries in insertion order
    entries: Vec<(RegistryKey<T>, Arc<T>)>,
}

/// A mapping from [`RegistryKey<T>`] to `Arc<T>`
pub struct RegistryTable<T: Registrable> {
    inner: RwLock<TableInner<T>>,
}

impl<T: Registrable> RegistryTable<T> {
    /// Create an empty table
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(TableInner {
                index: HashMap::new(),
                entries: Vec::new(),
            }),
        }
    }

    /// Tag of this table
    pub fn registry(&self) -> &'static str {
        T::REGISTRY
    }

    /// Derive the key for `location` in this table
    pub fn derive_key(&self, location: &Identifier) -> RegistryResult<RegistryKey<T>> {
        RegistryKey::derive(location)
    }

    /// Store `value` under `key` unless the key is already taken.
    ///
    /// Returns `true` if the value was inserted. An existing value is never
    /// replaced. The check and the insert happen under one write guard.
    pub fn insert_if_absent(&self, key: RegistryKey<T>, value: impl Into<Arc<T>>) -> bool {
        let mut inner = self.inner.write();
        if inner.index.contains_key(key.location()) {
            return false;
        }

        let position = inner.entries.len();
        inner.index.insert(key.location().clone(), position);
        inner.entries.push((key, value.into()));
        true
    }

    /// Look up the value stored under `key`
    pub fn get(&self, key: &RegistryKey<T>) -> Option<Arc<T>> {
        let inner = self.inner.read();
        inner
            .index
            .get(key.location())
            .map(|&position| Arc::clone(&inner.entries[position].1))
    }

    /// Check if a value is stored under `key`
    pub fn contains(&self, key: &RegistryKey<T>) -> bool {
        self.inner.read().index.contains_key(key.location())
    }

    /// Find the key a value was stored under, by identity
    pub fn key_of(&self, value: &Arc<T>) -> Option<RegistryKey<T>> {
        self.inner
            .read()
            .entries
            .iter()
            .find(|(_, stored)| Arc::ptr_eq(stored, value))
            .map(|(key, _)| key.clone())
    }

    /// All keys, in insertion order
    pub fn keys(&self) -> Vec<RegistryKey<T>> {
        self.inner.read().entries.iter().map(|(key, _)| key.clone()).collect()
    }

    /// All entries, in insertion order
    pub fn entries(&self) -> Vec<(RegistryKey<T>, Arc<T>)> {
        self.inner.read().entries.clone()
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.inner.read().entries.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.inner.read().entries.is_empty()
    }
}

impl<T: Registrable> Default for RegistryTable<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Registrable> fmt::Debug for RegistryTable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistryTable")
            .field("registry", &T::REGISTRY)
            .field("entries", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Debug, PartialEq)]
    struct Settings {
        sea_level: i32,
    }

    impl Registrable for Settings {
        const REGISTRY: &'static str = "test:settings";
    }

    fn key(text: &str) -> RegistryKey<Settings> {
        RegistryKey::derive(&Identifier::from(text)).unwrap()
    }

    #[test]
    fn test_insert_if_absent_keeps_first() {
        let table = RegistryTable::new();

        assert!(table.insert_if_absent(key("mod:a"), Settings { sea_level: 63 }));
        assert!(!table.insert_if_absent(key("mod:a"), Settings { sea_level: 32 }));

        assert_eq!(table.get(&key("mod:a")).unwrap().sea_level, 63);
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_get_absent_is_none() {
        let table: RegistryTable<Settings> = RegistryTable::new();
        assert!(table.get(&key("mod:missing")).is_none());
        assert!(table.is_empty());
    }

    #[test]
    fn test_insertion_order() {
        let table = RegistryTable::new();
        for (i, name) in ["mod:c", "mod:a", "mod:b"].iter().enumerate() {
            table.insert_if_absent(key(name), Settings { sea_level: i as i32 });
        }

        let order: Vec<_> = table.keys().iter().map(|k| k.location().to_string()).collect();
        assert_eq!(order, vec!["mod:c", "mod:a", "mod:b"]);
    }

    #[test]
    fn test_key_of_uses_identity() {
        let table = RegistryTable::new();
        let stored = Arc::new(Settings { sea_level: 63 });
        table.insert_if_absent(key("mod:a"), Arc::clone(&stored));

        assert_eq!(table.key_of(&stored), Some(key("mod:a")));

        let lookalike = Arc::new(Settings { sea_level: 63 });
        assert_eq!(table.key_of(&lookalike), None);
    }

    #[test]
    fn test_racing_inserts_store_once() {
        let table = RegistryTable::new();
        let wins = AtomicUsize::new(0);

        std::thread::scope(|scope| {
            for i in 0..8 {
                let table = &table;
                let wins = &wins;
                scope.spawn(move || {
                    if table.insert_if_absent(key("mod:contested"), Settings { sea_level: i }) {
                        wins.fetch_add(1, Ordering::SeqCst);
                    }
                });
            }
        });

        assert_eq!(wins.load(Ordering::SeqCst), 1);
        assert_eq!(table.len(), 1);
    }
}

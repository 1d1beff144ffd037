//! String-keyed container with shared identity, [`OsdMap`].

use std::cell::{Ref, RefCell};
use std::fmt;
use std::rc::Rc;

use indexmap::IndexMap;

use crate::Osd;

/// String-keyed mapping of [`Osd`] values.
///
/// An `OsdMap` is a handle: clones refer to the same entries. Insertion order
/// is kept so encoders produce stable, diffable output, but it carries no
/// meaning for equality.
#[derive(Clone, Default)]
pub struct OsdMap {
    entries: Rc<RefCell<IndexMap<String, Osd>>>,
}

impl OsdMap {
    /// Empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty map with room for `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Rc::new(RefCell::new(IndexMap::with_capacity(capacity))),
        }
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    /// True when the map has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    /// Returns the value under `key`, or `Osd::Undefined` when absent.
    pub fn get(&self, key: &str) -> Osd {
        self.try_get(key).unwrap_or_default()
    }

    /// Returns the value under `key`, or `None` when absent.
    pub fn try_get(&self, key: &str) -> Option<Osd> {
        self.entries.borrow().get(key).cloned()
    }

    /// True when `key` is present, even if its value is `Undefined`.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.borrow().contains_key(key)
    }

    /// Inserts or replaces the value under `key`, returning the previous one.
    pub fn insert(&self, key: impl Into<String>, value: impl Into<Osd>) -> Option<Osd> {
        self.entries.borrow_mut().insert(key.into(), value.into())
    }

    /// Removes `key`, returning its value. The order of the other entries is
    /// kept.
    pub fn remove(&self, key: &str) -> Option<Osd> {
        self.entries.borrow_mut().shift_remove(key)
    }

    /// Removes every entry. Other handles see the empty map.
    pub fn clear(&self) {
        self.entries.borrow_mut().clear();
    }

    /// Snapshot of the keys in insertion order.
    pub fn keys(&self) -> Vec<String> {
        self.entries.borrow().keys().cloned().collect()
    }

    /// Snapshot of the values in insertion order.
    pub fn values(&self) -> Vec<Osd> {
        self.entries.borrow().values().cloned().collect()
    }

    /// Snapshot of the entries in insertion order.
    pub fn entries(&self) -> Vec<(String, Osd)> {
        self.entries
            .borrow()
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    /// Shallow copy: a new backing store whose values are clones of this
    /// map's values. Nested maps and arrays stay shared with the original.
    pub fn copy(&self) -> OsdMap {
        Self {
            entries: Rc::new(RefCell::new(self.entries.borrow().clone())),
        }
    }

    /// True when both handles refer to the same backing store.
    pub fn ptr_eq(&self, other: &OsdMap) -> bool {
        Rc::ptr_eq(&self.entries, &other.entries)
    }

    pub(crate) fn borrow(&self) -> Ref<'_, IndexMap<String, Osd>> {
        self.entries.borrow()
    }
}

impl PartialEq for OsdMap {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other) || *self.entries.borrow() == *other.entries.borrow()
    }
}

impl fmt::Debug for OsdMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.entries.borrow().iter()).finish()
    }
}

impl<K: Into<String>, V: Into<Osd>> FromIterator<(K, V)> for OsdMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let entries = iter
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect::<IndexMap<String, Osd>>();
        Self {
            entries: Rc::new(RefCell::new(entries)),
        }
    }
}

//! Ordered container with shared identity, [`OsdArray`].

use std::cell::{Ref, RefCell};
use std::fmt;
use std::rc::Rc;

use crate::Osd;

/// Zero-based sequence of [`Osd`] values.
///
/// Like [`crate::OsdMap`], an `OsdArray` is a handle and clones share the
/// same elements. Unlike the map, positional access outside `0..len()` is a
/// programming error and panics; use [`OsdArray::get`] for a checked read.
#[derive(Clone, Default)]
pub struct OsdArray {
    items: Rc<RefCell<Vec<Osd>>>,
}

impl OsdArray {
    /// Empty array.
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty array with room for `capacity` elements.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Rc::new(RefCell::new(Vec::with_capacity(capacity))),
        }
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.items.borrow().len()
    }

    /// True when the array has no elements.
    pub fn is_empty(&self) -> bool {
        self.items.borrow().is_empty()
    }

    /// Returns the element at `index`, or `None` when out of range.
    pub fn get(&self, index: usize) -> Option<Osd> {
        self.items.borrow().get(index).cloned()
    }

    /// Returns the element at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()`.
    pub fn at(&self, index: usize) -> Osd {
        let items = self.items.borrow();
        match items.get(index) {
            Some(value) => value.clone(),
            None => out_of_range(index, items.len()),
        }
    }

    /// Replaces the element at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()`.
    pub fn set(&self, index: usize, value: impl Into<Osd>) {
        let mut items = self.items.borrow_mut();
        let len = items.len();
        match items.get_mut(index) {
            Some(slot) => *slot = value.into(),
            None => out_of_range(index, len),
        }
    }

    /// Appends `value`.
    pub fn push(&self, value: impl Into<Osd>) {
        self.items.borrow_mut().push(value.into());
    }

    /// Inserts `value` at `index`, shifting later elements right.
    ///
    /// # Panics
    ///
    /// Panics if `index > len()`.
    pub fn insert(&self, index: usize, value: impl Into<Osd>) {
        let mut items = self.items.borrow_mut();
        if index > items.len() {
            out_of_range(index, items.len());
        }
        items.insert(index, value.into());
    }

    /// Removes and returns the element at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()`.
    pub fn remove_at(&self, index: usize) -> Osd {
        let mut items = self.items.borrow_mut();
        if index >= items.len() {
            out_of_range(index, items.len());
        }
        items.remove(index)
    }

    /// Removes the first element equal to `value`.
    ///
    /// `value` may itself hold a handle to this array.
    pub fn remove(&self, value: &Osd) -> bool {
        // Comparing may borrow this array again, so search before mutating.
        match self.index_of(value) {
            Some(index) => {
                self.items.borrow_mut().remove(index);
                true
            }
            None => false,
        }
    }

    /// True when some element equals `value`.
    pub fn contains(&self, value: &Osd) -> bool {
        self.index_of(value).is_some()
    }

    /// Position of the first element equal to `value`.
    pub fn index_of(&self, value: &Osd) -> Option<usize> {
        self.items.borrow().iter().position(|item| item == value)
    }

    /// Clones every element into `dest` starting at `offset`.
    ///
    /// # Panics
    ///
    /// Panics if the elements do not fit in `dest[offset..]`.
    pub fn copy_to(&self, dest: &mut [Osd], offset: usize) {
        let items = self.items.borrow();
        dest[offset..offset + items.len()].clone_from_slice(&items);
    }

    /// Removes every element. Other handles see the empty array.
    pub fn clear(&self) {
        self.items.borrow_mut().clear();
    }

    /// Snapshot of the elements.
    pub fn to_vec(&self) -> Vec<Osd> {
        self.items.borrow().clone()
    }

    /// Shallow copy: a new backing store holding clones of the elements.
    /// Nested maps and arrays stay shared with the original.
    pub fn copy(&self) -> OsdArray {
        Self::from(self.to_vec())
    }

    /// True when both handles refer to the same backing store.
    pub fn ptr_eq(&self, other: &OsdArray) -> bool {
        Rc::ptr_eq(&self.items, &other.items)
    }

    pub(crate) fn borrow(&self) -> Ref<'_, Vec<Osd>> {
        self.items.borrow()
    }
}

fn out_of_range(index: usize, len: usize) -> ! {
    panic!("index {index} out of range for OSD array of length {len}")
}

impl PartialEq for OsdArray {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other) || *self.items.borrow() == *other.items.borrow()
    }
}

impl fmt::Debug for OsdArray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.items.borrow().iter()).finish()
    }
}

impl From<Vec<Osd>> for OsdArray {
    fn from(items: Vec<Osd>) -> Self {
        Self {
            items: Rc::new(RefCell::new(items)),
        }
    }
}

impl<T: Into<Osd>> FromIterator<T> for OsdArray {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from(iter.into_iter().map(Into::into).collect::<Vec<Osd>>())
    }
}

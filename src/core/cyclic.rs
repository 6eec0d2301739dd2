//! Cyclic parameter lists
//!
//! Row widths, elevation counts, inset flags, railing toggles, audiences and
//! offsets are all short lists that repeat over the rows of a tribune. Every
//! lookup goes through [`Cyclic`] so the `index % len` rule and the scalar
//! fallback for an empty list live in one place.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cyclic<T>(Vec<T>);

impl<T> Cyclic<T> {
    pub fn new(values: Vec<T>) -> Self {
        Self(values)
    }

    /// Element at `index % len`, or `None` when the list is empty
    pub fn get(&self, index: usize) -> Option<&T> {
        if self.0.is_empty() {
            None
        } else {
            self.0.get(index % self.0.len())
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.0.iter()
    }
}

impl<T: Copy> Cyclic<T> {
    /// Element at `index % len`, or `fallback` when the list is empty
    pub fn get_or(&self, index: usize, fallback: T) -> T {
        self.get(index).copied().unwrap_or(fallback)
    }
}

impl<T> Cyclic<Option<T>> {
    /// Resolve an optional per-row entry; absent lists and `None` slots both
    /// yield `None`.
    pub fn resolve(&self, index: usize) -> Option<&T> {
        self.get(index).and_then(Option::as_ref)
    }
}

impl<T> Default for Cyclic<T> {
    fn default() -> Self {
        Self(Vec::new())
    }
}

impl<T> From<Vec<T>> for Cyclic<T> {
    fn from(values: Vec<T>) -> Self {
        Self(values)
    }
}

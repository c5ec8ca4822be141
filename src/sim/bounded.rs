//! Capacity-bounded, append-only storage
//!
//! World collections are sized up front for the longest supported session.
//! Running out of room is a logic error, so [`Bounded::push`] reports it
//! loudly and panics instead of truncating.

use std::ops::{Deref, DerefMut};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A bounded collection was asked to grow past its limit
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} capacity exceeded: limit is {capacity}")]
pub struct CapacityError {
    /// Which collection overflowed
    pub kind: &'static str,
    pub capacity: usize,
}

/// Vec with a hard upper bound on its length
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bounded<T> {
    items: Vec<T>,
    capacity: usize,
    #[serde(skip, default)]
    kind: &'static str,
}

impl<T> Bounded<T> {
    /// Empty collection named `kind` holding at most `capacity` items
    pub fn new(kind: &'static str, capacity: usize) -> Self {
        Self {
            items: Vec::new(),
            capacity,
            kind,
        }
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.items.len() >= self.capacity
    }

    /// Append, or report overflow
    pub fn try_push(&mut self, item: T) -> Result<usize, CapacityError> {
        if self.is_full() {
            return Err(CapacityError {
                kind: self.kind,
                capacity: self.capacity,
            });
        }
        self.items.push(item);
        Ok(self.items.len() - 1)
    }

    /// Append and return the new index
    ///
    /// # Panics
    ///
    /// Panics with a [`CapacityError`] message when the collection is full.
    pub fn push(&mut self, item: T) -> usize {
        match self.try_push(item) {
            Ok(index) => index,
            Err(err) => {
                log::error!("{err}");
                panic!("{err}");
            }
        }
    }

    /// Move the last item to `index`, shifting the tail up by one
    pub fn rotate_last_to(&mut self, index: usize) {
        let len = self.items.len();
        debug_assert!(index < len);
        self.items[index..].rotate_right(1);
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}

impl<T> Deref for Bounded<T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        &self.items
    }
}

// Mutable access never changes the length
impl<T> DerefMut for Bounded<T> {
    fn deref_mut(&mut self) -> &mut [T] {
        &mut self.items
    }
}

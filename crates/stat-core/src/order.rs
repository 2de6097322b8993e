//! Priority-ordered container.
//!
//! A dense sequence kept in ascending priority order, with a deliberate
//! tie-break: among elements that share a priority, the most recently
//! inserted one comes first. The modifier engine relies on both halves of
//! that rule, so [`PriorityList::insert`] must not be swapped for a plain
//! sorted insert.

use std::rc::Rc;

/// Evaluation-order key. Lower values are evaluated first. Not unique.
pub type Priority = u32;

/// Anything that can be placed in a [`PriorityList`].
pub trait Prioritized {
    fn priority(&self) -> Priority;
}

impl<P: Prioritized + ?Sized> Prioritized for Rc<P> {
    fn priority(&self) -> Priority {
        (**self).priority()
    }
}

impl<P: Prioritized + ?Sized> Prioritized for Box<P> {
    fn priority(&self) -> Priority {
        (**self).priority()
    }
}

impl<P: Prioritized> Prioritized for &P {
    fn priority(&self) -> Priority {
        (**self).priority()
    }
}

/// A sequence ordered by ascending priority with LIFO tie-break.
///
/// Insertion scans from the front and places the new element immediately
/// before the first existing element whose priority is greater than or
/// equal to the new one. That single rule yields strict ascending order
/// across priorities and last-in-first-positioned order within a priority.
///
/// Insertion is O(n). Expected populations are tens of elements, so the
/// linear scan is cheaper in practice than maintaining anything cleverer.
#[derive(Clone, Debug)]
pub struct PriorityList<T: Prioritized> {
    items: Vec<T>,
}

impl<T: Prioritized> Default for PriorityList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Prioritized> PriorityList<T> {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Inserts `item` before the first element with priority >= its own.
    pub fn insert(&mut self, item: T) {
        let priority = item.priority();
        let index = self
            .items
            .iter()
            .position(|existing| existing.priority() >= priority)
            .unwrap_or(self.items.len());
        self.items.insert(index, item);
    }

    /// Removes every element matching `predicate`, returning how many.
    pub fn remove_where<F: FnMut(&T) -> bool>(&mut self, mut predicate: F) -> usize {
        let before = self.items.len();
        self.items.retain(|item| !predicate(item));
        before - self.items.len()
    }

    /// Removes and returns the element at `index`.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds.
    pub fn remove(&mut self, index: usize) -> T {
        self.items.remove(index)
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Front-to-back iteration, i.e. ascending priority. Double-ended, so
    /// `.rev()` walks descending.
    pub fn iter(&self) -> core::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }
}

impl<'a, T: Prioritized> IntoIterator for &'a PriorityList<T> {
    type Item = &'a T;
    type IntoIter = core::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// Sorts a slice into ascending priority order in place.
///
/// Standard stable sort: equal-priority elements keep their existing
/// relative order, with no LIFO guarantee. Use repeated [`PriorityList::insert`]
/// when the tie-break matters.
pub fn sort_by_priority<T: Prioritized>(items: &mut [T]) {
    items.sort_by_key(|item| item.priority());
}

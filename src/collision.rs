//! Category → live actors lookup.
//!
//! The index stores scheduler slot positions per category.  Slots are kept in
//! creation order, so the lowest position is always the oldest actor; that is
//! the tie-break when several actors overlap a query box.

use std::collections::HashMap;

use crate::entities::Category;

#[derive(Debug, Default)]
pub struct CollisionIndex {
    by_category: HashMap<Category, Vec<usize>>,
}

impl CollisionIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.by_category.clear();
    }

    /// Register a slot.  Slots must be inserted in increasing order.
    pub fn insert(&mut self, category: Category, slot: usize) {
        self.by_category.entry(category).or_default().push(slot);
    }

    pub fn slots(&self, category: Category) -> &[usize] {
        self.by_category.get(&category).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Oldest slot in any of `categories` accepted by `hit`.
    pub fn first_match(
        &self,
        categories: &[Category],
        mut hit: impl FnMut(usize) -> bool,
    ) -> Option<usize> {
        let mut best: Option<usize> = None;
        for &category in categories {
            for &slot in self.slots(category) {
                if best.is_some_and(|b| slot >= b) {
                    break;
                }
                if hit(slot) {
                    best = Some(slot);
                    break;
                }
            }
        }
        best
    }
}

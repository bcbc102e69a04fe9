//! Round-robin registry for spreading costly work across ticks
//!
//! An explicit, host-owned replacement for a global manager: registrants
//! live in one owned list and exactly one of them is handed out per tick.
//! Callers decide what "servicing" an item means.

/// Owned registry that yields one item per `advance` call, cycling in
/// insertion order.
#[derive(Debug, Clone, Default)]
pub struct RoundRobin<T> {
    items: Vec<T>,
    index: usize,
}

impl<T> RoundRobin<T> {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            index: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Advance the cursor and return the item whose turn it is. An empty
    /// registry yields `None`. The cursor pre-increments, so with more than
    /// one registrant a fresh registry hands out its second item first.
    pub fn advance(&mut self) -> Option<&mut T> {
        if self.items.is_empty() {
            self.index = 0;
            return None;
        }
        self.index += 1;
        if self.index >= self.items.len() {
            self.index = 0;
        }
        self.items.get_mut(self.index)
    }
}

impl<T: PartialEq> RoundRobin<T> {
    /// Register an item; re-adding an existing one is a no-op.
    pub fn add(&mut self, item: T) {
        if !self.items.contains(&item) {
            self.items.push(item);
        }
    }

    /// Drop the first matching item, if registered.
    pub fn remove(&mut self, item: &T) {
        if let Some(position) = self.items.iter().position(|existing| existing == item) {
            self.items.remove(position);
        }
    }
}

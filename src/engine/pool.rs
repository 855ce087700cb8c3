//! ExclusivityPool - ids claimed during a resolve pass

use ahash::AHashSet;
use std::hash::Hash;

/// Set of ids no other seat may take for the rest of the pass
#[derive(Debug, Clone)]
pub struct ExclusivityPool<T: Eq + Hash> {
    claimed: AHashSet<T>,
}

impl<T: Eq + Hash + Clone> ExclusivityPool<T> {
    pub fn new() -> Self {
        Self {
            claimed: AHashSet::new(),
        }
    }

    /// Claim an id, returns false if it was already claimed
    pub fn reserve(&mut self, id: T) -> bool {
        self.claimed.insert(id)
    }

    /// Give an id back, returns false if it was not claimed
    pub fn release(&mut self, id: &T) -> bool {
        self.claimed.remove(id)
    }

    pub fn contains(&self, id: &T) -> bool {
        self.claimed.contains(id)
    }

    pub fn len(&self) -> usize {
        self.claimed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.claimed.is_empty()
    }

    pub fn clear(&mut self) {
        self.claimed.clear();
    }
}

impl<T: Eq + Hash + Clone> Default for ExclusivityPool<T> {
    fn default() -> Self {
        Self::new()
    }
}

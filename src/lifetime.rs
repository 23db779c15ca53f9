//! View Lifetime
//!
//! Cancellation token tied to a view. Requests cannot be aborted
//! mid-flight, but once the owning view is disposed their results are
//! dropped instead of being written into stale state.

use std::cell::Cell;
use std::rc::Rc;

#[derive(Debug, Clone)]
pub struct Lifetime {
    alive: Rc<Cell<bool>>,
}

impl Lifetime {
    pub fn new() -> Self {
        Self {
            alive: Rc::new(Cell::new(true)),
        }
    }

    pub fn is_alive(&self) -> bool {
        self.alive.get()
    }

    /// Mark the owning view as gone; shared by every clone
    pub fn dispose(&self) {
        self.alive.set(false);
    }
}

impl Default for Lifetime {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dispose_is_shared_between_clones() {
        let lifetime = Lifetime::new();
        let handle = lifetime.clone();
        assert!(handle.is_alive());
        lifetime.dispose();
        assert!(!handle.is_alive());
    }
}

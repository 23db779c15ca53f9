//! Navigation Port
//!
//! Lets the core request a route change (e.g. forced redirect to `/login`
//! on 401) without knowing whether it runs in a browser or a terminal.

use std::cell::RefCell;

/// Performs navigation in the host environment
pub trait Navigator {
    fn navigate(&self, path: &str);
}

/// Navigator that only records requested paths
///
/// Used by the CLI (which reports redirects after each command) and by tests.
#[derive(Debug, Default)]
pub struct HistoryNavigator {
    history: RefCell<Vec<String>>,
}

impl HistoryNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Most recently requested path
    pub fn current(&self) -> Option<String> {
        self.history.borrow().last().cloned()
    }

    pub fn history(&self) -> Vec<String> {
        self.history.borrow().clone()
    }

    pub fn visited(&self, path: &str) -> bool {
        self.history.borrow().iter().any(|p| p == path)
    }
}

impl Navigator for HistoryNavigator {
    fn navigate(&self, path: &str) {
        tracing::debug!(path = %path, "Navigation requested");
        self.history.borrow_mut().push(path.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_history_records_in_order() {
        let nav = HistoryNavigator::new();
        assert_eq!(nav.current(), None);
        nav.navigate("/login");
        nav.navigate("/dashboard");
        assert_eq!(nav.current().as_deref(), Some("/dashboard"));
        assert!(nav.visited("/login"));
        assert_eq!(nav.history().len(), 2);
    }
}

//! Busy buttons
//!
//! A control is busy (disabled, spinner shown) exactly while a
//! [`BusyGuard`] for it is alive.

use std::cell::RefCell;
use std::collections::HashSet;

use super::dialog::Control;

#[derive(Debug, Default)]
pub struct BusySet {
    controls: RefCell<HashSet<Control>>,
}

impl BusySet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn acquire(&self, control: Control) -> BusyGuard<'_> {
        self.controls.borrow_mut().insert(control.clone());
        BusyGuard { set: self, control }
    }

    pub fn is_busy(&self, control: &Control) -> bool {
        self.controls.borrow().contains(control)
    }

    pub fn any(&self) -> bool {
        !self.controls.borrow().is_empty()
    }
}

pub struct BusyGuard<'a> {
    set: &'a BusySet,
    control: Control,
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.set.controls.borrow_mut().remove(&self.control);
    }
}

/// Render state of a button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ButtonState {
    pub disabled: bool,
    pub spinner: bool,
}

impl ButtonState {
    /// `disabled` is the button's own state when idle
    pub fn resolve(set: &BusySet, control: &Control, disabled: bool) -> Self {
        let busy = set.is_busy(control);
        Self {
            disabled: disabled || busy,
            spinner: busy,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guard_releases_on_drop() {
        let set = BusySet::new();
        {
            let _guard = set.acquire(Control::AddButton);
            assert!(set.is_busy(&Control::AddButton));
            assert_eq!(
                ButtonState::resolve(&set, &Control::AddButton, false),
                ButtonState {
                    disabled: true,
                    spinner: true
                }
            );
        }
        assert!(!set.any());
        assert_eq!(
            ButtonState::resolve(&set, &Control::AddButton, false),
            ButtonState::default()
        );
    }

    #[test]
    fn test_originally_disabled_button_stays_disabled() {
        let set = BusySet::new();
        let control = Control::DeleteButton("1".into());
        drop(set.acquire(control.clone()));
        assert!(ButtonState::resolve(&set, &control, true).disabled);
    }
}

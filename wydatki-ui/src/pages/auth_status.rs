//! Reactive view of the core `AuthStatus` for the session forms.

use std::rc::Rc;

use leptos::*;

use wydatki::session::{AuthState, AuthStatus};

#[derive(Clone, Copy)]
pub struct AuthSignals {
    /// Bumped around every auth call
    pub revision: RwSignal<u64>,
    pub status: Signal<AuthStatus>,
}

impl AuthSignals {
    pub fn new(auth: Rc<AuthState>) -> Self {
        let revision = create_rw_signal(0u64);
        let status = Signal::derive(move || {
            revision.get();
            auth.status()
        });
        Self { revision, status }
    }

    pub fn busy(&self) -> Signal<bool> {
        let status = self.status;
        Signal::derive(move || status.with(|s| s.loading))
    }

    /// Error attached to one input
    pub fn field(&self, name: &'static str) -> Signal<Option<String>> {
        let status = self.status;
        Signal::derive(move || {
            status.with(|s| match s.field.as_deref() {
                Some(field) if field == name => s.error.clone(),
                _ => None,
            })
        })
    }

    /// Error not tied to any of the rendered `inputs`
    pub fn general(&self, inputs: &'static [&'static str]) -> Signal<Option<String>> {
        let status = self.status;
        Signal::derive(move || {
            status.with(|s| match s.field.as_deref() {
                Some(field) if inputs.contains(&field) => None,
                _ => s.error.clone(),
            })
        })
    }

    pub fn notice(&self) -> Signal<Option<String>> {
        let status = self.status;
        Signal::derive(move || status.with(|s| s.notice.clone()))
    }
}

//! Global Application State
//!
//! The core objects shared by every page plus the reactive signals the
//! views subscribe to. Core state lives in plain `RefCell`s, so pages keep
//! a revision signal and bump it around every core call with [`tracked`].

use std::future::Future;
use std::rc::Rc;

use leptos::*;

use wydatki::api::ApiClient;
use wydatki::categories::CategoryStore;
use wydatki::clock::Clock;
use wydatki::session::{AuthState, TokenStore};

use super::host::{BrowserClock, BrowserNavigator, LocalStorage};
use crate::api::{get_api_base, FetchTransport};

/// Global application state provided to all components
#[derive(Clone)]
pub struct GlobalState {
    pub api: Rc<ApiClient>,
    pub auth: Rc<AuthState>,
    /// Category cache shared by the category and expense pages
    pub categories: Rc<CategoryStore>,
    pub clock: Rc<dyn Clock>,
    /// Mirrors the presence of the session token
    pub authenticated: RwSignal<bool>,
    /// Route requested by the core, consumed by the navigation bridge
    pub pending_route: RwSignal<Option<String>>,
    /// Error message to display
    pub error: RwSignal<Option<String>>,
    /// Success message (for toasts)
    pub success: RwSignal<Option<String>>,
}

/// Provide global state to the component tree
pub fn provide_global_state() {
    let pending_route = create_rw_signal(None);
    let tokens = TokenStore::new(Rc::new(LocalStorage));
    let api = Rc::new(ApiClient::new(
        get_api_base(),
        Rc::new(FetchTransport),
        tokens,
        Rc::new(BrowserNavigator::new(pending_route)),
    ));
    let auth = Rc::new(AuthState::new(api.clone()));

    let state = GlobalState {
        authenticated: create_rw_signal(auth.is_authenticated()),
        categories: Rc::new(CategoryStore::new(api.clone())),
        clock: Rc::new(BrowserClock),
        api,
        auth,
        pending_route,
        error: create_rw_signal(None),
        success: create_rw_signal(None),
    };

    provide_context(state);
}

/// Fetch the global state from context
pub fn use_global_state() -> GlobalState {
    use_context::<GlobalState>().expect("GlobalState not found")
}

impl GlobalState {
    /// Re-read the token after anything that may have set or cleared it
    pub fn refresh_session(&self) {
        self.authenticated.set(self.auth.is_authenticated());
    }

    /// Show a success message (auto-clears after timeout)
    pub fn show_success(&self, message: &str) {
        self.success.set(Some(message.to_string()));

        let success_signal = self.success;
        gloo_timers::callback::Timeout::new(3000, move || {
            success_signal.set(None);
        })
        .forget();
    }

    /// Show an error message (auto-clears after timeout)
    pub fn show_error(&self, message: &str) {
        self.error.set(Some(message.to_string()));

        let error_signal = self.error;
        gloo_timers::callback::Timeout::new(5000, move || {
            error_signal.set(None);
        })
        .forget();
    }
}

/// Run a core future and bump `revision` once it first suspends and again
/// when it completes, so views see both the in-flight and the final state.
///
/// The signal may already be disposed when the page unmounts mid-request.
pub async fn tracked<F: Future>(revision: RwSignal<u64>, fut: F) -> F::Output {
    let (output, ()) = futures_util::join!(fut, async move {
        bump(revision);
    });
    bump(revision);
    output
}

pub fn bump(revision: RwSignal<u64>) {
    let _ = revision.try_update(|n| *n += 1);
}

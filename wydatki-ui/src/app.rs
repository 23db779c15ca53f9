//! App Root Component
//!
//! Main application component with routing, the route guard and global
//! providers.

use leptos::*;
use leptos_router::*;

use wydatki::session::guard::{self, Resolution, HOME_PATH};

use crate::components::{Loading, Nav, Toast};
use crate::pages::{
    Categories, Dashboard, Expenses, Login, NewPassword, Onboarding, Register, ResetPassword,
    Settings,
};
use crate::state::{provide_global_state, use_global_state};

/// Root application component
#[component]
pub fn App() -> impl IntoView {
    // Provide global state to all components
    provide_global_state();

    view! {
        <Router>
            <NavigationBridge />

            <div class="min-h-screen bg-gray-900 text-white flex flex-col">
                // Navigation header
                <Nav />

                // Main content area
                <main class="flex-1 container mx-auto px-4 py-8">
                    <Routes>
                        <Route path="/" view=|| view! { <Loading /> } />
                        <Route path="/login" view=Login />
                        <Route path="/register" view=Register />
                        <Route path="/reset-password" view=ResetPassword />
                        <Route path="/new-password" view=NewPassword />
                        <Route path="/settings/account" view=|| view! { <Protected><Settings /></Protected> } />
                        <Route path="/onboarding" view=|| view! { <Protected><Onboarding /></Protected> } />
                        <Route path="/dashboard" view=|| view! { <Protected><Dashboard /></Protected> } />
                        <Route path="/categories" view=|| view! { <Protected><Categories /></Protected> } />
                        <Route path="/expenses" view=|| view! { <Protected><Expenses /></Protected> } />
                        <Route path="/*any" view=NotFound />
                    </Routes>
                </main>

                // Toast notifications
                <Toast />
            </div>
        </Router>
    }
}

/// Applies the route guard on every location change, sets the document
/// title and performs navigation requested by the core.
#[component]
fn NavigationBridge() -> impl IntoView {
    let state = use_global_state();
    let navigate = use_navigate();
    let location = use_location();

    let requested = navigate.clone();
    let bridge_state = state.clone();
    create_effect(move |_| {
        if let Some(path) = bridge_state.pending_route.get() {
            bridge_state.pending_route.set(None);
            bridge_state.refresh_session();
            requested(&path, Default::default());
        }
    });

    create_effect(move |_| {
        let path = location.pathname.get();
        let search = location.search.get();
        let query = search.trim_start_matches('?');
        let full_path = if query.is_empty() {
            path
        } else {
            format!("{}?{}", path, query)
        };

        match guard::resolve(&full_path, state.authenticated.get()) {
            Resolution::Redirect(target) => {
                navigate(
                    &target,
                    NavigateOptions {
                        replace: true,
                        ..Default::default()
                    },
                );
            }
            Resolution::Render { title, .. } => {
                document().set_title(title);
            }
        }
    });
}

/// Renders its children only while a session exists
#[component]
fn Protected(children: ChildrenFn) -> impl IntoView {
    let authenticated = use_global_state().authenticated;

    view! {
        {move || {
            if authenticated.get() {
                children().into_view()
            } else {
                view! { <Loading /> }.into_view()
            }
        }}
    }
}

/// 404 Not Found page
#[component]
fn NotFound() -> impl IntoView {
    view! {
        <div class="flex flex-col items-center justify-center min-h-[60vh] text-center">
            <div class="text-6xl mb-4">"🔍"</div>
            <h1 class="text-3xl font-bold mb-2">"Nie znaleziono strony"</h1>
            <p class="text-gray-400 mb-6">"Strona, której szukasz, nie istnieje."</p>
            <A
                href=HOME_PATH
                class="px-6 py-3 bg-primary-600 hover:bg-primary-700 rounded-lg font-medium transition-colors"
            >
                "Wróć do dashboardu"
            </A>
        </div>
    }
}

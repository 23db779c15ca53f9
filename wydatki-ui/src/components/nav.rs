//! Navigation Component
//!
//! Header navigation bar; protected links only show with a session.

use leptos::*;
use leptos_router::*;

use crate::state::{tracked, use_global_state};

/// Navigation header component
#[component]
pub fn Nav() -> impl IntoView {
    let state = use_global_state();
    let authenticated = state.authenticated;
    let revision = create_rw_signal(0u64);

    let logout = move |_| {
        let state = state.clone();
        spawn_local(async move {
            tracked(revision, state.auth.logout()).await;
            state.refresh_session();
        });
    };

    view! {
        <nav class="bg-gray-800 border-b border-gray-700">
            <div class="container mx-auto px-4">
                <div class="flex items-center justify-between h-16">
                    // Logo and brand
                    <A href="/dashboard" class="flex items-center space-x-3">
                        <span class="text-2xl">"💸"</span>
                        <span class="text-xl font-bold text-white">"Wydatki"</span>
                    </A>

                    {move || {
                        if authenticated.get() {
                            view! {
                                <div class="flex items-center space-x-1">
                                    <NavLink href="/dashboard" label="Dashboard" />
                                    <NavLink href="/expenses" label="Wydatki" />
                                    <NavLink href="/categories" label="Kategorie" />
                                    <NavLink href="/settings/account" label="Konto" />
                                    <button
                                        on:click=logout.clone()
                                        class="px-4 py-2 rounded-lg text-gray-300 hover:text-white
                                               hover:bg-gray-700 transition-colors"
                                    >
                                        "Wyloguj"
                                    </button>
                                </div>
                            }.into_view()
                        } else {
                            view! {
                                <div class="flex items-center space-x-1">
                                    <NavLink href="/login" label="Zaloguj" />
                                    <NavLink href="/register" label="Zarejestruj" />
                                </div>
                            }.into_view()
                        }
                    }}
                </div>
            </div>
        </nav>
    }
}

/// Individual navigation link
#[component]
fn NavLink(
    href: &'static str,
    label: &'static str,
) -> impl IntoView {
    view! {
        <A
            href=href
            class="px-4 py-2 rounded-lg text-gray-300 hover:text-white hover:bg-gray-700 transition-colors"
            active_class="bg-gray-700 text-white"
        >
            {label}
        </A>
    }
}

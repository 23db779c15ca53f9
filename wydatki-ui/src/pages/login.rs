//! Login Page

use leptos::*;
use leptos_router::*;

use wydatki::session::guard;

use super::auth_status::AuthSignals;
use crate::components::{FormError, SubmitButton, TextField};
use crate::state::{tracked, use_global_state};

const INPUTS: &[&str] = &["email", "password"];

#[component]
pub fn Login() -> impl IntoView {
    let state = use_global_state();
    let signals = AuthSignals::new(state.auth.clone());
    let query = use_query_map();
    let navigate = use_navigate();

    let email = create_rw_signal(String::new());
    let password = create_rw_signal(String::new());

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();

        let state = state.clone();
        let navigate = navigate.clone();
        spawn_local(async move {
            let (email, password) = (email.get_untracked(), password.get_untracked());
            if tracked(signals.revision, state.auth.login(&email, &password)).await {
                state.refresh_session();
                let redirect = query.with_untracked(|q| q.get("redirect").cloned());
                navigate(&guard::post_login_target(redirect.as_deref()), Default::default());
            }
        });
    };

    view! {
        <div class="max-w-md mx-auto space-y-6">
            <div>
                <h1 class="text-3xl font-bold">"Logowanie"</h1>
                <p class="text-gray-400 mt-1">"Zaloguj się, aby zobaczyć swoje wydatki"</p>
            </div>

            <form on:submit=on_submit class="bg-gray-800 rounded-xl p-6 space-y-4" novalidate>
                <FormError message=signals.general(INPUTS) />
                <TextField
                    id="email"
                    label="Email"
                    input_type="email"
                    autocomplete="email"
                    value=email
                    error=signals.field("email")
                />
                <TextField
                    id="password"
                    label="Hasło"
                    input_type="password"
                    autocomplete="current-password"
                    value=password
                    error=signals.field("password")
                />
                <SubmitButton label="Zaloguj się" busy=signals.busy() />
            </form>

            <div class="flex justify-between text-sm text-gray-400">
                <A href="/reset-password" class="hover:text-white">"Nie pamiętasz hasła?"</A>
                <A href="/register" class="hover:text-white">"Załóż konto"</A>
            </div>
        </div>
    }
}

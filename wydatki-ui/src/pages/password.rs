//! Password Reset Pages
//!
//! `/reset-password` asks for the reset link, `/new-password?token=...`
//! sets the new password.

use leptos::*;
use leptos_router::*;

use super::auth_status::AuthSignals;
use crate::components::{FormError, SubmitButton, TextField};
use crate::state::{tracked, use_global_state};

#[component]
pub fn ResetPassword() -> impl IntoView {
    let state = use_global_state();
    let signals = AuthSignals::new(state.auth.clone());
    let email = create_rw_signal(String::new());

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();

        let state = state.clone();
        spawn_local(async move {
            let email = email.get_untracked();
            tracked(signals.revision, state.auth.request_password_reset(&email)).await;
        });
    };

    let notice = signals.notice();

    view! {
        <div class="max-w-md mx-auto space-y-6">
            <div>
                <h1 class="text-3xl font-bold">"Reset hasła"</h1>
                <p class="text-gray-400 mt-1">"Wyślemy link do ustawienia nowego hasła"</p>
            </div>

            {move || notice.get().map(|msg| view! {
                <div role="status" class="bg-green-900/40 border border-green-700 text-green-300 rounded-lg px-4 py-3 text-sm">
                    {msg}
                </div>
            })}

            <form on:submit=on_submit class="bg-gray-800 rounded-xl p-6 space-y-4" novalidate>
                <FormError message=signals.general(&["email"]) />
                <TextField
                    id="email"
                    label="Email"
                    input_type="email"
                    autocomplete="email"
                    value=email
                    error=signals.field("email")
                />
                <SubmitButton label="Wyślij link" busy=signals.busy() />
            </form>

            <A href="/login" class="text-sm text-gray-400 hover:text-white">"Wróć do logowania"</A>
        </div>
    }
}

#[component]
pub fn NewPassword() -> impl IntoView {
    let state = use_global_state();
    let signals = AuthSignals::new(state.auth.clone());
    let query = use_query_map();
    let navigate = use_navigate();

    let password = create_rw_signal(String::new());
    let confirm = create_rw_signal(String::new());

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();

        let state = state.clone();
        let navigate = navigate.clone();
        let token = query.with_untracked(|q| q.get("token").cloned().unwrap_or_default());
        spawn_local(async move {
            let password = password.get_untracked();
            let confirm = confirm.get_untracked();
            let reset = state.auth.confirm_password_reset(&token, &password, &confirm);
            if tracked(signals.revision, reset).await {
                if let Some(notice) = state.auth.status().notice {
                    state.show_success(&notice);
                }
                navigate("/login", Default::default());
            }
        });
    };

    view! {
        <div class="max-w-md mx-auto space-y-6">
            <div>
                <h1 class="text-3xl font-bold">"Nowe hasło"</h1>
                <p class="text-gray-400 mt-1">"Ustaw nowe hasło do konta"</p>
            </div>

            <form on:submit=on_submit class="bg-gray-800 rounded-xl p-6 space-y-4" novalidate>
                <FormError message=signals.general(&["password", "passwordConfirm"]) />
                <TextField
                    id="password"
                    label="Nowe hasło"
                    input_type="password"
                    autocomplete="new-password"
                    value=password
                    error=signals.field("password")
                />
                <TextField
                    id="password-confirm"
                    label="Powtórz hasło"
                    input_type="password"
                    autocomplete="new-password"
                    value=confirm
                    error=signals.field("passwordConfirm")
                />
                <SubmitButton label="Zapisz hasło" busy=signals.busy() />
            </form>
        </div>
    }
}

//! Registration Page

use leptos::*;
use leptos_router::*;

use super::auth_status::AuthSignals;
use crate::components::{FormError, SubmitButton, TextField};
use crate::state::{tracked, use_global_state};

const INPUTS: &[&str] = &["email", "password", "passwordConfirm"];

#[component]
pub fn Register() -> impl IntoView {
    let state = use_global_state();
    let signals = AuthSignals::new(state.auth.clone());
    let navigate = use_navigate();

    let email = create_rw_signal(String::new());
    let password = create_rw_signal(String::new());
    let confirm = create_rw_signal(String::new());

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();

        let state = state.clone();
        let navigate = navigate.clone();
        spawn_local(async move {
            let email = email.get_untracked();
            let password = password.get_untracked();
            let confirm = confirm.get_untracked();
            let register = state.auth.register(&email, &password, &confirm);
            if tracked(signals.revision, register).await {
                state.refresh_session();
                navigate("/onboarding", Default::default());
            }
        });
    };

    view! {
        <div class="max-w-md mx-auto space-y-6">
            <div>
                <h1 class="text-3xl font-bold">"Rejestracja"</h1>
                <p class="text-gray-400 mt-1">"Utwórz konto i zacznij śledzić wydatki"</p>
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
                <SubmitButton label="Zarejestruj się" busy=signals.busy() />
            </form>

            <p class="text-sm text-gray-400">
                "Masz już konto? "
                <A href="/login" class="hover:text-white underline">"Zaloguj się"</A>
            </p>
        </div>
    }
}

//! Account Settings Page
//!
//! Password change and client configuration.

use leptos::*;

use super::auth_status::AuthSignals;
use crate::api;
use crate::components::{FormError, SubmitButton, TextField};
use crate::state::{tracked, use_global_state};

const INPUTS: &[&str] = &["currentPassword", "newPassword", "passwordConfirm"];

/// Settings page component
#[component]
pub fn Settings() -> impl IntoView {
    view! {
        <div class="space-y-8 max-w-2xl">
            // Header
            <div>
                <h1 class="text-3xl font-bold">"Ustawienia konta"</h1>
                <p class="text-gray-400 mt-1">"Hasło i połączenie z serwerem"</p>
            </div>

            <ChangePassword />

            <ApiSettings />

            <AboutSection />
        </div>
    }
}

#[component]
fn ChangePassword() -> impl IntoView {
    let state = use_global_state();
    let signals = AuthSignals::new(state.auth.clone());

    let current = create_rw_signal(String::new());
    let new_password = create_rw_signal(String::new());
    let confirm = create_rw_signal(String::new());

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();

        let state = state.clone();
        spawn_local(async move {
            let current_value = current.get_untracked();
            let new_value = new_password.get_untracked();
            let confirm_value = confirm.get_untracked();
            let change = state
                .auth
                .change_password(&current_value, &new_value, &confirm_value);
            if tracked(signals.revision, change).await {
                current.set(String::new());
                new_password.set(String::new());
                confirm.set(String::new());
                if let Some(notice) = state.auth.status().notice {
                    state.show_success(&notice);
                }
            }
        });
    };

    view! {
        <section class="bg-gray-800 rounded-xl p-6">
            <h2 class="text-xl font-semibold mb-4">"Zmiana hasła"</h2>

            <form on:submit=on_submit class="space-y-4" novalidate>
                <FormError message=signals.general(INPUTS) />
                <TextField
                    id="current-password"
                    label="Obecne hasło"
                    input_type="password"
                    autocomplete="current-password"
                    value=current
                    error=signals.field("currentPassword")
                />
                <TextField
                    id="new-password"
                    label="Nowe hasło"
                    input_type="password"
                    autocomplete="new-password"
                    value=new_password
                    error=signals.field("newPassword")
                />
                <TextField
                    id="password-confirm"
                    label="Powtórz nowe hasło"
                    input_type="password"
                    autocomplete="new-password"
                    value=confirm
                    error=signals.field("passwordConfirm")
                />
                <SubmitButton label="Zmień hasło" busy=signals.busy() />
            </form>
        </section>
    }
}

/// API connection settings
#[component]
fn ApiSettings() -> impl IntoView {
    let state = use_global_state();
    let api_url = create_rw_signal(api::get_api_base());

    let save_url = move |_| {
        api::set_api_base(&api_url.get());
        state.show_success("Adres API zapisany. Odśwież stronę, aby go użyć.");
    };

    view! {
        <section class="bg-gray-800 rounded-xl p-6">
            <h2 class="text-xl font-semibold mb-4">"Połączenie z API"</h2>

            <label for="api-url" class="block text-sm text-gray-400 mb-2">"Adres API"</label>
            <div class="flex space-x-2">
                <input
                    id="api-url"
                    type="text"
                    prop:value=move || api_url.get()
                    on:input=move |ev| api_url.set(event_target_value(&ev))
                    class="flex-1 bg-gray-700 rounded-lg px-4 py-3
                           border border-gray-600 focus:border-primary-500 focus:outline-none"
                />
                <button
                    on:click=save_url
                    class="px-4 py-3 bg-primary-600 hover:bg-primary-700
                           rounded-lg font-medium transition-colors"
                >
                    "Zapisz"
                </button>
            </div>
            <p class="text-sm text-gray-500 mt-2">
                {format!("Domyślnie: {}", api::DEFAULT_API_BASE)}
            </p>
        </section>
    }
}

/// About section
#[component]
fn AboutSection() -> impl IntoView {
    view! {
        <section class="bg-gray-800 rounded-xl p-6">
            <h2 class="text-xl font-semibold mb-4">"O aplikacji"</h2>
            <div class="space-y-2 text-gray-400">
                <p>"Wydatki " {env!("CARGO_PKG_VERSION")}</p>
                <p>"Osobisty rejestr wydatków z tygodniowym podsumowaniem i poradami AI."</p>
            </div>
        </section>
    }
}

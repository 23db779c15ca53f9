//! Form Components
//!
//! Labelled inputs with inline error messages.

use leptos::*;

/// Text input bound to a signal, with its error underneath
#[component]
pub fn TextField(
    id: &'static str,
    label: &'static str,
    #[prop(default = "text")]
    input_type: &'static str,
    #[prop(default = "")]
    autocomplete: &'static str,
    value: RwSignal<String>,
    #[prop(into)]
    error: Signal<Option<String>>,
) -> impl IntoView {
    let error_id = format!("{}-error", id);
    let described_by = error_id.clone();

    view! {
        <div>
            <label for=id class="block text-sm text-gray-400 mb-2">{label}</label>
            <input
                id=id
                type=input_type
                autocomplete=autocomplete
                prop:value=move || value.get()
                on:input=move |ev| value.set(event_target_value(&ev))
                aria-invalid=move || if error.get().is_some() { "true" } else { "false" }
                aria-describedby=move || error.get().map(|_| described_by.clone())
                class="w-full bg-gray-700 rounded-lg px-4 py-3
                       border border-gray-600 focus:border-primary-500 focus:outline-none"
            />
            {move || error.get().map(|msg| view! {
                <p id=error_id.clone() class="text-sm text-red-400 mt-1">{msg}</p>
            })}
        </div>
    }
}

/// Form-level error banner
#[component]
pub fn FormError(
    #[prop(into)]
    message: Signal<Option<String>>,
) -> impl IntoView {
    view! {
        {move || message.get().map(|msg| view! {
            <div role="alert" class="bg-red-900/40 border border-red-700 text-red-300 rounded-lg px-4 py-3 text-sm">
                {msg}
            </div>
        })}
    }
}

/// Primary submit button with a spinner while `busy`
#[component]
pub fn SubmitButton(
    label: &'static str,
    #[prop(into)]
    busy: Signal<bool>,
    #[prop(optional, into)]
    disabled: Option<Signal<bool>>,
) -> impl IntoView {
    let disabled = move || busy.get() || disabled.map(|d| d.get()).unwrap_or(false);

    view! {
        <button
            type="submit"
            disabled=disabled
            aria-busy=move || busy.get().to_string()
            class="w-full bg-primary-600 hover:bg-primary-700 disabled:bg-gray-600
                   disabled:cursor-not-allowed rounded-lg py-3 font-semibold
                   transition-colors flex items-center justify-center space-x-2"
        >
            {move || busy.get().then(|| view! { <div class="loading-spinner w-5 h-5" /> })}
            <span>{label}</span>
        </button>
    }
}

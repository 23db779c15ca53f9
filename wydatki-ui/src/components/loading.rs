//! Loading Component
//!
//! Loading spinners.

use leptos::*;

/// Block loading spinner
#[component]
pub fn Loading(
    #[prop(default = "Ładowanie...")]
    label: &'static str,
) -> impl IntoView {
    view! {
        <div class="flex items-center justify-center py-12" role="status">
            <div class="loading-spinner w-8 h-8" aria-hidden="true" />
            <span class="sr-only">{label}</span>
        </div>
    }
}

/// Inline loading spinner
#[component]
pub fn InlineLoading() -> impl IntoView {
    view! {
        <span class="inline-block loading-spinner w-4 h-4" aria-hidden="true" />
    }
}

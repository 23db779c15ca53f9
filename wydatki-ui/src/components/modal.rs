//! Modal Component
//!
//! Overlay with dialog semantics. Which dialog is open, where focus goes
//! and how keys behave is decided by the core page controller; this only
//! renders it.

use leptos::*;

#[component]
pub fn Modal(
    /// Id of the heading that labels the dialog
    labelled_by: &'static str,
    #[prop(default = "dialog")]
    role: &'static str,
    on_keydown: impl Fn(web_sys::KeyboardEvent) + 'static,
    children: Children,
) -> impl IntoView {
    view! {
        <div class="fixed inset-0 z-40 bg-black/60 flex items-center justify-center">
            <div
                role=role
                aria-modal="true"
                aria-labelledby=labelled_by
                on:keydown=on_keydown
                class="bg-gray-800 rounded-xl p-6 w-full max-w-md shadow-xl space-y-4"
            >
                {children()}
            </div>
        </div>
    }
}

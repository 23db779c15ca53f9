//! Wydatki
//!
//! Expense tracker frontend built with Leptos (WASM).
//!
//! # Features
//!
//! - Login, registration and password reset
//! - Onboarding category picker
//! - Weekly dashboard with AI tips
//! - Category management with accessible dialogs
//! - Expense list with filters
//!
//! # Architecture
//!
//! This is a client-side rendered (CSR) Leptos application that compiles to
//! WebAssembly. All state and request logic lives in the `wydatki` core
//! crate; this crate supplies the browser ports (fetch, localStorage,
//! router navigation, timers) and renders the core state.

use leptos::*;

mod api;
mod app;
mod components;
mod logging;
mod pages;
mod state;

fn main() {
    // Set up panic hook for better error messages in WASM
    console_error_panic_hook::set_once();
    logging::init();

    mount_to_body(|| view! { <app::App /> });
}

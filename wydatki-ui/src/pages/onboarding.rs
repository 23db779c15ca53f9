//! Onboarding Page
//!
//! First-run picker for up to five suggested categories.

use std::rc::Rc;

use leptos::*;

use wydatki::lifetime::Lifetime;
use wydatki::onboarding::{SuggestionPicker, SuggestionView, MAX_SELECTION};

use crate::components::Loading;
use crate::state::{bump, tracked, use_global_state};

#[component]
pub fn Onboarding() -> impl IntoView {
    let state = use_global_state();
    let lifetime = Lifetime::new();
    let picker = Rc::new(SuggestionPicker::new(state.api.clone(), lifetime.clone()));
    let revision = create_rw_signal(0u64);

    on_cleanup(move || lifetime.dispose());

    let fetch = {
        let picker = picker.clone();
        move || {
            let picker = picker.clone();
            spawn_local(async move {
                tracked(revision, picker.fetch_suggestions()).await;
            });
        }
    };
    fetch();

    let snapshot = {
        let picker = picker.clone();
        Signal::derive(move || {
            revision.get();
            picker.state()
        })
    };

    let toggle = {
        let picker = picker.clone();
        Callback::new(move |id: String| {
            picker.toggle_selection(&id);
            bump(revision);
        })
    };

    let label = {
        let picker = picker.clone();
        move || {
            revision.get();
            picker.selection_label()
        }
    };
    let warning = {
        let picker = picker.clone();
        move || {
            revision.get();
            picker.limit_warning()
        }
    };
    let blocked = {
        let picker = picker.clone();
        move || {
            revision.get();
            !picker.can_continue()
        }
    };
    let finish = move |_| {
        picker.finish();
    };

    view! {
        <div class="space-y-8">
            <div>
                <h1 class="text-3xl font-bold">"Wybierz kategorie"</h1>
                <p class="text-gray-400 mt-1">
                    {format!("Zaznacz od 1 do {} kategorii, od których chcesz zacząć", MAX_SELECTION)}
                </p>
            </div>

            {move || {
                let s = snapshot.get();
                if let Some(message) = s.error_message {
                    let retry = fetch.clone();
                    view! {
                        <div role="alert" class="bg-gray-800 rounded-xl p-6 text-center space-y-4">
                            <p class="text-red-400">{message}</p>
                            <button
                                on:click=move |_| retry()
                                class="px-4 py-2 bg-gray-600 hover:bg-gray-500 rounded-lg"
                            >
                                "Spróbuj ponownie"
                            </button>
                        </div>
                    }.into_view()
                } else if s.loading || s.suggestions.is_empty() {
                    view! { <Loading label="Ładowanie propozycji..." /> }.into_view()
                } else {
                    view! {
                        <div class="grid grid-cols-2 md:grid-cols-3 gap-4">
                            {s.suggestions.into_iter().map(|suggestion| {
                                let selected = s.selected.contains(&suggestion.id);
                                view! { <SuggestionCard suggestion=suggestion selected=selected on_toggle=toggle /> }
                            }).collect_view()}
                        </div>
                    }.into_view()
                }
            }}

            <div class="flex items-center justify-between">
                <div>
                    <p class="text-gray-300" aria-live="polite">{label}</p>
                    {move || warning().map(|msg| view! {
                        <p class="text-sm text-yellow-400">{msg}</p>
                    })}
                </div>
                <button
                    on:click=finish
                    disabled=blocked
                    class="px-6 py-3 bg-primary-600 hover:bg-primary-700 disabled:bg-gray-600
                           disabled:cursor-not-allowed rounded-lg font-semibold transition-colors"
                >
                    "Dalej"
                </button>
            </div>
        </div>
    }
}

#[component]
fn SuggestionCard(
    suggestion: SuggestionView,
    selected: bool,
    on_toggle: Callback<String>,
) -> impl IntoView {
    let id = suggestion.id.clone();
    let class = if selected {
        "bg-primary-600 text-white ring-2 ring-primary-400"
    } else {
        "bg-gray-800 text-gray-300 hover:bg-gray-700"
    };

    view! {
        <button
            type="button"
            aria-pressed=selected.to_string()
            on:click=move |_| on_toggle.call(id.clone())
            class=format!("rounded-xl p-4 text-left transition-colors {}", class)
        >
            <div class="font-semibold">{suggestion.name}</div>
            <div class="text-sm opacity-75">{format!("Używana {} razy", suggestion.usage_count)}</div>
        </button>
    }
}

//! Dashboard Page
//!
//! Weekly spending summary and AI tips, each loading independently.

use std::rc::Rc;

use leptos::*;

use wydatki::dashboard::{DashboardLoader, PanelState, SummaryView, TipsView};
use wydatki::lifetime::Lifetime;

use crate::components::Loading;
use crate::state::{tracked, use_global_state};

/// Dashboard page component
#[component]
pub fn Dashboard() -> impl IntoView {
    let state = use_global_state();
    let lifetime = Lifetime::new();
    let loader = Rc::new(DashboardLoader::new(
        state.api.clone(),
        state.clock.clone(),
        lifetime.clone(),
    ));
    let revision = create_rw_signal(0u64);

    on_cleanup(move || lifetime.dispose());

    // Fetch both panels on mount; each re-renders as soon as it settles
    {
        let summary_loader = loader.clone();
        spawn_local(async move {
            tracked(revision, summary_loader.load_summary()).await;
        });
        let tips_loader = loader.clone();
        spawn_local(async move {
            tracked(revision, tips_loader.load_tips()).await;
        });
    }

    let summary = {
        let loader = loader.clone();
        Signal::derive(move || {
            revision.get();
            loader.summary.state()
        })
    };
    let tips = {
        let loader = loader.clone();
        Signal::derive(move || {
            revision.get();
            loader.tips.state()
        })
    };

    let retry_summary = {
        let loader = loader.clone();
        Callback::new(move |_: ()| {
            let loader = loader.clone();
            spawn_local(async move {
                tracked(revision, loader.retry_summary()).await;
            });
        })
    };
    let retry_tips = Callback::new(move |_: ()| {
        let loader = loader.clone();
        spawn_local(async move {
            tracked(revision, loader.retry_tips()).await;
        });
    });

    view! {
        <div class="space-y-8">
            // Page header
            <div>
                <h1 class="text-3xl font-bold">"Dashboard"</h1>
                <p class="text-gray-400 mt-1">"Twoje wydatki w tym tygodniu"</p>
            </div>

            <div class="grid md:grid-cols-2 gap-8">
                <Panel title="Podsumowanie tygodnia" state=summary on_retry=retry_summary render=summary_view />
                <Panel title="Porady AI" state=tips on_retry=retry_tips render=tips_view />
            </div>
        </div>
    }
}

/// Card that shows a spinner, the content or the error with a retry button
#[component]
fn Panel<T: Clone + 'static>(
    title: &'static str,
    state: Signal<PanelState<T>>,
    on_retry: Callback<()>,
    render: fn(T) -> View,
) -> impl IntoView {
    let busy = move || matches!(state.get(), PanelState::Loading).to_string();

    view! {
        <section class="bg-gray-800 rounded-xl p-6" aria-busy=busy>
            <h2 class="text-xl font-semibold mb-4">{title}</h2>
            {move || match state.get() {
                PanelState::Loading => view! { <Loading /> }.into_view(),
                PanelState::Content(content) => render(content),
                PanelState::Error(message) => view! {
                    <div role="alert" class="space-y-3">
                        <p class="text-red-400">{message}</p>
                        <button
                            on:click=move |_| on_retry.call(())
                            class="px-4 py-2 bg-gray-600 hover:bg-gray-500 rounded-lg"
                        >
                            "Spróbuj ponownie"
                        </button>
                    </div>
                }.into_view(),
            }}
        </section>
    }
}

fn summary_view(summary: SummaryView) -> View {
    match summary.empty_message {
        Some(message) => view! { <p class="text-gray-400">{message}</p> }.into_view(),
        None => view! {
            <div class="grid grid-cols-2 gap-4">
                <div>
                    <div class="text-sm text-gray-400">"Suma wydatków"</div>
                    <div class="text-3xl font-bold">{format!("{} zł", summary.total_amount)}</div>
                </div>
                <div>
                    <div class="text-sm text-gray-400">"Liczba transakcji"</div>
                    <div class="text-3xl font-bold">{summary.transaction_count}</div>
                </div>
            </div>
        }.into_view(),
    }
}

fn tips_view(tips: TipsView) -> View {
    match tips.empty_message {
        Some(message) => view! { <p class="text-gray-400">{message}</p> }.into_view(),
        None => view! {
            <ul class="space-y-3">
                {tips.tips.into_iter().map(|tip| view! {
                    <li class="bg-gray-700 rounded-lg px-4 py-3">{tip}</li>
                }).collect_view()}
            </ul>
        }.into_view(),
    }
}

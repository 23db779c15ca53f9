//! Expenses Page
//!
//! Filterable, paginated list of the user's expenses.

use chrono::NaiveDate;
use leptos::*;

use wydatki::dashboard::format_amount;
use wydatki::expenses::{list_expenses, ExpenseFilter, ExpensePage};

use crate::components::Loading;
use crate::state::{use_global_state, GlobalState};

#[component]
pub fn Expenses() -> impl IntoView {
    let state = use_global_state();

    let search = create_rw_signal(String::new());
    let date_from = create_rw_signal(String::new());
    let date_to = create_rw_signal(String::new());
    let amount_min = create_rw_signal(String::new());
    let amount_max = create_rw_signal(String::new());
    let page_no = create_rw_signal(1u32);

    let result = create_rw_signal(None::<ExpensePage>);
    let loading = create_rw_signal(false);
    let error = create_rw_signal(None::<String>);

    let fetch = move |state: GlobalState| {
        let filter = ExpenseFilter {
            search: Some(search.get_untracked()),
            date_from: parse_date(&date_from.get_untracked()),
            date_to: parse_date(&date_to.get_untracked()),
            amount_min: parse_amount(&amount_min.get_untracked()),
            amount_max: parse_amount(&amount_max.get_untracked()),
            ..ExpenseFilter::default()
        }
        .page(page_no.get_untracked());

        loading.set(true);
        error.set(None);
        spawn_local(async move {
            if state.categories.categories().is_empty() {
                if let Err(e) = state.categories.fetch_all().await {
                    tracing::warn!(error = %e, "Category names unavailable");
                }
            }

            match list_expenses(&state.api, &filter, &state.categories.categories()).await {
                Ok(page) => result.set(Some(page)),
                Err(e) => {
                    tracing::error!(error = %e, "Failed to fetch expenses");
                    error.set(Some(e.to_string()));
                }
            }
            loading.set(false);
        });
    };

    // Initial load
    fetch(state.clone());

    let filter_state = state.clone();
    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        page_no.set(1);
        fetch(filter_state.clone());
    };

    let go_to = move |page: u32| {
        page_no.set(page);
        fetch(state.clone());
    };

    view! {
        <div class="space-y-8">
            <div>
                <h1 class="text-3xl font-bold">"Wydatki"</h1>
                <p class="text-gray-400 mt-1">"Historia Twoich wydatków"</p>
            </div>

            <form on:submit=on_submit class="bg-gray-800 rounded-xl p-6 grid md:grid-cols-6 gap-4 items-end">
                <FilterInput id="search" label="Szukaj" value=search wide=true />
                <FilterInput id="date-from" label="Od" input_type="date" value=date_from />
                <FilterInput id="date-to" label="Do" input_type="date" value=date_to />
                <FilterInput id="amount-min" label="Kwota od" input_type="number" value=amount_min />
                <FilterInput id="amount-max" label="Kwota do" input_type="number" value=amount_max />
                <button
                    type="submit"
                    class="md:col-span-6 px-4 py-3 bg-primary-600 hover:bg-primary-700 rounded-lg font-medium"
                >
                    "Filtruj"
                </button>
            </form>

            {move || error.get().map(|msg| view! {
                <div role="alert" class="text-red-400">{msg}</div>
            })}

            <section class="bg-gray-800 rounded-xl p-6" aria-busy=move || loading.get().to_string()>
                {move || {
                    if loading.get() {
                        return view! { <Loading /> }.into_view();
                    }
                    let Some(page) = result.get() else {
                        return view! {}.into_view();
                    };
                    if page.expenses.is_empty() {
                        return view! { <p class="text-gray-400">"Brak wydatków."</p> }.into_view();
                    }

                    let pagination = page.pagination;
                    let go_to = go_to.clone();
                    let go_next = go_to.clone();
                    view! {
                        <table class="w-full text-left">
                            <thead class="text-sm text-gray-400">
                                <tr>
                                    <th class="py-2">"Data"</th>
                                    <th class="py-2 text-right">"Kwota"</th>
                                    <th class="py-2">"Kategoria"</th>
                                    <th class="py-2">"Opis"</th>
                                </tr>
                            </thead>
                            <tbody class="divide-y divide-gray-700">
                                {page.expenses.into_iter().map(|e| view! {
                                    <tr>
                                        <td class="py-2">{e.date}</td>
                                        <td class="py-2 text-right">{format!("{} zł", format_amount(e.amount))}</td>
                                        <td class="py-2">{e.category_name}</td>
                                        <td class="py-2 text-gray-300">{e.description}</td>
                                    </tr>
                                }).collect_view()}
                            </tbody>
                        </table>

                        <div class="flex items-center justify-between mt-4 text-sm text-gray-400">
                            <button
                                disabled=pagination.current_page <= 1
                                on:click=move |_| go_to(pagination.current_page - 1)
                                class="px-3 py-1 bg-gray-700 rounded-lg disabled:opacity-50"
                            >
                                "Poprzednia"
                            </button>
                            <span>
                                {format!(
                                    "Strona {} z {} ({} wydatków)",
                                    pagination.current_page, pagination.total_pages, pagination.total
                                )}
                            </span>
                            <button
                                disabled=pagination.current_page >= pagination.total_pages
                                on:click=move |_| go_next(pagination.current_page + 1)
                                class="px-3 py-1 bg-gray-700 rounded-lg disabled:opacity-50"
                            >
                                "Następna"
                            </button>
                        </div>
                    }.into_view()
                }}
            </section>
        </div>
    }
}

#[component]
fn FilterInput(
    id: &'static str,
    label: &'static str,
    #[prop(default = "text")]
    input_type: &'static str,
    #[prop(default = false)]
    wide: bool,
    value: RwSignal<String>,
) -> impl IntoView {
    let class = if wide { "md:col-span-2" } else { "" };

    view! {
        <div class=class>
            <label for=id class="block text-sm text-gray-400 mb-2">{label}</label>
            <input
                id=id
                type=input_type
                prop:value=move || value.get()
                on:input=move |ev| value.set(event_target_value(&ev))
                class="w-full bg-gray-700 rounded-lg px-3 py-2
                       border border-gray-600 focus:border-primary-500 focus:outline-none"
            />
        </div>
    }
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
}

fn parse_amount(value: &str) -> Option<f64> {
    value.trim().replace(',', ".").parse().ok()
}

//! Categories Page
//!
//! Category list with add, rename and delete dialogs. All decisions (which
//! dialog is open, which button is busy, where focus goes) come from the
//! core `CategoryPage`; this component renders them and forwards events.

use std::rc::Rc;

use leptos::*;
use wasm_bindgen::JsCast;

use wydatki::lifetime::Lifetime;
use wydatki::page::{
    ActionOutcome, ButtonState, CategoryPage, CategoryRow, Control, Dialog, Key, KeyOutcome,
    PageView,
};

use crate::components::{InlineLoading, Loading, Modal};
use crate::state::{bump, tracked, use_global_state};

/// DOM id of the element standing for a control
fn dom_id(control: &Control) -> String {
    match control {
        Control::AddButton => "add-category".to_string(),
        Control::EmptyAddButton => "add-first-category".to_string(),
        Control::RetryButton => "retry-categories".to_string(),
        Control::EditButton(id) => format!("edit-category-{}", id),
        Control::DeleteButton(id) => format!("delete-category-{}", id),
        Control::NameInput => "category-name".to_string(),
        Control::ConfirmButton => "dialog-confirm".to_string(),
        Control::ErrorOkButton => "dialog-error-ok".to_string(),
    }
}

fn focus_control(control: &Control) {
    let id = dom_id(control);
    request_animation_frame(move || {
        if let Some(element) = document()
            .get_element_by_id(&id)
            .and_then(|el| el.dyn_into::<web_sys::HtmlElement>().ok())
        {
            let _ = element.focus();
        }
    });
}

fn key_of(ev: &web_sys::KeyboardEvent) -> Key {
    match ev.key().as_str() {
        "Escape" => Key::Escape,
        "Enter" => Key::Enter,
        " " | "Spacebar" => Key::Space,
        _ => Key::Other,
    }
}

#[component]
pub fn Categories() -> impl IntoView {
    let state = use_global_state();
    let lifetime = Lifetime::new();
    let page = Rc::new(CategoryPage::new(
        state.categories.clone(),
        state.clock.clone(),
        lifetime.clone(),
    ));
    let revision = create_rw_signal(0u64);

    on_cleanup(move || lifetime.dispose());

    // Initial load
    {
        let page = page.clone();
        spawn_local(async move {
            tracked(revision, page.load()).await;
        });
    }

    // Move focus wherever the controller put it
    let focus = {
        let page = page.clone();
        create_memo(move |_| {
            revision.get();
            page.focus()
        })
    };
    create_effect(move |_| {
        if let Some(control) = focus.get() {
            focus_control(&control);
        }
    });

    let actions = Actions {
        page: page.clone(),
        revision,
    };

    let view_state = {
        let page = page.clone();
        Signal::derive(move || {
            revision.get();
            page.view()
        })
    };
    let dialog = {
        let page = page.clone();
        Signal::derive(move || {
            revision.get();
            page.dialog()
        })
    };
    let add_button = {
        let page = page.clone();
        Signal::derive(move || {
            revision.get();
            page.button(&Control::AddButton)
        })
    };
    let aria_busy = move || {
        revision.get();
        page.aria_busy().to_string()
    };
    let load_error = {
        let store = state.categories.clone();
        move || {
            revision.get();
            store
                .error()
                .unwrap_or_else(|| "Nie udało się pobrać kategorii".to_string())
        }
    };

    let header_actions = actions.clone();
    let body_actions = actions.clone();

    view! {
        <div class="space-y-8" aria-busy=aria_busy>
            <div class="flex items-center justify-between">
                <div>
                    <h1 class="text-3xl font-bold">"Kategorie"</h1>
                    <p class="text-gray-400 mt-1">"Zarządzaj kategoriami wydatków"</p>
                </div>
                <ActionButton
                    control=Control::AddButton
                    state=add_button
                    label="Dodaj kategorię"
                    primary=true
                    on_click=move || header_actions.open_add(Control::AddButton)
                />
            </div>

            {move || {
                let actions = body_actions.clone();
                match view_state.get() {
                    PageView::Loading => view! { <Loading label="Ładowanie kategorii..." /> }.into_view(),
                    PageView::Error => view! {
                        <div role="alert" class="bg-gray-800 rounded-xl p-6 text-center space-y-4">
                            <p class="text-red-400">{load_error.clone()}</p>
                            <button
                                id=dom_id(&Control::RetryButton)
                                on:click=move |_| actions.retry()
                                class="px-4 py-2 bg-gray-600 hover:bg-gray-500 rounded-lg"
                            >
                                "Spróbuj ponownie"
                            </button>
                        </div>
                    }.into_view(),
                    PageView::Empty => view! {
                        <div class="bg-gray-800 rounded-xl p-8 text-center space-y-4">
                            <p class="text-gray-400">"Nie masz jeszcze żadnych kategorii."</p>
                            <button
                                id=dom_id(&Control::EmptyAddButton)
                                on:click=move |_| actions.open_add(Control::EmptyAddButton)
                                class="px-4 py-2 bg-primary-600 hover:bg-primary-700 rounded-lg"
                            >
                                "Dodaj pierwszą kategorię"
                            </button>
                        </div>
                    }.into_view(),
                    PageView::List(rows) => view! {
                        <ul class="bg-gray-800 rounded-xl divide-y divide-gray-700">
                            {rows.into_iter().map(|row| {
                                view! { <CategoryItem row=row actions=actions.clone() /> }
                            }).collect_view()}
                        </ul>
                    }.into_view(),
                }
            }}

            <DialogLayer dialog=dialog actions=actions />
        </div>
    }
}

/// Event handlers forwarding to the controller
#[derive(Clone)]
struct Actions {
    page: Rc<CategoryPage>,
    revision: RwSignal<u64>,
}

impl Actions {
    fn retry(&self) {
        let page = self.page.clone();
        let revision = self.revision;
        spawn_local(async move {
            tracked(revision, page.retry()).await;
        });
    }

    fn open_add(&self, opener: Control) {
        self.page.open_add(opener);
        bump(self.revision);
    }

    fn open_edit(&self, id: &str) {
        if self.page.open_edit(id) {
            bump(self.revision);
        }
    }

    fn open_delete(&self, id: &str) {
        if self.page.open_delete(id) {
            bump(self.revision);
        }
    }

    fn set_name(&self, value: &str) {
        self.page.set_name(value);
        bump(self.revision);
    }

    fn cancel(&self) {
        if self.page.cancel() != ActionOutcome::Ignored {
            bump(self.revision);
        }
    }

    fn submit(&self) {
        let page = self.page.clone();
        let revision = self.revision;
        spawn_local(async move {
            tracked(revision, page.submit_form()).await;
        });
    }

    fn confirm_delete(&self) {
        let page = self.page.clone();
        let revision = self.revision;
        spawn_local(async move {
            tracked(revision, page.confirm_delete()).await;
        });
    }

    fn dismiss_error(&self) {
        if self.page.dismiss_error() != ActionOutcome::Ignored {
            bump(self.revision);
        }
    }

    fn key(&self, ev: web_sys::KeyboardEvent) {
        if self.page.handle_key(key_of(&ev)) != KeyOutcome::Ignored {
            ev.prevent_default();
            bump(self.revision);
        }
    }
}

#[component]
fn CategoryItem(row: CategoryRow, actions: Actions) -> impl IntoView {
    let edit_actions = actions.clone();
    let delete_actions = actions;
    let edit_id = row.id.clone();
    let delete_id = row.id.clone();

    view! {
        <li class="flex items-center justify-between px-6 py-4">
            <div class="flex items-center space-x-3">
                <span class="font-medium">{row.name.clone()}</span>
                {row.badge.map(|badge| view! {
                    <span class="text-xs px-2 py-1 rounded bg-gray-700 text-gray-300">{badge}</span>
                })}
            </div>
            <div class="flex items-center space-x-2">
                <ActionButton
                    control=Control::EditButton(row.id.clone())
                    state=Signal::derive(move || row.edit)
                    label="Edytuj"
                    aria_label=row.edit_label.clone()
                    on_click=move || edit_actions.open_edit(&edit_id)
                />
                <ActionButton
                    control=Control::DeleteButton(row.id.clone())
                    state=Signal::derive(move || row.delete)
                    label="Usuń"
                    aria_label=row.delete_label.clone()
                    on_click=move || delete_actions.open_delete(&delete_id)
                />
            </div>
        </li>
    }
}

/// Button reflecting a controller `ButtonState`
#[component]
fn ActionButton(
    control: Control,
    #[prop(into)]
    state: Signal<ButtonState>,
    label: &'static str,
    #[prop(optional, into)]
    aria_label: Option<String>,
    #[prop(default = false)]
    primary: bool,
    on_click: impl Fn() + 'static,
) -> impl IntoView {
    let class = if primary {
        "px-4 py-2 bg-primary-600 hover:bg-primary-700 disabled:bg-gray-600 rounded-lg font-medium"
    } else {
        "px-3 py-1 bg-gray-700 hover:bg-gray-600 disabled:opacity-50 disabled:cursor-not-allowed rounded-lg text-sm"
    };

    view! {
        <button
            id=dom_id(&control)
            type="button"
            class=class
            aria-label=aria_label
            disabled=move || state.get().disabled
            aria-busy=move || state.get().spinner.to_string()
            on:click=move |_| on_click()
        >
            {move || state.get().spinner.then(|| view! { <InlineLoading /> })}
            <span class="ml-1">{label}</span>
        </button>
    }
}

/// Whichever dialog the controller has open
#[component]
fn DialogLayer(dialog: Signal<Dialog>, actions: Actions) -> impl IntoView {
    // Typing only changes the form name; keep the open dialog mounted
    let shape = create_memo(move |_| match dialog.get() {
        Dialog::Form(mut form) => {
            form.name.clear();
            Dialog::Form(form)
        }
        other => other,
    });

    move || {
        let actions = actions.clone();
        let key_actions = actions.clone();
        let on_keydown = move |ev: web_sys::KeyboardEvent| key_actions.key(ev);

        match shape.get() {
            Dialog::Closed => view! {}.into_view(),
            Dialog::Form(form) => {
                let submit_actions = actions.clone();
                let input_actions = actions.clone();
                let has_error = form.error.is_some();
                let name = match actions.page.dialog() {
                    Dialog::Form(current) => current.name,
                    _ => String::new(),
                };
                view! {
                    <Modal labelled_by="dialog-title" on_keydown=on_keydown>
                        <h2 id="dialog-title" class="text-xl font-semibold">{form.title()}</h2>
                        <form
                            class="space-y-4"
                            novalidate
                            on:submit=move |ev: web_sys::SubmitEvent| {
                                ev.prevent_default();
                                submit_actions.submit();
                            }
                        >
                            <div>
                                <label for=dom_id(&Control::NameInput) class="block text-sm text-gray-400 mb-2">
                                    "Nazwa"
                                </label>
                                <input
                                    id=dom_id(&Control::NameInput)
                                    type="text"
                                    maxlength="30"
                                    prop:value=name
                                    on:input=move |ev| input_actions.set_name(&event_target_value(&ev))
                                    aria-invalid=has_error.to_string()
                                    aria-describedby=has_error.then_some("category-name-error")
                                    class="w-full bg-gray-700 rounded-lg px-4 py-3
                                           border border-gray-600 focus:border-primary-500 focus:outline-none"
                                />
                                {form.error.map(|msg| view! {
                                    <p id="category-name-error" class="text-sm text-red-400 mt-1">{msg}</p>
                                })}
                            </div>
                            <div class="flex justify-end space-x-2">
                                <button
                                    type="button"
                                    on:click=move |_| actions.cancel()
                                    class="px-4 py-2 bg-gray-600 hover:bg-gray-500 rounded-lg"
                                >
                                    "Anuluj"
                                </button>
                                <button
                                    type="submit"
                                    class="px-4 py-2 bg-primary-600 hover:bg-primary-700 rounded-lg font-medium"
                                >
                                    "Zapisz"
                                </button>
                            </div>
                        </form>
                    </Modal>
                }.into_view()
            }
            Dialog::Confirm(confirm) => {
                let confirm_actions = actions.clone();
                view! {
                    <Modal labelled_by="dialog-title" role="alertdialog" on_keydown=on_keydown>
                        <h2 id="dialog-title" class="text-xl font-semibold">"Usuń kategorię"</h2>
                        <p class="text-gray-300">{confirm.message}</p>
                        <div class="flex justify-end space-x-2">
                            <button
                                type="button"
                                on:click=move |_| actions.cancel()
                                class="px-4 py-2 bg-gray-600 hover:bg-gray-500 rounded-lg"
                            >
                                "Anuluj"
                            </button>
                            <button
                                id=dom_id(&Control::ConfirmButton)
                                type="button"
                                on:click=move |_| confirm_actions.confirm_delete()
                                class="px-4 py-2 bg-red-600 hover:bg-red-700 rounded-lg font-medium"
                            >
                                "Usuń"
                            </button>
                        </div>
                    </Modal>
                }.into_view()
            }
            Dialog::Error(error) => view! {
                <Modal labelled_by="dialog-title" role="alertdialog" on_keydown=on_keydown>
                    <h2 id="dialog-title" class="text-xl font-semibold">"Błąd"</h2>
                    <p class="text-red-300">{error.message}</p>
                    <div class="flex justify-end">
                        <button
                            id=dom_id(&Control::ErrorOkButton)
                            type="button"
                            on:click=move |_| actions.dismiss_error()
                            class="px-4 py-2 bg-primary-600 hover:bg-primary-700 rounded-lg font-medium"
                        >
                            "OK"
                        </button>
                    </div>
                </Modal>
            }.into_view(),
        }
    }
}

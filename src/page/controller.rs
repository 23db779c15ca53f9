//! Category Page Controller
//!
//! Drives the category management screen: list loading, the add/edit form,
//! delete confirmation and error dialogs. Rendering is left to the host;
//! it reads [`CategoryPage::view`] and [`CategoryPage::dialog`] and forwards
//! clicks and key presses back here.

use std::cell::Cell;
use std::rc::Rc;

use crate::api::dto::CategoryPayload;
use crate::categories::{is_duplicate, validate_name, CategoryError, CategoryStore};
use crate::clock::{self, Clock, MIN_SPINNER};
use crate::lifetime::Lifetime;

use super::busy::{BusySet, ButtonState};
use super::dialog::{
    ConfirmDialog, Control, Dialog, DialogHost, ErrorDialog, FormDialog, FormMode, Key,
    KeyOutcome,
};
use super::view::{confirm_message, error_message, CategoryRow, PageView, MSG_FORM_DUPLICATE};

/// Result of a user action on the page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    /// Nothing applicable was open or selected
    Ignored,
    /// Form kept open with an inline error
    Invalid,
    Cancelled,
    Done,
    /// Backend call failed; an error dialog is open
    Failed,
}

pub struct CategoryPage {
    store: Rc<CategoryStore>,
    clock: Rc<dyn Clock>,
    lifetime: Lifetime,
    dialogs: DialogHost,
    busy: BusySet,
    loading: Cell<bool>,
    failed: Cell<bool>,
}

impl CategoryPage {
    pub fn new(store: Rc<CategoryStore>, clock: Rc<dyn Clock>, lifetime: Lifetime) -> Self {
        Self {
            store,
            clock,
            lifetime,
            dialogs: DialogHost::new(),
            busy: BusySet::new(),
            loading: Cell::new(true),
            failed: Cell::new(false),
        }
    }

    pub fn view(&self) -> PageView {
        if self.loading.get() {
            return PageView::Loading;
        }
        if self.failed.get() {
            return PageView::Error;
        }
        let categories = self.store.categories();
        if categories.is_empty() {
            return PageView::Empty;
        }
        PageView::List(
            categories
                .iter()
                .map(|c| CategoryRow::new(c, &self.busy))
                .collect(),
        )
    }

    pub fn dialog(&self) -> Dialog {
        self.dialogs.dialog()
    }

    pub fn focus(&self) -> Option<Control> {
        self.dialogs.focus()
    }

    pub fn button(&self, control: &Control) -> ButtonState {
        ButtonState::resolve(&self.busy, control, false)
    }

    /// Page-level busy flag for assistive technology
    pub fn aria_busy(&self) -> bool {
        self.loading.get() || self.busy.any()
    }

    /// Load the list; the spinner stays up at least [`MIN_SPINNER`]
    pub async fn load(&self) {
        self.loading.set(true);
        self.failed.set(false);
        let started = self.clock.now_ms();

        let result = self.store.fetch_all().await;

        if let Some(pad) = clock::remaining(started, self.clock.now_ms(), MIN_SPINNER) {
            self.clock.sleep(pad).await;
        }
        if !self.lifetime.is_alive() {
            return;
        }

        if let Err(e) = &result {
            tracing::error!(error = %e, "Failed to load categories");
        }
        self.failed.set(result.is_err());
        self.loading.set(false);
    }

    pub async fn retry(&self) {
        self.load().await;
    }

    /// Open the empty form; `opener` is the add button that was clicked
    pub fn open_add(&self, opener: Control) {
        self.dialogs.open(
            Dialog::Form(FormDialog {
                mode: FormMode::Create,
                name: String::new(),
                error: None,
            }),
            Some(opener),
        );
    }

    pub fn open_edit(&self, id: &str) -> bool {
        let Some(category) = self.store.find(id) else {
            return false;
        };
        self.dialogs.open(
            Dialog::Form(FormDialog {
                mode: FormMode::Edit { id: category.id },
                name: category.name,
                error: None,
            }),
            Some(Control::EditButton(id.to_string())),
        );
        true
    }

    pub fn open_delete(&self, id: &str) -> bool {
        let Some(category) = self.store.find(id) else {
            return false;
        };
        if category.is_default {
            return false;
        }
        self.dialogs.open(
            Dialog::Confirm(ConfirmDialog {
                id: category.id,
                message: confirm_message(&category.name),
            }),
            Some(Control::DeleteButton(id.to_string())),
        );
        true
    }

    /// Typing into the name input clears the inline error
    pub fn set_name(&self, value: &str) {
        self.dialogs.update_form(|form| {
            form.name = value.to_string();
            form.error = None;
        });
    }

    pub fn cancel(&self) -> ActionOutcome {
        if self.dialogs.close().is_open() {
            ActionOutcome::Cancelled
        } else {
            ActionOutcome::Ignored
        }
    }

    pub fn handle_key(&self, key: Key) -> KeyOutcome {
        self.dialogs.handle_key(key)
    }

    /// Validate the open form and save it
    pub async fn submit_form(&self) -> ActionOutcome {
        let Dialog::Form(form) = self.dialogs.dialog() else {
            return ActionOutcome::Ignored;
        };

        let name = match self.validate_form(&form) {
            Ok(name) => name,
            Err(message) => {
                self.dialogs.update_form(|f| f.error = Some(message));
                return ActionOutcome::Invalid;
            }
        };

        let trigger = self.dialogs.opener().unwrap_or(Control::AddButton);
        self.dialogs.close();

        let payload = CategoryPayload::new(name);
        let result = {
            let _busy = self.busy.acquire(trigger.clone());
            match &form.mode {
                FormMode::Create => self.store.create(&payload).await.map(|_| ()),
                FormMode::Edit { id } => self.store.update(id, &payload).await.map(|_| ()),
            }
        };

        self.finish(result, trigger)
    }

    /// Delete the category named in the open confirm dialog
    pub async fn confirm_delete(&self) -> ActionOutcome {
        let Dialog::Confirm(confirm) = self.dialogs.dialog() else {
            return ActionOutcome::Ignored;
        };
        let trigger = self
            .dialogs
            .opener()
            .unwrap_or_else(|| Control::DeleteButton(confirm.id.clone()));
        self.dialogs.close();

        let result = {
            let _busy = self.busy.acquire(trigger.clone());
            self.store.remove(&confirm.id).await
        };

        self.finish(result, trigger)
    }

    /// Acknowledge the error dialog
    pub fn dismiss_error(&self) -> ActionOutcome {
        if matches!(self.dialogs.dialog(), Dialog::Error(_)) {
            self.dialogs.close();
            ActionOutcome::Done
        } else {
            ActionOutcome::Ignored
        }
    }

    fn validate_form(&self, form: &FormDialog) -> Result<String, String> {
        let name = validate_name(&form.name).map_err(|e| e.to_string())?;
        if is_duplicate(&self.store.categories(), name, form.mode.id()) {
            return Err(MSG_FORM_DUPLICATE.to_string());
        }
        Ok(name.to_string())
    }

    fn finish(&self, result: Result<(), CategoryError>, trigger: Control) -> ActionOutcome {
        if !self.lifetime.is_alive() {
            return ActionOutcome::Ignored;
        }
        match result {
            Ok(()) => ActionOutcome::Done,
            Err(e) => {
                tracing::error!(error = %e, "Category action failed");
                self.dialogs.open(
                    Dialog::Error(ErrorDialog {
                        message: error_message(&e),
                    }),
                    Some(trigger),
                );
                ActionOutcome::Failed
            }
        }
    }
}

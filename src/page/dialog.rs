//! Modal Dialogs
//!
//! At most one dialog is open at a time. Opening a dialog moves focus to
//! its primary control; closing it returns focus to the control that
//! opened it.

use std::cell::RefCell;

/// Focusable controls of the category page
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Control {
    AddButton,
    EmptyAddButton,
    RetryButton,
    EditButton(String),
    DeleteButton(String),
    NameInput,
    ConfirmButton,
    ErrorOkButton,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit { id: String },
}

impl FormMode {
    /// Id of the edited category
    pub fn id(&self) -> Option<&str> {
        match self {
            FormMode::Create => None,
            FormMode::Edit { id } => Some(id),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormDialog {
    pub mode: FormMode,
    pub name: String,
    /// Inline validation message under the name input
    pub error: Option<String>,
}

impl FormDialog {
    pub fn title(&self) -> &'static str {
        match self.mode {
            FormMode::Create => "Dodaj kategorię",
            FormMode::Edit { .. } => "Edytuj kategorię",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmDialog {
    pub id: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorDialog {
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Dialog {
    #[default]
    Closed,
    Form(FormDialog),
    Confirm(ConfirmDialog),
    Error(ErrorDialog),
}

impl Dialog {
    pub fn is_open(&self) -> bool {
        !matches!(self, Dialog::Closed)
    }

    /// Control that receives focus when the dialog opens
    pub fn primary_control(&self) -> Option<Control> {
        match self {
            Dialog::Closed => None,
            Dialog::Form(_) => Some(Control::NameInput),
            Dialog::Confirm(_) => Some(Control::ConfirmButton),
            Dialog::Error(_) => Some(Control::ErrorOkButton),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Escape,
    Enter,
    Space,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    /// Form or confirm dialog closed without a result
    Cancelled,
    /// Error dialog acknowledged
    Dismissed,
    Ignored,
}

#[derive(Debug, Default)]
pub struct DialogHost {
    dialog: RefCell<Dialog>,
    opener: RefCell<Option<Control>>,
    focus: RefCell<Option<Control>>,
}

impl DialogHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dialog(&self) -> Dialog {
        self.dialog.borrow().clone()
    }

    pub fn is_open(&self) -> bool {
        self.dialog.borrow().is_open()
    }

    /// Currently focused control, as far as the page knows
    pub fn focus(&self) -> Option<Control> {
        self.focus.borrow().clone()
    }

    pub fn opener(&self) -> Option<Control> {
        self.opener.borrow().clone()
    }

    pub fn open(&self, dialog: Dialog, opener: Option<Control>) {
        *self.focus.borrow_mut() = dialog.primary_control();
        *self.opener.borrow_mut() = opener;
        *self.dialog.borrow_mut() = dialog;
    }

    /// Close whatever is open and hand focus back to the opener
    pub fn close(&self) -> Dialog {
        let closed = self.dialog.replace(Dialog::Closed);
        if closed.is_open() {
            *self.focus.borrow_mut() = self.opener.borrow_mut().take();
        }
        closed
    }

    /// Mutate the open form; `false` if no form is open
    pub fn update_form(&self, f: impl FnOnce(&mut FormDialog)) -> bool {
        match &mut *self.dialog.borrow_mut() {
            Dialog::Form(form) => {
                f(form);
                true
            }
            _ => false,
        }
    }

    pub fn handle_key(&self, key: Key) -> KeyOutcome {
        let outcome = match (&*self.dialog.borrow(), key) {
            (Dialog::Closed, _) => KeyOutcome::Ignored,
            (Dialog::Error(_), Key::Escape | Key::Enter | Key::Space) => KeyOutcome::Dismissed,
            (_, Key::Escape) => KeyOutcome::Cancelled,
            _ => KeyOutcome::Ignored,
        };
        if outcome != KeyOutcome::Ignored {
            self.close();
        }
        outcome
    }
}

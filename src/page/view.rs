//! Category page view data.

use crate::api::dto::Category;
use crate::api::ApiError;
use crate::categories::CategoryError;

use super::busy::{BusySet, ButtonState};
use super::dialog::Control;

pub const DEFAULT_BADGE: &str = "domyślna";
pub const MSG_CONNECTION: &str = "Błąd połączenia z serwerem";
pub const MSG_FORM_DUPLICATE: &str = "Kategoria o tej nazwie już istnieje.";

/// The four mutually exclusive page states
#[derive(Debug, Clone, PartialEq)]
pub enum PageView {
    Loading,
    Error,
    Empty,
    List(Vec<CategoryRow>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryRow {
    pub id: String,
    pub name: String,
    pub badge: Option<&'static str>,
    pub edit_label: String,
    pub delete_label: String,
    pub edit: ButtonState,
    pub delete: ButtonState,
}

impl CategoryRow {
    pub fn new(category: &Category, busy: &BusySet) -> Self {
        let edit = Control::EditButton(category.id.clone());
        let delete = Control::DeleteButton(category.id.clone());
        Self {
            id: category.id.clone(),
            name: category.name.clone(),
            badge: category.is_default.then_some(DEFAULT_BADGE),
            edit_label: format!("Edytuj kategorię {}", category.name),
            delete_label: format!("Usuń kategorię {}", category.name),
            edit: ButtonState::resolve(busy, &edit, false),
            delete: ButtonState::resolve(busy, &delete, category.is_default),
        }
    }
}

pub fn confirm_message(name: &str) -> String {
    format!("Czy na pewno chcesz usunąć kategorię \"{}\"?", name)
}

/// Text of the error dialog for a failed mutation
pub fn error_message(error: &CategoryError) -> String {
    match error.api_error() {
        Some(ApiError::Status {
            message: Some(message),
            ..
        }) => message.clone(),
        Some(ApiError::Status { status, .. }) => format!("Błąd: {}", status),
        Some(ApiError::Unauthorized) => "Błąd: 401".to_string(),
        Some(ApiError::Network(_)) => MSG_CONNECTION.to_string(),
        _ => error.to_string(),
    }
}

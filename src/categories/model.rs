//! Category rules shared by the store and the page form.

use thiserror::Error;

use crate::api::dto::Category;
use crate::api::ApiError;

pub const NAME_MAX_LEN: usize = 30;

/// Category operation errors; `Display` is the message shown to the user
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CategoryError {
    #[error("Nazwa nie może być pusta.")]
    EmptyName,

    #[error("Nazwa może mieć maksymalnie 30 znaków.")]
    NameTooLong,

    #[error("Kategoria o tej nazwie już istnieje")]
    Duplicate,

    #[error("Nie można usunąć kategorii domyślnej")]
    DefaultProtected,

    #[error("Nie udało się pobrać kategorii")]
    Fetch(#[source] ApiError),

    #[error("Nie udało się utworzyć kategorii")]
    Create(#[source] ApiError),

    #[error("Nie udało się zaktualizować kategorii")]
    Update(#[source] ApiError),

    #[error("Nie udało się usunąć kategorii")]
    Delete(#[source] ApiError),
}

impl CategoryError {
    /// Underlying API failure, if the backend was involved
    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            CategoryError::Fetch(e)
            | CategoryError::Create(e)
            | CategoryError::Update(e)
            | CategoryError::Delete(e) => Some(e),
            _ => None,
        }
    }
}

/// Trim and check a category name, returning the trimmed value
pub fn validate_name(name: &str) -> Result<&str, CategoryError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(CategoryError::EmptyName);
    }
    if trimmed.chars().count() > NAME_MAX_LEN {
        return Err(CategoryError::NameTooLong);
    }
    Ok(trimmed)
}

/// Case-insensitive, whitespace-insensitive name equality
pub fn same_name(a: &str, b: &str) -> bool {
    a.trim().to_lowercase() == b.trim().to_lowercase()
}

/// Whether `name` collides with a category other than `exclude_id`
pub fn is_duplicate(categories: &[Category], name: &str, exclude_id: Option<&str>) -> bool {
    categories
        .iter()
        .any(|c| same_name(&c.name, name) && Some(c.id.as_str()) != exclude_id)
}

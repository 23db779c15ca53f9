//! UI Components
//!
//! Reusable Leptos components shared by the pages.

pub mod form;
pub mod loading;
pub mod modal;
pub mod nav;
pub mod toast;

pub use form::{FormError, SubmitButton, TextField};
pub use loading::{InlineLoading, Loading};
pub use modal::Modal;
pub use nav::Nav;
pub use toast::Toast;

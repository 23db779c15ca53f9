//! Categories
//!
//! - [`model`]: name rules and [`CategoryError`]
//! - [`store`]: cached CRUD with the uniqueness check

pub mod model;
pub mod store;

pub use model::{is_duplicate, validate_name, CategoryError, NAME_MAX_LEN};
pub use store::{CategoryState, CategoryStore};

//! Session
//!
//! Auth token persistence, auth flows, form validation, navigation and
//! the route guard.

pub mod auth;
pub mod guard;
pub mod navigator;
pub mod storage;
pub mod validation;

pub use auth::{AuthState, AuthStatus};
pub use navigator::{HistoryNavigator, Navigator};
pub use storage::{FileStore, KeyValueStore, MemoryStore, StoreError, TokenStore, TOKEN_KEY};

//! # Wydatki
//!
//! Client core of a personal expense tracker: everything the web UI and
//! the terminal client need besides rendering.
//!
//! ## Features
//!
//! - **Sessions**: bearer-token auth with forced re-login on 401
//! - **Categories**: cached CRUD with case-insensitive name uniqueness
//! - **Onboarding**: bounded pick of suggested categories
//! - **Dashboard**: weekly summary and AI tips with stable loading states
//! - **Category page**: dialog state machine, focus handling, busy buttons
//!
//! Host capabilities (HTTP, persistent storage, navigation, timers) are
//! injected as trait objects so the same code runs natively and in the
//! browser. Native adapters are behind the default `native` feature.
//!
//! ## Modules
//!
//! - [`api`]: HTTP client, wire types and errors
//! - [`session`]: token storage, auth flows, route guard
//! - [`categories`]: category store
//! - [`onboarding`]: initial category picker
//! - [`dashboard`]: summary and tips panels
//! - [`page`]: category management page
//! - [`expenses`]: expense list mapping
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::rc::Rc;
//! use std::time::Duration;
//!
//! use wydatki::api::{ApiClient, ReqwestTransport};
//! use wydatki::categories::CategoryStore;
//! use wydatki::session::{AuthState, FileStore, HistoryNavigator, TokenStore};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let transport = Rc::new(ReqwestTransport::new(Duration::from_secs(30))?);
//!     let tokens = TokenStore::new(Rc::new(FileStore::new("session.json")));
//!     let navigator = Rc::new(HistoryNavigator::new());
//!     let api = Rc::new(ApiClient::new("http://localhost:5000", transport, tokens, navigator));
//!
//!     let auth = AuthState::new(api.clone());
//!     if !auth.login("jan@example.pl", "tajnehaslo").await {
//!         eprintln!("{}", auth.error().unwrap_or_default());
//!         return Ok(());
//!     }
//!
//!     let store = CategoryStore::new(api);
//!     store.fetch_all().await?;
//!     for category in store.categories() {
//!         println!("{}", category.name);
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod categories;
pub mod clock;
pub mod dashboard;
pub mod expenses;
pub mod lifetime;
pub mod onboarding;
pub mod page;
pub mod session;

#[cfg(feature = "native")]
pub mod config;

#[cfg(test)]
mod testing;

// Re-export top-level types for convenience
pub use api::{ApiClient, ApiError, ApiResult, HttpTransport};

pub use session::{AuthState, KeyValueStore, Navigator, TokenStore};

pub use categories::{CategoryError, CategoryStore};

pub use clock::Clock;

pub use lifetime::Lifetime;

pub use onboarding::SuggestionPicker;

pub use dashboard::{DashboardLoader, PanelState};

pub use page::CategoryPage;

pub use expenses::{list_expenses, ExpenseFilter, ExpenseView};

#[cfg(feature = "native")]
pub use config::{Config, ConfigError};

//! Pages
//!
//! Top-level page components for each route.

mod auth_status;

pub mod categories;
pub mod dashboard;
pub mod expenses;
pub mod login;
pub mod onboarding;
pub mod password;
pub mod register;
pub mod settings;

pub use categories::Categories;
pub use dashboard::Dashboard;
pub use expenses::Expenses;
pub use login::Login;
pub use onboarding::Onboarding;
pub use password::{NewPassword, ResetPassword};
pub use register::Register;
pub use settings::Settings;

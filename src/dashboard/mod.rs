//! Dashboard
//!
//! - [`loader`]: summary and tips panels with their loading states
//! - [`format`]: view data and amount formatting

pub mod format;
pub mod loader;

pub use format::{format_amount, SummaryView, TipsView};
pub use loader::{DashboardLoader, Panel, PanelState};

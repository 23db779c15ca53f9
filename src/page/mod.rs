//! Category Management Page
//!
//! - [`controller`]: page state and user actions
//! - [`dialog`]: modal state machine with focus handling
//! - [`busy`]: RAII busy markers for action buttons
//! - [`view`]: rows, labels and error texts

pub mod busy;
pub mod controller;
pub mod dialog;
pub mod view;

pub use busy::{BusyGuard, BusySet, ButtonState};
pub use controller::{ActionOutcome, CategoryPage};
pub use dialog::{Control, Dialog, DialogHost, FormMode, Key, KeyOutcome};
pub use view::{CategoryRow, PageView};

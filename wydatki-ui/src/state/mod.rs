//! State Management
//!
//! Global context and the browser implementations of the core ports.

pub mod global;
pub mod host;

pub use global::{bump, provide_global_state, tracked, use_global_state, GlobalState};

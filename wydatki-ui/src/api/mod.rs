//! Browser HTTP access to the Wydatki REST API.

pub mod client;

pub use client::{get_api_base, set_api_base, FetchTransport, DEFAULT_API_BASE};

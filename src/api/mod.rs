//! Backend API Access
//!
//! - [`client`]: JSON client with bearer auth and 401 handling
//! - [`transport`]: HTTP port and the native `reqwest` adapter
//! - [`dto`]: wire types
//! - [`error`]: error taxonomy

pub mod client;
pub mod dto;
pub mod error;
pub mod transport;

pub use client::{build_query, ApiClient, LOGIN_PATH};
pub use error::{ApiError, ApiResult};
pub use transport::{HttpRequest, HttpResponse, HttpTransport, Method, TransportError};

#[cfg(feature = "native")]
pub use transport::ReqwestTransport;

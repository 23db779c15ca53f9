//! HTTP Transport
//!
//! `fetch`-backed implementation of the core's transport port and the
//! configurable API base URL.

use async_trait::async_trait;
use gloo_net::http::Request;

use wydatki::api::{HttpRequest, HttpResponse, HttpTransport, Method, TransportError};

/// Default API base URL
pub const DEFAULT_API_BASE: &str = "http://localhost:5000";

const API_URL_KEY: &str = "wydatki_api_url";

/// Get the API base URL from local storage or use default
pub fn get_api_base() -> String {
    let url = web_sys::window()
        .and_then(|window| window.local_storage().ok().flatten())
        .and_then(|storage| storage.get_item(API_URL_KEY).ok().flatten())
        .unwrap_or_else(|| DEFAULT_API_BASE.to_string());
    // Normalize: remove trailing slash
    url.trim_end_matches('/').to_string()
}

/// Set the API base URL in local storage
///
/// Takes effect on the next page load, when the client is rebuilt.
pub fn set_api_base(url: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(Some(storage)) = window.local_storage() {
            let _ = storage.set_item(API_URL_KEY, url.trim());
        }
    }
}

/// Sends core requests through `window.fetch`
pub struct FetchTransport;

#[async_trait(?Send)]
impl HttpTransport for FetchTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let mut builder = match request.method {
            Method::Get => Request::get(&request.url),
            Method::Post => Request::post(&request.url),
            Method::Put => Request::put(&request.url),
            Method::Delete => Request::delete(&request.url),
        };

        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }

        let built = match request.body {
            Some(body) => builder.body(body),
            None => builder.build(),
        }
        .map_err(|e| TransportError(format!("Request build error: {}", e)))?;

        let response = built
            .send()
            .await
            .map_err(|e| TransportError(format!("Network error: {}", e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(TransportError::body_read)?;
        Ok(HttpResponse::new(status, body))
    }
}

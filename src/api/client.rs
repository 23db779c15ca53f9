//! HTTP API Client
//!
//! Thin JSON client for the backend REST API: resolves endpoints against
//! the base URL, injects the bearer token and turns HTTP failures into
//! [`ApiError`]s. A 401 anywhere ends the session.

use std::rc::Rc;

use serde::de::DeserializeOwned;
use serde::Serialize;

use super::error::{ApiError, ApiResult};
use super::transport::{HttpRequest, HttpTransport, Method};
use crate::session::navigator::Navigator;
use crate::session::storage::TokenStore;

/// Route the user is sent to when the backend rejects the session
pub const LOGIN_PATH: &str = "/login";

/// Backend REST API client
pub struct ApiClient {
    base_url: String,
    transport: Rc<dyn HttpTransport>,
    tokens: TokenStore,
    navigator: Rc<dyn Navigator>,
}

impl ApiClient {
    /// Create a client; `base_url` may be empty for same-origin requests
    pub fn new(
        base_url: impl Into<String>,
        transport: Rc<dyn HttpTransport>,
        tokens: TokenStore,
        navigator: Rc<dyn Navigator>,
    ) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            transport,
            tokens,
            navigator,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Token storage shared with the auth state
    pub fn tokens(&self) -> &TokenStore {
        &self.tokens
    }

    pub fn navigator(&self) -> &Rc<dyn Navigator> {
        &self.navigator
    }

    /// Absolute URL for an endpoint
    pub fn url(&self, endpoint: &str) -> String {
        if endpoint.starts_with('/') {
            format!("{}{}", self.base_url, endpoint)
        } else {
            format!("{}/{}", self.base_url, endpoint)
        }
    }

    pub async fn get<T: DeserializeOwned>(&self, endpoint: &str) -> ApiResult<T> {
        let body = self.execute(Method::Get, self.url(endpoint), None).await?;
        decode(&body)
    }

    /// GET with URL-encoded query parameters
    pub async fn get_with_query<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(&str, String)],
    ) -> ApiResult<T> {
        let url = format!("{}{}", self.url(endpoint), build_query(params));
        let body = self.execute(Method::Get, url, None).await?;
        decode(&body)
    }

    pub async fn post<B, T>(&self, endpoint: &str, payload: &B) -> ApiResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = encode(payload)?;
        let body = self
            .execute(Method::Post, self.url(endpoint), Some(body))
            .await?;
        decode(&body)
    }

    pub async fn put<B, T>(&self, endpoint: &str, payload: &B) -> ApiResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = encode(payload)?;
        let body = self
            .execute(Method::Put, self.url(endpoint), Some(body))
            .await?;
        decode(&body)
    }

    /// DELETE; the response body (often empty) is ignored
    pub async fn delete(&self, endpoint: &str) -> ApiResult<()> {
        self.execute(Method::Delete, self.url(endpoint), None)
            .await
            .map(|_| ())
    }

    async fn execute(&self, method: Method, url: String, body: Option<String>) -> ApiResult<String> {
        let mut headers = vec![
            ("Content-Type".to_string(), "application/json".to_string()),
            ("Accept".to_string(), "application/json".to_string()),
        ];
        if let Some(token) = self.tokens.token() {
            headers.push(("Authorization".to_string(), format!("Bearer {}", token)));
        }

        let request = HttpRequest {
            method,
            url,
            headers,
            body,
        };
        let method_name = request.method.as_str();
        let url_for_log = request.url.clone();

        let response = self.transport.send(request).await.map_err(|e| {
            tracing::error!(method = method_name, url = %url_for_log, error = %e, "API request failed");
            ApiError::Network(e.to_string())
        })?;

        if response.status == 401 {
            tracing::warn!(url = %url_for_log, "Session rejected, redirecting to login");
            self.tokens.clear();
            self.navigator.navigate(LOGIN_PATH);
            return Err(ApiError::Unauthorized);
        }

        if !response.is_success() {
            let err = ApiError::from_response(response.status, &response.body);
            tracing::error!(
                method = method_name,
                url = %url_for_log,
                status = response.status,
                "API request failed"
            );
            return Err(err);
        }

        tracing::debug!(method = method_name, url = %url_for_log, status = response.status, "API request ok");
        Ok(response.body)
    }
}

/// `?a=1&b=two` with both keys and values percent-encoded
pub fn build_query(params: &[(&str, String)]) -> String {
    if params.is_empty() {
        return String::new();
    }
    let pairs: Vec<String> = params
        .iter()
        .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
        .collect();
    format!("?{}", pairs.join("&"))
}

fn encode<B: Serialize + ?Sized>(payload: &B) -> ApiResult<String> {
    serde_json::to_string(payload).map_err(|e| ApiError::Encode(e.to_string()))
}

/// Empty bodies decode as JSON `null`, so `()` and `Option<T>` accept 204s
fn decode<T: DeserializeOwned>(body: &str) -> ApiResult<T> {
    let body = if body.trim().is_empty() { "null" } else { body };
    serde_json::from_str(body).map_err(|e| ApiError::Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::dto::{Category, CategoryPayload};
    use crate::api::transport::TransportError;
    use crate::testing::Harness;

    #[tokio::test]
    async fn test_bearer_header_attached_when_token_present() {
        let h = Harness::new();
        h.tokens.set("secret").unwrap();
        h.transport.respond(200, "[]");

        let _: Vec<Category> = h.api.get("/categories").await.unwrap();

        let req = h.transport.last_request().unwrap();
        assert_eq!(req.header("Authorization"), Some("Bearer secret"));
        assert_eq!(req.url, "http://api.test/categories");
        assert_eq!(req.method, Method::Get);
    }

    #[tokio::test]
    async fn test_no_auth_header_without_token() {
        let h = Harness::new();
        h.transport.respond(200, "[]");

        let _: Vec<Category> = h.api.get("categories").await.unwrap();

        let req = h.transport.last_request().unwrap();
        assert_eq!(req.header("Authorization"), None);
        assert_eq!(req.url, "http://api.test/categories");
    }

    #[tokio::test]
    async fn test_unauthorized_clears_token_and_redirects() {
        let h = Harness::new();
        h.tokens.set("expired").unwrap();
        h.transport.respond(401, r#"{"error":"expired"}"#);

        let result: ApiResult<Vec<Category>> = h.api.get("/categories").await;

        assert_eq!(result.unwrap_err(), ApiError::Unauthorized);
        assert!(!h.tokens.is_present());
        assert_eq!(h.navigator.current().as_deref(), Some("/login"));
    }

    #[tokio::test]
    async fn test_non_success_carries_status() {
        let h = Harness::new();
        h.transport.respond(409, r#"{"error":"exists"}"#);

        let result: ApiResult<Category> = h
            .api
            .post("/categories", &CategoryPayload::new("Jedzenie"))
            .await;

        let err = result.unwrap_err();
        assert_eq!(err.status(), Some(409));
        assert_eq!(err.server_message(), Some("exists"));
        assert!(h.navigator.current().is_none());
    }

    #[tokio::test]
    async fn test_network_failure_propagates() {
        let h = Harness::new();
        h.transport.fail("connection refused");

        let result: ApiResult<Vec<Category>> = h.api.get("/categories").await;
        assert!(matches!(result, Err(ApiError::Network(_))));
    }

    #[tokio::test]
    async fn test_post_sends_json_body() {
        let h = Harness::new();
        h.transport
            .respond(201, r#"{"id":"7","name":"Kino","is_default":false}"#);

        let created: Category = h
            .api
            .post("/categories", &CategoryPayload::new("Kino"))
            .await
            .unwrap();

        assert_eq!(created.id, "7");
        let req = h.transport.last_request().unwrap();
        assert_eq!(req.method, Method::Post);
        assert_eq!(req.body.as_deref(), Some(r#"{"name":"Kino"}"#));
        assert_eq!(req.header("content-type"), Some("application/json"));
    }

    #[tokio::test]
    async fn test_delete_accepts_empty_body() {
        let h = Harness::new();
        h.transport.respond(204, "");
        h.api.delete("/categories/3").await.unwrap();
        assert_eq!(h.transport.last_request().unwrap().method, Method::Delete);
    }

    #[tokio::test]
    async fn test_unreadable_body_fails_delete() {
        let h = Harness::new();
        h.transport
            .fail(&TransportError::body_read("stream closed").to_string());

        let err = h.api.delete("/categories/3").await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "Network error: Failed to read body: stream closed"
        );
    }

    #[tokio::test]
    async fn test_malformed_body_is_decode_error() {
        let h = Harness::new();
        h.transport.respond(200, "{not json");
        let result: ApiResult<Vec<Category>> = h.api.get("/categories").await;
        assert!(matches!(result, Err(ApiError::Decode(_))));
    }

    #[test]
    fn test_build_query_encodes_values() {
        assert_eq!(build_query(&[]), "");
        assert_eq!(
            build_query(&[("name", "Dom & ogród".to_string()), ("limit", "3".to_string())]),
            "?name=Dom%20%26%20ogr%C3%B3d&limit=3"
        );
    }
}

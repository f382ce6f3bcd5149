//! Stateless HTTP request builder and response parser for the activities API.
//!
//! # Design
//! `ApiClient` holds the backend base URL and an injected [`TokenStore`];
//! it carries no other state between calls. Each operation is split into a
//! `build_*` method that produces an `HttpRequest` and a `parse_*` method
//! that consumes an `HttpResponse`. The caller executes the actual HTTP
//! round-trip, keeping the core deterministic and free of I/O dependencies.
//!
//! # Status handling
//! Non-delete `parse_*` methods deserialize the body without branching on
//! HTTP status: an error envelope will not match the expected DTO and
//! surfaces as `Deserialization`. Only the delete paths check the status and
//! extract the backend's `detail` message. This asymmetry matches the
//! backend integration contract this client replaces and is kept on purpose.

mod activities;
mod auth;
mod categories;
mod users;

use std::sync::Arc;

use serde::de::DeserializeOwned;

use crate::error::ApiError;
use crate::http::HttpResponse;
use crate::token::TokenStore;

/// Fallback for delete failures whose body carries no usable `detail` field.
const DELETE_FALLBACK_DETAIL: &str = "delete failed";

/// Client for the activities API.
///
/// Builds `HttpRequest` values and parses `HttpResponse` values without
/// touching the network. The caller is responsible for executing the HTTP
/// round-trip between `build_*` and `parse_*`.
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    tokens: Arc<dyn TokenStore>,
}

impl ApiClient {
    /// `base_url` is the backend origin including any path prefix
    /// (e.g. `https://backend.example.com/api`); a trailing slash is
    /// stripped.
    pub fn new(base_url: &str, tokens: Arc<dyn TokenStore>) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            tokens,
        }
    }

    /// The injected credential store.
    pub fn tokens(&self) -> &dyn TokenStore {
        self.tokens.as_ref()
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Header mapping for a request. Every request carries the JSON content
    /// type; authenticated requests add the bearer credential when the store
    /// holds one, and omit the authorization header entirely otherwise (the
    /// backend rejects the request, not this layer).
    fn headers(&self, include_auth: bool) -> Vec<(String, String)> {
        let mut headers = vec![(
            "content-type".to_string(),
            "application/json".to_string(),
        )];
        if include_auth {
            if let Some(token) = self.tokens.get().filter(|t| !t.is_empty()) {
                headers.push(("authorization".to_string(), format!("Bearer {token}")));
            }
        }
        headers
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

/// Deserialize a response body into `T` without inspecting the status.
fn parse_body<T: DeserializeOwned>(response: &HttpResponse) -> Result<T, ApiError> {
    serde_json::from_str(&response.body).map_err(|e| ApiError::Deserialization(e.to_string()))
}

/// Normalize a delete response: 2xx succeeds, anything else fails with the
/// body's `detail` field or a generic fallback.
fn check_delete(response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    let detail = serde_json::from_str::<serde_json::Value>(&response.body)
        .ok()
        .and_then(|v| v.get("detail")?.as_str().map(str::to_string))
        .unwrap_or_else(|| DELETE_FALLBACK_DETAIL.to_string());
    Err(ApiError::Server {
        status: response.status,
        detail,
    })
}

fn serialize_body<T: serde::Serialize>(input: &T) -> Result<String, ApiError> {
    serde_json::to_string(input).map_err(|e| ApiError::Serialization(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::MemoryTokenStore;

    fn client_with_token(token: Option<&str>) -> ApiClient {
        let store = Arc::new(MemoryTokenStore::new());
        if let Some(t) = token {
            store.set(t).unwrap();
        }
        ApiClient::new("http://localhost:8000/api", store)
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let client = ApiClient::new(
            "http://localhost:8000/api/",
            Arc::new(MemoryTokenStore::new()),
        );
        let req = client.build_me();
        assert_eq!(req.path, "http://localhost:8000/api/auth/me");
    }

    #[test]
    fn authenticated_headers_carry_bearer_token() {
        let client = client_with_token(Some("tok-1"));
        let headers = client.headers(true);
        assert!(headers.contains(&(
            "content-type".to_string(),
            "application/json".to_string()
        )));
        assert!(headers.contains(&("authorization".to_string(), "Bearer tok-1".to_string())));
    }

    #[test]
    fn missing_token_omits_authorization_header() {
        let client = client_with_token(None);
        let headers = client.headers(true);
        assert_eq!(headers.len(), 1);
        assert_eq!(headers[0].0, "content-type");
    }

    #[test]
    fn include_auth_false_skips_token_even_when_present() {
        let client = client_with_token(Some("tok-1"));
        let headers = client.headers(false);
        assert!(headers.iter().all(|(k, _)| k != "authorization"));
    }

    #[test]
    fn empty_token_is_treated_as_absent() {
        let client = client_with_token(Some(""));
        let headers = client.headers(true);
        assert!(headers.iter().all(|(k, _)| k != "authorization"));
    }

    #[test]
    fn check_delete_extracts_detail_message() {
        let resp = HttpResponse {
            status: 404,
            headers: Vec::new(),
            body: r#"{"detail": "Not found"}"#.to_string(),
        };
        let err = check_delete(&resp).unwrap_err();
        match err {
            ApiError::Server { status, detail } => {
                assert_eq!(status, 404);
                assert_eq!(detail, "Not found");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn check_delete_falls_back_without_detail_field() {
        let resp = HttpResponse {
            status: 500,
            headers: Vec::new(),
            body: r#"{"message": "boom"}"#.to_string(),
        };
        let err = check_delete(&resp).unwrap_err();
        match err {
            ApiError::Server { status, detail } => {
                assert_eq!(status, 500);
                assert_eq!(detail, DELETE_FALLBACK_DETAIL);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn check_delete_falls_back_on_unparseable_body() {
        let resp = HttpResponse {
            status: 502,
            headers: Vec::new(),
            body: "<html>bad gateway</html>".to_string(),
        };
        let err = check_delete(&resp).unwrap_err();
        assert!(matches!(err, ApiError::Server { status: 502, .. }));
    }

    #[test]
    fn check_delete_accepts_any_2xx() {
        for status in [200, 204] {
            let resp = HttpResponse {
                status,
                headers: Vec::new(),
                body: String::new(),
            };
            assert!(check_delete(&resp).is_ok());
        }
    }
}

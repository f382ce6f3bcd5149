//! Users facade. Mirrors the activities facade minus the state transition.
//!
//! The list endpoint serializes its filter verbatim — empty values included —
//! unlike the activities list, which drops them. Both encodings are part of
//! the backend integration contract; see `query` for the pair.

use super::{check_delete, parse_body, serialize_body, ApiClient};
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::query::{with_query, Filter};
use crate::types::{User, UserCreate, UserPage, UserUpdate};

impl ApiClient {
    /// List users. The filter is serialized verbatim, empty values included.
    pub fn build_list_users(&self, filter: &Filter) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: with_query(self.url("/users"), &filter.encode_verbatim()),
            headers: self.headers(true),
            body: None,
        }
    }

    pub fn parse_list_users(&self, response: HttpResponse) -> Result<UserPage, ApiError> {
        parse_body(&response)
    }

    pub fn build_get_user(&self, id: i64) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: self.url(&format!("/users/{id}")),
            headers: self.headers(true),
            body: None,
        }
    }

    pub fn parse_get_user(&self, response: HttpResponse) -> Result<User, ApiError> {
        parse_body(&response)
    }

    pub fn build_create_user(&self, input: &UserCreate) -> Result<HttpRequest, ApiError> {
        Ok(HttpRequest {
            method: HttpMethod::Post,
            path: self.url("/users"),
            headers: self.headers(true),
            body: Some(serialize_body(input)?),
        })
    }

    pub fn parse_create_user(&self, response: HttpResponse) -> Result<User, ApiError> {
        parse_body(&response)
    }

    pub fn build_update_user(&self, id: i64, input: &UserUpdate) -> Result<HttpRequest, ApiError> {
        Ok(HttpRequest {
            method: HttpMethod::Put,
            path: self.url(&format!("/users/{id}")),
            headers: self.headers(true),
            body: Some(serialize_body(input)?),
        })
    }

    pub fn parse_update_user(&self, response: HttpResponse) -> Result<User, ApiError> {
        parse_body(&response)
    }

    pub fn build_delete_user(&self, id: i64) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Delete,
            path: self.url(&format!("/users/{id}")),
            headers: self.headers(true),
            body: None,
        }
    }

    pub fn parse_delete_user(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_delete(&response)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::token::{MemoryTokenStore, TokenStore};

    fn client() -> ApiClient {
        let c = ApiClient::new("http://localhost:8000/api", Arc::new(MemoryTokenStore::new()));
        c.tokens().set("tok-1").unwrap();
        c
    }

    #[test]
    fn build_list_users_keeps_empty_filter_values() {
        let filter = Filter::new().with("include_inactive", true).with("search", "");
        let req = client().build_list_users(&filter);
        assert_eq!(
            req.path,
            "http://localhost:8000/api/users?include_inactive=true&search="
        );
    }

    #[test]
    fn build_list_users_without_filters_has_bare_path() {
        let req = client().build_list_users(&Filter::new());
        assert_eq!(req.path, "http://localhost:8000/api/users");
    }

    #[test]
    fn build_create_user_serializes_payload() {
        let input = UserCreate {
            username: "ana".to_string(),
            email: "ana@example.com".to_string(),
            password: "secret1".to_string(),
            role: None,
        };
        let req = client().build_create_user(&input).unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.path, "http://localhost:8000/api/users");
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["username"], "ana");
        assert!(body.get("role").is_none());
    }

    #[test]
    fn build_delete_user_produces_correct_request() {
        let req = client().build_delete_user(3);
        assert_eq!(req.method, HttpMethod::Delete);
        assert_eq!(req.path, "http://localhost:8000/api/users/3");
        assert!(req.body.is_none());
    }
}

//! Categories facade. Mirrors the activities facade minus the state
//! transition; the list endpoint takes no filters.

use super::{check_delete, parse_body, serialize_body, ApiClient};
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{Category, CategoryCreate, CategoryPage, CategoryUpdate};

impl ApiClient {
    pub fn build_list_categories(&self) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: self.url("/categories"),
            headers: self.headers(true),
            body: None,
        }
    }

    pub fn parse_list_categories(&self, response: HttpResponse) -> Result<CategoryPage, ApiError> {
        parse_body(&response)
    }

    pub fn build_get_category(&self, id: i64) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: self.url(&format!("/categories/{id}")),
            headers: self.headers(true),
            body: None,
        }
    }

    pub fn parse_get_category(&self, response: HttpResponse) -> Result<Category, ApiError> {
        parse_body(&response)
    }

    pub fn build_create_category(&self, input: &CategoryCreate) -> Result<HttpRequest, ApiError> {
        Ok(HttpRequest {
            method: HttpMethod::Post,
            path: self.url("/categories"),
            headers: self.headers(true),
            body: Some(serialize_body(input)?),
        })
    }

    pub fn parse_create_category(&self, response: HttpResponse) -> Result<Category, ApiError> {
        parse_body(&response)
    }

    pub fn build_update_category(
        &self,
        id: i64,
        input: &CategoryUpdate,
    ) -> Result<HttpRequest, ApiError> {
        Ok(HttpRequest {
            method: HttpMethod::Put,
            path: self.url(&format!("/categories/{id}")),
            headers: self.headers(true),
            body: Some(serialize_body(input)?),
        })
    }

    pub fn parse_update_category(&self, response: HttpResponse) -> Result<Category, ApiError> {
        parse_body(&response)
    }

    pub fn build_delete_category(&self, id: i64) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Delete,
            path: self.url(&format!("/categories/{id}")),
            headers: self.headers(true),
            body: None,
        }
    }

    pub fn parse_delete_category(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_delete(&response)
    }
}

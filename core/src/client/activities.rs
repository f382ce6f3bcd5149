//! Activities facade: list with filters, CRUD, and the state transition.

use super::{check_delete, parse_body, serialize_body, ApiClient};
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::query::{with_query, Filter};
use crate::types::{Activity, ActivityCreate, ActivityPage, ActivityState, ActivityUpdate, ChangeState};

impl ApiClient {
    /// List activities. Filter keys with empty values are dropped from the
    /// query string (compact encoding).
    pub fn build_list_activities(&self, filter: &Filter) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: with_query(self.url("/activities"), &filter.encode_compact()),
            headers: self.headers(true),
            body: None,
        }
    }

    pub fn parse_list_activities(&self, response: HttpResponse) -> Result<ActivityPage, ApiError> {
        parse_body(&response)
    }

    pub fn build_get_activity(&self, id: i64) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: self.url(&format!("/activities/{id}")),
            headers: self.headers(true),
            body: None,
        }
    }

    pub fn parse_get_activity(&self, response: HttpResponse) -> Result<Activity, ApiError> {
        parse_body(&response)
    }

    pub fn build_create_activity(&self, input: &ActivityCreate) -> Result<HttpRequest, ApiError> {
        Ok(HttpRequest {
            method: HttpMethod::Post,
            path: self.url("/activities"),
            headers: self.headers(true),
            body: Some(serialize_body(input)?),
        })
    }

    pub fn parse_create_activity(&self, response: HttpResponse) -> Result<Activity, ApiError> {
        parse_body(&response)
    }

    /// Full-replace update via PUT.
    pub fn build_update_activity(
        &self,
        id: i64,
        input: &ActivityUpdate,
    ) -> Result<HttpRequest, ApiError> {
        Ok(HttpRequest {
            method: HttpMethod::Put,
            path: self.url(&format!("/activities/{id}")),
            headers: self.headers(true),
            body: Some(serialize_body(input)?),
        })
    }

    pub fn parse_update_activity(&self, response: HttpResponse) -> Result<Activity, ApiError> {
        parse_body(&response)
    }

    /// Partial update of the single `state` field via PATCH.
    pub fn build_change_activity_state(
        &self,
        id: i64,
        state: ActivityState,
    ) -> Result<HttpRequest, ApiError> {
        Ok(HttpRequest {
            method: HttpMethod::Patch,
            path: self.url(&format!("/activities/{id}/state")),
            headers: self.headers(true),
            body: Some(serialize_body(&ChangeState { state })?),
        })
    }

    pub fn parse_change_activity_state(
        &self,
        response: HttpResponse,
    ) -> Result<Activity, ApiError> {
        parse_body(&response)
    }

    pub fn build_delete_activity(&self, id: i64) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Delete,
            path: self.url(&format!("/activities/{id}")),
            headers: self.headers(true),
            body: None,
        }
    }

    /// The one status-checked parse on this facade (see module docs on the
    /// status-handling asymmetry).
    pub fn parse_delete_activity(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_delete(&response)
    }
}

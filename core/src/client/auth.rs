//! Auth facade: login, register, current user, logout.
//!
//! Login and register are the two builds that never attach the bearer
//! header — no credential exists yet. `parse_login` is the one parse with a
//! side effect: it writes the returned `access_token` into the store before
//! handing the response back, so the very next authenticated build already
//! carries the new credential.
//!
//! Logout only clears the credential. Where to navigate afterwards is the
//! host UI's decision, not this crate's.

use super::{parse_body, serialize_body, ApiClient};
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::token::TokenStore;
use crate::types::{LoginRequest, RegisterRequest, TokenResponse, User};

impl ApiClient {
    pub fn build_login(&self, input: &LoginRequest) -> Result<HttpRequest, ApiError> {
        Ok(HttpRequest {
            method: HttpMethod::Post,
            path: self.url("/auth/login"),
            headers: self.headers(false),
            body: Some(serialize_body(input)?),
        })
    }

    /// Parse a login response and persist its `access_token`, overwriting
    /// any previous credential.
    pub fn parse_login(&self, response: HttpResponse) -> Result<TokenResponse, ApiError> {
        let token: TokenResponse = parse_body(&response)?;
        self.tokens().set(&token.access_token)?;
        Ok(token)
    }

    pub fn build_register(&self, input: &RegisterRequest) -> Result<HttpRequest, ApiError> {
        Ok(HttpRequest {
            method: HttpMethod::Post,
            path: self.url("/auth/register"),
            headers: self.headers(false),
            body: Some(serialize_body(input)?),
        })
    }

    pub fn parse_register(&self, response: HttpResponse) -> Result<User, ApiError> {
        parse_body(&response)
    }

    pub fn build_me(&self) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: self.url("/auth/me"),
            headers: self.headers(true),
            body: None,
        }
    }

    pub fn parse_me(&self, response: HttpResponse) -> Result<User, ApiError> {
        parse_body(&response)
    }

    /// Drop the stored credential. Subsequent authenticated builds omit the
    /// authorization header until the next successful login.
    pub fn logout(&self) -> Result<(), ApiError> {
        self.tokens().clear()
    }

    pub fn is_authenticated(&self) -> bool {
        self.tokens().is_authenticated()
    }
}

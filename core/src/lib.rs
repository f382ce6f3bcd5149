//! Synchronous API client core for the activities management service.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern). The caller executes the
//! actual HTTP round-trip, making the core fully deterministic and testable.
//!
//! # Design
//! - `ApiClient` holds the backend base URL and an injected [`TokenStore`];
//!   the bearer credential is the only client-owned state.
//! - Each operation of the four facades (auth, activities, categories, users)
//!   is split into `build_*` (produces request) and `parse_*` (consumes
//!   response), so the I/O boundary is explicit.
//! - Only delete parses branch on HTTP status; other parses deserialize the
//!   body as-is. See `client` module docs for why this asymmetry is kept.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod error;
pub mod http;
pub mod query;
pub mod token;
pub mod types;

pub use client::ApiClient;
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use query::Filter;
pub use token::{FileTokenStore, MemoryTokenStore, TokenStore};
pub use types::{
    Activity, ActivityCreate, ActivityPage, ActivityState, ActivityUpdate, Category,
    CategoryCreate, CategoryPage, CategoryUpdate, ChangeState, LoginRequest, Priority,
    RegisterRequest, Role, TokenResponse, User, UserCreate, UserPage, UserUpdate,
};

//! Error types for the activities API client.
//!
//! # Design
//! `Server` carries the backend's `detail` message because that field is the
//! conventional error envelope of the API; callers surface it directly to the
//! user. JSON failures keep separate serialize/deserialize variants so a bad
//! request payload is distinguishable from an unexpected response body.
//! Transport failures never appear here — the host that executes the HTTP
//! round-trip owns those.

use std::fmt;

/// Errors returned by `ApiClient` methods and token stores.
#[derive(Debug)]
pub enum ApiError {
    /// The server rejected the request; `detail` is the backend's message
    /// field, or a generic fallback when the body carried none.
    Server { status: u16, detail: String },

    /// The request payload could not be serialized to JSON.
    Serialization(String),

    /// The response body could not be deserialized into the expected type.
    Deserialization(String),

    /// The token store failed to persist or remove the credential.
    TokenStorage(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Server { status, detail } => {
                write!(f, "HTTP {status}: {detail}")
            }
            ApiError::Serialization(msg) => {
                write!(f, "serialization failed: {msg}")
            }
            ApiError::Deserialization(msg) => {
                write!(f, "deserialization failed: {msg}")
            }
            ApiError::TokenStorage(msg) => {
                write!(f, "token storage failed: {msg}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

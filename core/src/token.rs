//! Bearer-token storage for the activities API client.
//!
//! # Design
//! The store is an injected dependency rather than ambient global state, so
//! a host can run several independent sessions and tests never share
//! credentials. The contract is deliberately small: one live token, set on
//! login, cleared on logout, read on every authenticated build. No expiry
//! tracking happens here — an expired token is only discovered when the
//! backend rejects a request.
//!
//! `get` is infallible: a missing or unreadable backing entry means "not
//! authenticated", never an error. Only writes can fail.

use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

use crate::error::ApiError;

/// Single source of truth for the current bearer credential.
pub trait TokenStore: Send + Sync {
    /// The persisted token, or `None` if never set or cleared.
    fn get(&self) -> Option<String>;

    /// Persist `token`, overwriting any previous value. The token is opaque;
    /// no format validation is performed.
    fn set(&self, token: &str) -> Result<(), ApiError>;

    /// Remove the persisted token.
    fn clear(&self) -> Result<(), ApiError>;

    /// True iff a non-empty token is present.
    fn is_authenticated(&self) -> bool {
        self.get().is_some_and(|t| !t.is_empty())
    }
}

/// In-memory store. Forgets the token when dropped; meant for tests and for
/// hosts that manage persistence themselves.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: Mutex<Option<String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TokenStore for MemoryTokenStore {
    fn get(&self) -> Option<String> {
        self.token.lock().ok()?.clone()
    }

    fn set(&self, token: &str) -> Result<(), ApiError> {
        let mut guard = self
            .token
            .lock()
            .map_err(|_| ApiError::TokenStorage("token store lock poisoned".to_string()))?;
        *guard = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<(), ApiError> {
        let mut guard = self
            .token
            .lock()
            .map_err(|_| ApiError::TokenStorage("token store lock poisoned".to_string()))?;
        *guard = None;
        Ok(())
    }
}

/// File-backed store: one named file holding the raw token string, surviving
/// process restarts within the same profile directory.
///
/// Read failures (missing file, permission problems, non-UTF-8 content) are
/// treated as "no token" so a corrupt entry degrades to a login prompt rather
/// than a hard error.
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl TokenStore for FileTokenStore {
    fn get(&self) -> Option<String> {
        let token = fs::read_to_string(&self.path).ok()?;
        let token = token.trim();
        if token.is_empty() {
            None
        } else {
            Some(token.to_string())
        }
    }

    fn set(&self, token: &str) -> Result<(), ApiError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| ApiError::TokenStorage(e.to_string()))?;
        }
        fs::write(&self.path, token).map_err(|e| ApiError::TokenStorage(e.to_string()))
    }

    fn clear(&self) -> Result<(), ApiError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            // Clearing an absent token is a no-op, matching the in-memory store.
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(ApiError::TokenStorage(e.to_string())),
        }
    }
}

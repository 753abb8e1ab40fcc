//! Authentication errors.

use thiserror::Error;

/// Authentication error type.
#[derive(Error, Debug)]
pub enum AuthError {
    /// No session is present.
    #[error("not authenticated")]
    NotAuthenticated,

    /// The server rejected the session token.
    #[error("session expired")]
    SessionExpired,

    /// Storage error while reading or writing the session.
    #[error("storage error: {0}")]
    Storage(#[from] vitrine_store::StoreError),
}

impl AuthError {
    /// Check if this is an authentication failure that re-login resolves.
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, AuthError::NotAuthenticated | AuthError::SessionExpired)
    }
}

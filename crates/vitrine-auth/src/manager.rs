//! Session lifecycle over durable storage.

use crate::{AuthError, AuthSession, SessionToken};
use std::sync::Arc;
use tracing::{debug, warn};
use vitrine_store::Storage;

/// Storage key for the persisted session.
pub const SESSION_KEY: &str = "session";

/// Owns the current session and its durable storage key.
///
/// Only this type writes the session key; a forced logout here is what
/// invalidates the client after the server rejects a token.
pub struct SessionManager {
    session: Option<AuthSession>,
    storage: Arc<dyn Storage>,
}

impl SessionManager {
    /// Open the manager, restoring a persisted session if one exists.
    ///
    /// A malformed or unreadable session is discarded; the client starts
    /// logged out rather than erroring.
    pub fn open(storage: Arc<dyn Storage>) -> Self {
        let session = match storage.get(SESSION_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<AuthSession>(&raw) {
                Ok(session) => {
                    debug!(user = %session.user_id, "restored session");
                    Some(session)
                }
                Err(e) => {
                    warn!(error = %e, "discarding malformed session");
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                warn!(error = %e, "failed to read session");
                None
            }
        };
        Self { session, storage }
    }

    /// Install a session after login and persist it.
    pub fn login(&mut self, session: AuthSession) {
        if let Ok(json) = serde_json::to_string(&session) {
            if let Err(e) = self.storage.set(SESSION_KEY, &json) {
                warn!(error = %e, "failed to persist session");
            }
        }
        self.session = Some(session);
    }

    /// Clear the session from memory and storage.
    ///
    /// Used both for explicit logout and for the forced logout after the
    /// server reports an expired or invalid token.
    pub fn logout(&mut self) {
        self.session = None;
        if let Err(e) = self.storage.remove(SESSION_KEY) {
            warn!(error = %e, "failed to clear persisted session");
        }
    }

    /// The current session, if any.
    pub fn session(&self) -> Option<&AuthSession> {
        self.session.as_ref()
    }

    /// The bearer token, if authenticated.
    pub fn token(&self) -> Option<&SessionToken> {
        self.session.as_ref().map(|s| &s.token)
    }

    /// Check whether a session is present.
    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }

    /// The current session, or `AuthError::NotAuthenticated`.
    pub fn require_session(&self) -> Result<&AuthSession, AuthError> {
        self.session.as_ref().ok_or(AuthError::NotAuthenticated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vitrine_commerce::UserId;
    use vitrine_store::MemoryStorage;

    fn session() -> AuthSession {
        AuthSession::new(
            SessionToken::new("bearer-token"),
            UserId::new("user-1"),
            "ada@example.com",
        )
    }

    #[test]
    fn test_starts_logged_out() {
        let manager = SessionManager::open(Arc::new(MemoryStorage::new()));
        assert!(!manager.is_authenticated());
        assert!(manager.require_session().is_err());
    }

    #[test]
    fn test_login_persists_and_restores() {
        let storage = Arc::new(MemoryStorage::new());
        {
            let mut manager = SessionManager::open(storage.clone());
            manager.login(session());
            assert!(manager.is_authenticated());
        }

        let restored = SessionManager::open(storage);
        assert!(restored.is_authenticated());
        assert_eq!(restored.require_session().unwrap().email, "ada@example.com");
        assert_eq!(restored.token().unwrap().as_str(), "bearer-token");
    }

    #[test]
    fn test_logout_clears_memory_and_storage() {
        let storage = Arc::new(MemoryStorage::new());
        let mut manager = SessionManager::open(storage.clone());
        manager.login(session());
        manager.logout();

        assert!(!manager.is_authenticated());
        assert!(storage.get(SESSION_KEY).unwrap().is_none());
    }

    #[test]
    fn test_malformed_session_discarded() {
        let storage = Arc::new(MemoryStorage::with_entry(SESSION_KEY, "{broken"));
        let manager = SessionManager::open(storage);
        assert!(!manager.is_authenticated());
    }
}

/*
[INPUT]:  Login tokens and the user echo returned by the service
[OUTPUT]: Session retrieval, role checks, and expiration status
[POS]:    Auth layer - session lifecycle management
[UPDATE]: When adding token refresh or changing storage strategy
*/

use chrono::{DateTime, Duration, Utc};
use std::sync::{Arc, RwLock};

use crate::types::{Role, User};

/// The service issues JWTs valid for one hour; the client mirrors that
/// lifetime instead of decoding the token.
pub const SESSION_TTL_SECONDS: i64 = 3600;

/// Stored session data with metadata
#[derive(Debug, Clone)]
pub struct SessionData {
    pub token: String,
    pub usuario: User,
    pub expires_at: DateTime<Utc>,
}

/// Thread-safe session manager, shared between the HTTP client and the
/// console. The local-storage equivalent of the original web client.
#[derive(Debug, Clone)]
pub struct SessionManager {
    data: Arc<RwLock<Option<SessionData>>>,
}

impl SessionManager {
    /// Create a new empty session manager
    pub fn new() -> Self {
        Self {
            data: Arc::new(RwLock::new(None)),
        }
    }

    /// Store a fresh session after a successful login
    pub fn set_session(&self, token: String, usuario: User) {
        let expires_at = Utc::now() + Duration::seconds(SESSION_TTL_SECONDS);
        self.restore(token, usuario, expires_at);
    }

    /// Rehydrate a session persisted by an earlier run
    pub fn restore(&self, token: String, usuario: User, expires_at: DateTime<Utc>) {
        let session = SessionData {
            token,
            usuario,
            expires_at,
        };

        let mut guard = self.data.write().unwrap();
        *guard = Some(session);
    }

    /// Get the current token if available
    pub fn token(&self) -> Option<String> {
        let guard = self.data.read().unwrap();
        guard.as_ref().map(|data| data.token.clone())
    }

    /// Get the logged-in user echo if available
    pub fn current_user(&self) -> Option<User> {
        let guard = self.data.read().unwrap();
        guard.as_ref().map(|data| data.usuario.clone())
    }

    /// Role of the logged-in user, if any
    pub fn role(&self) -> Option<Role> {
        let guard = self.data.read().unwrap();
        guard.as_ref().map(|data| data.usuario.perfil)
    }

    pub fn is_admin(&self) -> bool {
        self.role() == Some(Role::Admin)
    }

    /// Check if the session is past its expiry (no session counts as expired)
    pub fn is_expired(&self) -> bool {
        let guard = self.data.read().unwrap();
        match guard.as_ref() {
            Some(data) => Utc::now() > data.expires_at,
            None => true,
        }
    }

    /// A session exists and has not expired
    pub fn is_authenticated(&self) -> bool {
        !self.is_expired()
    }

    /// Get session data if available
    pub fn session_data(&self) -> Option<SessionData> {
        let guard = self.data.read().unwrap();
        guard.clone()
    }

    /// Clear the stored session
    pub fn clear(&self) {
        let mut guard = self.data.write().unwrap();
        *guard = None;
    }
}

impl Default for SessionManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user(perfil: Role) -> User {
        User {
            id: Some(1),
            nome: "Admin Sistema".to_string(),
            email: "admin@empresa.com".to_string(),
            perfil,
            setor: None,
            ativo: true,
        }
    }

    #[test]
    fn new_manager_is_empty() {
        let manager = SessionManager::new();
        assert!(manager.token().is_none());
        assert!(manager.is_expired());
        assert!(!manager.is_authenticated());
        assert!(!manager.is_admin());
    }

    #[test]
    fn set_and_read_session() {
        let manager = SessionManager::new();
        manager.set_session("jwt-token".to_string(), sample_user(Role::Admin));

        assert_eq!(manager.token(), Some("jwt-token".to_string()));
        assert!(manager.is_authenticated());
        assert!(manager.is_admin());
        assert_eq!(manager.role(), Some(Role::Admin));
    }

    #[test]
    fn restored_session_in_the_past_is_expired() {
        let manager = SessionManager::new();
        manager.restore(
            "stale".to_string(),
            sample_user(Role::Funcionario),
            Utc::now() - Duration::minutes(5),
        );

        assert!(manager.is_expired());
        assert!(!manager.is_authenticated());
        // The data stays readable so callers can report who expired.
        assert!(manager.current_user().is_some());
    }

    #[test]
    fn clear_session() {
        let manager = SessionManager::new();
        manager.set_session("jwt-token".to_string(), sample_user(Role::Funcionario));

        manager.clear();
        assert!(manager.token().is_none());
        assert!(manager.is_expired());
    }

    #[test]
    fn clones_share_state() {
        let manager = SessionManager::new();
        let other = manager.clone();
        manager.set_session("jwt-token".to_string(), sample_user(Role::Funcionario));

        assert_eq!(other.token(), Some("jwt-token".to_string()));
        other.clear();
        assert!(manager.token().is_none());
    }
}

//! cafetal-session: the auth collaborator seam.
//!
//! Session issuance lives in the external backend; protected surfaces here
//! only ever ask one question — "who is signed in, if anyone?". The
//! [`SessionProvider`] trait carries that question, with a static
//! implementation for tests and a cookie-bearing HTTP client for the real
//! service.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

// ──────────────────────────────────────────────
// Errors
// ──────────────────────────────────────────────

/// Errors a session check can produce. An expired or missing session is NOT
/// an error — it is the `Ok(None)` unauthenticated signal.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// The backend could not be reached.
    #[error("session transport error: {0}")]
    Transport(String),

    /// The backend answered with something that is not a profile.
    #[error("malformed session response: {0}")]
    Malformed(String),
}

// ──────────────────────────────────────────────
// Profile and trait
// ──────────────────────────────────────────────

/// The signed-in user, as the backend reports it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub username: String,
    pub nombre: String,
    pub apellido: String,
}

/// Asks the backend who currently holds the session.
#[async_trait]
pub trait SessionProvider: Send + Sync {
    /// `Ok(Some(profile))` for a live session, `Ok(None)` when
    /// unauthenticated.
    async fn current_user(&self) -> Result<Option<UserProfile>, SessionError>;
}

// ──────────────────────────────────────────────
// StaticSession
// ──────────────────────────────────────────────

/// A session provider with a fixed answer. Useful for tests and for hosts
/// that run without the backend.
pub struct StaticSession {
    profile: Option<UserProfile>,
}

impl StaticSession {
    /// Always signed in as the given profile.
    pub fn signed_in(profile: UserProfile) -> Self {
        StaticSession {
            profile: Some(profile),
        }
    }

    /// Always anonymous.
    pub fn anonymous() -> Self {
        StaticSession { profile: None }
    }
}

#[async_trait]
impl SessionProvider for StaticSession {
    async fn current_user(&self) -> Result<Option<UserProfile>, SessionError> {
        Ok(self.profile.clone())
    }
}

// ──────────────────────────────────────────────
// HttpSession
// ──────────────────────────────────────────────

/// Session check against the backend's `/api/user` endpoint.
///
/// Sync `ureq` wrapped in `spawn_blocking`; a 401 is the unauthenticated
/// signal, not a failure.
pub struct HttpSession {
    base_url: String,
    cookie: String,
}

impl HttpSession {
    pub fn new(base_url: &str, cookie: impl Into<String>) -> Self {
        HttpSession {
            base_url: base_url.trim_end_matches('/').to_string(),
            cookie: cookie.into(),
        }
    }
}

#[async_trait]
impl SessionProvider for HttpSession {
    async fn current_user(&self) -> Result<Option<UserProfile>, SessionError> {
        let url = format!("{}/api/user", self.base_url);
        let cookie = self.cookie.clone();

        tokio::task::spawn_blocking(move || {
            let agent = ureq::Agent::new_with_defaults();
            let response = agent.get(&url).header("Cookie", &cookie).call();
            match response {
                Ok(response) => response
                    .into_body()
                    .read_json::<UserProfile>()
                    .map(Some)
                    .map_err(|e| SessionError::Malformed(e.to_string())),
                Err(ureq::Error::StatusCode(401)) => Ok(None),
                Err(other) => Err(SessionError::Transport(other.to_string())),
            }
        })
        .await
        .map_err(|e| SessionError::Transport(format!("task join: {e}")))?
    }
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn profile() -> UserProfile {
        UserProfile {
            username: "mrodriguez".to_string(),
            nombre: "María".to_string(),
            apellido: "Rodríguez".to_string(),
        }
    }

    #[tokio::test]
    async fn static_session_signed_in() {
        let session = StaticSession::signed_in(profile());
        assert_eq!(session.current_user().await.unwrap(), Some(profile()));
    }

    #[tokio::test]
    async fn static_session_anonymous() {
        let session = StaticSession::anonymous();
        assert_eq!(session.current_user().await.unwrap(), None);
    }

    #[test]
    fn profile_wire_shape() {
        let parsed: UserProfile = serde_json::from_value(serde_json::json!({
            "username": "mrodriguez",
            "nombre": "María",
            "apellido": "Rodríguez",
        }))
        .unwrap();
        assert_eq!(parsed, profile());
    }
}

//! Per-session login state.
//!
//! # Invariants
//! - `identity` is present iff the session is logged in.
//! - A failed login leaves the previous state untouched.
//! - Passwords are never logged.

use crate::service::credential_service::CredentialStore;
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    LoggedOut,
    LoggedIn { identity: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// Username unknown or password mismatch.
    AuthFailure,
    NotLoggedIn,
}

impl Display for SessionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthFailure => write!(f, "invalid username or password"),
            Self::NotLoggedIn => write!(f, "login required"),
        }
    }
}

impl Error for SessionError {}

/// Login state for one interactive user.
#[derive(Debug, Clone)]
pub struct Session {
    id: Uuid,
    state: SessionState,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// Starts logged out with a fresh correlation id.
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            state: SessionState::LoggedOut,
        }
    }

    /// Correlation id used in log lines.
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn is_logged_in(&self) -> bool {
        matches!(self.state, SessionState::LoggedIn { .. })
    }

    pub fn current_identity(&self) -> Option<&str> {
        match &self.state {
            SessionState::LoggedIn { identity } => Some(identity.as_str()),
            SessionState::LoggedOut => None,
        }
    }

    /// Identity of the logged-in user, or `NotLoggedIn`.
    pub fn require_identity(&self) -> Result<&str, SessionError> {
        self.current_identity().ok_or(SessionError::NotLoggedIn)
    }

    /// Verifies credentials and, on success, becomes `LoggedIn(username)`.
    pub fn login(
        &mut self,
        credentials: &CredentialStore,
        username: &str,
        password: &str,
    ) -> Result<(), SessionError> {
        if !credentials.verify(username, password) {
            info!(
                "event=login module=session status=error error_code=auth_failure session={}",
                self.id
            );
            return Err(SessionError::AuthFailure);
        }

        self.state = SessionState::LoggedIn {
            identity: username.to_string(),
        };
        info!(
            "event=login module=session status=ok session={} user={username}",
            self.id
        );
        Ok(())
    }

    /// Returns to `LoggedOut`. Logging out twice is harmless.
    pub fn logout(&mut self) {
        if self.is_logged_in() {
            info!("event=logout module=session status=ok session={}", self.id);
        }
        self.state = SessionState::LoggedOut;
    }
}

//! Session store: the single source of truth for who is signed in.
//!
//! SYSTEM CONTEXT
//! ==============
//! The navigation guard reads it to gate views, and the resource client
//! reads its token (via [`CredentialSource`]) to authorize every request.
//!
//! DESIGN
//! ======
//! `user` and `token` are always set or cleared together, in memory and in
//! durable storage, under one write lock and in a single storage change.
//! Nothing else mutates the session, so the in-memory copy and the persisted
//! copy cannot drift apart across a restart.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::sync::{Arc, PoisonError, RwLock};

use super::storage::{Storage, StorageError};
use crate::net::client::{CredentialSource, ResourceClient};
use crate::net::error::{Action, ActionError};
use crate::net::types::{Credentials, LoginResponse, Registration, User};

pub const TOKEN_KEY: &str = "token";
pub const USER_KEY: &str = "user";

const LOGIN_PATH: &str = "/frontend/users/login";
const REGISTER_PATH: &str = "/frontend/users/register";

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error(transparent)]
    Action(#[from] ActionError),
    #[error("login response carried an empty token")]
    EmptyToken,
    #[error("failed to persist session: {0}")]
    Persist(#[from] StorageError),
}

// =============================================================================
// SESSION
// =============================================================================

/// Current identity and credential. Both present, or both absent.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Session {
    user: Option<User>,
    token: Option<String>,
}

impl Session {
    #[must_use]
    pub fn anonymous() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn authenticated(user: User, token: String) -> Self {
        Self { user: Some(user), token: Some(token) }
    }

    #[must_use]
    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    #[must_use]
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    #[must_use]
    pub fn is_logged_in(&self) -> bool {
        self.user.is_some()
    }

    #[must_use]
    pub fn role(&self) -> Option<&str> {
        self.user.as_ref().map(|u| u.role.as_str())
    }

    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.user.as_ref().is_some_and(User::is_admin)
    }
}

// =============================================================================
// STORE
// =============================================================================

pub struct SessionStore {
    state: RwLock<Session>,
    storage: Arc<dyn Storage>,
}

impl SessionStore {
    /// Anonymous store that has not looked at storage yet.
    #[must_use]
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { state: RwLock::new(Session::anonymous()), storage }
    }

    /// Build a store and restore any persisted session.
    ///
    /// Absent, partial, or unparsable persisted state yields an anonymous
    /// session; this never fails.
    #[must_use]
    pub fn bootstrap(storage: Arc<dyn Storage>) -> Self {
        let session = read_persisted(storage.as_ref());
        match session.user() {
            Some(user) => tracing::info!(user = %user.username, role = %user.role, "session restored"),
            None => tracing::debug!("session starts anonymous"),
        }
        Self { state: RwLock::new(session), storage }
    }

    /// Copy of the current session.
    #[must_use]
    pub fn snapshot(&self) -> Session {
        self.state.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    #[must_use]
    pub fn is_logged_in(&self) -> bool {
        self.state.read().unwrap_or_else(PoisonError::into_inner).is_logged_in()
    }

    #[must_use]
    pub fn current_user(&self) -> Option<User> {
        self.state.read().unwrap_or_else(PoisonError::into_inner).user().cloned()
    }

    #[must_use]
    pub fn role(&self) -> Option<String> {
        self.state.read().unwrap_or_else(PoisonError::into_inner).role().map(ToOwned::to_owned)
    }

    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.state.read().unwrap_or_else(PoisonError::into_inner).is_admin()
    }

    #[must_use]
    pub fn token(&self) -> Option<String> {
        self.state.read().unwrap_or_else(PoisonError::into_inner).token().map(ToOwned::to_owned)
    }

    /// Authenticate and, on success, replace the session wholesale.
    ///
    /// # Errors
    ///
    /// [`SessionError::Action`] when the backend rejects the credentials or
    /// is unreachable, [`SessionError::EmptyToken`] for a token-less reply,
    /// and [`SessionError::Persist`] when storage refuses the write. The
    /// session is unchanged in every error case.
    pub async fn login(&self, api: &ResourceClient, credentials: &Credentials) -> Result<LoginResponse, SessionError> {
        let response: LoginResponse = api
            .post(LOGIN_PATH, credentials)
            .await
            .map_err(|e| ActionError::from_api(Action::Login, api.locale(), e))?;

        if response.token.is_empty() {
            tracing::warn!(user = %credentials.username, "login response missing token");
            return Err(SessionError::EmptyToken);
        }

        let next = Session::authenticated(response.user.clone(), response.token.clone());
        {
            let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
            if let Err(e) = write_persisted(self.storage.as_ref(), &next) {
                tracing::warn!(error = %e, "persisting session failed; keeping previous session");
                return Err(SessionError::Persist(e));
            }
            *state = next;
        }

        tracing::info!(user = %response.user.username, role = %response.user.role, "logged in");
        Ok(response)
    }

    /// Create an account. Does not sign the new account in.
    ///
    /// # Errors
    ///
    /// Normalized [`ActionError`] for any backend or transport failure.
    pub async fn register(&self, api: &ResourceClient, registration: &Registration) -> Result<User, ActionError> {
        let user: User = api
            .post(REGISTER_PATH, registration)
            .await
            .map_err(|e| ActionError::from_api(Action::Register, api.locale(), e))?;
        tracing::info!(user = %user.username, "account registered");
        Ok(user)
    }

    /// Clear the session in memory and in storage. Always succeeds.
    pub fn logout(&self) {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        let previous = state.user().map(|u| u.username.clone());
        *state = Session::anonymous();
        if let Err(e) = write_persisted(self.storage.as_ref(), &state) {
            tracing::warn!(error = %e, "clearing persisted session failed");
        }
        drop(state);

        match previous {
            Some(user) => tracing::info!(%user, "logged out"),
            None => tracing::debug!("logout while anonymous"),
        }
    }
}

impl CredentialSource for SessionStore {
    fn bearer_token(&self) -> Option<String> {
        self.token()
    }
}

/// Mirror `session` into storage in one change: both keys written, or both
/// removed.
fn write_persisted(storage: &dyn Storage, session: &Session) -> Result<(), StorageError> {
    match (session.user(), session.token()) {
        (Some(user), Some(token)) => {
            let encoded = serde_json::to_string(user)?;
            storage.replace(&[(TOKEN_KEY, token), (USER_KEY, encoded.as_str())], &[])
        }
        _ => storage.replace(&[], &[TOKEN_KEY, USER_KEY]),
    }
}

fn read_persisted(storage: &dyn Storage) -> Session {
    let mut values = storage.get_many(&[TOKEN_KEY, USER_KEY]).into_iter();
    let token = values.next().flatten().filter(|t| !t.is_empty());
    let raw_user = values.next().flatten();

    let (token, raw_user) = match (token, raw_user) {
        (Some(token), Some(raw_user)) => (token, raw_user),
        (None, None) => return Session::anonymous(),
        _ => {
            tracing::warn!("persisted session incomplete; starting anonymous");
            return Session::anonymous();
        }
    };

    match serde_json::from_str::<User>(&raw_user) {
        Ok(user) => Session::authenticated(user, token),
        Err(e) => {
            tracing::warn!(error = %e, "persisted user unparsable; starting anonymous");
            Session::anonymous()
        }
    }
}

// src/session.rs

use std::sync::Arc;

use validator::Validate;

use crate::{
    api::QuizApi,
    error::AppError,
    models::user::{LoginRequest, Session, SignupRequest, User},
    storage::SessionStorage,
};

const TOKEN_KEY: &str = "token";
const USER_KEY: &str = "user";

/// Process-wide authentication state.
///
/// Holds the current `(token, user)` pair in memory and mirrors every
/// change into the persisted storage before returning, so a process
/// restart immediately after a successful call observes the new state.
pub struct SessionStore {
    api: Arc<dyn QuizApi>,
    storage: Arc<dyn SessionStorage>,
    session: Option<Session>,
}

impl SessionStore {
    pub fn new(api: Arc<dyn QuizApi>, storage: Arc<dyn SessionStorage>) -> Self {
        Self {
            api,
            storage,
            session: None,
        }
    }

    /// Loads a previously persisted session, if any.
    ///
    /// Corrupt persisted data is treated exactly like a logout: both keys
    /// are cleared and the store ends up unauthenticated. Never fails.
    pub fn hydrate(&mut self) {
        match (self.storage.get(TOKEN_KEY), self.storage.get(USER_KEY)) {
            (Some(token), Some(raw_user)) => match serde_json::from_str::<User>(&raw_user) {
                Ok(user) => {
                    tracing::debug!("Restored session for '{}'", user.username);
                    self.session = Some(Session { token, user });
                }
                Err(err) => {
                    tracing::warn!("Discarding corrupt persisted session: {}", err);
                    self.logout();
                }
            },
            _ => self.session = None,
        }
    }

    pub async fn login(&mut self, username: &str, password: &str) -> Result<Session, AppError> {
        let request = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        request
            .validate()
            .map_err(|err| AppError::ValidationError(err.to_string()))?;

        // Any previous session must be fully cleared before the new pair
        // is written; a stale token must never survive next to a new user.
        self.logout();

        let session = self.api.login(username, password).await?;
        self.persist(&session)?;
        self.session = Some(session.clone());
        tracing::info!("Signed in as '{}'", session.user.username);
        Ok(session)
    }

    /// Creates an account, then logs in with the same credentials, so a
    /// successful signup is never observed without authentication.
    pub async fn signup(
        &mut self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<Session, AppError> {
        let request = SignupRequest {
            username: username.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        };
        request
            .validate()
            .map_err(|err| AppError::ValidationError(err.to_string()))?;

        self.api.signup(username, email, password).await?;
        self.login(username, password).await
    }

    /// Clears persisted and in-memory state. Idempotent.
    pub fn logout(&mut self) {
        self.storage.remove(TOKEN_KEY);
        self.storage.remove(USER_KEY);
        self.session = None;
    }

    /// Replaces the stored profile and re-persists it. The token is left
    /// untouched.
    pub fn update_user(&mut self, user: User) -> Result<(), AppError> {
        let session = self
            .session
            .as_mut()
            .ok_or_else(|| AppError::AuthError("Not signed in".to_string()))?;
        session.user = user;
        let encoded = serde_json::to_string(&session.user)?;
        self.storage.set(USER_KEY, &encoded);
        Ok(())
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn token(&self) -> Option<&str> {
        self.session.as_ref().map(|s| s.token.as_str())
    }

    pub fn user(&self) -> Option<&User> {
        self.session.as_ref().map(|s| &s.user)
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }

    fn persist(&self, session: &Session) -> Result<(), AppError> {
        let encoded = serde_json::to_string(&session.user)?;
        self.storage.set(TOKEN_KEY, &session.token);
        self.storage.set(USER_KEY, &encoded);
        Ok(())
    }
}

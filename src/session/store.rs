//! Session store: mocked sign-in mirrored to durable storage

use super::model::{LoginCredentials, RegisterCredentials, Session, SessionAction, User};
use crate::config::SessionConfig;
use crate::error::{ChatterboxError, Result};
use crate::storage::{KeyValueStore, TOKEN_KEY, USER_KEY};
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

/// Holds the authentication state for one application instance
///
/// Every successful login or registration is written to the injected
/// [`KeyValueStore`] before the in-memory state changes, so the stored
/// pair and the state agree after any call returns.
pub struct SessionStore {
    storage: Arc<dyn KeyValueStore>,
    state: Session,
    auth_delay: Duration,
}

impl SessionStore {
    /// Create the store and rehydrate from storage
    ///
    /// The session is restored when both a token and a parseable user are
    /// stored. The token is accepted as-is; there is no expiry or signature
    /// to check for a mocked sign-in.
    pub fn new(storage: Arc<dyn KeyValueStore>, config: &SessionConfig) -> Self {
        let mut store = Self {
            storage,
            state: Session::signed_out(),
            auth_delay: Duration::from_millis(config.auth_delay_ms),
        };

        if let Some(restored) = store.read_stored_session() {
            if let Some(user) = &restored.user {
                tracing::info!(email = %user.email, "Restored stored session");
            }
            store.dispatch(SessionAction::Restore(restored));
        }

        store
    }

    fn read_stored_session(&self) -> Option<Session> {
        let token = match self.storage.get(TOKEN_KEY) {
            Ok(token) => token?,
            Err(e) => {
                tracing::warn!("Failed to read stored token: {}", e);
                return None;
            }
        };

        let user_json = match self.storage.get(USER_KEY) {
            Ok(user) => user?,
            Err(e) => {
                tracing::warn!("Failed to read stored user: {}", e);
                return None;
            }
        };

        match serde_json::from_str::<User>(&user_json) {
            Ok(user) => Some(Session {
                user: Some(user),
                token: Some(token),
                authenticated: true,
            }),
            Err(e) => {
                tracing::warn!("Ignoring unreadable stored user: {}", e);
                None
            }
        }
    }

    fn dispatch(&mut self, action: SessionAction) {
        tracing::debug!(?action, "Session action");
        let current = std::mem::take(&mut self.state);
        self.state = current.apply(action);
    }

    /// Current authentication state
    pub fn state(&self) -> &Session {
        &self.state
    }

    /// Whether a user is signed in
    pub fn is_authenticated(&self) -> bool {
        self.state.authenticated
    }

    /// Signed-in user, if any
    pub fn current_user(&self) -> Option<&User> {
        self.state.user.as_ref()
    }

    /// Sign in
    ///
    /// Waits the configured artificial delay, then creates a user bound to
    /// the given email with a fresh token. The display name is the local
    /// part of the email.
    ///
    /// # Errors
    ///
    /// Returns `ChatterboxError::Auth` if the session cannot be persisted;
    /// the state is left unchanged in that case
    pub async fn login(&mut self, credentials: LoginCredentials) -> Result<User> {
        let email = credentials.email.trim().to_string();
        let name = email
            .split('@')
            .next()
            .filter(|local| !local.is_empty())
            .unwrap_or(email.as_str())
            .to_string();

        self.authenticate(name, email)
            .await
            .map_err(|e| ChatterboxError::Auth(format!("Login failed: {}", e)).into())
    }

    /// Create an account and sign in
    ///
    /// # Errors
    ///
    /// Returns `ChatterboxError::Auth` if the session cannot be persisted
    pub async fn register(&mut self, credentials: RegisterCredentials) -> Result<User> {
        let name = credentials.name.trim().to_string();
        let email = credentials.email.trim().to_string();

        self.authenticate(name, email)
            .await
            .map_err(|e| ChatterboxError::Auth(format!("Registration failed: {}", e)).into())
    }

    async fn authenticate(&mut self, name: String, email: String) -> Result<User> {
        if !self.auth_delay.is_zero() {
            tokio::time::sleep(self.auth_delay).await;
        }

        let user = User {
            id: Uuid::new_v4().to_string(),
            name,
            email,
        };
        let token = format!("mock-jwt-token-{}", Uuid::new_v4().simple());

        self.persist(&user, &token)?;

        tracing::info!(email = %user.email, "Signed in");
        self.dispatch(SessionAction::LoginSuccess {
            user: user.clone(),
            token,
        });

        Ok(user)
    }

    fn persist(&self, user: &User, token: &str) -> Result<()> {
        let user_json = serde_json::to_string(user)?;
        let previous_token = self.storage.get(TOKEN_KEY)?;
        let previous_user = self.storage.get(USER_KEY)?;

        let written = self
            .storage
            .set(TOKEN_KEY, token)
            .and_then(|_| self.storage.set(USER_KEY, &user_json));

        if let Err(e) = written {
            // Put back whatever the previous session left so storage keeps
            // matching the unchanged in-memory state
            self.restore_key(TOKEN_KEY, previous_token.as_deref());
            self.restore_key(USER_KEY, previous_user.as_deref());
            return Err(e);
        }
        Ok(())
    }

    fn restore_key(&self, key: &str, previous: Option<&str>) {
        let restored = match previous {
            Some(value) => self.storage.set(key, value),
            None => self.storage.remove(key),
        };
        if let Err(e) = restored {
            tracing::warn!(key, "Failed to restore stored session value: {}", e);
        }
    }

    /// Sign out
    ///
    /// Never fails: storage removal errors are logged and the in-memory
    /// session is reset regardless.
    pub fn logout(&mut self) {
        for key in [TOKEN_KEY, USER_KEY] {
            if let Err(e) = self.storage.remove(key) {
                tracing::warn!(key, "Failed to remove stored session value: {}", e);
            }
        }
        tracing::info!("Signed out");
        self.dispatch(SessionAction::Logout);
    }
}

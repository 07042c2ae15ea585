//! Session domain types
//!
//! A [`Session`] is the authentication state of one running application:
//! the signed-in [`User`], the opaque token, and the authenticated flag.
//! State changes go through [`SessionAction`] and [`Session::apply`].

use crate::error::{ChatterboxError, Result};
use serde::{Deserialize, Serialize};

/// Signed-in user
///
/// Created on login or registration, immutable afterwards, dropped on logout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Opaque user identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Account email
    pub email: String,
}

/// Authentication state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    /// Signed-in user, if any
    pub user: Option<User>,
    /// Opaque session token, if any
    pub token: Option<String>,
    /// Whether a user is signed in
    pub authenticated: bool,
}

/// Transitions of the session state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionAction {
    /// Login or registration completed
    LoginSuccess { user: User, token: String },
    /// The user signed out
    Logout,
    /// Replace the whole state (startup rehydration)
    Restore(Session),
}

impl Session {
    /// Unauthenticated session
    pub fn signed_out() -> Self {
        Self::default()
    }

    /// Apply a transition and return the next state
    ///
    /// # Examples
    ///
    /// ```
    /// use chatterbox::session::{Session, SessionAction, User};
    ///
    /// let user = User {
    ///     id: "1".to_string(),
    ///     name: "Ada".to_string(),
    ///     email: "ada@example.com".to_string(),
    /// };
    /// let session = Session::signed_out().apply(SessionAction::LoginSuccess {
    ///     user,
    ///     token: "t".to_string(),
    /// });
    /// assert!(session.authenticated);
    /// assert!(!session.apply(SessionAction::Logout).authenticated);
    /// ```
    pub fn apply(self, action: SessionAction) -> Self {
        match action {
            SessionAction::LoginSuccess { user, token } => Self {
                user: Some(user),
                token: Some(token),
                authenticated: true,
            },
            SessionAction::Logout => Self::signed_out(),
            SessionAction::Restore(session) => session,
        }
    }

    /// Display name of the signed-in user
    pub fn display_name(&self) -> Option<&str> {
        self.user.as_ref().map(|u| u.name.as_str())
    }
}

/// Credentials for signing in
#[derive(Debug, Clone)]
pub struct LoginCredentials {
    pub email: String,
    pub password: String,
}

impl LoginCredentials {
    /// Build credentials from borrowed input
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    /// Check the form fields before submitting
    ///
    /// The session store accepts anything; this mirrors the sign-in form
    /// checks done by the presentation layer.
    ///
    /// # Errors
    ///
    /// Returns `ChatterboxError::Auth` naming the first invalid field
    pub fn validate(&self) -> Result<()> {
        validate_email(&self.email)?;
        validate_password(&self.password)
    }
}

/// Credentials for creating an account
#[derive(Debug, Clone)]
pub struct RegisterCredentials {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl RegisterCredentials {
    /// Build credentials from borrowed input
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            password: password.into(),
        }
    }

    /// Check the form fields before submitting
    ///
    /// # Errors
    ///
    /// Returns `ChatterboxError::Auth` naming the first invalid field
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(ChatterboxError::Auth("Name is required".to_string()).into());
        }
        validate_email(&self.email)?;
        validate_password(&self.password)
    }
}

fn validate_email(email: &str) -> Result<()> {
    let email = email.trim();
    if email.is_empty() {
        return Err(ChatterboxError::Auth("Email is required".to_string()).into());
    }
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(()),
        _ => Err(ChatterboxError::Auth(format!("Invalid email address: {}", email)).into()),
    }
}

fn validate_password(password: &str) -> Result<()> {
    if password.is_empty() {
        return Err(ChatterboxError::Auth("Password is required".to_string()).into());
    }
    Ok(())
}

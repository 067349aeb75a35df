//! Login submission

use super::form::{login_error_message_key, LoginFormValues};
use crate::error::{Result, ValidationFailure};
use crate::validation::Validate;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

/// Notification id used for login errors
pub const LOGIN_ERROR_NOTIFICATION_ID: &str = "login_error";

/// Redirect target when the login page was opened directly
pub const DEFAULT_REDIRECT: &str = "/";

/// Authentication backend
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Sign in with the given credentials
    ///
    /// Rejections carry the provider's code in `Error::Auth`.
    async fn login(&self, values: &LoginFormValues) -> Result<()>;
}

/// Severity of a notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Info,
    Warning,
    Error,
}

/// A toast shown by the console
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    /// Notifications with the same id replace each other
    pub id: String,
    /// Translation key of the text
    pub message_key: String,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
}

/// Why a login submission did not go through
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LoginFailure {
    /// Form values failed validation; nothing was sent
    #[error(transparent)]
    Invalid(#[from] ValidationFailure),

    /// The auth service rejected the credentials
    #[error("Login rejected: {}", .0.message_key)]
    Rejected(Notification),
}

/// Runs the login form's submit and error handlers
pub struct LoginController<A> {
    auth: A,
}

impl<A: AuthService> LoginController<A> {
    /// Create a controller backed by the given auth service
    pub fn new(auth: A) -> Self {
        Self { auth }
    }

    /// The backing auth service
    pub fn auth(&self) -> &A {
        &self.auth
    }

    /// Validate and submit the form
    ///
    /// Returns the path to navigate to (replacing the login page in history).
    pub async fn submit(
        &self,
        values: &LoginFormValues,
        from: Option<&str>,
    ) -> std::result::Result<String, LoginFailure> {
        let values = values.validate()?;

        match self.auth.login(&values).await {
            Ok(()) => {
                let target = redirect_target(from);
                debug!(target = %target, "Login succeeded");
                Ok(target)
            }
            Err(e) => {
                warn!(email = %values.email, error = %e, "Login failed");
                Err(LoginFailure::Rejected(Notification {
                    id: LOGIN_ERROR_NOTIFICATION_ID.to_string(),
                    message_key: login_error_message_key(&e),
                    kind: NotificationKind::Error,
                }))
            }
        }
    }
}

impl<A> std::fmt::Debug for LoginController<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginController").finish_non_exhaustive()
    }
}

/// Where to go after logging in: the `from` query parameter, or `/`
pub fn redirect_target(from: Option<&str>) -> String {
    from.unwrap_or(DEFAULT_REDIRECT).to_string()
}

//! Login form values, schema and error codes

use crate::error::Error;
use crate::validation::{ObjectSchema, Schema, StringSchema, Validate, EMAIL_ERROR, EMPTY_ERROR};
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// Message key shown for errors without a dedicated translation
pub const UNKNOWN_ERROR_KEY: &str = "errorView.unknownError";

static LOGIN_SCHEMA: LazyLock<Schema> = LazyLock::new(|| {
    ObjectSchema::new()
        .field(
            "email",
            StringSchema::new().email(EMAIL_ERROR).required(EMPTY_ERROR),
        )
        .field("password", StringSchema::new().required(EMPTY_ERROR))
        .into()
});

/// Schema of the login form
pub fn login_schema() -> &'static Schema {
    &LOGIN_SCHEMA
}

/// Values of the login form (both start out empty)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginFormValues {
    pub email: String,
    pub password: String,
}

impl LoginFormValues {
    /// Create form values
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

impl Validate for LoginFormValues {
    fn schema() -> &'static Schema {
        login_schema()
    }
}

/// Error codes the auth provider reports for a rejected login
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LoginErrorCode {
    EmailInvalid,
    EmailNotFound,
    EmailDisabled,
    PasswordInvalid,
}

impl LoginErrorCode {
    /// All known codes
    pub const ALL: [LoginErrorCode; 4] = [
        LoginErrorCode::EmailNotFound,
        LoginErrorCode::EmailDisabled,
        LoginErrorCode::PasswordInvalid,
        LoginErrorCode::EmailInvalid,
    ];

    /// Wire form of the code
    pub fn as_str(&self) -> &'static str {
        match self {
            LoginErrorCode::EmailInvalid => "email.invalid",
            LoginErrorCode::EmailNotFound => "email.notfound",
            LoginErrorCode::EmailDisabled => "email.disabled",
            LoginErrorCode::PasswordInvalid => "password.invalid",
        }
    }

    /// Parse a wire code
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == code)
    }

    /// Translation key of the code (`login.<code>`)
    pub fn message_key(&self) -> String {
        format!("login.{}", self.as_str())
    }
}

impl std::fmt::Display for LoginErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Translation key for an error raised while logging in
pub fn login_error_message_key(error: &Error) -> String {
    match error {
        Error::Auth { code } => LoginErrorCode::from_code(code)
            .map_or_else(|| UNKNOWN_ERROR_KEY.to_string(), |c| c.message_key()),
        _ => UNKNOWN_ERROR_KEY.to_string(),
    }
}

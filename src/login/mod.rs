//! Login form
//!
//! Credential validation, submission against an [`AuthService`], and the
//! mapping from provider error codes to notification text.

mod controller;
mod form;

pub use controller::{
    redirect_target, AuthService, LoginController, LoginFailure, Notification, NotificationKind,
    DEFAULT_REDIRECT, LOGIN_ERROR_NOTIFICATION_ID,
};
pub use form::{
    login_error_message_key, login_schema, LoginErrorCode, LoginFormValues, UNKNOWN_ERROR_KEY,
};

//! Error types for Solidafy Console
//!
//! Two kinds of failure exist side by side:
//!
//! - [`ValidationFailure`] is the only error a validation schema produces.
//!   It names the offending field path and a message key the UI translates.
//! - [`Error`] covers everything else (config loading, HTTP transport).
//!   Transport errors from services pass through unchanged.

use thiserror::Error;

// ============================================================================
// Validation Failure
// ============================================================================

/// A single structured validation failure
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Validation failed at '{path}': {message_key}")]
pub struct ValidationFailure {
    /// Dotted path of the offending field (e.g. `operatorConfiguration.dbt.gitRepoUrl`)
    pub path: String,
    /// Translation key describing the violated rule
    pub message_key: String,
}

impl ValidationFailure {
    /// Create a new validation failure
    pub fn new(path: impl Into<String>, message_key: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message_key: message_key.into(),
        }
    }

    /// Check whether this failure points at the given path
    pub fn is_at(&self, path: &str) -> bool {
        self.path == path
    }
}

// ============================================================================
// Crate Error
// ============================================================================

/// The main error type for Solidafy Console
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid config value for '{field}': {message}")]
    InvalidConfigValue { field: String, message: String },

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    // ============================================================================
    // Authentication Errors
    // ============================================================================
    #[error("Authentication failed: {code}")]
    Auth { code: String },

    // ============================================================================
    // HTTP Errors
    // ============================================================================
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ============================================================================
    // Validation Errors
    // ============================================================================
    #[error(transparent)]
    Validation(#[from] ValidationFailure),

    // ============================================================================
    // I/O Errors
    // ============================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("File not found: {path}")]
    FileNotFound { path: String },

    // ============================================================================
    // Generic Errors
    // ============================================================================
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an invalid config value error
    pub fn invalid_config(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidConfigValue {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create an auth error carrying the provider's error code
    pub fn auth(code: impl Into<String>) -> Self {
        Self::Auth { code: code.into() }
    }

    /// Create an HTTP status error
    pub fn http_status(status: u16, body: impl Into<String>) -> Self {
        Self::HttpStatus {
            status,
            body: body.into(),
        }
    }

    /// Get the validation failure, if this error wraps one
    pub fn as_validation(&self) -> Option<&ValidationFailure> {
        match self {
            Error::Validation(failure) => Some(failure),
            _ => None,
        }
    }

    /// Check if this error came from the transport layer
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Error::Http(_) | Error::HttpStatus { .. } | Error::InvalidUrl(_)
        )
    }
}

/// Result type alias for Solidafy Console
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, message: impl Into<String>) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, message: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", message.into(), inner))
        })
    }
}

// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::too_many_lines)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::needless_pass_by_value)]

//! # Solidafy Console
//!
//! Client-side core of the Solidafy console: what the web UI checks before
//! anything is sent to the configuration API.
//!
//! ## Features
//!
//! - **Declarative Validation**: Field rules, tagged unions, per-path checks
//! - **Transformation Operations**: dbt, normalization and webhook operators
//! - **Login Form**: Credential checks and provider error mapping
//! - **Console Config**: YAML/JSON loading with environment overrides
//! - **Specification Service**: Connector specification lookups
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use solidafy_console::operation::{dbt_operation_schema, GIT_REPO_URL_PATH};
//!
//! let candidate = serde_json::json!({
//!     "name": "dbt run",
//!     "workspaceId": "ws-1",
//!     "operatorConfiguration": {
//!         "operatorType": "dbt",
//!         "dbt": { "gitRepoUrl": "https://github.com/acme/analytics.git/" }
//!     }
//! });
//!
//! // Check a single field while the user types
//! let failure = dbt_operation_schema()
//!     .validate_at(GIT_REPO_URL_PATH, &candidate)
//!     .unwrap_err();
//! assert_eq!(failure.message_key, "form.repositoryUrl.invalidUrl");
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────┐
//! │                 Forms (operation, login)                  │
//! │   validate() → record       validate_at(path) → record    │
//! └───────────────────────────────────────────────────────────┘
//!                              │
//! ┌────────────────────────────┴──────────────────────────────┐
//! │                       Validation                          │
//! │   StringSchema     ObjectSchema     UnionSchema   Rules   │
//! └───────────────────────────────────────────────────────────┘
//!
//! ┌──────────────┬─────────────────────────────────────────────┐
//! │    Config    │  HTTP client → Specification service        │
//! └──────────────┴─────────────────────────────────────────────┘
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]
#![allow(missing_docs)] // TODO: Document struct fields before 1.0 release

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// Declarative form validation
pub mod validation;

/// Transformation operations and their schemas
pub mod operation;

/// Login form
pub mod login;

/// Console configuration
pub mod config;

/// HTTP client for the configuration API
pub mod http;

/// Connector specification lookups
pub mod specification;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result, ValidationFailure};
pub use types::*;

// Re-export commonly used types
pub use config::ConsoleConfig;
pub use operation::TransformationOperation;
pub use validation::{Schema, Validate};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");

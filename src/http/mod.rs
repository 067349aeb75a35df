//! HTTP client module
//!
//! Minimal JSON-over-HTTP plumbing for services that forward requests to
//! the configuration API.
//!
//! # Features
//!
//! - **Request Options**: API root, bearer credentials, headers, timeout
//! - **One-shot Calls**: no retries; failures propagate unchanged

mod client;

pub use client::{HttpClient, RequestAuth, RequestOptions};

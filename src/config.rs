//! Console configuration
//!
//! The configuration the console is deployed with: API endpoints, analytics
//! and monitoring keys. Loaded from a YAML or JSON document, then optionally
//! overridden from the environment.

use crate::error::{Error, Result};
use crate::http::{RequestAuth, RequestOptions};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;
use url::Url;

// ============================================================================
// Top-Level Config
// ============================================================================

/// Complete console configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsoleConfig {
    /// Segment analytics
    #[serde(default)]
    pub segment: SegmentConfig,

    /// Public URL the console is served from
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Fathom analytics site id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fathom_site_id: Option<String>,

    /// Configuration API
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Connector builder server API
    #[serde(default = "default_connector_builder_api_url")]
    pub connector_builder_api_url: String,

    /// Console version
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    /// Cloud API
    #[serde(default = "default_cloud_api_url")]
    pub cloud_api_url: String,

    /// Public cloud API
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cloud_public_api_url: Option<String>,

    /// Firebase authentication
    #[serde(default)]
    pub firebase: FirebaseConfig,

    /// Zendesk widget key
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zendesk_key: Option<String>,

    /// LaunchDarkly client id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub launch_darkly: Option<String>,

    /// Datadog RUM
    #[serde(default)]
    pub datadog: DatadogConfig,

    /// Analytics tracking strategy (e.g. "segment")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tracking_strategy: Option<String>,
}

fn default_base_url() -> String {
    "http://localhost:3000".to_string()
}

fn default_api_url() -> String {
    "http://localhost:8001/api".to_string()
}

fn default_connector_builder_api_url() -> String {
    "http://localhost:8003".to_string()
}

fn default_cloud_api_url() -> String {
    "http://localhost:8001/cloud".to_string()
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            segment: SegmentConfig::default(),
            base_url: default_base_url(),
            fathom_site_id: None,
            api_url: default_api_url(),
            connector_builder_api_url: default_connector_builder_api_url(),
            version: None,
            cloud_api_url: default_cloud_api_url(),
            cloud_public_api_url: None,
            firebase: FirebaseConfig::default(),
            zendesk_key: None,
            launch_darkly: None,
            datadog: DatadogConfig::default(),
            tracking_strategy: None,
        }
    }
}

// ============================================================================
// Nested Sections
// ============================================================================

/// Segment analytics settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegmentConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(default)]
    pub enabled: bool,
}

/// Firebase authentication settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FirebaseConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_domain: Option<String>,
    /// Local emulator, used in development
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_emulator_host: Option<String>,
}

/// Datadog RUM settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatadogConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub application_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub site: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service: Option<String>,
}

// ============================================================================
// Loading
// ============================================================================

/// Environment variables that override config values
pub const ENV_BASE_URL: &str = "BASE_URL";
pub const ENV_API_URL: &str = "API_URL";
pub const ENV_CLOUD_API_URL: &str = "CLOUD_API_URL";
pub const ENV_TRACKING_STRATEGY: &str = "TRACKING_STRATEGY";

impl ConsoleConfig {
    /// Load config from a YAML or JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::FileNotFound {
                    path: path.display().to_string(),
                }
            } else {
                Error::Io(e)
            }
        })?;

        let config = Self::from_str(&content).inspect_err(|e| {
            debug!(path = %path.display(), error = %e, "Rejected console config");
        })?;
        debug!(path = %path.display(), "Loaded console config");
        Ok(config)
    }

    /// Parse config from a YAML or JSON string (JSON is valid YAML)
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self> {
        let config: ConsoleConfig = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Apply overrides from the process environment
    #[must_use]
    pub fn apply_env_overrides(self) -> Self {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from a variable lookup
    #[must_use]
    pub fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str| lookup(key).filter(|v| !v.is_empty());

        if let Some(v) = lookup(ENV_BASE_URL) {
            self.base_url = v;
        }
        if let Some(v) = lookup(ENV_API_URL) {
            self.api_url = v;
        }
        if let Some(v) = lookup(ENV_CLOUD_API_URL) {
            self.cloud_api_url = v;
        }
        if let Some(v) = lookup(ENV_TRACKING_STRATEGY) {
            self.tracking_strategy = Some(v);
        }
        self
    }

    /// Check that every endpoint is an absolute URL
    pub fn validate(&self) -> Result<()> {
        let endpoints = [
            ("baseUrl", Some(&self.base_url)),
            ("apiUrl", Some(&self.api_url)),
            ("connectorBuilderApiUrl", Some(&self.connector_builder_api_url)),
            ("cloudApiUrl", Some(&self.cloud_api_url)),
            ("cloudPublicApiUrl", self.cloud_public_api_url.as_ref()),
        ];

        for (field, value) in endpoints {
            if let Some(value) = value {
                Url::parse(value).map_err(|e| Error::invalid_config(field, e.to_string()))?;
            }
        }
        Ok(())
    }

    /// Whether analytics should be sent to Segment
    pub fn segment_enabled(&self) -> bool {
        self.segment.enabled && self.segment.token.is_some()
    }

    /// Request options for services talking to the configuration API
    pub fn request_options(&self, auth: RequestAuth) -> Result<RequestOptions> {
        Ok(RequestOptions::new(Url::parse(&self.api_url)?).auth(auth))
    }
}

//! Connector specification types

use crate::types::JsonValue;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Body of a specification lookup by definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceDefinitionIdWithWorkspaceId {
    pub source_definition_id: String,
    pub workspace_id: String,
}

/// Body of a specification lookup by source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceIdRequestBody {
    pub source_id: String,
}

/// Specification of a source connector definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceDefinitionSpecification {
    pub source_definition_id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub documentation_url: Option<String>,

    /// JSON schema of the connector's configuration form
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connection_specification: Option<JsonValue>,

    /// OAuth flow description, when the connector supports it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub advanced_auth: Option<JsonValue>,

    /// The spec job that produced this specification
    pub job_info: SynchronousJobInfo,
}

impl SourceDefinitionSpecification {
    /// Whether the connector offers an OAuth flow
    pub fn supports_oauth(&self) -> bool {
        self.advanced_auth.is_some()
    }

    /// Names of the required top-level configuration properties
    pub fn required_properties(&self) -> Vec<&str> {
        self.connection_specification
            .as_ref()
            .and_then(|spec| spec.get("required"))
            .and_then(JsonValue::as_array)
            .map(|required| required.iter().filter_map(JsonValue::as_str).collect())
            .unwrap_or_default()
    }
}

/// Outcome of a synchronous connector job
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SynchronousJobInfo {
    pub id: String,

    /// e.g. `get_spec`
    pub config_type: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config_id: Option<String>,

    #[serde(with = "chrono::serde::ts_seconds")]
    pub created_at: DateTime<Utc>,

    #[serde(with = "chrono::serde::ts_seconds")]
    pub ended_at: DateTime<Utc>,

    pub succeeded: bool,

    #[serde(default)]
    pub connector_configuration_updated: bool,
}

impl SynchronousJobInfo {
    /// Wall time the job took
    pub fn duration(&self) -> chrono::Duration {
        self.ended_at - self.created_at
    }
}

//! Transformation operation types

use serde::{Deserialize, Serialize};

/// Docker image preselected for new dbt transformations
pub const DEFAULT_DBT_DOCKER_IMAGE: &str = "fishtownanalytics/dbt:1.0.0";

/// dbt CLI arguments preselected for new dbt transformations
pub const DEFAULT_DBT_ARGUMENTS: &str = "run";

/// Name preselected for new dbt transformations
pub const DEFAULT_TRANSFORMATION_NAME: &str = "My dbt transformations";

// ============================================================================
// Transformation Operation
// ============================================================================

/// A transformation operation as edited in the console
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransformationOperation {
    /// Display name
    pub name: String,

    /// Owning workspace
    pub workspace_id: String,

    /// Set once the operation has been persisted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operation_id: Option<String>,

    /// What the operation runs
    pub operator_configuration: OperatorConfiguration,
}

impl TransformationOperation {
    /// Create a new (unsaved) operation
    pub fn new(
        name: impl Into<String>,
        workspace_id: impl Into<String>,
        operator_configuration: OperatorConfiguration,
    ) -> Self {
        Self {
            name: name.into(),
            workspace_id: workspace_id.into(),
            operation_id: None,
            operator_configuration,
        }
    }

    /// Initial values of the "add transformation" form
    pub fn default_dbt(workspace_id: impl Into<String>) -> Self {
        Self::new(
            DEFAULT_TRANSFORMATION_NAME,
            workspace_id,
            OperatorConfiguration::Dbt {
                dbt: OperatorDbt {
                    git_repo_url: String::new(),
                    git_repo_branch: None,
                    docker_image: Some(DEFAULT_DBT_DOCKER_IMAGE.to_string()),
                    dbt_arguments: Some(DEFAULT_DBT_ARGUMENTS.to_string()),
                },
            },
        )
    }

    /// Attach a persisted operation id
    #[must_use]
    pub fn with_operation_id(mut self, operation_id: impl Into<String>) -> Self {
        self.operation_id = Some(operation_id.into());
        self
    }

    /// Whether the operation has been saved before
    pub fn is_persisted(&self) -> bool {
        self.operation_id.is_some()
    }

    /// Operator kind of this operation
    pub fn operator_type(&self) -> OperatorType {
        self.operator_configuration.operator_type()
    }
}

// ============================================================================
// Operator Configuration
// ============================================================================

/// Operator kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OperatorType {
    Dbt,
    Normalization,
    Webhook,
}

impl OperatorType {
    /// Wire name of the operator kind
    pub fn as_str(&self) -> &'static str {
        match self {
            OperatorType::Dbt => "dbt",
            OperatorType::Normalization => "normalization",
            OperatorType::Webhook => "webhook",
        }
    }
}

impl std::fmt::Display for OperatorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Operator configuration, discriminated by `operatorType`
///
/// Each variant keeps its settings under a key named after the variant,
/// e.g. `{"operatorType": "dbt", "dbt": {...}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "operatorType", rename_all = "camelCase")]
pub enum OperatorConfiguration {
    /// Custom dbt transformation
    Dbt { dbt: OperatorDbt },
    /// Built-in normalization
    Normalization { normalization: OperatorNormalization },
    /// Webhook call after sync
    Webhook { webhook: OperatorWebhook },
}

impl OperatorConfiguration {
    /// Operator kind of this configuration
    pub fn operator_type(&self) -> OperatorType {
        match self {
            OperatorConfiguration::Dbt { .. } => OperatorType::Dbt,
            OperatorConfiguration::Normalization { .. } => OperatorType::Normalization,
            OperatorConfiguration::Webhook { .. } => OperatorType::Webhook,
        }
    }

    /// dbt settings, if this is a dbt operator
    pub fn as_dbt(&self) -> Option<&OperatorDbt> {
        match self {
            OperatorConfiguration::Dbt { dbt } => Some(dbt),
            _ => None,
        }
    }
}

/// Settings of a custom dbt transformation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperatorDbt {
    /// Git repository holding the dbt project
    pub git_repo_url: String,

    /// Branch to check out (empty or absent means default branch)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub git_repo_branch: Option<String>,

    /// Image running dbt
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub docker_image: Option<String>,

    /// Arguments passed to the dbt CLI
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dbt_arguments: Option<String>,
}

/// Normalization flavor
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NormalizationOption {
    #[default]
    Basic,
}

/// Settings of the built-in normalization
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperatorNormalization {
    pub option: NormalizationOption,
}

/// Settings of a webhook operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperatorWebhook {
    /// Workspace webhook config holding the credentials
    pub webhook_config_id: String,

    /// URL called after the sync
    pub execution_url: String,

    /// Optional request body
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub execution_body: Option<String>,
}

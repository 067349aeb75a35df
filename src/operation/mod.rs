//! Transformation operations
//!
//! Typed records for the operations a connection runs after a sync, and the
//! schemas the operation editor validates them with.
//!
//! # Operator kinds
//!
//! - **dbt**: custom dbt project pulled from a git repository
//! - **normalization**: built-in basic normalization
//! - **webhook**: HTTP call to a configured endpoint

mod schema;
mod types;

pub use schema::{
    dbt_operation_schema, dbt_operator_schema, normalization_operator_schema, operation_schema,
    operator_configuration_schema, webhook_operator_schema, GIT_REPO_URL_PATH,
    OPERATOR_TYPE_ERROR, REPOSITORY_URL_ERROR,
};
pub use types::{
    NormalizationOption, OperatorConfiguration, OperatorDbt, OperatorNormalization,
    OperatorType, OperatorWebhook, TransformationOperation, DEFAULT_DBT_ARGUMENTS,
    DEFAULT_DBT_DOCKER_IMAGE, DEFAULT_TRANSFORMATION_NAME,
};

#[cfg(test)]
mod tests;

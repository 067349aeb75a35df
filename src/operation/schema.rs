//! Validation schemas for transformation operations

use super::types::TransformationOperation;
use crate::validation::{
    ObjectSchema, Schema, StringSchema, UnionSchema, Validate, EMPTY_ERROR, OPTION_ERROR,
    URL_ERROR,
};
use regex::Regex;
use std::sync::LazyLock;

/// Repository URL is malformed or ends with a slash
pub const REPOSITORY_URL_ERROR: &str = "form.repositoryUrl.invalidUrl";

/// `operatorType` names no known operator
pub const OPERATOR_TYPE_ERROR: &str = "form.operatorType.invalid";

/// Path of the dbt repository URL field
pub const GIT_REPO_URL_PATH: &str = "operatorConfiguration.dbt.gitRepoUrl";

/// Regex for git repository URLs: http(s) or scp-style `git@host:` remotes ending in `.git`
static GIT_REPO_URL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^((http(s)?)|(git@[\w.]+))(:(//)?)([\w.@:/\-~]+)(\.git)(/)?$").unwrap()
});

/// Schema accepting every operator kind
static OPERATION_SCHEMA: LazyLock<Schema> =
    LazyLock::new(|| operation_schema_with(operator_configuration_schema()));

/// Schema accepting dbt operations only
static DBT_OPERATION_SCHEMA: LazyLock<Schema> = LazyLock::new(|| {
    operation_schema_with(
        UnionSchema::new("operatorType")
            .required(EMPTY_ERROR)
            .invalid_message(OPERATOR_TYPE_ERROR)
            .variant("dbt", dbt_operator_schema()),
    )
});

/// Schema for operations of any operator kind
pub fn operation_schema() -> &'static Schema {
    &OPERATION_SCHEMA
}

/// Schema for the custom dbt transformation form
pub fn dbt_operation_schema() -> &'static Schema {
    &DBT_OPERATION_SCHEMA
}

fn operation_schema_with(operator_configuration: UnionSchema) -> Schema {
    ObjectSchema::new()
        .field("name", StringSchema::new().trim().required(EMPTY_ERROR))
        .field("workspaceId", StringSchema::new().required(EMPTY_ERROR))
        .field("operationId", StringSchema::new())
        .field("operatorConfiguration", operator_configuration)
        .into()
}

/// Union of all operator kinds, keyed by `operatorType`
pub fn operator_configuration_schema() -> UnionSchema {
    UnionSchema::new("operatorType")
        .required(EMPTY_ERROR)
        .invalid_message(OPERATOR_TYPE_ERROR)
        .variant("dbt", dbt_operator_schema())
        .variant("normalization", normalization_operator_schema())
        .variant("webhook", webhook_operator_schema())
}

/// `{ dbt: { gitRepoUrl, gitRepoBranch?, dockerImage?, dbtArguments? } }`
pub fn dbt_operator_schema() -> ObjectSchema {
    ObjectSchema::new().field(
        "dbt",
        ObjectSchema::new()
            .required(EMPTY_ERROR)
            .field(
                "gitRepoUrl",
                StringSchema::new()
                    .trim()
                    .required(EMPTY_ERROR)
                    .matches(GIT_REPO_URL_REGEX.clone(), REPOSITORY_URL_ERROR)
                    .test("doesNotEndWithSlash", REPOSITORY_URL_ERROR, |url| {
                        !url.ends_with('/')
                    }),
            )
            .field("gitRepoBranch", StringSchema::new())
            .field("dockerImage", StringSchema::new())
            .field("dbtArguments", StringSchema::new()),
    )
}

/// `{ normalization: { option } }`
pub fn normalization_operator_schema() -> ObjectSchema {
    ObjectSchema::new().field(
        "normalization",
        ObjectSchema::new().required(EMPTY_ERROR).field(
            "option",
            StringSchema::new()
                .required(EMPTY_ERROR)
                .one_of(["basic"], OPTION_ERROR),
        ),
    )
}

/// `{ webhook: { webhookConfigId, executionUrl, executionBody? } }`
pub fn webhook_operator_schema() -> ObjectSchema {
    ObjectSchema::new().field(
        "webhook",
        ObjectSchema::new()
            .required(EMPTY_ERROR)
            .field("webhookConfigId", StringSchema::new().required(EMPTY_ERROR))
            .field(
                "executionUrl",
                StringSchema::new().trim().required(EMPTY_ERROR).url(URL_ERROR),
            )
            .field("executionBody", StringSchema::new()),
    )
}

impl Validate for TransformationOperation {
    fn schema() -> &'static Schema {
        operation_schema()
    }
}

//! Tests for transformation operation schemas

use super::*;
use crate::validation::{Schema, Validate, EMPTY_ERROR, OPTION_ERROR, URL_ERROR};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use test_case::test_case;

fn custom_transformation_fields() -> Value {
    json!({
        "name": "test name",
        "workspaceId": "test workspace id",
        "operationId": null,
        "operatorConfiguration": {
            "operatorType": "dbt",
            "dbt": {
                "gitRepoUrl": "https://github.com/username/example.git",
                "dockerImage": null,
                "dbtArguments": null,
                "gitRepoBranch": ""
            }
        }
    })
}

fn with_git_repo_url(url: &str) -> Value {
    let mut candidate = custom_transformation_fields();
    candidate["operatorConfiguration"]["dbt"]["gitRepoUrl"] = json!(url);
    candidate
}

// ============================================================================
// dbt Schema
// ============================================================================

#[test]
fn test_validates_custom_transformation() {
    let candidate = custom_transformation_fields();
    let validated = dbt_operation_schema().validate(&candidate).unwrap();
    assert_eq!(validated, candidate);
}

#[test]
fn test_fails_if_name_is_empty() {
    let mut candidate = custom_transformation_fields();
    candidate["name"] = json!("");

    let failure = dbt_operation_schema()
        .validate_at("name", &candidate)
        .unwrap_err();
    assert_eq!(failure.path, "name");
    assert_eq!(failure.message_key, EMPTY_ERROR);
}

#[test]
fn test_fails_if_git_repo_url_is_empty() {
    let failure = dbt_operation_schema()
        .validate_at(GIT_REPO_URL_PATH, &with_git_repo_url(""))
        .unwrap_err();
    assert_eq!(failure.path, GIT_REPO_URL_PATH);
    assert_eq!(failure.message_key, EMPTY_ERROR);
}

#[test]
fn test_fails_if_git_repo_url_ends_with_slash() {
    let candidate = with_git_repo_url("https://github.com/username/example.git/");

    let failure = dbt_operation_schema()
        .validate_at(GIT_REPO_URL_PATH, &candidate)
        .unwrap_err();
    assert_eq!(failure.path, GIT_REPO_URL_PATH);
    assert_eq!(failure.message_key, REPOSITORY_URL_ERROR);

    let failure = dbt_operation_schema().validate(&candidate).unwrap_err();
    assert_eq!(failure.path, GIT_REPO_URL_PATH);
}

#[test_case("https://github.com/username/example.git" ; "https")]
#[test_case("http://gitlab.internal/team/project.git" ; "http")]
#[test_case("git@github.com:username/example.git" ; "scp style")]
#[test_case("  https://github.com/username/example.git  " ; "surrounding spaces")]
fn test_accepts_repository_url(url: &str) {
    assert!(dbt_operation_schema()
        .validate_at(GIT_REPO_URL_PATH, &with_git_repo_url(url))
        .is_ok());
}

#[test_case("github.com/username/example.git" ; "no scheme")]
#[test_case("https://github.com/username/example" ; "no git suffix")]
#[test_case("https://github.com/user name/example.git" ; "whitespace")]
#[test_case("ftp://github.com/username/example.git" ; "ftp")]
fn test_rejects_repository_url(url: &str) {
    let failure = dbt_operation_schema()
        .validate_at(GIT_REPO_URL_PATH, &with_git_repo_url(url))
        .unwrap_err();
    assert_eq!(failure.message_key, REPOSITORY_URL_ERROR);
}

#[test]
fn test_git_repo_url_is_trimmed() {
    let candidate = with_git_repo_url(" https://github.com/username/example.git ");
    let validated = dbt_operation_schema().validate(&candidate).unwrap();
    assert_eq!(
        validated["operatorConfiguration"]["dbt"]["gitRepoUrl"],
        "https://github.com/username/example.git"
    );
}

#[test]
fn test_validate_at_ignores_other_violations() {
    let mut candidate = with_git_repo_url("https://github.com/username/example.git/");
    candidate["name"] = json!("");

    assert!(dbt_operation_schema()
        .validate_at("workspaceId", &candidate)
        .is_ok());
}

#[test]
fn test_missing_dbt_block_fails_at_parent() {
    let candidate = json!({
        "name": "test name",
        "workspaceId": "test workspace id",
        "operatorConfiguration": {"operatorType": "dbt"}
    });

    let failure = dbt_operation_schema()
        .validate_at(GIT_REPO_URL_PATH, &candidate)
        .unwrap_err();
    assert_eq!(failure.path, "operatorConfiguration.dbt");

    let failure = dbt_operation_schema().validate(&candidate).unwrap_err();
    assert_eq!(failure.path, "operatorConfiguration.dbt");
}

#[test]
fn test_dbt_schema_rejects_other_operators() {
    let candidate = json!({
        "name": "normalize",
        "workspaceId": "ws",
        "operatorConfiguration": {"operatorType": "normalization", "normalization": {"option": "basic"}}
    });

    let failure = dbt_operation_schema().validate(&candidate).unwrap_err();
    assert_eq!(failure.path, "operatorConfiguration.operatorType");
    assert_eq!(failure.message_key, OPERATOR_TYPE_ERROR);

    assert!(operation_schema().validate(&candidate).is_ok());
}

#[test]
fn test_validation_is_idempotent() {
    let candidate = with_git_repo_url("https://github.com/username/example.git/");
    let first = dbt_operation_schema().validate(&candidate).unwrap_err();
    let second = dbt_operation_schema().validate(&candidate).unwrap_err();
    assert_eq!(first, second);

    let valid = custom_transformation_fields();
    let once = dbt_operation_schema().validate(&valid).unwrap();
    let twice = dbt_operation_schema().validate(&once).unwrap();
    assert_eq!(once, twice);
}

const OPERATOR_TYPE_PATH: &str = "operatorConfiguration.operatorType";

#[test]
fn test_operator_type_path_accepts_known_tag() {
    let candidate = custom_transformation_fields();
    let output = dbt_operation_schema()
        .validate_at(OPERATOR_TYPE_PATH, &candidate)
        .unwrap();
    assert_eq!(output, candidate);
}

#[test_case(json!("custom") ; "unknown tag")]
#[test_case(json!("normalization") ; "tag of another schema")]
#[test_case(Value::Null ; "missing tag")]
fn test_operator_type_path_rejects_bad_tag(tag: Value) {
    let mut candidate = custom_transformation_fields();
    candidate["operatorConfiguration"]["operatorType"] = tag;

    let failure = dbt_operation_schema()
        .validate_at(OPERATOR_TYPE_PATH, &candidate)
        .unwrap_err();
    assert_eq!(
        failure,
        crate::error::ValidationFailure::new(OPERATOR_TYPE_PATH, OPERATOR_TYPE_ERROR)
    );
}

#[test]
fn test_operator_type_path_is_declared() {
    assert!(matches!(
        operation_schema().describe(OPERATOR_TYPE_PATH),
        Some(Schema::String(_))
    ));
    let nested = "operatorConfiguration.operatorType.nested";
    assert!(operation_schema().describe(nested).is_none());
    assert_eq!(
        dbt_operation_schema()
            .validate_at(nested, &custom_transformation_fields())
            .unwrap_err()
            .message_key,
        crate::validation::UNKNOWN_PATH
    );

    let Some(Schema::String(tag)) = operation_schema().describe(OPERATOR_TYPE_PATH) else {
        panic!("operator type is not a string field");
    };
    assert!(tag.is_required());
}

// ============================================================================
// Other Operators
// ============================================================================

#[test_case(json!({"option": "advanced"}), OPTION_ERROR ; "unknown option")]
#[test_case(json!({}), EMPTY_ERROR ; "missing option")]
fn test_normalization_option(normalization: Value, message_key: &str) {
    let candidate = json!({
        "name": "normalize",
        "workspaceId": "ws",
        "operatorConfiguration": {"operatorType": "normalization", "normalization": normalization}
    });

    let failure = operation_schema().validate(&candidate).unwrap_err();
    assert_eq!(failure.path, "operatorConfiguration.normalization.option");
    assert_eq!(failure.message_key, message_key);
}

#[test]
fn test_webhook_execution_url() {
    let mut candidate = json!({
        "name": "notify",
        "workspaceId": "ws",
        "operatorConfiguration": {
            "operatorType": "webhook",
            "webhook": {
                "webhookConfigId": "cfg-1",
                "executionUrl": "https://cloud.getdbt.com/api/v2/accounts/1/jobs/2/run/"
            }
        }
    });
    assert!(operation_schema().validate(&candidate).is_ok());

    candidate["operatorConfiguration"]["webhook"]["executionUrl"] = json!("not a url");
    let failure = operation_schema().validate(&candidate).unwrap_err();
    assert_eq!(
        failure.path,
        "operatorConfiguration.webhook.executionUrl"
    );
    assert_eq!(failure.message_key, URL_ERROR);
}

// ============================================================================
// Typed Records
// ============================================================================

#[test]
fn test_typed_round_trip() {
    let operation: TransformationOperation =
        serde_json::from_value(custom_transformation_fields()).unwrap();

    assert_eq!(operation.operator_type(), OperatorType::Dbt);
    assert!(!operation.is_persisted());
    assert_eq!(
        operation.operator_configuration.as_dbt().map(|d| d.git_repo_branch.as_deref()),
        Some(Some(""))
    );

    let validated = operation.validate().unwrap();
    assert_eq!(validated, operation);
}

#[test]
fn test_typed_serialization_shape() {
    let operation = TransformationOperation::new(
        "hook",
        "ws",
        OperatorConfiguration::Webhook {
            webhook: OperatorWebhook {
                webhook_config_id: "cfg".to_string(),
                execution_url: "https://example.com/run".to_string(),
                execution_body: None,
            },
        },
    )
    .with_operation_id("op-1");

    assert_eq!(
        serde_json::to_value(&operation).unwrap(),
        json!({
            "name": "hook",
            "workspaceId": "ws",
            "operationId": "op-1",
            "operatorConfiguration": {
                "operatorType": "webhook",
                "webhook": {"webhookConfigId": "cfg", "executionUrl": "https://example.com/run"}
            }
        })
    );
    assert!(operation.is_persisted());
}

#[test]
fn test_default_dbt_form_needs_repository() {
    let operation = TransformationOperation::default_dbt("ws");
    assert_eq!(operation.name, DEFAULT_TRANSFORMATION_NAME);
    assert_eq!(
        operation.operator_configuration.as_dbt().unwrap().docker_image.as_deref(),
        Some(DEFAULT_DBT_DOCKER_IMAGE)
    );

    let failure = operation.validate().unwrap_err();
    assert_eq!(failure.path, GIT_REPO_URL_PATH);
    assert_eq!(failure.message_key, EMPTY_ERROR);
    assert!(operation.validate_at("name").is_ok());
}

#[test]
fn test_operator_type_display() {
    assert_eq!(OperatorType::Dbt.to_string(), "dbt");
    assert_eq!(OperatorType::Normalization.as_str(), "normalization");
    assert_eq!(
        serde_json::to_value(OperatorType::Webhook).unwrap(),
        json!("webhook")
    );
}

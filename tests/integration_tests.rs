//! Integration tests
//!
//! Exercises the public API end to end: config file → request options →
//! specification lookups against a mock server, and operation records from
//! raw JSON through validation to typed values.

use serde_json::json;
use solidafy_console::config::ConsoleConfig;
use solidafy_console::http::RequestAuth;
use solidafy_console::operation::{
    dbt_operation_schema, operation_schema, OperatorConfiguration, OperatorType,
    TransformationOperation, GIT_REPO_URL_PATH, REPOSITORY_URL_ERROR,
};
use solidafy_console::specification::{HttpSpecificationService, SpecificationService};
use solidafy_console::validation::Validate;
use solidafy_console::{Error, ValidationFailure};
use std::io::Write;
use std::sync::Arc;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ============================================================================
// Operation Validation
// ============================================================================

#[test]
fn test_operation_from_form_json() {
    let candidate = json!({
        "name": "  nightly dbt  ",
        "workspaceId": "ws-1",
        "operatorConfiguration": {
            "operatorType": "dbt",
            "dbt": {
                "gitRepoUrl": "git@github.com:acme/analytics.git",
                "gitRepoBranch": "main",
                "dbtArguments": "run --select tag:nightly"
            }
        }
    });

    let normalized = dbt_operation_schema().validate(&candidate).unwrap();
    let operation: TransformationOperation = serde_json::from_value(normalized).unwrap();

    assert_eq!(operation.name, "nightly dbt");
    assert_eq!(operation.operator_type(), OperatorType::Dbt);
    match &operation.operator_configuration {
        OperatorConfiguration::Dbt { dbt } => {
            assert_eq!(dbt.git_repo_branch.as_deref(), Some("main"));
            assert!(dbt.docker_image.is_none());
        }
        other => panic!("unexpected operator: {other:?}"),
    }
}

#[test]
fn test_trailing_slash_rejected_everywhere() {
    let operation = TransformationOperation::new(
        "dbt",
        "ws-1",
        OperatorConfiguration::Dbt {
            dbt: solidafy_console::operation::OperatorDbt {
                git_repo_url: "https://github.com/username/example.git/".to_string(),
                ..Default::default()
            },
        },
    );

    let expected = ValidationFailure::new(GIT_REPO_URL_PATH, REPOSITORY_URL_ERROR);
    assert_eq!(operation.validate().unwrap_err(), expected);
    assert_eq!(operation.validate_at(GIT_REPO_URL_PATH).unwrap_err(), expected);

    let candidate = serde_json::to_value(&operation).unwrap();
    assert_eq!(operation_schema().validate(&candidate).unwrap_err(), expected);
}

#[test]
fn test_validation_failure_converts_to_error() {
    fn save(operation: &TransformationOperation) -> solidafy_console::Result<()> {
        operation.validate()?;
        Ok(())
    }

    let err = save(&TransformationOperation::default_dbt("ws-1")).unwrap_err();
    assert_eq!(
        err.as_validation().map(|f| f.path.as_str()),
        Some(GIT_REPO_URL_PATH)
    );
}

#[test]
fn test_concurrent_validation_is_independent() {
    let handles: Vec<_> = (0..8)
        .map(|i| {
            std::thread::spawn(move || {
                let url = if i % 2 == 0 {
                    "https://github.com/username/example.git"
                } else {
                    "https://github.com/username/example.git/"
                };
                let candidate = json!({
                    "name": format!("op {i}"),
                    "workspaceId": "ws",
                    "operatorConfiguration": {"operatorType": "dbt", "dbt": {"gitRepoUrl": url}}
                });
                (i, dbt_operation_schema().validate(&candidate).is_ok())
            })
        })
        .collect();

    for handle in handles {
        let (i, ok) = handle.join().unwrap();
        assert_eq!(ok, i % 2 == 0);
    }
}

// ============================================================================
// Config → Specification Service
// ============================================================================

#[tokio::test]
async fn test_specification_lookup_from_config_file() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/source_definition_specifications/get"))
        .and(body_json(json!({"sourceDefinitionId": "def-1", "workspaceId": "ws-1"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "sourceDefinitionId": "def-1",
            "connectionSpecification": {"type": "object", "required": ["api_key"]},
            "jobInfo": {
                "id": "job-7",
                "configType": "get_spec",
                "createdAt": 1_700_000_000,
                "endedAt": 1_700_000_003,
                "succeeded": true
            }
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "apiUrl: {}/api", mock_server.uri()).unwrap();

    let config = ConsoleConfig::load(file.path()).unwrap();
    let options = config.request_options(RequestAuth::None).unwrap();
    let service: Arc<dyn SpecificationService> =
        Arc::new(HttpSpecificationService::new(options).unwrap());

    let spec = service.get("def-1", "ws-1").await.unwrap();
    assert_eq!(spec.required_properties(), vec!["api_key"]);
}

#[tokio::test]
async fn test_specification_error_reaches_caller() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/source_definition_specifications/get_for_source"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = ConsoleConfig::default()
        .with_overrides(|key| (key == "API_URL").then(|| format!("{}/api", mock_server.uri())));
    let service =
        HttpSpecificationService::new(config.request_options(RequestAuth::None).unwrap()).unwrap();

    let err = service.get_for_source("src-1").await.unwrap_err();
    assert!(matches!(err, Error::HttpStatus { status: 500, ref body } if body == "boom"));
}

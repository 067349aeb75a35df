//! Specification request forwarding

use super::types::{
    SourceDefinitionIdWithWorkspaceId, SourceDefinitionSpecification, SourceIdRequestBody,
};
use crate::error::Result;
use crate::http::{HttpClient, RequestOptions};
use async_trait::async_trait;
use tracing::debug;

/// Endpoint returning the specification of a source definition
pub const GET_SPECIFICATION_PATH: &str = "/v1/source_definition_specifications/get";

/// Endpoint returning the specification used by an existing source
pub const GET_SPECIFICATION_FOR_SOURCE_PATH: &str =
    "/v1/source_definition_specifications/get_for_source";

/// Fetches connector specifications
#[async_trait]
pub trait SpecificationService: Send + Sync {
    /// Specification of a source definition, as seen from a workspace
    async fn get(
        &self,
        source_definition_id: &str,
        workspace_id: &str,
    ) -> Result<SourceDefinitionSpecification>;

    /// Specification of the definition (and version) an existing source uses
    async fn get_for_source(&self, source_id: &str) -> Result<SourceDefinitionSpecification>;
}

/// [`SpecificationService`] backed by the configuration API
#[derive(Debug)]
pub struct HttpSpecificationService {
    client: HttpClient,
}

impl HttpSpecificationService {
    /// Create a service with its own client
    pub fn new(options: RequestOptions) -> Result<Self> {
        Ok(Self::with_client(HttpClient::new(options)?))
    }

    /// Create a service on top of an existing client
    pub fn with_client(client: HttpClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl SpecificationService for HttpSpecificationService {
    async fn get(
        &self,
        source_definition_id: &str,
        workspace_id: &str,
    ) -> Result<SourceDefinitionSpecification> {
        debug!(source_definition_id, workspace_id, "Fetching source definition specification");
        let body = SourceDefinitionIdWithWorkspaceId {
            source_definition_id: source_definition_id.to_string(),
            workspace_id: workspace_id.to_string(),
        };
        self.client.post_json(GET_SPECIFICATION_PATH, &body).await
    }

    async fn get_for_source(&self, source_id: &str) -> Result<SourceDefinitionSpecification> {
        debug!(source_id, "Fetching specification for source");
        let body = SourceIdRequestBody {
            source_id: source_id.to_string(),
        };
        self.client
            .post_json(GET_SPECIFICATION_FOR_SOURCE_PATH, &body)
            .await
    }
}

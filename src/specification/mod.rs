//! Connector specifications
//!
//! Forwards specification lookups to the configuration API. Calls are
//! one-shot; transport and HTTP errors reach the caller unchanged.

mod service;
mod types;

pub use service::{
    HttpSpecificationService, SpecificationService, GET_SPECIFICATION_FOR_SOURCE_PATH,
    GET_SPECIFICATION_PATH,
};
pub use types::{
    SourceDefinitionIdWithWorkspaceId, SourceDefinitionSpecification, SourceIdRequestBody,
    SynchronousJobInfo,
};

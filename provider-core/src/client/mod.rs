//! Ory project API: the document snapshot, JSON-Patch operations and the
//! fetch/submit seam the resources call through.

pub mod ory;

use crate::error::ApiError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub use ory::OryClient;

/// JSON-Patch operation (RFC 6902) addressed below the project document root.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "lowercase")]
pub enum PatchOperation {
    Add { path: String, value: Value },
    Remove { path: String },
    Replace { path: String, value: Value },
}

impl PatchOperation {
    pub fn path(&self) -> &str {
        match self {
            PatchOperation::Add { path, .. }
            | PatchOperation::Remove { path }
            | PatchOperation::Replace { path, .. } => path,
        }
    }

    pub fn op_name(&self) -> &'static str {
        match self {
            PatchOperation::Add { .. } => "add",
            PatchOperation::Remove { .. } => "remove",
            PatchOperation::Replace { .. } => "replace",
        }
    }
}

#[derive(Debug, Deserialize)]
struct ProjectDocument {
    id: String,
    revision_id: String,
    #[serde(default)]
    services: Services,
}

#[derive(Debug, Default, Deserialize)]
struct Services {
    #[serde(default)]
    identity: IdentityService,
}

#[derive(Debug, Default, Deserialize)]
struct IdentityService {
    #[serde(default)]
    config: Value,
}

/// One observed revision of a project's configuration.
///
/// Patches computed from a snapshot must be submitted with its `revision_id`.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectSnapshot {
    pub project_id: String,
    pub revision_id: String,
    /// Raw `services.identity.config` document.
    pub identity_config: Value,
}

impl ProjectSnapshot {
    pub fn from_project(project: Value) -> Result<Self, ApiError> {
        let doc: ProjectDocument = serde_json::from_value(project)?;
        Ok(Self {
            project_id: doc.id,
            revision_id: doc.revision_id,
            identity_config: doc.services.identity.config,
        })
    }
}

/// Remote collaborator holding the project document.
#[async_trait]
pub trait ProjectApi: Send + Sync {
    async fn fetch_project(&self, project_id: &str) -> Result<ProjectSnapshot, ApiError>;

    /// Apply `operations` atomically on top of `revision_id`.
    ///
    /// Fails with [`ApiError::RevisionConflict`] when the revision is stale.
    async fn submit_patch(
        &self,
        project_id: &str,
        revision_id: &str,
        operations: &[PatchOperation],
    ) -> Result<ProjectSnapshot, ApiError>;
}

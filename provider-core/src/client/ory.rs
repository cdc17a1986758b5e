//! Ory Network console API client.
//!
//! Only the two project calls the provider needs: fetch the project and patch
//! it against a revision.

use super::{PatchOperation, ProjectApi, ProjectSnapshot};
use crate::config::ProviderSettings;
use crate::error::{ApiError, ConfigError};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use serde_json::Value;

/// Client for the Ory project API.
#[derive(Clone)]
pub struct OryClient {
    client: Client,
    base_url: String,
    api_key: Secret<String>,
}

/// Response body of a successful project patch.
#[derive(Debug, Deserialize)]
struct ProjectUpdate {
    project: Value,
    #[serde(default)]
    warnings: Vec<Value>,
}

impl OryClient {
    pub fn new(settings: &ProviderSettings) -> Result<Self, ConfigError> {
        let client = Client::builder()
            .timeout(settings.request_timeout)
            .user_agent(concat!("terraform-provider-ory/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url: settings.base_url(),
            api_key: settings.workspace_api_key.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn read_body(response: reqwest::Response) -> Result<(StatusCode, String), ApiError> {
        let status = response.status();
        let body = response.text().await?;
        Ok((status, body))
    }
}

#[async_trait]
impl ProjectApi for OryClient {
    async fn fetch_project(&self, project_id: &str) -> Result<ProjectSnapshot, ApiError> {
        let url = format!("{}/projects/{}", self.base_url, project_id);

        let response = self
            .client
            .get(&url)
            .bearer_auth(self.api_key.expose_secret())
            .send()
            .await?;

        let (status, body) = Self::read_body(response).await?;

        if !status.is_success() {
            tracing::error!(status = %status, project_id, "Failed to fetch project");
            return Err(ApiError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let snapshot = ProjectSnapshot::from_project(serde_json::from_str(&body)?)?;
        tracing::debug!(
            project_id,
            revision_id = %snapshot.revision_id,
            "Fetched project configuration"
        );
        Ok(snapshot)
    }

    async fn submit_patch(
        &self,
        project_id: &str,
        revision_id: &str,
        operations: &[PatchOperation],
    ) -> Result<ProjectSnapshot, ApiError> {
        let url = format!(
            "{}/projects/{}/revision/{}",
            self.base_url, project_id, revision_id
        );

        let response = self
            .client
            .patch(&url)
            .bearer_auth(self.api_key.expose_secret())
            .json(operations)
            .send()
            .await?;

        let (status, body) = Self::read_body(response).await?;

        if status == StatusCode::CONFLICT {
            tracing::warn!(project_id, revision_id, "Project revision is stale");
            return Err(ApiError::RevisionConflict {
                revision_id: revision_id.to_string(),
                body,
            });
        }

        if !status.is_success() {
            tracing::error!(status = %status, project_id, "Failed to patch project");
            return Err(ApiError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let update: ProjectUpdate = serde_json::from_str(&body)?;
        for warning in &update.warnings {
            tracing::warn!(warning = %warning, "Ory API reported a warning");
        }

        let snapshot = ProjectSnapshot::from_project(update.project)?;
        tracing::info!(
            project_id,
            operations = operations.len(),
            revision_id = %snapshot.revision_id,
            "Project configuration patched"
        );
        Ok(snapshot)
    }
}

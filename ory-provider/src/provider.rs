//! Provider configuration and the shared handle injected into every resource.

use crate::error::ProviderError;
use crate::resources::{EmailConfigurationResource, RegistrationResource};
use provider_core::client::{OryClient, PatchOperation, ProjectApi, ProjectSnapshot};
use provider_core::config::{ProviderBlock, ProviderSettings};
use provider_core::diagnostics::Diagnostics;
use provider_core::error::ApiError;
use provider_core::schema::{Attribute, Schema};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Result of a serialized fetch, build and submit sequence.
#[derive(Debug, Clone, PartialEq)]
pub enum ApplyOutcome {
    /// Nothing to change; carries the snapshot the empty patch was built from.
    Unchanged(ProjectSnapshot),
    /// Patch accepted; carries the project as returned by the API.
    Applied(ProjectSnapshot),
}

/// Configured client, target project and the lock serializing writes to it.
#[derive(Clone)]
pub struct ProviderContext {
    client: Arc<dyn ProjectApi>,
    project_id: String,
    lock: Arc<Mutex<()>>,
}

impl ProviderContext {
    pub fn new(client: Arc<dyn ProjectApi>, project_id: impl Into<String>) -> Self {
        Self {
            client,
            project_id: project_id.into(),
            lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    /// Current project document, without taking the write lock.
    pub async fn fetch(&self) -> Result<ProjectSnapshot, ApiError> {
        self.client.fetch_project(&self.project_id).await
    }

    /// Fetch the project, build a patch from that snapshot and submit it
    /// against the snapshot's revision, all while holding the write lock.
    pub async fn apply<F>(&self, build: F) -> Result<ApplyOutcome, ProviderError>
    where
        F: FnOnce(&ProjectSnapshot) -> Result<Vec<PatchOperation>, ProviderError> + Send,
    {
        let _guard = self.lock.lock().await;

        let snapshot = self.fetch().await?;
        let operations = build(&snapshot)?;

        if operations.is_empty() {
            tracing::debug!(
                project_id = %self.project_id,
                revision_id = %snapshot.revision_id,
                "Computed empty patch"
            );
            return Ok(ApplyOutcome::Unchanged(snapshot));
        }

        tracing::debug!(
            project_id = %self.project_id,
            revision_id = %snapshot.revision_id,
            operations = operations.len(),
            "Submitting patch"
        );

        let updated = self
            .client
            .submit_patch(&self.project_id, &snapshot.revision_id, &operations)
            .await?;

        Ok(ApplyOutcome::Applied(updated))
    }

    pub fn registration(&self) -> RegistrationResource {
        RegistrationResource::new(self.clone())
    }

    pub fn email_configuration(&self) -> EmailConfigurationResource {
        EmailConfigurationResource::new(self.clone())
    }
}

pub struct OryProvider;

impl OryProvider {
    pub const TYPE_NAME: &'static str = "ory";

    pub fn schema() -> Schema {
        Schema::new(
            "Manage Ory Network project configuration.",
            vec![
                Attribute::string(
                    "host",
                    "Ory console API host. Defaults to api.console.ory.sh. May also be set with ORY_HOST.",
                )
                .optional(),
                Attribute::string(
                    "project_id",
                    "Ory Network project id. May also be set with ORY_PROJECT_ID.",
                )
                .optional(),
                Attribute::string(
                    "workspace_api_key",
                    "Ory workspace API key. May also be set with ORY_WORKSPACE_API_KEY.",
                )
                .optional()
                .sensitive(),
            ],
        )
    }

    /// Resolve settings from the block and environment, then connect.
    pub async fn configure(block: ProviderBlock) -> Result<ProviderContext, Diagnostics> {
        let settings = ProviderSettings::load(block).map_err(|errors| {
            let mut diagnostics = Diagnostics::new();
            for error in errors {
                let summary = error.to_string();
                match error.attribute() {
                    Some(attribute) => {
                        diagnostics.add_attribute_error(attribute, summary, error.detail())
                    }
                    None => diagnostics.add_error(summary, error.detail()),
                }
            }
            diagnostics
        })?;

        Self::configure_with(&settings).await
    }

    pub async fn configure_with(settings: &ProviderSettings) -> Result<ProviderContext, Diagnostics> {
        let client = OryClient::new(settings).map_err(|e| {
            let mut diagnostics = Diagnostics::new();
            diagnostics.add_error("Unable to Create Ory API Client", e.detail());
            diagnostics
        })?;

        tracing::info!(
            host = %settings.host,
            project_id = %settings.project_id,
            "Configuring Ory client"
        );

        Self::connect(Arc::new(client), &settings.project_id).await
    }

    /// Build a context around `client` and verify the project is reachable.
    pub async fn connect(
        client: Arc<dyn ProjectApi>,
        project_id: &str,
    ) -> Result<ProviderContext, Diagnostics> {
        let context = ProviderContext::new(client, project_id);

        if let Err(e) = context.fetch().await {
            tracing::error!(project_id, error = %e, "Failed to verify Ory project access");
            let mut diagnostics = Diagnostics::new();
            diagnostics.add_error(
                "Unable to Create Ory API Client",
                format!(
                    "An unexpected error occurred when creating the Ory API client: {}",
                    e
                ),
            );
            return Err(diagnostics);
        }

        tracing::info!(project_id, "Configured Ory client");
        Ok(context)
    }
}

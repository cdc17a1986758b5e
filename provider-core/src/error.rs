use thiserror::Error;

/// Failures talking to the Ory project API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The revision used for a patch is no longer the project's current one.
    #[error("Revision conflict: revision {revision_id} is no longer current: {body}")]
    RevisionConflict { revision_id: String, body: String },

    #[error("Ory API returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Invalid response body: {0}")]
    InvalidResponse(#[from] serde_json::Error),
}

impl ApiError {
    pub fn is_revision_conflict(&self) -> bool {
        matches!(self, ApiError::RevisionConflict { .. })
    }
}

/// Problems resolving the provider configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing Ory API Project Id")]
    MissingProjectId,

    #[error("Missing Ory API Workspace API Key")]
    MissingApiKey,

    #[error("Invalid Ory API host '{0}'")]
    InvalidHost(String),

    #[error("Configuration error: {0}")]
    Source(#[from] config::ConfigError),

    #[error("Failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
}

impl ConfigError {
    /// Provider block attribute the error refers to, if any.
    pub fn attribute(&self) -> Option<&'static str> {
        match self {
            ConfigError::MissingProjectId => Some("project_id"),
            ConfigError::MissingApiKey => Some("workspace_api_key"),
            ConfigError::InvalidHost(_) => Some("host"),
            ConfigError::Source(_) | ConfigError::HttpClient(_) => None,
        }
    }

    pub fn detail(&self) -> String {
        match self {
            ConfigError::MissingProjectId => "The provider cannot create the Ory API client as there is a missing or empty value for the Ory API project id. \
                 Set the project_id attribute or the ORY_PROJECT_ID environment variable."
                .to_string(),
            ConfigError::MissingApiKey => "The provider cannot create the Ory API client as there is a missing or empty value for the Ory API workspace API key. \
                 Set the workspace_api_key attribute or the ORY_WORKSPACE_API_KEY environment variable."
                .to_string(),
            other => other.to_string(),
        }
    }
}

use crate::error::ConfigError;
use config::{Config as Cfg, Environment};
use secrecy::Secret;
use serde::Deserialize;
use std::time::Duration;

pub const DEFAULT_HOST: &str = "api.console.ory.sh";

/// Values set in the `provider "ory"` block. They take precedence over the
/// environment.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProviderBlock {
    pub host: Option<String>,
    pub project_id: Option<String>,
    pub workspace_api_key: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawSettings {
    #[serde(default)]
    host: String,
    #[serde(default)]
    project_id: String,
    #[serde(default)]
    workspace_api_key: String,
    #[serde(default = "default_request_timeout_secs")]
    request_timeout_secs: u64,
    #[serde(default = "default_log_level")]
    log_level: String,
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Resolved provider settings, read once at configure time.
#[derive(Debug, Clone)]
pub struct ProviderSettings {
    pub host: String,
    pub project_id: String,
    pub workspace_api_key: Secret<String>,
    pub request_timeout: Duration,
    pub log_level: String,
}

impl ProviderSettings {
    /// Load settings from `.env`, `ORY_*` environment variables and the
    /// provider block, in increasing order of precedence.
    pub fn load(block: ProviderBlock) -> Result<Self, Vec<ConfigError>> {
        dotenvy::dotenv().ok();
        Self::from_sources(block, Environment::with_prefix("ORY"))
    }

    pub fn from_sources(
        block: ProviderBlock,
        environment: Environment,
    ) -> Result<Self, Vec<ConfigError>> {
        let raw: RawSettings = Cfg::builder()
            .add_source(environment)
            .set_override_option("host", non_empty(block.host))
            .and_then(|b| b.set_override_option("project_id", non_empty(block.project_id)))
            .and_then(|b| {
                b.set_override_option("workspace_api_key", non_empty(block.workspace_api_key))
            })
            .and_then(|b| b.build())
            .and_then(|c| c.try_deserialize())
            .map_err(|e| vec![ConfigError::from(e)])?;

        let mut errors = Vec::new();

        let host = match raw.host.trim() {
            "" => DEFAULT_HOST.to_string(),
            h if h.chars().any(char::is_whitespace) => {
                errors.push(ConfigError::InvalidHost(h.to_string()));
                String::new()
            }
            h => h.trim_end_matches('/').to_string(),
        };

        if raw.project_id.trim().is_empty() {
            errors.push(ConfigError::MissingProjectId);
        }

        if raw.workspace_api_key.is_empty() {
            errors.push(ConfigError::MissingApiKey);
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(Self {
            host,
            project_id: raw.project_id.trim().to_string(),
            workspace_api_key: Secret::new(raw.workspace_api_key),
            request_timeout: Duration::from_secs(raw.request_timeout_secs),
            log_level: raw.log_level,
        })
    }

    /// Base URL of the console API. Hosts without a scheme are reached over https.
    pub fn base_url(&self) -> String {
        if self.host.starts_with("http://") || self.host.starts_with("https://") {
            self.host.clone()
        } else {
            format!("https://{}", self.host)
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

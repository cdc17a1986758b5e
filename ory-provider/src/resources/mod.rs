//! Terraform resources and their lifecycle entry points.

pub mod email_configuration;
pub mod registration;

use async_trait::async_trait;
use provider_core::diagnostics::Diagnostics;
use provider_core::schema::Schema;

pub use email_configuration::EmailConfigurationResource;
pub use registration::RegistrationResource;

pub(crate) const NO_CHANGES_SUMMARY: &str = "No Changes Detected";
pub(crate) const NO_CHANGES_DETAIL: &str =
    "Update was triggered but no changes were detected between the plan and the current state.";

/// Outcome of a lifecycle call. `state` is `None` when the call failed or the
/// resource is no longer tracked.
#[derive(Debug, Clone, PartialEq)]
pub struct Response<S> {
    pub state: Option<S>,
    pub diagnostics: Diagnostics,
}

impl<S> Response<S> {
    pub fn ok(state: S, diagnostics: Diagnostics) -> Self {
        Self {
            state: Some(state),
            diagnostics,
        }
    }

    pub fn failed(diagnostics: Diagnostics) -> Self {
        Self {
            state: None,
            diagnostics,
        }
    }

    pub fn removed() -> Self {
        Self {
            state: None,
            diagnostics: Diagnostics::new(),
        }
    }

    pub fn has_error(&self) -> bool {
        self.diagnostics.has_error()
    }
}

/// A singleton resource backed by the project configuration document.
#[async_trait]
pub trait Resource: Send + Sync {
    type State: Send + Sync;

    fn type_name(&self) -> &'static str;

    fn schema(&self) -> Schema;

    /// Plan-time checks; no remote calls.
    fn validate_config(&self, config: &Self::State) -> Diagnostics;

    async fn create(&self, plan: Self::State) -> Response<Self::State>;

    async fn read(&self, state: Self::State) -> Response<Self::State>;

    async fn update(&self, plan: Self::State, prior: Self::State) -> Response<Self::State>;

    /// Stop tracking the resource. The project configuration is left as is.
    async fn delete(&self, state: Self::State) -> Response<Self::State>;

    async fn import(&self, id: &str) -> Response<Self::State>;
}

pub(crate) fn timestamp() -> String {
    chrono::Utc::now().to_rfc3339()
}

pub(crate) fn no_changes() -> Diagnostics {
    let mut diagnostics = Diagnostics::new();
    diagnostics.add_warning(NO_CHANGES_SUMMARY, NO_CHANGES_DETAIL);
    diagnostics
}

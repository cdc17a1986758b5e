use super::{no_changes, timestamp, Resource, Response};
use crate::error::ProviderError;
use crate::models::{RegistrationState, REGISTRATION_ID};
use crate::provider::{ApplyOutcome, ProviderContext};
use crate::services::{build_registration_patch, project_registration};
use async_trait::async_trait;
use provider_core::diagnostics::Diagnostics;
use provider_core::schema::{Attribute, Schema};

const ACTION_CREATE: &str = "creating ory registration config";
const ACTION_UPDATE: &str = "updating ory registration config";
const ACTION_READ: &str = "fetching ORY registration config";

/// `ory_registration`: registration flow, password method and auto-login hook.
pub struct RegistrationResource {
    context: ProviderContext,
}

impl RegistrationResource {
    pub const TYPE_NAME: &'static str = "ory_registration";

    pub fn new(context: ProviderContext) -> Self {
        Self { context }
    }

    async fn apply(&self, plan: &RegistrationState) -> Result<ApplyOutcome, ProviderError> {
        self.context
            .apply(|snapshot| Ok(build_registration_patch(plan, &snapshot.identity_config)?))
            .await
    }

    fn stamped(config: &serde_json::Value) -> Result<RegistrationState, ProviderError> {
        let mut state = project_registration(config)?;
        state.id = Some(REGISTRATION_ID.to_string());
        state.last_updated = Some(timestamp());
        Ok(state)
    }
}

#[async_trait]
impl Resource for RegistrationResource {
    type State = RegistrationState;

    fn type_name(&self) -> &'static str {
        Self::TYPE_NAME
    }

    fn schema(&self) -> Schema {
        Schema::new(
            "Registration settings of an Ory Network project.",
            vec![
                Attribute::string("id", "String identifier of the registration resource.").computed(),
                Attribute::string(
                    "last_updated",
                    "Timestamp of the last Terraform update of the registration settings.",
                )
                .computed(),
                Attribute::bool(
                    "enable_registration",
                    "If enabled, users can sign up using the selfservice UIs.",
                )
                .optional()
                .computed(),
                Attribute::bool(
                    "enable_password_auth",
                    "If enabled, users will be able to sign in and register using a password.",
                )
                .optional()
                .computed(),
                Attribute::bool(
                    "enable_post_signin_reg",
                    "If enabled, users will be automatically logged in after they register.",
                )
                .optional()
                .computed(),
                Attribute::bool(
                    "enable_login_hints",
                    "Login hints provide additional information to users when they try to sign up with an account that already exists.",
                )
                .optional()
                .computed(),
            ],
        )
    }

    fn validate_config(&self, _config: &RegistrationState) -> Diagnostics {
        Diagnostics::new()
    }

    async fn create(&self, plan: RegistrationState) -> Response<RegistrationState> {
        let outcome = match self.apply(&plan).await {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::error!(error = %e, "Failed to create registration settings");
                return Response::failed(e.into_diagnostics(ACTION_CREATE));
            }
        };

        let (snapshot, diagnostics) = match outcome {
            ApplyOutcome::Unchanged(snapshot) => {
                tracing::warn!("Registration settings already match the plan");
                (snapshot, no_changes())
            }
            ApplyOutcome::Applied(snapshot) => {
                tracing::info!(revision_id = %snapshot.revision_id, "Registration settings created");
                (snapshot, Diagnostics::new())
            }
        };

        match Self::stamped(&snapshot.identity_config) {
            Ok(state) => Response::ok(state, diagnostics),
            Err(e) => Response::failed(e.into_diagnostics(ACTION_CREATE)),
        }
    }

    async fn read(&self, state: RegistrationState) -> Response<RegistrationState> {
        let snapshot = match self.context.fetch().await {
            Ok(snapshot) => snapshot,
            Err(e) => return Response::failed(ProviderError::from(e).into_diagnostics(ACTION_READ)),
        };

        match project_registration(&snapshot.identity_config) {
            Ok(mut current) => {
                tracing::debug!(revision_id = %snapshot.revision_id, "Read registration settings");
                current.id = state.id.or_else(|| Some(REGISTRATION_ID.to_string()));
                current.last_updated = state.last_updated;
                Response::ok(current, Diagnostics::new())
            }
            Err(e) => Response::failed(ProviderError::from(e).into_diagnostics(ACTION_READ)),
        }
    }

    async fn update(
        &self,
        plan: RegistrationState,
        prior: RegistrationState,
    ) -> Response<RegistrationState> {
        match self.apply(&plan).await {
            Ok(ApplyOutcome::Unchanged(_)) => {
                tracing::warn!("No registration changes to apply");
                Response::ok(prior, no_changes())
            }
            Ok(ApplyOutcome::Applied(snapshot)) => {
                tracing::info!(revision_id = %snapshot.revision_id, "Registration settings updated");
                match Self::stamped(&snapshot.identity_config) {
                    Ok(state) => Response::ok(state, Diagnostics::new()),
                    Err(e) => Response::failed(e.into_diagnostics(ACTION_UPDATE)),
                }
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to update registration settings");
                Response::failed(e.into_diagnostics(ACTION_UPDATE))
            }
        }
    }

    async fn delete(&self, _state: RegistrationState) -> Response<RegistrationState> {
        tracing::debug!("Dropping registration settings from state; project left unchanged");
        Response::removed()
    }

    async fn import(&self, id: &str) -> Response<RegistrationState> {
        self.read(RegistrationState::imported(id)).await
    }
}

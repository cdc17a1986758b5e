use super::{no_changes, timestamp, Resource, Response};
use crate::error::ProviderError;
use crate::models::{EmailConfigurationState, Header, EMAIL_CONFIGURATION_ID};
use crate::provider::{ApplyOutcome, ProviderContext};
use crate::services::{
    build_email_patch, keep_declared_order, project_email, validate_email_configuration,
};
use async_trait::async_trait;
use provider_core::diagnostics::Diagnostics;
use provider_core::schema::{Attribute, Schema};

const ACTION_CREATE: &str = "creating ory email configuration";
const ACTION_UPDATE: &str = "updating ory email configuration";
const ACTION_READ: &str = "fetching ORY email configuration";

/// `ory_email_configuration`: how the project's courier delivers mail.
pub struct EmailConfigurationResource {
    context: ProviderContext,
}

impl EmailConfigurationResource {
    pub const TYPE_NAME: &'static str = "ory_email_configuration";

    pub fn new(context: ProviderContext) -> Self {
        Self { context }
    }

    async fn apply(&self, plan: &EmailConfigurationState) -> Result<ApplyOutcome, ProviderError> {
        validate_email_configuration(plan)?;
        self.context
            .apply(|snapshot| build_email_patch(plan, &snapshot.identity_config))
            .await
    }

    fn stamped(
        config: &serde_json::Value,
        declared_headers: Option<&[Header]>,
    ) -> Result<EmailConfigurationState, ProviderError> {
        let mut state = project_email(config)?;
        state.smtp_headers = keep_declared_order(declared_headers, state.smtp_headers);
        state.id = Some(EMAIL_CONFIGURATION_ID.to_string());
        state.last_updated = Some(timestamp());
        Ok(state)
    }

    fn smtp_schema() -> Attribute {
        Attribute::object(
            "smtp_config",
            "SMTP configuration block (optional, but fields required if present).",
            vec![
                Attribute::string("sender_name", "The name of the sender.").optional().computed(),
                Attribute::string("sender_address", "The email address of the sender.")
                    .optional()
                    .computed(),
                Attribute::string("host", "The SMTP server host.").optional().computed(),
                Attribute::string("port", "The SMTP server port.").optional().computed(),
                Attribute::string("security", "The security type of the SMTP server.")
                    .optional()
                    .computed()
                    .one_of(&[
                        "starttls",
                        "starttls_notrust",
                        "cleartext",
                        "implicittls",
                        "implicittls_notrust",
                    ]),
                Attribute::string("username", "The username for the SMTP server.")
                    .optional()
                    .computed(),
                Attribute::string("password", "The password for the SMTP server.")
                    .optional()
                    .computed()
                    .sensitive(),
            ],
        )
        .optional()
    }

    fn http_schema() -> Attribute {
        Attribute::object(
            "http_config",
            "HTTP configuration block (optional, but fields required if present).",
            vec![
                Attribute::string("url", "The URL of the HTTP server.").optional().computed(),
                Attribute::string("request_method", "The request method for the HTTP server.")
                    .optional()
                    .computed()
                    .one_of(&["GET", "POST", "PUT", "PATCH"]),
                Attribute::string(
                    "authentication_type",
                    "The authentication type for the HTTP server.",
                )
                .optional()
                .computed()
                .one_of(&["none", "basic_auth", "api_key"]),
                Attribute::object(
                    "api_key",
                    "The API key for the HTTP server.",
                    vec![
                        Attribute::string("transport_mode", "The transport mode for the HTTP server.")
                            .required()
                            .one_of(&["header", "cookie"]),
                        Attribute::string("name", "The name of the API Key.").required(),
                        Attribute::string("value", "The value of the API Key.")
                            .required()
                            .sensitive(),
                    ],
                )
                .optional(),
                Attribute::object(
                    "basic_auth",
                    "The basic auth configuration for the HTTP server.",
                    vec![
                        Attribute::string("username", "The username for the HTTP server auth.")
                            .required(),
                        Attribute::string("password", "The password for the HTTP server auth.")
                            .required()
                            .sensitive(),
                    ],
                )
                .optional(),
                Attribute::string(
                    "action_body",
                    "The base64 encoded action body for the HTTP server.",
                )
                .optional()
                .computed(),
            ],
        )
        .optional()
    }
}

#[async_trait]
impl Resource for EmailConfigurationResource {
    type State = EmailConfigurationState;

    fn type_name(&self) -> &'static str {
        Self::TYPE_NAME
    }

    fn schema(&self) -> Schema {
        Schema::new(
            "Courier (email delivery) settings of an Ory Network project.",
            vec![
                Attribute::string("id", "String identifier of the email configuration resource.")
                    .computed(),
                Attribute::string(
                    "last_updated",
                    "Timestamp of the last Terraform update of the email configuration settings.",
                )
                .computed(),
                Attribute::string("server_type", "The type of the email server.")
                    .required()
                    .one_of(&["smtp", "http", "default"]),
                Self::smtp_schema(),
                Self::http_schema(),
                Attribute::list(
                    "smtp_headers",
                    "Headers added to every courier message, for both smtp and http server types.",
                    vec![
                        Attribute::string("key", "The key of the SMTP header.").required(),
                        Attribute::string("value", "The value of the SMTP header.").required(),
                    ],
                )
                .optional(),
            ],
        )
    }

    fn validate_config(&self, config: &EmailConfigurationState) -> Diagnostics {
        match validate_email_configuration(config) {
            Ok(()) => Diagnostics::new(),
            Err(violations) => {
                ProviderError::Validation(violations).into_diagnostics("validating ory email configuration")
            }
        }
    }

    async fn create(&self, plan: EmailConfigurationState) -> Response<EmailConfigurationState> {
        let outcome = match self.apply(&plan).await {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::error!(error = %e, "Failed to create email configuration");
                return Response::failed(e.into_diagnostics(ACTION_CREATE));
            }
        };

        let (snapshot, diagnostics) = match outcome {
            ApplyOutcome::Unchanged(snapshot) => {
                tracing::warn!(server_type = %plan.server_type, "Email configuration already matches the plan");
                (snapshot, no_changes())
            }
            ApplyOutcome::Applied(snapshot) => {
                tracing::info!(
                    server_type = %plan.server_type,
                    revision_id = %snapshot.revision_id,
                    "Email configuration created"
                );
                (snapshot, Diagnostics::new())
            }
        };

        match Self::stamped(&snapshot.identity_config, plan.smtp_headers.as_deref()) {
            Ok(state) => Response::ok(state, diagnostics),
            Err(e) => Response::failed(e.into_diagnostics(ACTION_CREATE)),
        }
    }

    async fn read(&self, state: EmailConfigurationState) -> Response<EmailConfigurationState> {
        let snapshot = match self.context.fetch().await {
            Ok(snapshot) => snapshot,
            Err(e) => return Response::failed(ProviderError::from(e).into_diagnostics(ACTION_READ)),
        };

        match project_email(&snapshot.identity_config) {
            Ok(mut current) => {
                tracing::debug!(
                    server_type = %current.server_type,
                    revision_id = %snapshot.revision_id,
                    "Read email configuration"
                );
                current.smtp_headers =
                    keep_declared_order(state.smtp_headers.as_deref(), current.smtp_headers);
                current.id = state.id.or_else(|| Some(EMAIL_CONFIGURATION_ID.to_string()));
                current.last_updated = state.last_updated;
                Response::ok(current, Diagnostics::new())
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to decode email configuration");
                Response::failed(ProviderError::from(e).into_diagnostics(ACTION_READ))
            }
        }
    }

    async fn update(
        &self,
        plan: EmailConfigurationState,
        prior: EmailConfigurationState,
    ) -> Response<EmailConfigurationState> {
        match self.apply(&plan).await {
            Ok(ApplyOutcome::Unchanged(_)) => {
                tracing::warn!(server_type = %plan.server_type, "No email configuration changes to apply");
                Response::ok(prior, no_changes())
            }
            Ok(ApplyOutcome::Applied(snapshot)) => {
                tracing::info!(
                    server_type = %plan.server_type,
                    revision_id = %snapshot.revision_id,
                    "Email configuration updated"
                );
                match Self::stamped(&snapshot.identity_config, plan.smtp_headers.as_deref()) {
                    Ok(state) => Response::ok(state, Diagnostics::new()),
                    Err(e) => Response::failed(e.into_diagnostics(ACTION_UPDATE)),
                }
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to update email configuration");
                Response::failed(e.into_diagnostics(ACTION_UPDATE))
            }
        }
    }

    async fn delete(&self, _state: EmailConfigurationState) -> Response<EmailConfigurationState> {
        tracing::debug!("Dropping email configuration from state; project left unchanged");
        Response::removed()
    }

    async fn import(&self, id: &str) -> Response<EmailConfigurationState> {
        self.read(EmailConfigurationState::imported(id)).await
    }
}

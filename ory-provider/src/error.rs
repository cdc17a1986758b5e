use provider_core::diagnostics::Diagnostics;
use provider_core::error::ApiError;
use thiserror::Error;

/// The remote document could not be turned back into resource state.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("Invalid SMTP connection URI: {0}")]
    ConnectionUri(#[from] url::ParseError),

    #[error("SMTP connection URI credentials are not valid UTF-8: {0}")]
    UserInfo(#[from] std::string::FromUtf8Error),

    #[error("Expected {expected} at '{path}'")]
    TypeMismatch { path: String, expected: &'static str },

    #[error("Hook at index {index} is missing the 'hook' or 'config' field")]
    MalformedHook { index: usize },

    #[error("Unexpected configuration document shape: {0}")]
    Document(#[from] serde_json::Error),

    #[error("HTTP action body is not valid base64: {0}")]
    ActionBody(#[from] base64::DecodeError),

    #[error("Unknown courier delivery strategy '{0}'")]
    UnknownDeliveryStrategy(String),
}

impl DecodeError {
    pub fn summary(&self) -> &'static str {
        match self {
            DecodeError::ConnectionUri(_) | DecodeError::UserInfo(_) => "Error parsing SMTP URL",
            DecodeError::TypeMismatch { .. } => "Type Assertion Failed",
            DecodeError::MalformedHook { .. } => "Invalid Hook Shape",
            DecodeError::Document(_) => "Unexpected Project Configuration",
            DecodeError::ActionBody(_) => "Error decoding HTTP action body",
            DecodeError::UnknownDeliveryStrategy(_) => "Unsupported Delivery Strategy",
        }
    }
}

/// One failed configuration rule, tied to the attribute it concerns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub attribute: String,
    pub summary: String,
    pub detail: String,
}

impl Violation {
    pub fn new(
        attribute: impl Into<String>,
        summary: impl Into<String>,
        detail: impl Into<String>,
    ) -> Self {
        Self {
            attribute: attribute.into(),
            summary: summary.into(),
            detail: detail.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("{} configuration rule(s) violated", .0.len())]
    Validation(Vec<Violation>),

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Remote(#[from] ApiError),
}

impl ProviderError {
    /// Convert into host diagnostics. `action` reads like
    /// "updating ory email configuration".
    pub fn into_diagnostics(self, action: &str) -> Diagnostics {
        let mut diagnostics = Diagnostics::new();
        match self {
            ProviderError::Validation(violations) => {
                for v in violations {
                    diagnostics.add_attribute_error(v.attribute, v.summary, v.detail);
                }
            }
            ProviderError::Decode(err) => {
                diagnostics.add_error(err.summary(), err.to_string());
            }
            ProviderError::Remote(err) => {
                let summary = if err.is_revision_conflict() {
                    "Project Revision Conflict".to_string()
                } else {
                    format!("Error {}", action)
                };
                diagnostics.add_error(
                    summary,
                    format!("Could not complete {}, unexpected error: {}", action, err),
                );
            }
        }
        diagnostics
    }
}

impl From<Vec<Violation>> for ProviderError {
    fn from(violations: Vec<Violation>) -> Self {
        ProviderError::Validation(violations)
    }
}

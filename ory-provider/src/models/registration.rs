use serde::{Deserialize, Serialize};

pub const REGISTRATION_ID: &str = "registration_settings";

/// Terraform-visible state of `ory_registration`.
///
/// Unset flags are left alone on apply and filled from the project on read.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationState {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub last_updated: Option<String>,
    #[serde(default)]
    pub enable_registration: Option<bool>,
    #[serde(default)]
    pub enable_password_auth: Option<bool>,
    /// Sign the user in right after a password registration (`session` hook).
    #[serde(default)]
    pub enable_post_signin_reg: Option<bool>,
    #[serde(default)]
    pub enable_login_hints: Option<bool>,
}

impl RegistrationState {
    pub fn imported(id: &str) -> Self {
        Self {
            id: Some(id.to_string()),
            ..Self::default()
        }
    }
}

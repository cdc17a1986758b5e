use super::PatchBuilder;
use crate::error::DecodeError;
use crate::models::RegistrationState;
use crate::services::hooks::reconcile_hook;
use crate::services::paths::{self, pointer};
use crate::services::projector::{extract_path, password_after_hooks};
use provider_core::client::PatchOperation;
use serde_json::{json, Value};

/// Patch moving the registration flow settings in `config` to `plan`.
///
/// Unset flags in `plan` are left untouched.
pub fn build_registration_patch(
    plan: &RegistrationState,
    config: &Value,
) -> Result<Vec<PatchOperation>, DecodeError> {
    let mut builder = PatchBuilder::new();

    builder.step("flow settings");
    for (keys, desired) in [
        (paths::REGISTRATION_ENABLED, plan.enable_registration),
        (paths::LOGIN_HINTS, plan.enable_login_hints),
        (paths::PASSWORD_ENABLED, plan.enable_password_auth),
    ] {
        if let Some(desired) = desired {
            builder.replace_changed(pointer(keys), extract_path(config, keys), json!(desired));
        }
    }

    builder.step("post-registration hooks");
    if let Some(desired) = plan.enable_post_signin_reg {
        let hooks = password_after_hooks(config)?;
        builder.push_opt(reconcile_hook(
            &hooks,
            &pointer(paths::PASSWORD_AFTER_HOOKS),
            paths::SESSION_HOOK,
            desired,
        ));
    }

    Ok(builder.build())
}

//! Locations inside `services.identity.config`, as key sequences for reads and
//! as JSON pointers below the project root for patches.

pub const IDENTITY_CONFIG_POINTER: &str = "/services/identity/config";

pub const REGISTRATION_ENABLED: &[&str] = &["selfservice", "flows", "registration", "enabled"];
pub const LOGIN_HINTS: &[&str] = &["selfservice", "flows", "registration", "login_hints"];
pub const PASSWORD_ENABLED: &[&str] = &["selfservice", "methods", "password", "enabled"];
pub const PASSWORD_AFTER_HOOKS: &[&str] = &[
    "selfservice",
    "flows",
    "registration",
    "after",
    "password",
    "hooks",
];

pub const COURIER_DELIVERY_STRATEGY: &[&str] = &["courier", "delivery_strategy"];
pub const COURIER_SMTP: &[&str] = &["courier", "smtp"];
pub const COURIER_HTTP: &[&str] = &["courier", "http"];

/// Hook that signs the user in after a successful registration.
pub const SESSION_HOOK: &str = "session";

/// JSON pointer for `keys`, addressed from the project document root.
pub fn pointer(keys: &[&str]) -> String {
    let mut path = IDENTITY_CONFIG_POINTER.to_string();
    for key in keys {
        path.push('/');
        path.push_str(&key.replace('~', "~0").replace('/', "~1"));
    }
    path
}

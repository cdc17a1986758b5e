pub mod action_body;
pub mod connection_uri;
pub mod hooks;
pub mod patch;
pub mod paths;
pub mod projector;
pub mod validation;

pub use action_body::{ActionBody, BodyEncoding};
pub use connection_uri::SmtpConnection;
pub use hooks::{find_hook_index, reconcile_hook};
pub use patch::{build_email_patch, build_registration_patch, PatchBuilder};
pub use projector::{
    decode_hooks, extract_bool, extract_path, keep_declared_order, project_email,
    project_registration, transform_to_config,
};
pub use validation::validate_email_configuration;

//! ory-provider: Terraform resources for Ory Network project configuration.
pub mod error;
pub mod models;
pub mod provider;
pub mod resources;
pub mod services;

pub use error::{DecodeError, ProviderError, Violation};
pub use provider::{ApplyOutcome, OryProvider, ProviderContext};
pub use resources::{EmailConfigurationResource, RegistrationResource, Resource, Response};

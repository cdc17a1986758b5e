//! provider-core: Shared infrastructure for the Ory Terraform provider.
pub mod client;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod observability;
pub mod schema;

pub use async_trait;
pub use secrecy;
pub use serde;
pub use serde_json;
pub use tokio;
pub use tracing;

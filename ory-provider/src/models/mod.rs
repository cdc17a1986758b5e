pub mod email;
pub mod identity_config;
pub mod registration;

pub use email::{
    ApiKey, AuthenticationType, BasicAuth, EmailConfigurationState, Header, HttpSettings,
    RequestMethod, SecurityMode, ServerType, SmtpSettings, TransportMode,
    EMAIL_CONFIGURATION_ID,
};
pub use identity_config::{
    Courier, HttpAuth, HttpAuthConfig, HttpCourier, HttpRequestConfig, Hook, IdentityConfig,
    SmtpCourier,
};
pub use registration::{RegistrationState, REGISTRATION_ID};

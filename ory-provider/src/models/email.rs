use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;
use validator::Validate;

pub const EMAIL_CONFIGURATION_ID: &str = "email_configuration_settings";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServerType {
    /// Ory's built-in delivery; no courier overrides.
    #[default]
    Default,
    Smtp,
    Http,
}

impl ServerType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ServerType::Default => "default",
            ServerType::Smtp => "smtp",
            ServerType::Http => "http",
        }
    }

    /// Map the remote `courier.delivery_strategy`; unset means `default`.
    pub fn from_delivery_strategy(strategy: Option<&str>) -> Option<Self> {
        match strategy {
            None => Some(ServerType::Default),
            Some("smtp") => Some(ServerType::Smtp),
            Some("http") => Some(ServerType::Http),
            Some(_) => None,
        }
    }
}

impl fmt::Display for ServerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Transport security of an SMTP connection.
///
/// Deserializes leniently: an empty or unrecognized value means `starttls`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub enum SecurityMode {
    #[default]
    #[serde(rename = "starttls")]
    StartTls,
    #[serde(rename = "starttls_notrust")]
    StartTlsNoTrust,
    #[serde(rename = "cleartext")]
    Cleartext,
    #[serde(rename = "implicittls")]
    ImplicitTls,
    #[serde(rename = "implicittls_notrust")]
    ImplicitTlsNoTrust,
}

impl SecurityMode {
    pub const ALL: [SecurityMode; 5] = [
        SecurityMode::StartTls,
        SecurityMode::StartTlsNoTrust,
        SecurityMode::Cleartext,
        SecurityMode::ImplicitTls,
        SecurityMode::ImplicitTlsNoTrust,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SecurityMode::StartTls => "starttls",
            SecurityMode::StartTlsNoTrust => "starttls_notrust",
            SecurityMode::Cleartext => "cleartext",
            SecurityMode::ImplicitTls => "implicittls",
            SecurityMode::ImplicitTlsNoTrust => "implicittls_notrust",
        }
    }

    /// Lenient parse: empty or unknown values fall back to `starttls`.
    pub fn parse_or_default(value: &str) -> Self {
        value.parse().unwrap_or_default()
    }
}

impl FromStr for SecurityMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SecurityMode::ALL
            .into_iter()
            .find(|mode| mode.as_str() == s)
            .ok_or_else(|| format!("unknown SMTP security mode '{}'", s))
    }
}

impl<'de> Deserialize<'de> for SecurityMode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(SecurityMode::parse_or_default(&raw))
    }
}

impl fmt::Display for SecurityMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RequestMethod {
    Get,
    Post,
    Put,
    Patch,
}

impl RequestMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestMethod::Get => "GET",
            RequestMethod::Post => "POST",
            RequestMethod::Put => "PUT",
            RequestMethod::Patch => "PATCH",
        }
    }
}

impl FromStr for RequestMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Ok(RequestMethod::Get),
            "POST" => Ok(RequestMethod::Post),
            "PUT" => Ok(RequestMethod::Put),
            "PATCH" => Ok(RequestMethod::Patch),
            _ => Err(format!("unsupported request method '{}'", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthenticationType {
    None,
    BasicAuth,
    ApiKey,
}

impl AuthenticationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuthenticationType::None => "none",
            AuthenticationType::BasicAuth => "basic_auth",
            AuthenticationType::ApiKey => "api_key",
        }
    }
}

impl FromStr for AuthenticationType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" | "none" => Ok(AuthenticationType::None),
            "basic_auth" => Ok(AuthenticationType::BasicAuth),
            "api_key" => Ok(AuthenticationType::ApiKey),
            _ => Err(format!("unsupported authentication type '{}'", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportMode {
    Header,
    Cookie,
}

impl TransportMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransportMode::Header => "header",
            TransportMode::Cookie => "cookie",
        }
    }
}

impl FromStr for TransportMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "header" => Ok(TransportMode::Header),
            "cookie" => Ok(TransportMode::Cookie),
            _ => Err(format!("unsupported API key transport '{}'", s)),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct SmtpSettings {
    #[validate(
        required(message = "Sender name is required for SMTP server type."),
        length(min = 1, message = "Sender name is required for SMTP server type.")
    )]
    pub sender_name: Option<String>,
    #[validate(
        required(message = "Sender address is required for SMTP server type."),
        length(min = 1, message = "Sender address is required for SMTP server type.")
    )]
    pub sender_address: Option<String>,
    #[validate(
        required(message = "Host is required for SMTP server type."),
        length(min = 1, message = "Host is required for SMTP server type.")
    )]
    pub host: Option<String>,
    #[validate(
        required(message = "Port is required for SMTP server type."),
        length(min = 1, message = "Port is required for SMTP server type.")
    )]
    pub port: Option<String>,
    #[validate(required(message = "Security is required for SMTP server type."))]
    pub security: Option<SecurityMode>,
    #[validate(
        required(message = "Username is required for SMTP server type."),
        length(min = 1, message = "Username is required for SMTP server type.")
    )]
    pub username: Option<String>,
    #[validate(
        required(message = "Password is required for SMTP server type."),
        length(min = 1, message = "Password is required for SMTP server type.")
    )]
    pub password: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct BasicAuth {
    #[validate(length(min = 1, message = "Basic auth username cannot be empty."))]
    pub username: String,
    #[validate(length(min = 1, message = "Basic auth password cannot be empty."))]
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct ApiKey {
    pub transport_mode: TransportMode,
    #[validate(length(min = 1, message = "API key name cannot be empty."))]
    pub name: String,
    #[validate(length(min = 1, message = "API key value cannot be empty."))]
    pub value: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct HttpSettings {
    #[validate(
        required(message = "URL is required for HTTP server type."),
        length(min = 1, message = "URL is required for HTTP server type.")
    )]
    pub url: Option<String>,
    #[validate(required(message = "Request method is required for HTTP server type."))]
    pub request_method: Option<RequestMethod>,
    #[validate(required(message = "Authentication type is required for HTTP server type."))]
    pub authentication_type: Option<AuthenticationType>,
    #[validate(nested)]
    pub basic_auth: Option<BasicAuth>,
    #[validate(nested)]
    pub api_key: Option<ApiKey>,
    /// Base64 encoded request body template.
    #[validate(
        required(message = "Action body is required for HTTP server type."),
        length(min = 1, message = "Action body is required for HTTP server type.")
    )]
    pub action_body: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Header {
    pub key: String,
    pub value: String,
}

/// Terraform-visible state of `ory_email_configuration`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmailConfigurationState {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub last_updated: Option<String>,
    pub server_type: ServerType,
    #[serde(default)]
    pub smtp_config: Option<SmtpSettings>,
    #[serde(default)]
    pub http_config: Option<HttpSettings>,
    /// Extra headers sent with every courier message, SMTP or HTTP.
    #[serde(default)]
    pub smtp_headers: Option<Vec<Header>>,
}

impl EmailConfigurationState {
    pub fn imported(id: &str) -> Self {
        Self {
            id: Some(id.to_string()),
            ..Self::default()
        }
    }
}

//! Typed projection of the parts of `services.identity.config` the provider
//! models. Everything else in the document is ignored on read.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Treat an explicit JSON `null` like an absent field.
fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IdentityConfig {
    #[serde(default, deserialize_with = "nullable")]
    pub courier: Courier,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Courier {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery_strategy: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub smtp: Option<SmtpCourier>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub http: Option<HttpCourier>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SmtpCourier {
    #[serde(default, deserialize_with = "nullable")]
    pub connection_uri: String,
    #[serde(default, deserialize_with = "nullable")]
    pub from_address: String,
    #[serde(default, deserialize_with = "nullable")]
    pub from_name: String,
    #[serde(default, deserialize_with = "nullable")]
    pub headers: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HttpCourier {
    #[serde(default, deserialize_with = "nullable")]
    pub request_config: HttpRequestConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HttpRequestConfig {
    #[serde(default, deserialize_with = "nullable")]
    pub url: String,
    #[serde(default, deserialize_with = "nullable")]
    pub method: String,
    #[serde(default, deserialize_with = "nullable")]
    pub headers: BTreeMap<String, String>,
    #[serde(default, deserialize_with = "nullable")]
    pub body: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth: Option<HttpAuth>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HttpAuth {
    #[serde(rename = "type", default, deserialize_with = "nullable")]
    pub auth_type: String,
    #[serde(default, deserialize_with = "nullable")]
    pub config: HttpAuthConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HttpAuthConfig {
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "String::is_empty")]
    pub user: String,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "String::is_empty")]
    pub password: String,
    /// Where the API key travels: `header` or `cookie`.
    #[serde(rename = "in", default, deserialize_with = "nullable", skip_serializing_if = "String::is_empty")]
    pub transport: String,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "String::is_empty")]
    pub value: String,
}

/// Post-flow side effect attached to a self-service flow.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Hook {
    #[serde(default, deserialize_with = "nullable")]
    pub hook: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<Map<String, Value>>,
}

impl Hook {
    pub fn named(name: &str) -> Self {
        Self {
            hook: name.to_string(),
            config: None,
        }
    }
}

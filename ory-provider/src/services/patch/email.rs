use super::PatchBuilder;
use crate::error::{DecodeError, ProviderError};
use crate::models::{
    AuthenticationType, EmailConfigurationState, Header, HttpAuth, HttpAuthConfig, HttpCourier,
    HttpRequestConfig, HttpSettings, ServerType, SmtpCourier, SmtpSettings,
};
use crate::services::action_body::ActionBody;
use crate::services::connection_uri::{self, SmtpConnection};
use crate::services::paths::{self, pointer};
use crate::services::projector::{extract_path, transform_to_config};
use crate::services::validation::validate_email_configuration;
use provider_core::client::PatchOperation;
use serde_json::{json, Value};
use std::collections::BTreeMap;

const PRUNE_STALE: &str = "prune stale sub-trees";
const SELECT_STRATEGY: &str = "select strategy";
const WRITE_DELIVERY_CONFIG: &str = "write delivery config";

/// Patch moving the courier section of `config` to `plan`.
///
/// Rejects invalid plans before looking at `config`.
pub fn build_email_patch(
    plan: &EmailConfigurationState,
    config: &Value,
) -> Result<Vec<PatchOperation>, ProviderError> {
    validate_email_configuration(plan)?;

    let current_smtp = extract_path(config, paths::COURIER_SMTP);
    let current_http = extract_path(config, paths::COURIER_HTTP);
    let current_strategy = extract_path(config, paths::COURIER_DELIVERY_STRATEGY);

    let mut builder = PatchBuilder::new();

    builder.step(PRUNE_STALE);
    match plan.server_type {
        ServerType::Default => {
            builder
                .remove_present(pointer(paths::COURIER_SMTP), current_smtp)
                .remove_present(pointer(paths::COURIER_HTTP), current_http)
                .remove_present(pointer(paths::COURIER_DELIVERY_STRATEGY), current_strategy);
        }
        ServerType::Smtp => {
            builder.remove_present(pointer(paths::COURIER_HTTP), current_http);
        }
        ServerType::Http => {
            builder.remove_present(pointer(paths::COURIER_SMTP), current_smtp);
        }
    }

    if plan.server_type == ServerType::Default {
        return Ok(builder.build());
    }

    builder.step(SELECT_STRATEGY).replace_changed(
        pointer(paths::COURIER_DELIVERY_STRATEGY),
        current_strategy,
        json!(plan.server_type.as_str()),
    );

    builder.step(WRITE_DELIVERY_CONFIG);
    let courier = transform_to_config(config)?.courier;
    let headers = headers_map(plan.smtp_headers.as_deref());

    match (plan.server_type, &plan.smtp_config, &plan.http_config) {
        (ServerType::Smtp, Some(smtp), _) => {
            let desired = smtp_courier(smtp, headers);
            let unchanged = match courier.smtp.as_ref() {
                Some(current) => same_smtp(current, &desired)?,
                None => false,
            };
            if !unchanged {
                builder.push(PatchOperation::Replace {
                    path: pointer(paths::COURIER_SMTP),
                    value: serde_json::to_value(&desired).map_err(DecodeError::from)?,
                });
            }
        }
        (ServerType::Http, _, Some(http)) => {
            let desired = http_courier(http, headers)?;
            if courier.http.as_ref() != Some(&desired) {
                builder.push(PatchOperation::Replace {
                    path: pointer(paths::COURIER_HTTP),
                    value: serde_json::to_value(&desired).map_err(DecodeError::from)?,
                });
            }
        }
        _ => {}
    }

    Ok(builder.build())
}

fn headers_map(headers: Option<&[Header]>) -> BTreeMap<String, String> {
    headers
        .unwrap_or_default()
        .iter()
        .map(|h| (h.key.clone(), h.value.clone()))
        .collect()
}

fn smtp_connection(smtp: &SmtpSettings) -> SmtpConnection {
    SmtpConnection {
        username: smtp.username.clone().unwrap_or_default(),
        password: smtp.password.clone().unwrap_or_default(),
        host: smtp.host.clone().unwrap_or_default(),
        port: smtp.port.clone().unwrap_or_default(),
        security: Some(smtp.security.unwrap_or_default()),
    }
}

pub fn smtp_courier(smtp: &SmtpSettings, headers: BTreeMap<String, String>) -> SmtpCourier {
    SmtpCourier {
        connection_uri: smtp_connection(smtp).to_uri(),
        from_address: smtp.sender_address.clone().unwrap_or_default(),
        from_name: smtp.sender_name.clone().unwrap_or_default(),
        headers,
    }
}

/// Compare by decoded connection parameters; equivalent URIs may differ in
/// escaping. A stored URI that does not parse is an error, not a difference.
fn same_smtp(current: &SmtpCourier, desired: &SmtpCourier) -> Result<bool, DecodeError> {
    let stored = match current.connection_uri.as_str() {
        "" => return Ok(false),
        uri => connection_uri::decode(uri)?,
    };
    Ok(current.from_address == desired.from_address
        && current.from_name == desired.from_name
        && current.headers == desired.headers
        && stored == connection_uri::decode(&desired.connection_uri)?)
}

pub fn http_courier(
    http: &HttpSettings,
    headers: BTreeMap<String, String>,
) -> Result<HttpCourier, DecodeError> {
    let body = match http.action_body.as_deref() {
        Some(declared) => ActionBody::from_declared(declared)?.to_remote(),
        None => String::new(),
    };

    let auth = match http.authentication_type.unwrap_or(AuthenticationType::None) {
        AuthenticationType::None => None,
        AuthenticationType::BasicAuth => Some(HttpAuth {
            auth_type: AuthenticationType::BasicAuth.as_str().to_string(),
            config: http
                .basic_auth
                .as_ref()
                .map(|b| HttpAuthConfig {
                    user: b.username.clone(),
                    password: b.password.clone(),
                    ..Default::default()
                })
                .unwrap_or_default(),
        }),
        AuthenticationType::ApiKey => Some(HttpAuth {
            auth_type: AuthenticationType::ApiKey.as_str().to_string(),
            config: http
                .api_key
                .as_ref()
                .map(|k| HttpAuthConfig {
                    transport: k.transport_mode.as_str().to_string(),
                    name: k.name.clone(),
                    value: k.value.clone(),
                    ..Default::default()
                })
                .unwrap_or_default(),
        }),
    };

    Ok(HttpCourier {
        request_config: HttpRequestConfig {
            url: http.url.clone().unwrap_or_default(),
            method: http
                .request_method
                .map(|m| m.as_str().to_string())
                .unwrap_or_default(),
            headers,
            body,
            auth,
        },
    })
}

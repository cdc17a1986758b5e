//! Configuration rules for `ory_email_configuration`.
//!
//! Every rule is checked and every failure reported, so a plan shows all
//! problems at once. Field presence comes from the `validator` derives on the
//! settings structs; cross-field rules live here.

use super::action_body::is_valid_base64;
use crate::error::Violation;
use crate::models::{AuthenticationType, EmailConfigurationState, HttpSettings, ServerType, SmtpSettings};
use validator::{Validate, ValidationErrors, ValidationErrorsKind};

pub fn validate_email_configuration(config: &EmailConfigurationState) -> Result<(), Vec<Violation>> {
    let mut violations = Vec::new();

    match config.server_type {
        ServerType::Default => {
            for (attribute, present) in [
                ("smtp_config", config.smtp_config.is_some()),
                ("http_config", config.http_config.is_some()),
            ] {
                if present {
                    violations.push(Violation::new(
                        attribute,
                        "smtp_config and http_config are not allowed with server_type default",
                        "SMTP and HTTP configurations are not allowed with default server type.",
                    ));
                }
            }
        }
        ServerType::Smtp => {
            if config.http_config.is_some() {
                violations.push(Violation::new(
                    "http_config",
                    "http_config is not allowed with server_type smtp",
                    "HTTP configuration is not allowed with SMTP server type.",
                ));
            }
            match &config.smtp_config {
                Some(smtp) => validate_smtp(smtp, &mut violations),
                None => violations.push(Violation::new(
                    "smtp_config",
                    "smtp_config is missing",
                    "SMTP configuration is required with SMTP server type.",
                )),
            }
        }
        ServerType::Http => {
            if config.smtp_config.is_some() {
                violations.push(Violation::new(
                    "smtp_config",
                    "smtp_config is not allowed with server_type http",
                    "SMTP configuration is not allowed with HTTP server type.",
                ));
            }
            match &config.http_config {
                Some(http) => validate_http(http, &mut violations),
                None => violations.push(Violation::new(
                    "http_config",
                    "http_config is missing",
                    "HTTP configuration is required with HTTP server type.",
                )),
            }
        }
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(violations)
    }
}

fn validate_smtp(smtp: &SmtpSettings, violations: &mut Vec<Violation>) {
    if let Err(errors) = smtp.validate() {
        collect("smtp_config", &errors, violations);
    }

    if let Some(port) = smtp.port.as_deref().filter(|p| !p.is_empty()) {
        if port.parse::<u16>().is_err() {
            violations.push(Violation::new(
                "smtp_config.port",
                "port is invalid",
                format!("Port must be a number between 0 and 65535, got '{}'.", port),
            ));
        }
    }
}

fn validate_http(http: &HttpSettings, violations: &mut Vec<Violation>) {
    if let Err(errors) = http.validate() {
        collect("http_config", &errors, violations);
    }

    if let Some(body) = http.action_body.as_deref().filter(|b| !b.is_empty()) {
        if !is_valid_base64(body) {
            violations.push(Violation::new(
                "http_config.action_body",
                "Invalid Base64 Encoding",
                "The provided string is not valid base64.",
            ));
        }
    }

    let has_basic = http.basic_auth.is_some();
    let has_api_key = http.api_key.is_some();

    match http.authentication_type {
        Some(AuthenticationType::None) => {
            for (attribute, present) in [
                ("http_config.basic_auth", has_basic),
                ("http_config.api_key", has_api_key),
            ] {
                if present {
                    violations.push(Violation::new(
                        attribute,
                        "authentication_method not allowed",
                        "cannot specify an authentication method if authentication_type is set to 'none'",
                    ));
                }
            }
        }
        Some(AuthenticationType::BasicAuth) => {
            if has_api_key {
                violations.push(Violation::new(
                    "http_config.api_key",
                    "api_key not allowed",
                    "cannot specify api_key block when authentication_type is 'basic_auth'",
                ));
            }
            if !has_basic {
                violations.push(Violation::new(
                    "http_config.basic_auth",
                    "basic_auth is missing from http_config",
                    "Basic auth credentials are required when authentication_type is 'basic_auth'.",
                ));
            }
        }
        Some(AuthenticationType::ApiKey) => {
            if has_basic {
                violations.push(Violation::new(
                    "http_config.basic_auth",
                    "basic_auth not allowed",
                    "cannot specify basic_auth block when authentication_type is 'api_key'",
                ));
            }
            if !has_api_key {
                violations.push(Violation::new(
                    "http_config.api_key",
                    "api_key is missing from http_config",
                    "API key settings are required when authentication_type is 'api_key'.",
                ));
            }
        }
        None => {}
    }
}

/// Flatten derive errors into one violation per attribute.
fn collect(prefix: &str, errors: &ValidationErrors, violations: &mut Vec<Violation>) {
    let mut found = Vec::new();

    for (field, kind) in errors.errors() {
        let attribute = format!("{}.{}", prefix, field);
        match kind {
            ValidationErrorsKind::Field(field_errors) => {
                if let Some(error) = field_errors.first() {
                    let detail = error
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("{} is invalid.", field));
                    found.push(Violation::new(
                        attribute,
                        format!("{} is missing from {}", field, prefix),
                        detail,
                    ));
                }
            }
            ValidationErrorsKind::Struct(nested) => collect(&attribute, nested, &mut found),
            ValidationErrorsKind::List(items) => {
                for (index, nested) in items {
                    collect(&format!("{}.{}", attribute, index), nested, &mut found);
                }
            }
        }
    }

    found.sort_by(|a, b| a.attribute.cmp(&b.attribute));
    violations.extend(found);
}

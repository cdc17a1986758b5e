use anyhow::{bail, Context};
use ory_provider::models::{EMAIL_CONFIGURATION_ID, REGISTRATION_ID};
use ory_provider::{OryProvider, Resource, Response};
use provider_core::config::{ProviderBlock, ProviderSettings};
use provider_core::diagnostics::Diagnostics;
use provider_core::observability::init_tracing;
use serde::Serialize;
use serde_json::{json, Map, Value};

/// Replace the value at each dotted path with a placeholder.
fn redact(state: &mut Value, sensitive_paths: &[String]) {
    for path in sensitive_paths {
        let mut current = Some(&mut *state);
        for key in path.split('.') {
            current = current.and_then(|v| v.get_mut(key));
        }
        if let Some(value) = current.filter(|v| !v.is_null()) {
            *value = Value::String("(sensitive)".to_string());
        }
    }
}

fn render<R>(resource: &R, response: Response<R::State>) -> anyhow::Result<(Value, Diagnostics)>
where
    R: Resource,
    R::State: Serialize,
{
    let mut state = serde_json::to_value(&response.state)?;
    redact(&mut state, &resource.schema().sensitive_paths());
    Ok((state, response.diagnostics))
}

fn log_diagnostics(diagnostics: &Diagnostics) {
    for d in diagnostics.iter() {
        tracing::error!(
            severity = ?d.severity,
            attribute = d.attribute.as_deref().unwrap_or_default(),
            detail = %d.detail,
            "{}",
            d.summary
        );
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = ProviderSettings::load(ProviderBlock::default());
    let log_level = settings
        .as_ref()
        .map(|s| s.log_level.clone())
        .unwrap_or_else(|_| "info".to_string());
    init_tracing("ory-provider", &log_level);

    let settings = match settings {
        Ok(settings) => settings,
        Err(errors) => {
            for e in &errors {
                tracing::error!(attribute = e.attribute().unwrap_or_default(), "{}", e.detail());
            }
            bail!("{} provider configuration error(s)", errors.len());
        }
    };

    let context = match OryProvider::configure_with(&settings).await {
        Ok(context) => context,
        Err(diagnostics) => {
            log_diagnostics(&diagnostics);
            bail!("failed to configure the Ory provider");
        }
    };

    let registration = context.registration();
    let email = context.email_configuration();

    let (registration_state, mut diagnostics) =
        render(&registration, registration.import(REGISTRATION_ID).await)?;
    let (email_state, email_diagnostics) = render(&email, email.import(EMAIL_CONFIGURATION_ID).await)?;
    diagnostics.append(email_diagnostics);

    let mut output = Map::new();
    output.insert("project_id".to_string(), json!(context.project_id()));
    output.insert(registration.type_name().to_string(), registration_state);
    output.insert(email.type_name().to_string(), email_state);
    output.insert("diagnostics".to_string(), serde_json::to_value(&diagnostics)?);

    println!(
        "{}",
        serde_json::to_string_pretty(&output).context("Failed to render provider state")?
    );

    if diagnostics.has_error() {
        log_diagnostics(&diagnostics);
        bail!("refreshing provider state reported errors");
    }

    Ok(())
}

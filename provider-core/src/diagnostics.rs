//! Diagnostics reported back to the plugin host.
//!
//! Lifecycle operations never return `Err` across the host boundary; every
//! failure or warning is recorded here with a short summary, a detail message
//! and, where it applies, the attribute path it concerns.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub summary: String,
    pub detail: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attribute: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Diagnostics(Vec<Diagnostic>);

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_error(&mut self, summary: impl Into<String>, detail: impl Into<String>) {
        self.push(Severity::Error, summary.into(), detail.into(), None);
    }

    pub fn add_attribute_error(
        &mut self,
        attribute: impl Into<String>,
        summary: impl Into<String>,
        detail: impl Into<String>,
    ) {
        self.push(
            Severity::Error,
            summary.into(),
            detail.into(),
            Some(attribute.into()),
        );
    }

    pub fn add_warning(&mut self, summary: impl Into<String>, detail: impl Into<String>) {
        self.push(Severity::Warning, summary.into(), detail.into(), None);
    }

    fn push(
        &mut self,
        severity: Severity,
        summary: String,
        detail: String,
        attribute: Option<String>,
    ) {
        self.0.push(Diagnostic {
            severity,
            summary,
            detail,
            attribute,
        });
    }

    pub fn append(&mut self, other: Diagnostics) {
        self.0.extend(other.0);
    }

    pub fn has_error(&self) -> bool {
        self.0.iter().any(|d| d.severity == Severity::Error)
    }

    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.0.iter().filter(|d| d.severity == Severity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.0.iter().filter(|d| d.severity == Severity::Warning)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.0.iter()
    }
}

impl IntoIterator for Diagnostics {
    type Item = Diagnostic;
    type IntoIter = std::vec::IntoIter<Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_warnings_are_not_errors() {
        let mut diags = Diagnostics::new();
        diags.add_warning("No Changes Detected", "nothing to do");

        assert!(!diags.has_error());
        assert_eq!(diags.warnings().count(), 1);
    }

    #[test]
    fn test_append_keeps_order() {
        let mut first = Diagnostics::new();
        first.add_attribute_error("smtp_config.host", "host is missing", "Host is required");

        let mut second = Diagnostics::new();
        second.add_error("Error updating", "boom");

        first.append(second);

        assert!(first.has_error());
        let summaries: Vec<_> = first.iter().map(|d| d.summary.as_str()).collect();
        assert_eq!(summaries, vec!["host is missing", "Error updating"]);
        assert_eq!(
            first.errors().next().and_then(|d| d.attribute.as_deref()),
            Some("smtp_config.host")
        );
    }
}

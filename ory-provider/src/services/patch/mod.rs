//! JSON-Patch construction.
//!
//! Operations are grouped into named steps and emitted in step order. Within a
//! step they keep insertion order.

pub mod email;
pub mod registration;

pub use email::build_email_patch;
pub use registration::build_registration_patch;

use provider_core::client::PatchOperation;
use serde_json::Value;

#[derive(Debug)]
struct Step {
    name: &'static str,
    operations: Vec<PatchOperation>,
}

#[derive(Debug, Default)]
pub struct PatchBuilder {
    steps: Vec<Step>,
}

impl PatchBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a new step. Operations pushed afterwards belong to it.
    pub fn step(&mut self, name: &'static str) -> &mut Self {
        self.steps.push(Step {
            name,
            operations: Vec::new(),
        });
        self
    }

    pub fn push(&mut self, operation: PatchOperation) -> &mut Self {
        if self.steps.is_empty() {
            self.step("unnamed");
        }
        if let Some(step) = self.steps.last_mut() {
            step.operations.push(operation);
        }
        self
    }

    pub fn push_opt(&mut self, operation: Option<PatchOperation>) -> &mut Self {
        if let Some(op) = operation {
            self.push(op);
        }
        self
    }

    /// Remove `path` when `current` holds a non-null value.
    pub fn remove_present(&mut self, path: String, current: Option<&Value>) -> &mut Self {
        if current.is_some_and(|v| !v.is_null()) {
            self.push(PatchOperation::Remove { path });
        }
        self
    }

    /// Replace `path` with `desired` unless `current` already equals it.
    pub fn replace_changed(
        &mut self,
        path: String,
        current: Option<&Value>,
        desired: Value,
    ) -> &mut Self {
        if current != Some(&desired) {
            self.push(PatchOperation::Replace {
                path,
                value: desired,
            });
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.steps.iter().all(|s| s.operations.is_empty())
    }

    /// Step names with their operation counts, in emission order.
    pub fn summary(&self) -> Vec<(&'static str, usize)> {
        self.steps
            .iter()
            .map(|s| (s.name, s.operations.len()))
            .collect()
    }

    pub fn build(self) -> Vec<PatchOperation> {
        for step in &self.steps {
            tracing::debug!(
                step = step.name,
                operations = step.operations.len(),
                "Patch step built"
            );
        }
        self.steps.into_iter().flat_map(|s| s.operations).collect()
    }
}

#![allow(dead_code)]

use async_trait::async_trait;
use ory_provider::ProviderContext;
use provider_core::client::{PatchOperation, ProjectApi, ProjectSnapshot};
use provider_core::error::ApiError;
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};

pub const PROJECT_ID: &str = "proj-test";

type Mutation = Box<dyn FnOnce(&mut Value) + Send>;

struct Inner {
    document: Value,
    revision: u64,
    fetches: usize,
    submissions: Vec<Vec<PatchOperation>>,
    after_next_fetch: Option<Mutation>,
}

/// In-memory Ory project. Enforces revisions and applies patches with
/// `json-patch`, creating missing parent objects the way the API does.
pub struct FakeProject {
    inner: Mutex<Inner>,
}

impl FakeProject {
    pub fn new(identity_config: Value) -> Arc<Self> {
        Arc::new(Self {
            inner: Mutex::new(Inner {
                document: json!({
                    "id": PROJECT_ID,
                    "revision_id": "rev-1",
                    "services": {"identity": {"config": identity_config}}
                }),
                revision: 1,
                fetches: 0,
                submissions: Vec::new(),
                after_next_fetch: None,
            }),
        })
    }

    pub fn context(self: &Arc<Self>) -> ProviderContext {
        ProviderContext::new(self.clone(), PROJECT_ID)
    }

    pub fn identity_config(&self) -> Value {
        self.inner.lock().unwrap().document["services"]["identity"]["config"].clone()
    }

    pub fn revision_id(&self) -> String {
        format!("rev-{}", self.inner.lock().unwrap().revision)
    }

    pub fn fetch_count(&self) -> usize {
        self.inner.lock().unwrap().fetches
    }

    pub fn submissions(&self) -> Vec<Vec<PatchOperation>> {
        self.inner.lock().unwrap().submissions.clone()
    }

    /// Simulate another writer changing the identity config right after the
    /// next fetch is served.
    pub fn after_next_fetch(&self, mutation: impl FnOnce(&mut Value) + Send + 'static) {
        self.inner.lock().unwrap().after_next_fetch = Some(Box::new(mutation));
    }
}

fn bump(inner: &mut Inner) {
    inner.revision += 1;
    inner.document["revision_id"] = json!(format!("rev-{}", inner.revision));
}

/// Apply operations to a document. `replace` upserts and parents are created
/// on demand.
pub fn apply_operations(document: &mut Value, operations: &[PatchOperation]) -> Result<(), String> {
    let mut raw = serde_json::to_value(operations).map_err(|e| e.to_string())?;
    for op in raw.as_array_mut().into_iter().flatten() {
        if op["op"] == "replace" {
            op["op"] = json!("add");
        }
    }
    for op in operations {
        if !matches!(op, PatchOperation::Remove { .. }) {
            ensure_parents(document, op.path());
        }
    }
    let patch: json_patch::Patch = serde_json::from_value(raw).map_err(|e| e.to_string())?;
    json_patch::patch(document, &patch).map_err(|e| e.to_string())
}

fn ensure_parents(document: &mut Value, pointer: &str) {
    let segments: Vec<&str> = pointer.split('/').skip(1).collect();
    let mut prefix = String::new();
    for pair in segments.windows(2) {
        let (segment, next) = (pair[0], pair[1]);
        let child = format!("{}/{}", prefix, segment);
        if matches!(document.pointer(&child), None | Some(Value::Null)) {
            let container = if next == "-" || next.parse::<usize>().is_ok() {
                json!([])
            } else {
                json!({})
            };
            if let Some(Value::Object(map)) = document.pointer_mut(&prefix) {
                map.insert(segment.to_string(), container);
            }
        }
        prefix = child;
    }
}

#[async_trait]
impl ProjectApi for FakeProject {
    async fn fetch_project(&self, project_id: &str) -> Result<ProjectSnapshot, ApiError> {
        let mut inner = self.inner.lock().unwrap();
        if project_id != PROJECT_ID {
            return Err(ApiError::Status {
                status: 404,
                body: "project not found".to_string(),
            });
        }

        inner.fetches += 1;
        let snapshot = ProjectSnapshot::from_project(inner.document.clone())?;

        if let Some(mutation) = inner.after_next_fetch.take() {
            mutation(&mut inner.document["services"]["identity"]["config"]);
            bump(&mut inner);
        }

        Ok(snapshot)
    }

    async fn submit_patch(
        &self,
        _project_id: &str,
        revision_id: &str,
        operations: &[PatchOperation],
    ) -> Result<ProjectSnapshot, ApiError> {
        let mut inner = self.inner.lock().unwrap();
        let current = format!("rev-{}", inner.revision);
        if revision_id != current {
            return Err(ApiError::RevisionConflict {
                revision_id: revision_id.to_string(),
                body: format!("current revision is {}", current),
            });
        }

        let mut document = inner.document.clone();
        apply_operations(&mut document, operations)
            .map_err(|body| ApiError::Status { status: 400, body })?;

        inner.document = document;
        inner.submissions.push(operations.to_vec());
        bump(&mut inner);

        ProjectSnapshot::from_project(inner.document.clone())
    }
}

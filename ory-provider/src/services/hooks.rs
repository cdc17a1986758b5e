use crate::models::Hook;
use provider_core::client::PatchOperation;
use serde_json::json;

/// Index of the first hook named exactly `name`.
pub fn find_hook_index(hooks: &[Hook], name: &str) -> Option<usize> {
    hooks.iter().position(|h| h.hook == name)
}

/// Minimal operation making the presence of `name` in `hooks` match `desired`.
///
/// New hooks are inserted at the front of the list. Removal addresses the index
/// found in `hooks`, so the patch must be submitted against the same revision
/// the list was read from.
pub fn reconcile_hook(
    hooks: &[Hook],
    list_path: &str,
    name: &str,
    desired: bool,
) -> Option<PatchOperation> {
    match (desired, find_hook_index(hooks, name)) {
        (true, None) => Some(PatchOperation::Add {
            path: format!("{}/0", list_path),
            value: json!({ "hook": name }),
        }),
        (false, Some(index)) => Some(PatchOperation::Remove {
            path: format!("{}/{}", list_path, index),
        }),
        _ => None,
    }
}

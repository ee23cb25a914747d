//! Root skeleton of the persisted library document
//!
//! On disk the document is `{ "LibraryManagementSystem": { "borrow": {...} } }`.

use serde_json::{json, Value};

/// Top-level key wrapping the whole system state
pub const SYSTEM_KEY: &str = "LibraryManagementSystem";
/// Key of the single borrow transaction under [`SYSTEM_KEY`]
pub const BORROW_KEY: &str = "borrow";

/// Empty document used when nothing can be loaded
pub fn skeleton() -> Value {
    json!({ SYSTEM_KEY: { BORROW_KEY: {} } })
}

/// Repair `root` so that `LibraryManagementSystem.borrow` exists.
///
/// Returns `true` when something had to be replaced or inserted. A `borrow`
/// that is present but not an object is left alone; only a missing or null
/// one is reset to `{}`.
pub fn ensure_skeleton(root: &mut Value) -> bool {
    if !root.is_object() {
        *root = skeleton();
        return true;
    }

    let mut repaired = false;
    let system = &mut root[SYSTEM_KEY];
    if !system.is_object() {
        *system = json!({ BORROW_KEY: {} });
        repaired = true;
    }

    let borrow = &mut system[BORROW_KEY];
    if borrow.is_null() {
        *borrow = json!({});
        repaired = true;
    }
    repaired
}

/// Current borrow transaction, if the root has one
pub fn borrow(root: &Value) -> Option<&Value> {
    root.get(SYSTEM_KEY)?.get(BORROW_KEY)
}

/// Mutable borrow transaction, repairing the skeleton first
pub fn borrow_mut(root: &mut Value) -> &mut Value {
    ensure_skeleton(root);
    &mut root[SYSTEM_KEY][BORROW_KEY]
}

//! Deep search over the library document
//!
//! A node matches a query when its own text, any key below it, or any value
//! below it contains the query, ignoring case. [`collect`] reports every
//! matching node in pre-order, so a matching book is listed together with the
//! batch that contains it and the field that made it match.

use serde::Serialize;
use serde_json::Value;
use utoipa::ToSchema;

use crate::models::value::to_text;

/// A matching node and its dotted location in the document
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct SearchHit {
    /// Dotted path from the search root, `""` for the root itself
    pub path: String,
    /// The matching node
    #[schema(value_type = Object)]
    pub value: Value,
}

/// Whether `value` or anything below it contains `query`, case-insensitively
pub fn matches(value: &Value, query: &str) -> bool {
    matches_lowercase(value, &query.to_lowercase())
}

fn matches_lowercase(value: &Value, query: &str) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(_) | Value::Number(_) | Value::String(_) => {
            to_text(value).to_lowercase().contains(query)
        }
        Value::Array(items) => items.iter().any(|item| matches_lowercase(item, query)),
        Value::Object(fields) => fields
            .iter()
            .any(|(key, field)| key.to_lowercase().contains(query) || matches_lowercase(field, query)),
    }
}

/// All matching nodes under `node`, in pre-order.
///
/// `path` holds the segments leading to `node`; sequence elements add their
/// index and object fields add their key. A node is reported before its
/// descendants, and descendants are searched whether or not the node itself
/// matched.
pub fn collect(node: &Value, query: &str, path: &[&str]) -> Vec<SearchHit> {
    let query = query.to_lowercase();
    let mut segments: Vec<String> = path.iter().map(|s| s.to_string()).collect();
    let mut hits = Vec::new();
    collect_into(node, &query, &mut segments, &mut hits);
    hits
}

fn collect_into(node: &Value, query: &str, path: &mut Vec<String>, hits: &mut Vec<SearchHit>) {
    if matches_lowercase(node, query) {
        hits.push(SearchHit {
            path: path.join("."),
            value: node.clone(),
        });
    }

    match node {
        Value::Array(items) => {
            for (index, item) in items.iter().enumerate() {
                path.push(index.to_string());
                collect_into(item, query, path, hits);
                path.pop();
            }
        }
        Value::Object(fields) => {
            for (key, field) in fields {
                path.push(key.clone());
                collect_into(field, query, path, hits);
                path.pop();
            }
        }
        _ => {}
    }
}

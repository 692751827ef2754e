//! Render query results as printable strings.

use serde_json::Value;

pub mod plan;
pub mod table;
pub mod vertical;

/// Display text for a single cell value.
///
/// Strings print bare (no quotes); everything else uses its JSON spelling.
pub(crate) fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

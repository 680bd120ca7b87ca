use anyhow::{Context, Result};
use serde_json::Value as JsonValue;

/// Key addressed by a request path: the path minus its single leading `/`.
///
/// No decoding or normalization happens, so `/a/b` addresses `a/b` and
/// `/a%20b` addresses `a%20b`.
pub fn key_from_path(path: &str) -> &str {
    path.strip_prefix('/').unwrap_or(path)
}

/// Text written to the store for a parsed request body.
///
/// A JSON string is stored as its contents; anything else as compact JSON.
pub fn stored_text(value: &JsonValue) -> Result<String> {
    match value {
        JsonValue::String(s) => Ok(s.clone()),
        other => serde_json::to_string(other).context("Failed to serialize JSON value"),
    }
}

/// Response body for a read: the stored text as a JSON string, or `null` when absent.
pub fn read_body(stored: Option<&str>) -> Result<String> {
    serde_json::to_string(&stored).context("Failed to encode stored value")
}

/// Response body for a fresh identifier
pub fn identifier_body(id: &str) -> Result<String> {
    serde_json::to_string(id).context("Failed to encode identifier")
}

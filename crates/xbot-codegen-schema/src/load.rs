//! # Schema Loading
//!
//! Reads a service schema file and parses it as JSON. Nothing here looks at
//! the content: a document that parses is returned as-is and every semantic
//! check happens downstream in the assembler.

use std::path::Path;

use serde_json::Value;
use xbot_codegen_core::CodegenError;

/// Origin label used for documents that did not come from a file.
pub const MEMORY_ORIGIN: &str = "<memory>";

/// Read and parse the schema at `path`.
///
/// # Errors
///
/// Returns `CodegenError::SchemaRead` if the file cannot be read or is not
/// well-formed JSON.
pub fn load_schema(path: impl AsRef<Path>) -> Result<Value, CodegenError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| CodegenError::SchemaRead {
        path: path.display().to_string(),
        reason: format!("cannot read file: {e}"),
    })?;
    parse_schema_str(&content, &path.display().to_string())
}

/// Parse schema text that is already in memory.
///
/// `origin` names the source in error messages.
pub fn parse_schema_str(text: &str, origin: &str) -> Result<Value, CodegenError> {
    serde_json::from_str(text).map_err(|e| CodegenError::SchemaRead {
        path: origin.to_string(),
        reason: format!("invalid JSON: {e}"),
    })
}

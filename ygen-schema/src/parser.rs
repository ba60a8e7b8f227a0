//! Loading a serialized IR document.
//!
//! Front ends that run out of process hand the IR over as JSON with the
//! shape of [`SchemaTree`]. Loading does not validate; the generator does
//! that before any resolution starts.

use crate::error::ParseError;
use crate::ir::SchemaTree;
use std::path::Path;

/// Parses an IR document from a JSON string.
///
/// # Errors
/// Returns `ParseError` if the JSON is malformed or does not match the IR shape.
pub fn parse_schema(json: &str) -> Result<SchemaTree, ParseError> {
    Ok(serde_json::from_str(json)?)
}

/// Reads and parses an IR document from a file.
///
/// # Errors
/// Returns `ParseError` if reading or parsing fails.
pub fn load_schema(path: &Path) -> Result<SchemaTree, ParseError> {
    let json = std::fs::read_to_string(path)?;
    parse_schema(&json)
}

//! # ygen Codegen
//!
//! Code generation from YANG schema IR.
//!
//! This crate provides:
//! - Type resolution of leaves, including leafrefs and unions
//! - Deterministic naming of structs, fields, enums and path types
//! - Enumerated and union type catalogs
//! - Path APIs with wildcard key combinations or key builders
//! - Struct generation with ordered, keyed and unkeyed list storage

pub mod config;
pub mod defaults;
pub mod enums;
pub mod error;
pub mod generator;
pub mod names;
pub mod ordered;
pub mod paths;
pub mod rust;
pub mod types;
pub mod unions;

#[cfg(test)]
mod test_support;

pub use config::{GeneratorConfig, TypedefEnumNaming, UnionRepresentation};
pub use error::{CodegenError, ErrorKind, ErrorList, TypeError};
pub use generator::{GeneratedCode, Generator, NodeArtifact, NodeMetadata};

/// Generates Rust code from a JSON schema IR document.
///
/// # Arguments
/// * `json` - Schema IR document
/// * `config` - Generator configuration
///
/// # Returns
/// The generated code with any per-node errors.
///
/// # Errors
/// Returns `CodegenError` if parsing fails or the IR is inconsistent.
pub fn generate_from_json(json: &str, config: GeneratorConfig) -> Result<GeneratedCode, CodegenError> {
    let tree = ygen_schema::parse_schema(json)?;
    Generator::with_config(&tree, config).generate()
}

/// Generates Rust code from a JSON schema IR file.
///
/// # Arguments
/// * `path` - Path to the schema IR file
/// * `config` - Generator configuration
///
/// # Returns
/// The generated code with any per-node errors.
///
/// # Errors
/// Returns `CodegenError` if reading or parsing fails or the IR is
/// inconsistent.
pub fn generate_from_file(
    path: &std::path::Path,
    config: GeneratorConfig,
) -> Result<GeneratedCode, CodegenError> {
    let json = std::fs::read_to_string(path)?;
    generate_from_json(&json, config)
}

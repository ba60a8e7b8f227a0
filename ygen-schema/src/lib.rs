//! # ygen Schema
//!
//! Intermediate representation of a compiled YANG schema.
//!
//! This crate provides:
//! - YANG type records (built-ins, typedefs, restrictions, enums, identities)
//! - A path-addressed arena of schema nodes
//! - Directories and fields as produced by a compressing front end
//! - A builder for assembling the IR programmatically
//! - JSON loading and consistency validation of an IR document

pub mod builder;
pub mod error;
pub mod ir;
pub mod parser;
pub mod types;
pub mod validation;

pub use builder::SchemaTreeBuilder;
pub use error::{ParseError, SchemaError};
pub use ir::{Directory, Field, FieldKind, NodeKind, SchemaNode, SchemaTree};
pub use parser::{load_schema, parse_schema};
pub use types::{EnumValue, Identity, IdentityValue, LengthRange, Range, YangKind, YangType};
pub use validation::validate_tree;

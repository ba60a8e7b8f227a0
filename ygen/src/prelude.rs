//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types and traits.
//!
//! ```ignore
//! use ygen::prelude::*;
//! ```

// Runtime types
pub use ygen_core::{
    Binary, Error as CoreError, KeyValue, KeyedEntry, OptionalOrderedMap, OrderedMap, PathElem,
    PathNode, Result as CoreResult, Untyped, YangEmpty,
};

// Schema IR
pub use ygen_schema::{
    Directory, Field, FieldKind, Identity, NodeKind, SchemaNode, SchemaTree, SchemaTreeBuilder,
    YangKind, YangType,
};

// Generator
pub use ygen_codegen::{
    CodegenError, ErrorKind, GeneratedCode, Generator, GeneratorConfig, TypedefEnumNaming,
    UnionRepresentation,
};

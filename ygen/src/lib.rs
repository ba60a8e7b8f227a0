//! # ygen
//!
//! Typed Rust models and path APIs generated from YANG schemas.
//!
//! A front end compiles YANG modules into a schema IR: a tree of schema
//! nodes plus the directories that become generated structs. ygen turns
//! that IR into Rust source with one struct per directory, enums for
//! enumerations and identities, unions, and path types for addressing data
//! with concrete or wildcard list keys.
//!
//! ## Quick Start
//!
//! ```ignore
//! use ygen::prelude::*;
//!
//! let tree = ygen::schema::load_schema("openconfig-interfaces.json".as_ref())?;
//! let config = GeneratorConfig::new().list_builder_key_threshold(3);
//! let code = Generator::with_config(&tree, config).generate()?;
//! for err in code.errors.iter() {
//!     eprintln!("{err}");
//! }
//! std::fs::write("src/model.rs", code.render())?;
//! ```
//!
//! ## Crate Organization
//!
//! - [`core`] - Runtime types used by generated code
//! - [`schema`] - Schema IR, builder, loader and validation
//! - [`codegen`] - Type resolution, naming and code generation

pub mod prelude;

/// Runtime types used by generated code.
pub mod core {
    pub use ygen_core::*;
}

/// Schema IR, builder, loader and validation.
pub mod schema {
    pub use ygen_schema::*;
}

/// Code generation from schema IR.
pub mod codegen {
    pub use ygen_codegen::*;
}

// Re-export commonly used items at the crate root
pub use ygen_codegen::{GeneratedCode, Generator, GeneratorConfig, generate_from_file, generate_from_json};
pub use ygen_core::{KeyedEntry, OrderedMap, PathNode};
pub use ygen_schema::{SchemaTree, SchemaTreeBuilder};

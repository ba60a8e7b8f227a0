//! Rust code generation modules.

pub mod enums;
pub mod paths;
pub mod structs;
pub mod unions;

pub use enums::EnumGenerator;
pub use paths::PathGenerator;
pub use structs::StructGenerator;
pub use unions::UnionGenerator;

use crate::config::GeneratorConfig;
use crate::error::CodegenError;
use crate::names::NameResolver;
use crate::ordered::ListPlan;
use crate::types::ResolvedType;
use std::collections::{BTreeSet, HashMap};
use ygen_schema::{Directory, Field, FieldKind, SchemaTree};

/// Imports every generated module starts with.
pub const PRELUDE: &str = "#[allow(unused_imports)]\n\
use std::collections::BTreeMap;\n\
#[allow(unused_imports)]\n\
use ygen_core::{Binary, KeyValue, KeyedEntry, OrderedMap, PathElem, PathNode, Untyped, YangEmpty};\n\n";

/// Resolved state shared by the emitters of one run.
#[derive(Debug, Clone, Copy)]
pub struct EmitContext<'a> {
    /// Schema IR.
    pub tree: &'a SchemaTree,
    /// Generator configuration.
    pub config: &'a GeneratorConfig,
    /// Assigned names.
    pub names: &'a NameResolver<'a>,
    /// Resolved leaf types by schema path.
    pub resolved: &'a HashMap<String, ResolvedType>,
    /// Storage plans by list directory path.
    pub lists: &'a HashMap<String, ListPlan>,
    /// Directories whose output is withheld after an error.
    pub withheld: &'a BTreeSet<String>,
    /// Directories without a path API.
    pub unreachable: &'a BTreeSet<String>,
}

impl<'a> EmitContext<'a> {
    /// Returns true if the directory at `path` produces output.
    #[must_use]
    pub fn is_emitted(&self, path: &str) -> bool {
        !self.withheld.contains(path)
    }

    /// Returns true if the directory at `path` gets path types.
    #[must_use]
    pub fn is_reachable(&self, path: &str) -> bool {
        self.is_emitted(path) && !self.unreachable.contains(path)
    }

    /// Returns the generated name of a directory.
    ///
    /// # Errors
    /// Returns an error if the directory was never named.
    pub fn directory_name(&self, path: &str) -> Result<&'a str, CodegenError> {
        let names: &'a NameResolver<'a> = self.names;
        names
            .directory_name(path)
            .ok_or_else(|| CodegenError::generation(format!("directory {path} has no name")))
    }

    /// Returns the identifier of `field` in `dir`.
    ///
    /// # Errors
    /// Returns an error if the field was never named.
    pub fn field_ident(&self, dir: &Directory, field: &Field) -> Result<&'a str, CodegenError> {
        let names: &'a NameResolver<'a> = self.names;
        names.field_ident(&dir.path, &field.name).ok_or_else(|| {
            CodegenError::generation(format!("field {} of {} has no name", field.name, dir.path))
        })
    }

    /// Returns the resolved type of a leaf field.
    ///
    /// # Errors
    /// Returns an error if the leaf was not resolved.
    pub fn resolved(&self, field: &Field) -> Result<&'a ResolvedType, CodegenError> {
        let resolved: &'a HashMap<String, ResolvedType> = self.resolved;
        resolved
            .get(&field.node)
            .ok_or_else(|| CodegenError::generation(format!("leaf {} is unresolved", field.node)))
    }

    /// Returns the directory a container or list field points at, if it
    /// produces output.
    #[must_use]
    pub fn child_directory(&self, field: &Field) -> Option<&'a Directory> {
        let tree: &'a SchemaTree = self.tree;
        match field.kind {
            FieldKind::Container | FieldKind::List => tree
                .directory(&field.node)
                .filter(|dir| self.is_emitted(&dir.path)),
            FieldKind::Leaf | FieldKind::LeafList => None,
        }
    }
}

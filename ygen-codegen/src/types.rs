//! Leaf type resolution.
//!
//! [`TypeResolver::resolve`] maps the YANG type of a leaf to a
//! [`MappedType`]. Unions are flattened depth-first, leafrefs are followed
//! to their target leaf, and the flattened subtypes are deduplicated by
//! native type in first-seen order. A union with a single distinct subtype
//! maps to that subtype directly.

use crate::config::GeneratorConfig;
use crate::enums::{EnumCatalog, UNSET_VARIANT};
use crate::error::{CodegenError, TypeError};
use crate::names::NameResolver;
use crate::unions::{UnionCatalog, variant_name};
use indexmap::IndexMap;
use serde::Serialize;
use std::collections::HashSet;
use ygen_schema::{SchemaError, SchemaNode, SchemaTree, YangKind, YangType};

/// Bound on union nesting plus leafref hops while resolving one leaf.
pub const MAX_RESOLVE_DEPTH: usize = 32;

/// Target type descriptor of a leaf.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MappedType {
    /// Rust type name.
    pub native_type: String,
    /// Rust expression of the zero value.
    pub zero_value: String,
    /// Rust expression of the default value, if the leaf has one.
    pub default_value: Option<String>,
    /// True for enumerations and identityrefs.
    pub is_enumerated: bool,
    /// Union subtypes by native type, with their first-seen index. Empty
    /// unless the type is a multi-subtype union.
    pub union_types: IndexMap<String, usize>,
}

impl MappedType {
    /// Creates a non-enumerated, non-union type.
    #[must_use]
    pub fn new(native_type: impl Into<String>, zero_value: impl Into<String>) -> Self {
        Self {
            native_type: native_type.into(),
            zero_value: zero_value.into(),
            default_value: None,
            is_enumerated: false,
            union_types: IndexMap::new(),
        }
    }

    /// Creates the type of a generated enumerated type.
    #[must_use]
    pub fn enumerated(name: &str) -> Self {
        Self {
            native_type: name.to_string(),
            zero_value: format!("{name}::{UNSET_VARIANT}"),
            default_value: None,
            is_enumerated: true,
            union_types: IndexMap::new(),
        }
    }

    /// Returns true for a multi-subtype union.
    #[must_use]
    pub fn is_union(&self) -> bool {
        !self.union_types.is_empty()
    }

    /// Returns true if the type is `native` or a union with a `native`
    /// subtype.
    #[must_use]
    pub fn contains(&self, native: &str) -> bool {
        self.native_type == native || self.union_types.contains_key(native)
    }
}

/// One flattened union member, or the only type of a non-union leaf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subtype {
    /// Mapped type of the member.
    pub mapped: MappedType,
    /// Member type after leafref resolution.
    pub yang_type: YangType,
}

/// Result of resolving one leaf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedType {
    /// Mapped type of the leaf.
    pub mapped: MappedType,
    /// Distinct subtypes in first-seen order; one entry for non-unions.
    pub subtypes: Vec<Subtype>,
    /// Every flattened member in declaration order, before deduplication.
    /// Members sharing a native type keep their own restrictions here.
    pub flattened: Vec<Subtype>,
}

/// Run-scoped type resolver owning the enum and union catalogs.
#[derive(Debug)]
pub struct TypeResolver<'a> {
    tree: &'a SchemaTree,
    config: &'a GeneratorConfig,
    enums: EnumCatalog,
    unions: UnionCatalog,
}

impl<'a> TypeResolver<'a> {
    /// Creates a resolver with empty catalogs.
    #[must_use]
    pub fn new(tree: &'a SchemaTree, config: &'a GeneratorConfig) -> Self {
        Self {
            tree,
            config,
            enums: EnumCatalog::new(),
            unions: UnionCatalog::new(),
        }
    }

    /// Returns the enumerated types registered so far.
    #[must_use]
    pub fn enums(&self) -> &EnumCatalog {
        &self.enums
    }

    /// Returns the union types registered so far.
    #[must_use]
    pub fn unions(&self) -> &UnionCatalog {
        &self.unions
    }

    /// Resolves the type of a leaf or leaf-list.
    ///
    /// # Errors
    /// Returns an error if the leaf has no type, a leafref does not resolve,
    /// a reference chain is cyclic or deeper than [`MAX_RESOLVE_DEPTH`], or
    /// no unique type name can be found.
    pub fn resolve(
        &mut self,
        leaf: &SchemaNode,
        names: &mut NameResolver<'_>,
    ) -> Result<ResolvedType, CodegenError> {
        let ty = leaf
            .yang_type
            .as_ref()
            .ok_or_else(|| SchemaError::MissingLeafType {
                path: leaf.path.clone(),
            })?;

        let mut flattened = Vec::new();
        let mut visited = HashSet::from([leaf.path.clone()]);
        self.flatten(leaf, leaf, ty, names, &mut visited, 0, &mut flattened)?;

        let mut union_types = IndexMap::new();
        let mut subtypes: Vec<Subtype> = Vec::new();
        for subtype in &flattened {
            if !union_types.contains_key(&subtype.mapped.native_type) {
                union_types.insert(subtype.mapped.native_type.clone(), subtypes.len());
                subtypes.push(subtype.clone());
            }
        }

        let mapped = match subtypes.as_slice() {
            [] => {
                return Err(CodegenError::type_error(
                    &leaf.path,
                    TypeError::incomplete(&leaf.path, ty.kind.yang_name(), "member types"),
                ));
            }
            [only] => only.mapped.clone(),
            [first, ..] => {
                let natives: Vec<String> = union_types.keys().cloned().collect();
                let name = self.unions.register(
                    leaf,
                    &natives,
                    self.config.union_representation,
                    names,
                )?;
                MappedType {
                    zero_value: format!(
                        "{name}::{}({})",
                        variant_name(&first.mapped.native_type),
                        first.mapped.zero_value
                    ),
                    native_type: name,
                    default_value: None,
                    is_enumerated: false,
                    union_types,
                }
            }
        };

        Ok(ResolvedType {
            mapped,
            subtypes,
            flattened,
        })
    }

    /// Appends the subtypes of `ty` to `out`. `origin` is the leaf whose
    /// position names any enumeration met; it differs from `root` once a
    /// leafref has been followed.
    #[allow(clippy::too_many_arguments)]
    fn flatten(
        &mut self,
        root: &SchemaNode,
        origin: &SchemaNode,
        ty: &YangType,
        names: &mut NameResolver<'_>,
        visited: &mut HashSet<String>,
        depth: usize,
        out: &mut Vec<Subtype>,
    ) -> Result<(), CodegenError> {
        if depth > MAX_RESOLVE_DEPTH {
            return Err(CodegenError::type_error(
                &root.path,
                TypeError::DepthExceeded {
                    leaf: root.path.clone(),
                    depth: MAX_RESOLVE_DEPTH,
                },
            ));
        }

        match ty.kind {
            YangKind::Union => {
                if ty.union_types.is_empty() {
                    return Err(CodegenError::type_error(
                        &root.path,
                        TypeError::incomplete(&origin.path, "union", "member types"),
                    ));
                }
                for member in &ty.union_types {
                    self.flatten(root, origin, member, names, visited, depth + 1, out)?;
                }
            }
            YangKind::Leafref => {
                let target = self
                    .leafref_target(origin, ty)
                    .map_err(|e| CodegenError::type_error(&root.path, e))?;
                if !visited.insert(target.path.clone()) {
                    return Err(CodegenError::type_error(
                        &root.path,
                        TypeError::CyclicReference {
                            path: target.path.clone(),
                        },
                    ));
                }
                let target_type =
                    target
                        .yang_type
                        .as_ref()
                        .ok_or_else(|| SchemaError::MissingLeafType {
                            path: target.path.clone(),
                        })?;
                let result = self.flatten(root, target, target_type, names, visited, depth + 1, out);
                visited.remove(&target.path);
                result?;
            }
            _ => out.push(Subtype {
                mapped: self.map_scalar(origin, ty, names)?,
                yang_type: ty.clone(),
            }),
        }
        Ok(())
    }

    /// Maps a type that is neither a union nor a leafref.
    fn map_scalar(
        &mut self,
        origin: &SchemaNode,
        ty: &YangType,
        names: &mut NameResolver<'_>,
    ) -> Result<MappedType, CodegenError> {
        if let Some((native, zero)) = builtin_native(ty.kind) {
            return Ok(MappedType::new(native, zero));
        }
        match ty.kind {
            YangKind::Enumeration => {
                let name = self
                    .enums
                    .register_enumeration(origin, ty, names, self.config)?;
                Ok(MappedType::enumerated(&name))
            }
            YangKind::Identityref => {
                let name = self.enums.register_identity(origin, ty, names)?;
                Ok(MappedType::enumerated(&name))
            }
            _ => {
                tracing::warn!(
                    "No typed mapping for {} leaf {}, using Untyped",
                    ty.kind.yang_name(),
                    origin.path
                );
                Ok(MappedType::new("Untyped", "Untyped::default()"))
            }
        }
    }

    /// Finds the leaf a leafref points at.
    ///
    /// Predicates and module prefixes are ignored, and choice and case nodes
    /// are looked through. Absolute paths search the origin's module first.
    fn leafref_target(&self, origin: &SchemaNode, ty: &YangType) -> Result<&'a SchemaNode, TypeError> {
        let tree: &'a SchemaTree = self.tree;
        let path = ty
            .path
            .as_deref()
            .ok_or_else(|| TypeError::incomplete(&origin.path, "leafref", "path"))?;
        let not_found = || TypeError::LeafrefTarget {
            leaf: origin.path.clone(),
            target: path.to_string(),
        };

        let stripped = strip_predicates(path);
        let mut segments = stripped
            .split('/')
            .filter(|s| !s.is_empty())
            .map(strip_prefix);

        let mut current: &'a SchemaNode = if stripped.starts_with('/') {
            let first = segments.next().ok_or_else(not_found)?;
            let own_module = tree.node(&format!("/{}", origin.module));
            own_module
                .into_iter()
                .chain(tree.modules())
                .find_map(|module| tree.data_child(module, first))
                .ok_or_else(not_found)?
        } else {
            tree.node(&origin.path).ok_or_else(not_found)?
        };

        for segment in segments {
            current = match segment {
                ".." => tree.data_parent(current).ok_or_else(not_found)?,
                "." | "current()" => current,
                name => tree.data_child(current, name).ok_or_else(not_found)?,
            };
        }

        if current.is_leaf_like() {
            Ok(current)
        } else {
            Err(not_found())
        }
    }
}

/// Returns the native type and zero value of a built-in kind with a fixed
/// mapping.
#[must_use]
pub fn builtin_native(kind: YangKind) -> Option<(&'static str, &'static str)> {
    Some(match kind {
        YangKind::Int8 => ("i8", "0"),
        YangKind::Int16 => ("i16", "0"),
        YangKind::Int32 => ("i32", "0"),
        YangKind::Int64 => ("i64", "0"),
        YangKind::Uint8 => ("u8", "0"),
        YangKind::Uint16 => ("u16", "0"),
        YangKind::Uint32 => ("u32", "0"),
        YangKind::Uint64 => ("u64", "0"),
        YangKind::Boolean => ("bool", "false"),
        YangKind::String => ("String", "String::new()"),
        YangKind::Decimal64 => ("f64", "0.0"),
        YangKind::Empty => ("YangEmpty", "YangEmpty(false)"),
        YangKind::Binary => ("Binary", "Binary::default()"),
        _ => return None,
    })
}

fn strip_predicates(path: &str) -> String {
    let mut out = String::with_capacity(path.len());
    let mut depth = 0usize;
    for c in path.chars() {
        match c {
            '[' => depth += 1,
            ']' => depth = depth.saturating_sub(1),
            _ if depth == 0 => out.push(c),
            _ => {}
        }
    }
    out
}

fn strip_prefix(segment: &str) -> &str {
    segment.rsplit_once(':').map_or(segment, |(_, name)| name)
}

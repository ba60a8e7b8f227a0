//! Catalog of union types.

use crate::config::UnionRepresentation;
use crate::error::CodegenError;
use crate::names::NameResolver;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use ygen_schema::SchemaNode;

/// Native types without `Eq`, `Ord` and `Hash`.
const UNORDERED_NATIVES: &[&str] = &["f64"];

/// Returns the variant name of a union member: `u32` → `U32`,
/// `String` → `String`.
#[must_use]
pub fn variant_name(native: &str) -> String {
    let mut chars = native.chars();
    match chars.next() {
        Some(first) => {
            let mut out = String::with_capacity(native.len());
            out.push(first.to_ascii_uppercase());
            out.push_str(chars.as_str());
            out
        }
        None => String::new(),
    }
}

/// One variant of a union type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnionVariant {
    /// Variant name.
    pub name: String,
    /// Wrapped native type.
    pub native_type: String,
}

/// A union type with one variant per distinct subtype.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnionType {
    /// Generated type name.
    pub name: String,
    /// Variants in first-seen order.
    pub variants: Vec<UnionVariant>,
}

impl UnionType {
    /// Returns true if every variant supports `Eq`, `Ord` and `Hash`.
    #[must_use]
    pub fn is_ordered(&self) -> bool {
        self.variants
            .iter()
            .all(|v| !UNORDERED_NATIVES.contains(&v.native_type.as_str()))
    }
}

/// Run-scoped catalog of union types.
#[derive(Debug, Default)]
pub struct UnionCatalog {
    types: BTreeMap<String, UnionType>,
    shared: HashMap<Vec<String>, String>,
}

impl UnionCatalog {
    /// Creates an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the union of `leaf` over the deduplicated `natives` and
    /// returns its name.
    ///
    /// # Errors
    /// Returns [`CodegenError::NamingConflict`] if no name is free.
    pub fn register(
        &mut self,
        leaf: &SchemaNode,
        natives: &[String],
        representation: UnionRepresentation,
        names: &mut NameResolver<'_>,
    ) -> Result<String, CodegenError> {
        let base = match representation {
            UnionRepresentation::Wrapper => format!("{}_Union", names.leaf_base_name(leaf)),
            UnionRepresentation::Simplified => {
                if let Some(name) = self.shared.get(natives) {
                    return Ok(name.clone());
                }
                let suffix: String = natives
                    .iter()
                    .map(|n| variant_name(n).replace('_', ""))
                    .collect();
                format!("Union{suffix}")
            }
        };

        let name = names.reserve_type(&base)?;
        let variants = natives
            .iter()
            .map(|native| UnionVariant {
                name: variant_name(native),
                native_type: native.clone(),
            })
            .collect();
        self.types.insert(
            name.clone(),
            UnionType {
                name: name.clone(),
                variants,
            },
        );
        if representation == UnionRepresentation::Simplified {
            self.shared.insert(natives.to_vec(), name.clone());
        }
        tracing::debug!("Registered union {} for {}", name, leaf.path);
        Ok(name)
    }

    /// Looks up a union by generated name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&UnionType> {
        self.types.get(name)
    }

    /// Returns the unions in name order.
    pub fn iter(&self) -> impl Iterator<Item = &UnionType> {
        self.types.values()
    }

    /// Returns the number of unions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Returns true if no union was registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

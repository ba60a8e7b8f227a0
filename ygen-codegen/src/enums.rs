//! Catalog of enumerated types.
//!
//! Enumerations, enumeration typedefs and identityrefs all become enumerated
//! types. Index 0 of every type is the synthetic `Unset` member; schema
//! values follow from index 1 in schema order.

use crate::config::{GeneratorConfig, TypedefEnumNaming};
use crate::error::{CodegenError, TypeError};
use crate::names::{NameResolver, NameSet, to_camel_case, to_variant_case};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use ygen_schema::{SchemaNode, YangType};

/// Variant name of the unset sentinel.
pub const UNSET_VARIANT: &str = "Unset";

/// Where an enumerated type comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EnumOrigin {
    /// An inline `enumeration` leaf.
    Enumeration,
    /// An enumeration typedef.
    Typedef,
    /// The identities derived from a base identity.
    Identity,
}

/// One member of an enumerated type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnumMember {
    /// Discriminant; 0 only for the unset sentinel.
    pub index: i64,
    /// Rust variant name.
    pub variant: String,
    /// YANG value or identity name.
    pub yang_name: String,
    /// Module defining the value.
    pub module: String,
    /// Explicit YANG `value` statement, if any.
    pub yang_value: Option<i64>,
}

/// An enumerated type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnumeratedType {
    /// Generated type name.
    pub name: String,
    /// Origin of the type.
    pub origin: EnumOrigin,
    /// Leaf, typedef or base identity the type was derived from.
    pub yang_name: String,
    /// Members; index 0 is the unset sentinel.
    pub members: Vec<EnumMember>,
}

impl EnumeratedType {
    fn new(name: String, origin: EnumOrigin, yang_name: impl Into<String>) -> Self {
        Self {
            name,
            origin,
            yang_name: yang_name.into(),
            members: vec![EnumMember {
                index: 0,
                variant: UNSET_VARIANT.to_string(),
                yang_name: "UNSET".to_string(),
                module: String::new(),
                yang_value: None,
            }],
        }
    }

    fn push(
        &mut self,
        variants: &mut NameSet,
        yang_name: &str,
        module: &str,
        yang_value: Option<i64>,
    ) -> Result<(), CodegenError> {
        let mut base = to_variant_case(yang_name);
        if base.is_empty() {
            base = "Value".to_string();
        }
        let variant = variants.reserve(&base)?;
        let index = i64::try_from(self.members.len())
            .map_err(|_| CodegenError::generation(format!("too many values in {}", self.name)))?;
        self.members.push(EnumMember {
            index,
            variant,
            yang_name: yang_name.to_string(),
            module: module.to_string(),
            yang_value,
        });
        Ok(())
    }

    /// Returns the schema values, without the unset sentinel.
    #[must_use]
    pub fn values(&self) -> &[EnumMember] {
        self.members.get(1..).unwrap_or_default()
    }

    /// Returns the variant of the schema value `yang_name`.
    #[must_use]
    pub fn variant_for(&self, yang_name: &str) -> Option<&str> {
        self.values()
            .iter()
            .find(|m| m.yang_name == yang_name)
            .map(|m| m.variant.as_str())
    }
}

/// Deduplication key of an enumerated type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum EnumKey {
    Position(String),
    Values { module: String, values: Vec<String> },
    Typedef { module: String, name: String },
    Identity { module: String, name: String },
}

/// Run-scoped catalog of enumerated types.
#[derive(Debug, Default)]
pub struct EnumCatalog {
    types: BTreeMap<String, EnumeratedType>,
    keys: HashMap<EnumKey, String>,
}

impl EnumCatalog {
    /// Creates an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the enumeration type of `leaf` and returns its name.
    ///
    /// Typedef enumerations are named after the typedef. Inline ones are
    /// named after the leaf position, and shared between leaves with the
    /// same module and value names when deduplication is on.
    ///
    /// # Errors
    /// Returns an error if the type has no values or no name is free.
    pub fn register_enumeration(
        &mut self,
        leaf: &SchemaNode,
        ty: &YangType,
        names: &mut NameResolver<'_>,
        config: &GeneratorConfig,
    ) -> Result<String, CodegenError> {
        if ty.enum_values.is_empty() {
            return Err(CodegenError::type_error(
                &leaf.path,
                TypeError::incomplete(&leaf.path, "enumeration", "enum values"),
            ));
        }

        let (key, base, origin, yang_name) = if ty.is_typedef() {
            let module = match config.typedef_enum_naming {
                TypedefEnumNaming::DefiningModule => ty.module.as_deref().unwrap_or(&leaf.module),
                TypedefEnumNaming::LeafModule => leaf.module.as_str(),
            };
            let base = format!("E_{}_{}", to_camel_case(module), to_camel_case(&ty.name));
            let key = EnumKey::Typedef {
                module: module.to_string(),
                name: ty.name.clone(),
            };
            (key, base, EnumOrigin::Typedef, ty.name.as_str())
        } else {
            let key = if config.dedup_enums {
                EnumKey::Values {
                    module: leaf.module.clone(),
                    values: ty.enum_values.iter().map(|v| v.name.clone()).collect(),
                }
            } else {
                EnumKey::Position(leaf.path.clone())
            };
            let prefix = if config.compress_paths && !config.shorten_enum_leaf_names {
                format!("{}_", to_camel_case(&leaf.module))
            } else {
                String::new()
            };
            let base = format!("E_{prefix}{}", names.leaf_base_name(leaf));
            (key, base, EnumOrigin::Enumeration, leaf.name.as_str())
        };

        if let Some(name) = self.keys.get(&key) {
            return Ok(name.clone());
        }

        let name = names.reserve_type(&base)?;
        let mut enumerated = EnumeratedType::new(name.clone(), origin, yang_name);
        let mut variants = NameSet::new();
        variants.reserve(UNSET_VARIANT)?;
        let module = ty.module.as_deref().unwrap_or(&leaf.module);
        for value in &ty.enum_values {
            enumerated.push(&mut variants, &value.name, module, value.value)?;
        }

        tracing::debug!("Registered enumeration {} for {}", name, leaf.path);
        self.keys.insert(key, name.clone());
        self.types.insert(name.clone(), enumerated);
        Ok(name)
    }

    /// Registers the identityref type of `leaf` and returns its name, which
    /// derives from the base identity.
    ///
    /// # Errors
    /// Returns an error if the type names no base identity or no name is
    /// free.
    pub fn register_identity(
        &mut self,
        leaf: &SchemaNode,
        ty: &YangType,
        names: &mut NameResolver<'_>,
    ) -> Result<String, CodegenError> {
        let identity = ty.identity.as_ref().ok_or_else(|| {
            CodegenError::type_error(
                &leaf.path,
                TypeError::incomplete(&leaf.path, "identityref", "base identity"),
            )
        })?;
        let key = EnumKey::Identity {
            module: identity.module.clone(),
            name: identity.name.clone(),
        };
        if let Some(name) = self.keys.get(&key) {
            return Ok(name.clone());
        }

        let base = format!(
            "E_{}_{}",
            to_camel_case(&identity.module),
            to_camel_case(&identity.name)
        );
        let name = names.reserve_type(&base)?;
        let mut enumerated = EnumeratedType::new(name.clone(), EnumOrigin::Identity, &identity.name);
        let mut variants = NameSet::new();
        variants.reserve(UNSET_VARIANT)?;
        for value in &identity.values {
            enumerated.push(&mut variants, &value.name, &value.module, None)?;
        }

        tracing::debug!("Registered identity {} for {}", name, leaf.path);
        self.keys.insert(key, name.clone());
        self.types.insert(name.clone(), enumerated);
        Ok(name)
    }

    /// Looks up a type by generated name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&EnumeratedType> {
        self.types.get(name)
    }

    /// Returns the types in name order.
    pub fn iter(&self) -> impl Iterator<Item = &EnumeratedType> {
        self.types.values()
    }

    /// Returns the number of types.
    #[must_use]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Returns true if no type was registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

//! List storage planning.
//!
//! Every keyed list directory gets a [`ListPlan`]: its keys with their
//! mapped types, the Rust key type, and the collection holding the entries
//! in the parent struct.

use crate::config::GeneratorConfig;
use crate::error::CodegenError;
use crate::names::NameResolver;
use crate::types::{MappedType, ResolvedType};
use std::collections::HashMap;
use ygen_schema::{Directory, SchemaError};

/// Native types that cannot key a map.
const UNKEYABLE_NATIVES: &[&str] = &["f64"];

/// One key of a list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListKey {
    /// Schema key name.
    pub name: String,
    /// Field identifier of the key in the list struct.
    pub field_name: String,
    /// Mapped type of the key leaf.
    pub mapped: MappedType,
}

/// Collection holding the entries of a list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListStorage {
    /// `OrderedMap<Key, Child>`, for `ordered-by user` lists.
    OrderedMap,
    /// `BTreeMap<Key, Child>`.
    Map,
    /// `Vec<Child>`, for keyless lists and keys without a total order.
    Vec,
}

/// Storage plan of one list directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListPlan {
    /// Keys in schema order.
    pub keys: Vec<ListKey>,
    /// Rust key type; `None` for `Vec` storage.
    pub key_type: Option<String>,
    /// Name of the generated key struct of a multi-key list.
    pub key_struct: Option<String>,
    /// Entry collection.
    pub storage: ListStorage,
}

impl ListPlan {
    /// Returns the Rust type of the parent field holding entries of `child`.
    #[must_use]
    pub fn field_type(&self, child: &str) -> String {
        match (self.storage, &self.key_type) {
            (ListStorage::OrderedMap, Some(key)) => format!("OrderedMap<{key}, {child}>"),
            (ListStorage::Map, Some(key)) => format!("BTreeMap<{key}, {child}>"),
            _ => format!("Vec<{child}>"),
        }
    }

    /// Returns true if entries are addressed by key.
    #[must_use]
    pub fn is_keyed(&self) -> bool {
        self.storage != ListStorage::Vec
    }
}

/// Plans the storage of a list directory.
///
/// `resolved` maps leaf schema paths to their resolved types.
///
/// # Errors
/// Returns an error if a key is not a field of the list, its type was not
/// resolved, or the key struct name is taken.
pub fn plan_list(
    dir: &Directory,
    resolved: &HashMap<String, ResolvedType>,
    names: &mut NameResolver<'_>,
    config: &GeneratorConfig,
) -> Result<ListPlan, CodegenError> {
    let keys = list_keys(dir, resolved, names)?;

    let storage = if keys.is_empty() || keys.iter().any(|k| is_unkeyable(&k.mapped)) {
        ListStorage::Vec
    } else if dir.ordered_by_user && config.generate_ordered_maps {
        ListStorage::OrderedMap
    } else {
        ListStorage::Map
    };

    let (key_type, key_struct) = match (storage, keys.as_slice()) {
        (ListStorage::Vec, _) | (_, []) => (None, None),
        (_, [only]) => (Some(only.mapped.native_type.clone()), None),
        (_, _) => {
            let struct_name = names.directory_name(&dir.path).ok_or_else(|| {
                CodegenError::generation(format!("list {} has no generated name", dir.path))
            })?;
            let key_struct = names.reserve_type(&format!("{struct_name}_Key"))?;
            (Some(key_struct.clone()), Some(key_struct))
        }
    };

    tracing::debug!("Planned {:?} storage for list {}", storage, dir.path);
    Ok(ListPlan {
        keys,
        key_type,
        key_struct,
        storage,
    })
}

fn list_keys(
    dir: &Directory,
    resolved: &HashMap<String, ResolvedType>,
    names: &NameResolver<'_>,
) -> Result<Vec<ListKey>, CodegenError> {
    dir.list_keys
        .iter()
        .map(|key| {
            let field = dir.fields.get(key).ok_or_else(|| SchemaError::UnknownKey {
                directory: dir.path.clone(),
                key: key.clone(),
            })?;
            let mapped = resolved
                .get(&field.node)
                .map(|r| r.mapped.clone())
                .ok_or_else(|| {
                    CodegenError::generation(format!("key {key} of {} is unresolved", dir.path))
                })?;
            let field_name = names
                .field_ident(&dir.path, key)
                .ok_or_else(|| {
                    CodegenError::generation(format!("key {key} of {} has no field name", dir.path))
                })?
                .to_string();
            Ok(ListKey {
                name: key.clone(),
                field_name,
                mapped,
            })
        })
        .collect()
}

fn is_unkeyable(mapped: &MappedType) -> bool {
    UNKEYABLE_NATIVES.iter().any(|native| mapped.contains(native))
}

/// Returns the paths of the lists keyed by `Binary`, directly or through a
/// union, in path order.
#[must_use]
pub fn find_binary_keys<'d>(
    dirs: impl IntoIterator<Item = &'d Directory>,
    resolved: &HashMap<String, ResolvedType>,
) -> Vec<String> {
    let mut paths: Vec<String> = dirs
        .into_iter()
        .filter(|dir| dir.is_list())
        .filter(|dir| {
            dir.list_keys.iter().any(|key| {
                dir.fields
                    .get(key)
                    .and_then(|field| resolved.get(&field.node))
                    .is_some_and(|r| r.mapped.contains("Binary"))
            })
        })
        .map(|dir| dir.path.clone())
        .collect();
    paths.sort();
    paths
}

//! IR consistency checks.
//!
//! These checks only guard against a corrupt IR (dangling paths, fields or
//! keys). They do not validate YANG semantics; that belongs to the front end.

use crate::error::SchemaError;
use crate::ir::{Directory, FieldKind, NodeKind, SchemaTree};

/// Validates that every path, field and key the IR references exists.
///
/// # Errors
/// Returns the first inconsistency found, in directory path order.
pub fn validate_tree(tree: &SchemaTree) -> Result<(), SchemaError> {
    validate_nodes(tree)?;
    for dir in tree.directories.values() {
        validate_directory(tree, dir)?;
    }
    Ok(())
}

/// Validates parent links and leaf types in the node arena.
fn validate_nodes(tree: &SchemaTree) -> Result<(), SchemaError> {
    for (path, node) in &tree.nodes {
        if *path != node.path {
            return Err(SchemaError::validation(format!(
                "node keyed '{}' carries path '{}'",
                path, node.path
            )));
        }

        if let Some(parent) = &node.parent {
            let Some(parent_node) = tree.node(parent) else {
                return Err(SchemaError::UnknownParent {
                    path: path.clone(),
                    parent: parent.clone(),
                });
            };
            if !parent_node.children.contains(&node.name) {
                return Err(SchemaError::validation(format!(
                    "'{}' does not list '{}' as a child",
                    parent, node.name
                )));
            }
        }

        if node.is_leaf_like() && node.yang_type.is_none() {
            return Err(SchemaError::MissingLeafType { path: path.clone() });
        }
    }
    Ok(())
}

/// Validates one directory's node, fields and keys.
fn validate_directory(tree: &SchemaTree, dir: &Directory) -> Result<(), SchemaError> {
    let node = tree
        .node(&dir.path)
        .ok_or_else(|| SchemaError::unknown_node(&dir.path))?;
    if !matches!(
        node.kind,
        NodeKind::Container | NodeKind::List | NodeKind::Fakeroot
    ) || node.kind != dir.kind
    {
        return Err(SchemaError::validation(format!(
            "directory '{}' maps a {} node as a {}",
            dir.path,
            node.kind.keyword(),
            dir.kind.keyword()
        )));
    }

    for (name, field) in &dir.fields {
        let field_node = tree
            .node(&field.node)
            .ok_or_else(|| SchemaError::unknown_node(&field.node))?;
        if FieldKind::from_node_kind(field_node.kind) != Some(field.kind) {
            return Err(SchemaError::FieldKindMismatch {
                directory: dir.path.clone(),
                field: name.clone(),
                node: field.node.clone(),
                declared: field.kind.keyword().to_string(),
                actual: field_node.kind.keyword().to_string(),
            });
        }
        if matches!(field.kind, FieldKind::Container | FieldKind::List)
            && tree.directory(&field.node).is_none()
        {
            return Err(SchemaError::unknown_directory(&field.node, &dir.path));
        }
        if field.paths.is_empty() {
            return Err(SchemaError::validation(format!(
                "field '{}' in '{}' has no schema path",
                name, dir.path
            )));
        }
    }

    if !dir.list_keys.is_empty() && !dir.is_list() {
        return Err(SchemaError::validation(format!(
            "'{}' declares keys but is not a list",
            dir.path
        )));
    }
    for key in &dir.list_keys {
        let is_leaf = dir
            .fields
            .get(key)
            .is_some_and(|f| f.kind == FieldKind::Leaf);
        if !is_leaf {
            return Err(SchemaError::UnknownKey {
                directory: dir.path.clone(),
                key: key.clone(),
            });
        }
    }

    Ok(())
}

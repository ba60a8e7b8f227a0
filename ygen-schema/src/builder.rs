//! Programmatic construction of a [`SchemaTree`].
//!
//! Front ends that do not go through JSON, and tests, assemble the IR with a
//! [`SchemaTreeBuilder`]. Nodes are addressed by their full path; a new
//! node's path is its parent's path plus `/name`, and it inherits the
//! parent's module.

use crate::error::SchemaError;
use crate::ir::{Directory, Field, FieldKind, NodeKind, SchemaNode, SchemaTree};
use crate::types::YangType;
use crate::validation::validate_tree;

/// Builder for a [`SchemaTree`].
#[derive(Debug, Default)]
pub struct SchemaTreeBuilder {
    tree: SchemaTree,
    errors: Vec<SchemaError>,
}

impl SchemaTreeBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a module root at `/name`.
    pub fn module(&mut self, name: &str) -> &mut Self {
        let path = format!("/{name}");
        self.insert(SchemaNode::new(name, NodeKind::Module, path, None, name));
        self
    }

    /// Adds the fakeroot node at `/name` together with its directory.
    pub fn fakeroot(&mut self, name: &str) -> &mut Self {
        let path = format!("/{name}");
        self.insert(SchemaNode::new(name, NodeKind::Fakeroot, path.clone(), None, ""));
        self.tree
            .directories
            .insert(path.clone(), Directory::new(name, path, NodeKind::Fakeroot));
        self
    }

    /// Adds a container under `parent`.
    pub fn container(&mut self, parent: &str, name: &str) -> &mut Self {
        self.child(parent, name, NodeKind::Container, None)
    }

    /// Adds a list under `parent`.
    pub fn list(&mut self, parent: &str, name: &str) -> &mut Self {
        self.child(parent, name, NodeKind::List, None)
    }

    /// Adds a leaf under `parent`.
    pub fn leaf(&mut self, parent: &str, name: &str, yang_type: YangType) -> &mut Self {
        self.child(parent, name, NodeKind::Leaf, Some(yang_type))
    }

    /// Adds a leaf-list under `parent`.
    pub fn leaf_list(&mut self, parent: &str, name: &str, yang_type: YangType) -> &mut Self {
        self.child(parent, name, NodeKind::LeafList, Some(yang_type))
    }

    /// Adds a choice under `parent`.
    pub fn choice(&mut self, parent: &str, name: &str) -> &mut Self {
        self.child(parent, name, NodeKind::Choice, None)
    }

    /// Adds a case under `parent`.
    pub fn case(&mut self, parent: &str, name: &str) -> &mut Self {
        self.child(parent, name, NodeKind::Case, None)
    }

    /// Sets the instance default of the leaf at `path`.
    pub fn leaf_default(&mut self, path: &str, value: &str) -> &mut Self {
        match self.tree.nodes.get_mut(path) {
            Some(node) => node.default = Some(value.to_string()),
            None => self.errors.push(SchemaError::unknown_node(path)),
        }
        self
    }

    /// Overrides the module of the node at `path`, e.g. for augmented nodes.
    pub fn module_of(&mut self, path: &str, module: &str) -> &mut Self {
        match self.tree.nodes.get_mut(path) {
            Some(node) => node.module = module.to_string(),
            None => self.errors.push(SchemaError::unknown_node(path)),
        }
        self
    }

    /// Declares a directory for the container or list at `path`.
    pub fn directory(&mut self, path: &str) -> &mut Self {
        match self.tree.nodes.get(path) {
            Some(node) => {
                let dir = Directory::new(node.name.clone(), path, node.kind);
                self.tree.directories.insert(path.to_string(), dir);
            }
            None => self.errors.push(SchemaError::unknown_node(path)),
        }
        self
    }

    /// Sets the ordered list keys of the directory at `path`.
    pub fn keys(&mut self, path: &str, keys: &[&str]) -> &mut Self {
        match self.tree.directories.get_mut(path) {
            Some(dir) => dir.list_keys = keys.iter().map(|k| (*k).to_string()).collect(),
            None => self.errors.push(SchemaError::unknown_directory(path, "keys")),
        }
        self
    }

    /// Marks the list directory at `path` as `ordered-by user`.
    pub fn ordered_by_user(&mut self, path: &str) -> &mut Self {
        match self.tree.directories.get_mut(path) {
            Some(dir) => dir.ordered_by_user = true,
            None => self
                .errors
                .push(SchemaError::unknown_directory(path, "ordered-by")),
        }
        self
    }

    /// Adds the node at `node` as a field of the directory at `directory`,
    /// reachable through the given schema-relative `paths`.
    pub fn field(&mut self, directory: &str, node: &str, paths: &[&str]) -> &mut Self {
        let Some(schema_node) = self.tree.nodes.get(node) else {
            self.errors.push(SchemaError::unknown_node(node));
            return self;
        };
        let Some(kind) = FieldKind::from_node_kind(schema_node.kind) else {
            self.errors.push(SchemaError::validation(format!(
                "{} node '{}' cannot be a field",
                schema_node.kind.keyword(),
                node
            )));
            return self;
        };
        let field = Field {
            name: schema_node.name.clone(),
            kind,
            node: node.to_string(),
            paths: paths.iter().map(|p| (*p).to_string()).collect(),
        };
        match self.tree.directories.get_mut(directory) {
            Some(dir) => {
                dir.fields.insert(field.name.clone(), field);
            }
            None => self
                .errors
                .push(SchemaError::unknown_directory(directory, node)),
        }
        self
    }

    /// Finishes the tree and validates it.
    ///
    /// # Errors
    /// Returns the first recorded builder error, or the first inconsistency
    /// found by [`validate_tree`].
    pub fn build(self) -> Result<SchemaTree, SchemaError> {
        if let Some(err) = self.errors.into_iter().next() {
            return Err(err);
        }
        validate_tree(&self.tree)?;
        Ok(self.tree)
    }

    /// Finishes the tree without validation.
    #[must_use]
    pub fn build_unchecked(self) -> SchemaTree {
        self.tree
    }

    fn child(
        &mut self,
        parent: &str,
        name: &str,
        kind: NodeKind,
        yang_type: Option<YangType>,
    ) -> &mut Self {
        let path = format!("{parent}/{name}");
        let Some(parent_node) = self.tree.nodes.get_mut(parent) else {
            self.errors.push(SchemaError::UnknownParent {
                path,
                parent: parent.to_string(),
            });
            return self;
        };
        parent_node.children.push(name.to_string());
        let module = parent_node.module.clone();

        let mut node = SchemaNode::new(name, kind, path, Some(parent.to_string()), module);
        node.yang_type = yang_type;
        self.insert(node);
        self
    }

    fn insert(&mut self, node: SchemaNode) {
        if self.tree.nodes.contains_key(&node.path) {
            self.errors.push(SchemaError::DuplicateNode { path: node.path });
            return;
        }
        self.tree.nodes.insert(node.path.clone(), node);
    }
}

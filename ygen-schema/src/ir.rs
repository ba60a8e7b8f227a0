//! Schema IR consumed by the code generator.
//!
//! The IR has two layers:
//! - an arena of [`SchemaNode`]s keyed by full schema path (`/module/a/b`),
//!   linked by parent path and ordered child names rather than pointers;
//! - [`Directory`] entries, one per generated struct, keyed by the path of
//!   the node they map. Their [`Field`]s may hoist nodes from elided wrapper
//!   containers and record every schema-relative route to them.
//!
//! The IR is immutable once built; generation never mutates it.

use crate::types::YangType;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Kind of a schema node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NodeKind {
    /// Module root.
    Module,
    /// Container.
    Container,
    /// List.
    List,
    /// Leaf.
    Leaf,
    /// Leaf-list.
    LeafList,
    /// Choice (not a data node).
    Choice,
    /// Case (not a data node).
    Case,
    /// Synthetic root above every module.
    Fakeroot,
}

impl NodeKind {
    /// Returns true for choice and case nodes.
    #[must_use]
    pub const fn is_choice_or_case(&self) -> bool {
        matches!(self, Self::Choice | Self::Case)
    }

    /// Returns the YANG keyword for the kind.
    #[must_use]
    pub const fn keyword(&self) -> &'static str {
        match self {
            Self::Module => "module",
            Self::Container => "container",
            Self::List => "list",
            Self::Leaf => "leaf",
            Self::LeafList => "leaf-list",
            Self::Choice => "choice",
            Self::Case => "case",
            Self::Fakeroot => "fakeroot",
        }
    }
}

/// One node of the schema arena.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaNode {
    /// YANG identifier.
    pub name: String,
    /// Node kind.
    pub kind: NodeKind,
    /// Full schema path, including choice and case nodes.
    pub path: String,
    /// Parent path, `None` for module roots and the fakeroot.
    #[serde(default)]
    pub parent: Option<String>,
    /// Child names in schema order.
    #[serde(default)]
    pub children: Vec<String>,
    /// Module the node belongs to.
    pub module: String,
    /// Type of a leaf or leaf-list.
    #[serde(default)]
    pub yang_type: Option<YangType>,
    /// Instance `default` statement.
    #[serde(default)]
    pub default: Option<String>,
}

impl SchemaNode {
    /// Creates a node without type information.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        kind: NodeKind,
        path: impl Into<String>,
        parent: Option<String>,
        module: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            kind,
            path: path.into(),
            parent,
            children: Vec::new(),
            module: module.into(),
            yang_type: None,
            default: None,
        }
    }

    /// Returns true for leaf and leaf-list nodes.
    #[must_use]
    pub const fn is_leaf_like(&self) -> bool {
        matches!(self.kind, NodeKind::Leaf | NodeKind::LeafList)
    }
}

/// Kind of a directory field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FieldKind {
    /// Child container.
    Container,
    /// Child list.
    List,
    /// Leaf.
    Leaf,
    /// Leaf-list.
    LeafList,
}

impl FieldKind {
    /// Maps a schema node kind to a field kind.
    #[must_use]
    pub const fn from_node_kind(kind: NodeKind) -> Option<Self> {
        match kind {
            NodeKind::Container => Some(Self::Container),
            NodeKind::List => Some(Self::List),
            NodeKind::Leaf => Some(Self::Leaf),
            NodeKind::LeafList => Some(Self::LeafList),
            _ => None,
        }
    }

    /// Returns true for leaves and leaf-lists.
    #[must_use]
    pub const fn is_leaf_like(&self) -> bool {
        matches!(self, Self::Leaf | Self::LeafList)
    }

    /// Returns the YANG keyword for the kind.
    #[must_use]
    pub const fn keyword(&self) -> &'static str {
        match self {
            Self::Container => "container",
            Self::List => "list",
            Self::Leaf => "leaf",
            Self::LeafList => "leaf-list",
        }
    }
}

/// A named child of a directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    /// YANG identifier of the child.
    pub name: String,
    /// Field kind.
    pub kind: FieldKind,
    /// Arena path of the child node. For containers and lists this is also
    /// the key of the child directory.
    pub node: String,
    /// Schema-relative routes from the parent directory to the node, e.g.
    /// `config/mtu` and `state/mtu`.
    pub paths: Vec<String>,
}

impl Field {
    /// Returns the route with the most segments; the first declared wins ties.
    #[must_use]
    pub fn longest_path(&self) -> Option<&str> {
        let mut best: Option<&str> = None;
        for path in &self.paths {
            let better = best.is_none_or(|b| segment_count(path) > segment_count(b));
            if better {
                best = Some(path);
            }
        }
        best
    }
}

fn segment_count(path: &str) -> usize {
    path.split('/').filter(|s| !s.is_empty()).count()
}

/// A schema subtree mapped to one generated struct.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Directory {
    /// YANG identifier of the node.
    pub name: String,
    /// Arena path of the node.
    pub path: String,
    /// Node kind: container, list or fakeroot.
    pub kind: NodeKind,
    /// Fields keyed by YANG identifier, in schema order.
    #[serde(default)]
    pub fields: IndexMap<String, Field>,
    /// List key names in schema order; empty for containers and keyless lists.
    #[serde(default)]
    pub list_keys: Vec<String>,
    /// True for an `ordered-by user` list.
    #[serde(default)]
    pub ordered_by_user: bool,
}

impl Directory {
    /// Creates an empty directory.
    #[must_use]
    pub fn new(name: impl Into<String>, path: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            kind,
            fields: IndexMap::new(),
            list_keys: Vec::new(),
            ordered_by_user: false,
        }
    }

    /// Returns true if the directory maps a list.
    #[must_use]
    pub fn is_list(&self) -> bool {
        self.kind == NodeKind::List
    }

    /// Returns true if the directory maps a list without keys.
    #[must_use]
    pub fn is_keyless_list(&self) -> bool {
        self.is_list() && self.list_keys.is_empty()
    }

    /// Returns true if the directory is the fakeroot.
    #[must_use]
    pub fn is_fakeroot(&self) -> bool {
        self.kind == NodeKind::Fakeroot
    }
}

/// The complete IR of one generation run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SchemaTree {
    /// Schema nodes keyed by path.
    pub nodes: BTreeMap<String, SchemaNode>,
    /// Directories keyed by path.
    pub directories: BTreeMap<String, Directory>,
}

impl SchemaTree {
    /// Looks up a node by path.
    #[must_use]
    pub fn node(&self, path: &str) -> Option<&SchemaNode> {
        self.nodes.get(path)
    }

    /// Looks up a directory by path.
    #[must_use]
    pub fn directory(&self, path: &str) -> Option<&Directory> {
        self.directories.get(path)
    }

    /// Returns the fakeroot directory, if the front end synthesized one.
    #[must_use]
    pub fn fakeroot(&self) -> Option<&Directory> {
        self.directories.values().find(|d| d.is_fakeroot())
    }

    /// Returns the parent of a node.
    #[must_use]
    pub fn parent(&self, node: &SchemaNode) -> Option<&SchemaNode> {
        node.parent.as_deref().and_then(|p| self.node(p))
    }

    /// Returns the nearest ancestor that is a data node, skipping choice and
    /// case nodes.
    #[must_use]
    pub fn data_parent(&self, node: &SchemaNode) -> Option<&SchemaNode> {
        let mut current = self.parent(node)?;
        while current.kind.is_choice_or_case() {
            current = self.parent(current)?;
        }
        Some(current)
    }

    /// Finds the data child `name` of `node`, looking through choice and case
    /// nodes.
    #[must_use]
    pub fn data_child(&self, node: &SchemaNode, name: &str) -> Option<&SchemaNode> {
        for child_name in &node.children {
            let child_path = format!("{}/{}", node.path, child_name);
            let Some(child) = self.node(&child_path) else {
                continue;
            };
            if child.kind.is_choice_or_case() {
                if let Some(found) = self.data_child(child, name) {
                    return Some(found);
                }
            } else if child.name == name {
                return Some(child);
            }
        }
        None
    }

    /// Returns the data children of `node`, looking through choice and case
    /// nodes.
    #[must_use]
    pub fn data_children(&self, node: &SchemaNode) -> Vec<&SchemaNode> {
        let mut out = Vec::new();
        for child_name in &node.children {
            let child_path = format!("{}/{}", node.path, child_name);
            if let Some(child) = self.node(&child_path) {
                if child.kind.is_choice_or_case() {
                    out.extend(self.data_children(child));
                } else {
                    out.push(child);
                }
            }
        }
        out
    }

    /// Returns the module roots in path order.
    pub fn modules(&self) -> impl Iterator<Item = &SchemaNode> {
        self.nodes.values().filter(|n| n.kind == NodeKind::Module)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::SchemaTreeBuilder;
    use crate::types::{YangKind, YangType};

    #[test]
    fn test_longest_path_prefers_more_segments() {
        let field = Field {
            name: "mtu".to_string(),
            kind: FieldKind::Leaf,
            node: "/m/interfaces/interface/config/mtu".to_string(),
            paths: vec!["mtu".to_string(), "config/mtu".to_string(), "state/mtu".to_string()],
        };
        assert_eq!(field.longest_path(), Some("config/mtu"));
    }

    #[test]
    fn test_data_child_through_choice() {
        let mut builder = SchemaTreeBuilder::new();
        builder
            .module("m")
            .container("/m", "top")
            .choice("/m/top", "transport")
            .case("/m/top/transport", "tcp")
            .leaf("/m/top/transport/tcp", "port", YangType::new(YangKind::Uint16));
        let tree = builder.build_unchecked();

        let top = tree.node("/m/top").unwrap();
        let port = tree.data_child(top, "port").unwrap();
        assert_eq!(port.path, "/m/top/transport/tcp/port");
        assert_eq!(tree.data_parent(port).unwrap().path, "/m/top");
        assert_eq!(tree.data_children(top).len(), 1);
    }

    #[test]
    fn test_keyless_list_detection() {
        let mut dir = Directory::new("entry", "/m/entry", NodeKind::List);
        assert!(dir.is_keyless_list());
        dir.list_keys.push("id".to_string());
        assert!(!dir.is_keyless_list());
        assert!(!Directory::new("c", "/m/c", NodeKind::Container).is_keyless_list());
    }
}

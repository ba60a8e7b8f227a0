//! Name resolution for generated types, fields and path types.
//!
//! Names are a pure function of the IR and the configuration. Directories are
//! named shallowest first and then by path, so collision suffixes (`_2`,
//! `_3`, …) land on the same directory in every run.

use crate::config::GeneratorConfig;
use crate::error::CodegenError;
use indexmap::IndexMap;
use std::collections::{HashMap, HashSet};
use ygen_schema::{Directory, NodeKind, SchemaError, SchemaNode, SchemaTree};

/// Number of numeric suffixes tried before a name is declared conflicting.
pub const MAX_NAME_ATTEMPTS: usize = 100;

const RUST_KEYWORDS: &[&str] = &[
    "abstract", "as", "async", "await", "become", "box", "break", "const", "continue", "crate",
    "do", "dyn", "else", "enum", "extern", "false", "final", "fn", "for", "gen", "if", "impl",
    "in", "let", "loop", "macro", "match", "mod", "move", "mut", "override", "priv", "pub",
    "ref", "return", "self", "Self", "static", "struct", "super", "trait", "true", "try",
    "type", "typeof", "unsafe", "unsized", "use", "virtual", "where", "while", "yield",
];

// Keywords that cannot be raw identifiers.
const NON_RAW_KEYWORDS: &[&str] = &["crate", "self", "Self", "super"];

/// Converts a YANG identifier to CamelCase: `oper-status` → `OperStatus`.
///
/// Non-alphanumeric characters separate words. A leading digit gets a `_`
/// prefix so the result stays a valid identifier.
#[must_use]
pub fn to_camel_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for part in name
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|p| !p.is_empty())
    {
        let mut chars = part.chars();
        if let Some(first) = chars.next() {
            out.push(first.to_ascii_uppercase());
            out.push_str(chars.as_str());
        }
    }
    if out.starts_with(|c: char| c.is_ascii_digit()) {
        out.insert(0, '_');
    }
    out
}

/// Converts a YANG enum value to a variant name: `DOWN` → `Down`,
/// `ethernetCsmacd` → `EthernetCsmacd`.
///
/// Like [`to_camel_case`], except that all-uppercase words are lowercased
/// after their first letter.
#[must_use]
pub fn to_variant_case(name: &str) -> String {
    let words: Vec<String> = name
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|p| !p.is_empty())
        .map(|p| {
            if p.chars().any(|c| c.is_ascii_lowercase()) {
                p.to_string()
            } else {
                p.to_ascii_lowercase()
            }
        })
        .collect();
    to_camel_case(&words.join("-"))
}

/// Converts a YANG identifier to snake_case: `ifIndex` → `if_index`.
#[must_use]
pub fn to_snake_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    let mut prev_lower = false;
    for c in name.chars() {
        if c.is_ascii_uppercase() {
            if prev_lower {
                out.push('_');
            }
            out.push(c.to_ascii_lowercase());
            prev_lower = false;
        } else if c.is_ascii_alphanumeric() {
            out.push(c);
            prev_lower = true;
        } else if !out.is_empty() && !out.ends_with('_') {
            out.push('_');
            prev_lower = false;
        }
    }
    while out.ends_with('_') {
        out.pop();
    }
    if out.is_empty() || out.starts_with(|c: char| c.is_ascii_digit()) {
        out.insert(0, '_');
    }
    out
}

/// Escapes a Rust keyword: `type` → `r#type`, `self` → `self_`.
#[must_use]
pub fn escape_ident(ident: &str) -> String {
    if NON_RAW_KEYWORDS.contains(&ident) {
        format!("{ident}_")
    } else if RUST_KEYWORDS.contains(&ident) {
        format!("r#{ident}")
    } else {
        ident.to_string()
    }
}

/// Strips the raw identifier prefix.
#[must_use]
pub fn strip_raw(ident: &str) -> &str {
    ident.strip_prefix("r#").unwrap_or(ident)
}

/// Builds `prefix` + `ident` + `suffix`, escaping the result again.
#[must_use]
pub fn compose_ident(prefix: &str, ident: &str, suffix: &str) -> String {
    escape_ident(&format!("{prefix}{}{suffix}", strip_raw(ident)))
}

/// Converts a YANG identifier to a field identifier.
#[must_use]
pub fn field_ident(name: &str) -> String {
    escape_ident(&to_snake_case(name))
}

/// A namespace of assigned names with deterministic suffixing.
#[derive(Debug, Clone)]
pub struct NameSet {
    used: HashSet<String>,
    max_attempts: usize,
}

impl Default for NameSet {
    fn default() -> Self {
        Self::with_max_attempts(MAX_NAME_ATTEMPTS)
    }
}

impl NameSet {
    /// Creates an empty namespace.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty namespace trying at most `max_attempts` suffixes.
    #[must_use]
    pub fn with_max_attempts(max_attempts: usize) -> Self {
        Self {
            used: HashSet::new(),
            max_attempts,
        }
    }

    /// Returns true if `name` is taken.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.used.contains(name)
    }

    /// Reserves `base`, or `base_2`, `base_3`, … if it is taken.
    ///
    /// # Errors
    /// Returns [`CodegenError::NamingConflict`] once every suffix is taken.
    pub fn reserve(&mut self, base: &str) -> Result<String, CodegenError> {
        if self.used.insert(base.to_string()) {
            return Ok(base.to_string());
        }
        for suffix in 2..self.max_attempts + 2 {
            let candidate = format!("{base}_{suffix}");
            if self.used.insert(candidate.clone()) {
                return Ok(candidate);
            }
        }
        Err(CodegenError::NamingConflict {
            name: base.to_string(),
            attempts: self.max_attempts,
        })
    }
}

/// Run-scoped name tables.
#[derive(Debug)]
pub struct NameResolver<'a> {
    tree: &'a SchemaTree,
    config: &'a GeneratorConfig,
    types: NameSet,
    path_types: NameSet,
    directories: HashMap<String, String>,
    fields: HashMap<String, IndexMap<String, String>>,
    leaf_paths: HashMap<String, String>,
    owners: HashMap<String, String>,
}

impl<'a> NameResolver<'a> {
    /// Creates the name tables of one run.
    #[must_use]
    pub fn new(tree: &'a SchemaTree, config: &'a GeneratorConfig) -> Self {
        let mut owners = HashMap::new();
        for dir in tree.directories.values() {
            for field in dir.fields.values() {
                owners.insert(field.node.clone(), dir.path.clone());
            }
        }
        Self {
            tree,
            config,
            types: NameSet::new(),
            path_types: NameSet::new(),
            directories: HashMap::new(),
            fields: HashMap::new(),
            leaf_paths: HashMap::new(),
            owners,
        }
    }

    /// Returns the directories shallowest first, then by path.
    #[must_use]
    pub fn ordered_directories(&self) -> Vec<&'a Directory> {
        let tree: &'a SchemaTree = self.tree;
        let mut dirs: Vec<&'a Directory> = tree.directories.values().collect();
        dirs.sort_by(|a, b| {
            depth(&a.path)
                .cmp(&depth(&b.path))
                .then_with(|| a.path.cmp(&b.path))
        });
        dirs
    }

    /// Names every directory, its fields and its leaf path types.
    ///
    /// Returns the directories that could not be named together with the
    /// reason. Their fields are not named.
    pub fn assign(&mut self) -> Vec<(String, CodegenError)> {
        let mut failures = Vec::new();
        let ordered = self.ordered_directories();

        for dir in &ordered {
            let named = self
                .base_directory_name(dir)
                .map_err(CodegenError::from)
                .and_then(|base| self.types.reserve(&base));
            match named {
                Ok(name) => {
                    self.path_types.reserve(&name).ok();
                    self.directories.insert(dir.path.clone(), name);
                }
                Err(err) => failures.push((dir.path.clone(), err)),
            }
        }

        for dir in &ordered {
            let Some(dir_name) = self.directories.get(&dir.path).cloned() else {
                continue;
            };
            let mut set = NameSet::new();
            let mut idents = IndexMap::new();
            for (name, field) in &dir.fields {
                match set.reserve(&to_snake_case(name)) {
                    Ok(ident) => {
                        idents.insert(name.clone(), escape_ident(&ident));
                    }
                    Err(err) => {
                        failures.push((dir.path.clone(), err));
                        continue;
                    }
                }
                if !field.kind.is_leaf_like() {
                    continue;
                }
                let base = if dir.is_fakeroot() {
                    to_camel_case(name)
                } else {
                    format!("{dir_name}_{}", to_camel_case(name))
                };
                match self.path_types.reserve(&base) {
                    Ok(path_name) => {
                        self.leaf_paths.insert(field.node.clone(), path_name);
                    }
                    Err(err) => failures.push((dir.path.clone(), err)),
                }
            }
            self.fields.insert(dir.path.clone(), idents);
        }

        tracing::debug!(
            "Named {} directories and {} leaf path types",
            self.directories.len(),
            self.leaf_paths.len()
        );
        failures
    }

    /// Computes the unsuffixed name of a directory.
    ///
    /// # Errors
    /// Returns [`SchemaError::UnknownNode`] if the directory's node is absent.
    pub fn base_directory_name(&self, dir: &Directory) -> Result<String, SchemaError> {
        if dir.is_fakeroot() {
            return Ok(to_camel_case(&self.config.fakeroot_name));
        }
        let node = self
            .tree
            .node(&dir.path)
            .ok_or_else(|| SchemaError::unknown_node(&dir.path))?;

        let mut parts = vec![to_camel_case(&node.name)];
        let mut current = node;
        while let Some(parent) = self.tree.parent(current) {
            if self.is_visible(parent) {
                parts.push(to_camel_case(&parent.name));
            }
            current = parent;
        }
        parts.reverse();
        Ok(parts.join("_"))
    }

    /// Returns true if an ancestor contributes to directory names.
    fn is_visible(&self, node: &SchemaNode) -> bool {
        match node.kind {
            NodeKind::Choice | NodeKind::Case | NodeKind::Fakeroot => false,
            NodeKind::Module => !self.config.compress_paths,
            NodeKind::Container => {
                !self.config.compress_paths
                    || !(is_config_or_state(node) || self.surrounds_list(node))
            }
            NodeKind::List | NodeKind::Leaf | NodeKind::LeafList => true,
        }
    }

    fn surrounds_list(&self, node: &SchemaNode) -> bool {
        let children = self.tree.data_children(node);
        matches!(children.as_slice(), [only] if only.kind == NodeKind::List)
    }

    /// Returns the generated name of the directory at `path`.
    #[must_use]
    pub fn directory_name(&self, path: &str) -> Option<&str> {
        self.directories.get(path).map(String::as_str)
    }

    /// Returns the field identifier of `field` in the directory at `dir`.
    #[must_use]
    pub fn field_ident(&self, dir: &str, field: &str) -> Option<&str> {
        self.fields
            .get(dir)
            .and_then(|f| f.get(field))
            .map(String::as_str)
    }

    /// Returns the path type base name of the leaf at `node`.
    #[must_use]
    pub fn leaf_path_name(&self, node: &str) -> Option<&str> {
        self.leaf_paths.get(node).map(String::as_str)
    }

    /// Returns the directory that lists `node` as a field.
    #[must_use]
    pub fn owner(&self, node: &str) -> Option<&'a Directory> {
        let tree: &'a SchemaTree = self.tree;
        self.owners.get(node).and_then(|dir| tree.directory(dir))
    }

    /// Returns the directory holding `node`: its owner, or else the nearest
    /// ancestor that is a directory.
    #[must_use]
    pub fn owning_directory(&self, node: &SchemaNode) -> Option<&'a Directory> {
        if let Some(dir) = self.owner(&node.path) {
            return Some(dir);
        }
        let tree: &'a SchemaTree = self.tree;
        let mut current = tree.parent(node);
        while let Some(parent) = current {
            if let Some(dir) = tree.directory(&parent.path) {
                return Some(dir);
            }
            current = tree.parent(parent);
        }
        None
    }

    /// Returns the unsuffixed name a leaf lends to types derived from it:
    /// `<Directory>_<Leaf>`, or the bare leaf name under the fakeroot.
    #[must_use]
    pub fn leaf_base_name(&self, node: &SchemaNode) -> String {
        let leaf = to_camel_case(&node.name);
        match self.owning_directory(node) {
            Some(dir) if dir.is_fakeroot() => leaf,
            Some(dir) => {
                let dir_name = self
                    .directory_name(&dir.path)
                    .map_or_else(|| to_camel_case(&dir.name), str::to_string);
                format!("{dir_name}_{leaf}")
            }
            None => format!("{}_{leaf}", to_camel_case(&node.module)),
        }
    }

    /// Reserves a name in the type namespace shared by structs, enums,
    /// unions and key structs.
    ///
    /// # Errors
    /// Returns [`CodegenError::NamingConflict`] if no suffix is free.
    pub fn reserve_type(&mut self, base: &str) -> Result<String, CodegenError> {
        self.types.reserve(base)
    }
}

fn is_config_or_state(node: &SchemaNode) -> bool {
    node.name == "config" || node.name == "state"
}

fn depth(path: &str) -> usize {
    path.split('/').filter(|s| !s.is_empty()).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::interfaces_tree;

    #[test]
    fn test_camel_case() {
        assert_eq!(to_camel_case("oper-status"), "OperStatus");
        assert_eq!(to_camel_case("openconfig-interfaces"), "OpenconfigInterfaces");
        assert_eq!(to_camel_case("ifIndex"), "IfIndex");
        assert_eq!(to_camel_case("10G"), "_10G");
        assert_eq!(to_camel_case("ipv4.address"), "Ipv4Address");
    }

    #[test]
    fn test_variant_case() {
        assert_eq!(to_variant_case("DOWN"), "Down");
        assert_eq!(to_variant_case("LOWER_LAYER_DOWN"), "LowerLayerDown");
        assert_eq!(to_variant_case("ethernetCsmacd"), "EthernetCsmacd");
        assert_eq!(to_variant_case("IPv4"), "IPv4");
    }

    #[test]
    fn test_snake_case_and_keywords() {
        assert_eq!(to_snake_case("oper-status"), "oper_status");
        assert_eq!(to_snake_case("ifIndex"), "if_index");
        assert_eq!(to_snake_case("IPv4"), "ipv4");
        assert_eq!(field_ident("type"), "r#type");
        assert_eq!(field_ident("self"), "self_");
        assert_eq!(field_ident("mtu"), "mtu");
        assert_eq!(compose_ident("with_", "r#type", ""), "with_type");
        assert_eq!(compose_ident("", "r#type", "_any"), "type_any");
    }

    #[test]
    fn test_name_set_suffixes() {
        let mut set = NameSet::new();
        assert_eq!(set.reserve("Interface").unwrap(), "Interface");
        assert_eq!(set.reserve("Interface").unwrap(), "Interface_2");
        assert_eq!(set.reserve("Interface").unwrap(), "Interface_3");
        assert!(set.contains("Interface_2"));
    }

    #[test]
    fn test_name_set_conflict() {
        let mut set = NameSet::with_max_attempts(1);
        set.reserve("A").unwrap();
        set.reserve("A").unwrap();
        let err = set.reserve("A").unwrap_err();
        assert!(matches!(err, CodegenError::NamingConflict { attempts: 1, .. }));
    }

    #[test]
    fn test_compressed_directory_names() {
        let tree = interfaces_tree();
        let config = GeneratorConfig::default();
        let mut names = NameResolver::new(&tree, &config);
        assert!(names.assign().is_empty());

        assert_eq!(names.directory_name("/device"), Some("Device"));
        assert_eq!(
            names.directory_name("/oc-if/interfaces/interface"),
            Some("Interface")
        );
        assert_eq!(
            names.directory_name("/oc-if/interfaces/interface/subinterfaces/subinterface"),
            Some("Interface_Subinterface")
        );
    }

    #[test]
    fn test_uncompressed_directory_names() {
        let tree = interfaces_tree();
        let config = GeneratorConfig::default().compress_paths(false);
        let mut names = NameResolver::new(&tree, &config);
        assert!(names.assign().is_empty());
        assert_eq!(
            names.directory_name("/oc-if/interfaces/interface"),
            Some("OcIf_Interfaces_Interface")
        );
        assert_eq!(
            names.directory_name("/oc-if/interfaces/interface/subinterfaces/subinterface"),
            Some("OcIf_Interfaces_Interface_Subinterfaces_Subinterface")
        );
    }

    #[test]
    fn test_field_and_leaf_path_names() {
        let tree = interfaces_tree();
        let config = GeneratorConfig::default();
        let mut names = NameResolver::new(&tree, &config);
        names.assign();

        let dir = "/oc-if/interfaces/interface";
        assert_eq!(names.field_ident(dir, "type"), Some("r#type"));
        assert_eq!(names.field_ident(dir, "oper-status"), Some("oper_status"));
        assert_eq!(
            names.leaf_path_name("/oc-if/interfaces/interface/config/mtu"),
            Some("Interface_Mtu")
        );
        // Leaves directly under the fakeroot keep their bare name.
        assert_eq!(names.leaf_path_name("/oc-sys/hostname"), Some("Hostname"));
    }

    #[test]
    fn test_leaf_base_name_via_owner() {
        let tree = interfaces_tree();
        let config = GeneratorConfig::default();
        let mut names = NameResolver::new(&tree, &config);
        names.assign();

        let state_name = tree
            .node("/oc-if/interfaces/interface/state/name")
            .unwrap();
        // Not a field anywhere; the nearest directory ancestor names it.
        assert_eq!(names.leaf_base_name(state_name), "Interface_Name");
        let hostname = tree.node("/oc-sys/hostname").unwrap();
        assert_eq!(names.leaf_base_name(hostname), "Hostname");
    }

    #[test]
    fn test_directory_name_collision_is_deterministic() {
        let mut builder = ygen_schema::SchemaTreeBuilder::new();
        builder
            .module("a")
            .module("b")
            .container("/a", "top")
            .container("/b", "top")
            .directory("/a/top")
            .directory("/b/top");
        let tree = builder.build_unchecked();
        let config = GeneratorConfig::default();

        for _ in 0..10 {
            let mut names = NameResolver::new(&tree, &config);
            assert!(names.assign().is_empty());
            assert_eq!(names.directory_name("/a/top"), Some("Top"));
            assert_eq!(names.directory_name("/b/top"), Some("Top_2"));
        }
    }
}

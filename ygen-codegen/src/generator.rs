//! Main code generator.
//!
//! A [`Generator`] run validates the IR, names every directory, resolves leaf
//! types and defaults, plans list storage, and then emits structs, path
//! types, enums and unions. Per-node failures are collected in the result
//! and only withhold the output of the failing directory. Enums and unions
//! are emitted only when an emitted leaf refers to them.

use crate::config::GeneratorConfig;
use crate::defaults::resolve_default;
use crate::error::{CodegenError, ErrorList};
use crate::names::NameResolver;
use crate::ordered::{ListPlan, find_binary_keys, plan_list};
use crate::rust::{
    EmitContext, EnumGenerator, PRELUDE, PathGenerator, StructGenerator, UnionGenerator,
};
use crate::types::{ResolvedType, TypeResolver};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use ygen_schema::{Directory, FieldKind, SchemaError, SchemaTree, validate_tree};

/// Generated output of one directory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodeArtifact {
    /// Generated struct name.
    pub type_name: String,
    /// Schema path of the directory.
    pub schema_path: String,
    /// Struct and key struct declarations.
    pub declaration: String,
    /// Trait impls and helper methods.
    pub methods: String,
    /// Path structs and accessors; empty for unreachable directories.
    pub path_api: String,
}

/// Index entry describing one generated field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeMetadata {
    /// Path struct of the field, if it has a path API.
    pub path_type_name: Option<String>,
    /// Rust type the field holds: a native type or a generated struct.
    pub target_type_name: String,
    /// Field identifier in the parent struct.
    pub field_name: String,
    /// True for leaves and leaf-lists.
    pub is_leaf: bool,
    /// True for leaves whose type is not enumerated.
    pub is_scalar: bool,
    /// True if the leaf has a default value.
    pub has_default: bool,
    /// YANG type name of a leaf.
    pub yang_type_name: Option<String>,
    /// Schema path of the field's node.
    pub schema_path: String,
}

/// Everything one generation run produced.
#[derive(Debug, Default)]
pub struct GeneratedCode {
    /// Directory output keyed by struct name.
    pub nodes: BTreeMap<String, NodeArtifact>,
    /// Enum declarations keyed by name.
    pub enums: BTreeMap<String, String>,
    /// Union declarations keyed by name.
    pub unions: BTreeMap<String, String>,
    /// Field metadata keyed by schema path.
    pub metadata: BTreeMap<String, NodeMetadata>,
    /// Per-node failures.
    pub errors: ErrorList,
}

impl GeneratedCode {
    /// Returns true if any node failed.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Concatenates the generated code in a stable order.
    #[must_use]
    pub fn render(&self) -> String {
        let mut output = String::new();
        output.push_str("// Generated by ygen. Do not edit.\n\n");
        output.push_str(PRELUDE);

        for code in self.enums.values() {
            output.push_str(code);
        }
        for code in self.unions.values() {
            output.push_str(code);
        }
        for node in self.nodes.values() {
            output.push_str(&node.declaration);
            output.push_str(&node.methods);
            output.push_str(&node.path_api);
        }
        output
    }
}

/// Main code generator.
pub struct Generator<'a> {
    tree: &'a SchemaTree,
    config: GeneratorConfig,
}

impl<'a> Generator<'a> {
    /// Creates a generator with the default configuration.
    #[must_use]
    pub fn new(tree: &'a SchemaTree) -> Self {
        Self::with_config(tree, GeneratorConfig::default())
    }

    /// Creates a generator with the given configuration.
    #[must_use]
    pub fn with_config(tree: &'a SchemaTree, config: GeneratorConfig) -> Self {
        Self { tree, config }
    }

    /// Runs the generator.
    ///
    /// # Errors
    /// Returns an error if the IR is inconsistent. Failures confined to one
    /// node are reported in [`GeneratedCode::errors`] instead.
    pub fn generate(&self) -> Result<GeneratedCode, CodegenError> {
        validate_tree(self.tree)?;
        tracing::info!(
            "Generating code for {} directories",
            self.tree.directories.len()
        );

        let mut errors = ErrorList::new();
        let mut withheld = BTreeSet::new();

        let mut names = NameResolver::new(self.tree, &self.config);
        for (path, err) in names.assign() {
            tracing::warn!("Withholding {}: {}", path, err);
            withheld.insert(path);
            errors.push(err);
        }
        let ordered = names.ordered_directories();

        let mut types = TypeResolver::new(self.tree, &self.config);
        let mut resolved: HashMap<String, ResolvedType> = HashMap::new();
        for dir in &ordered {
            if withheld.contains(&dir.path) {
                continue;
            }
            match self.resolve_directory(dir, &mut types, &mut names) {
                Ok(leaves) => resolved.extend(leaves),
                Err(err) => {
                    tracing::warn!("Withholding {}: {}", dir.path, err);
                    withheld.insert(dir.path.clone());
                    errors.push(err);
                }
            }
        }

        let binary_keyed = find_binary_keys(
            ordered.iter().copied().filter(|d| !withheld.contains(&d.path)),
            &resolved,
        );
        if !binary_keyed.is_empty() {
            withheld.extend(binary_keyed.iter().cloned());
            errors.push(CodegenError::BinaryListKeys {
                paths: binary_keyed,
            });
        }

        let mut lists: HashMap<String, ListPlan> = HashMap::new();
        for dir in ordered.iter().filter(|d| d.is_list()) {
            if withheld.contains(&dir.path) {
                continue;
            }
            match plan_list(dir, &resolved, &mut names, &self.config) {
                Ok(plan) => {
                    lists.insert(dir.path.clone(), plan);
                }
                Err(err) => {
                    withheld.insert(dir.path.clone());
                    errors.push(err);
                }
            }
        }

        let unreachable = self.unreachable(&ordered, &names, &withheld);

        let ctx = EmitContext {
            tree: self.tree,
            config: &self.config,
            names: &names,
            resolved: &resolved,
            lists: &lists,
            withheld: &withheld,
            unreachable: &unreachable,
        };
        let structs = StructGenerator::new(ctx);
        let path_types = PathGenerator::new(ctx);

        let mut code = GeneratedCode::default();
        let mut referenced = BTreeSet::new();
        for dir in ordered.iter().filter(|d| ctx.is_emitted(&d.path)) {
            let type_name = ctx.directory_name(&dir.path)?.to_string();
            let emitted = structs.generate(dir).and_then(|s| {
                let path_api = if ctx.is_reachable(&dir.path) {
                    path_types.generate(dir)?
                } else {
                    String::new()
                };
                Ok((s, path_api))
            });
            match emitted {
                Ok((s, path_api)) => {
                    referenced.extend(referenced_types(dir, &resolved));
                    code.nodes.insert(
                        type_name.clone(),
                        NodeArtifact {
                            type_name,
                            schema_path: dir.path.clone(),
                            declaration: s.declaration,
                            methods: s.methods,
                            path_api,
                        },
                    );
                }
                Err(err) => errors.push(err),
            }
        }

        code.enums = EnumGenerator::new(types.enums()).generate();
        code.enums.retain(|name, _| referenced.contains(name));
        code.unions = UnionGenerator::new(types.unions()).generate();
        code.unions.retain(|name, _| referenced.contains(name));
        code.metadata = self.metadata(&ordered, ctx);
        code.errors = errors;

        tracing::info!(
            "Generated {} structs, {} enums, {} unions with {} errors",
            code.nodes.len(),
            code.enums.len(),
            code.unions.len(),
            code.errors.len()
        );
        Ok(code)
    }

    /// Resolves the types and defaults of every leaf in `dir`. The first
    /// failure stops the directory, so nothing it holds is kept.
    fn resolve_directory(
        &self,
        dir: &Directory,
        types: &mut TypeResolver<'_>,
        names: &mut NameResolver<'_>,
    ) -> Result<Vec<(String, ResolvedType)>, CodegenError> {
        let mut leaves = Vec::new();
        for field in dir.fields.values().filter(|f| f.kind.is_leaf_like()) {
            let leaf = self
                .tree
                .node(&field.node)
                .ok_or_else(|| SchemaError::unknown_node(&field.node))?;
            let mut r = types.resolve(leaf, names)?;
            r.mapped.default_value = resolve_default(leaf, &r, types.enums())
                .map_err(|e| CodegenError::type_error(&leaf.path, e))?;
            leaves.push((field.node.clone(), r));
        }
        Ok(leaves)
    }

    /// Collects the directories that get no path API: keyless lists,
    /// directories without an owner outside the fakeroot, and everything
    /// below an unreachable or withheld owner.
    fn unreachable(
        &self,
        ordered: &[&Directory],
        names: &NameResolver<'_>,
        withheld: &BTreeSet<String>,
    ) -> BTreeSet<String> {
        let mut unreachable = BTreeSet::new();
        for dir in ordered {
            if dir.is_fakeroot() {
                continue;
            }
            if dir.is_keyless_list() {
                tracing::debug!("Keyless list {} has no path API", dir.path);
                unreachable.insert(dir.path.clone());
                continue;
            }
            let cut_off = match names.owner(&dir.path) {
                Some(owner) => {
                    unreachable.contains(&owner.path) || withheld.contains(&owner.path)
                }
                None => true,
            };
            if cut_off {
                unreachable.insert(dir.path.clone());
            }
        }
        unreachable
    }

    fn metadata(&self, ordered: &[&Directory], ctx: EmitContext<'_>) -> BTreeMap<String, NodeMetadata> {
        let mut index = BTreeMap::new();
        for dir in ordered.iter().filter(|d| ctx.is_emitted(&d.path)) {
            let dir_reachable = ctx.is_reachable(&dir.path);
            for field in dir.fields.values() {
                let Ok(field_name) = ctx.field_ident(dir, field) else {
                    continue;
                };
                let entry = match field.kind {
                    FieldKind::Leaf | FieldKind::LeafList => {
                        let Ok(resolved) = ctx.resolved(field) else {
                            continue;
                        };
                        let mapped = &resolved.mapped;
                        NodeMetadata {
                            path_type_name: ctx
                                .names
                                .leaf_path_name(&field.node)
                                .filter(|_| dir_reachable)
                                .map(|n| format!("{n}Path")),
                            target_type_name: mapped.native_type.clone(),
                            field_name: field_name.to_string(),
                            is_leaf: true,
                            is_scalar: !mapped.is_enumerated,
                            has_default: mapped.default_value.is_some(),
                            yang_type_name: self
                                .tree
                                .node(&field.node)
                                .and_then(|n| n.yang_type.as_ref())
                                .map(|t| t.name.clone()),
                            schema_path: field.node.clone(),
                        }
                    }
                    FieldKind::Container | FieldKind::List => {
                        let Some(child) = ctx.child_directory(field) else {
                            continue;
                        };
                        let Ok(child_name) = ctx.directory_name(&child.path) else {
                            continue;
                        };
                        NodeMetadata {
                            path_type_name: ctx
                                .is_reachable(&child.path)
                                .then(|| format!("{child_name}Path")),
                            target_type_name: child_name.to_string(),
                            field_name: field_name.to_string(),
                            is_leaf: false,
                            is_scalar: false,
                            has_default: false,
                            yang_type_name: None,
                            schema_path: field.node.clone(),
                        }
                    }
                };
                index.insert(field.node.clone(), entry);
            }
        }
        index
    }
}

/// Returns the enum and union names the leaves of `dir` refer to.
fn referenced_types(dir: &Directory, resolved: &HashMap<String, ResolvedType>) -> Vec<String> {
    let mut names = Vec::new();
    for field in dir.fields.values().filter(|f| f.kind.is_leaf_like()) {
        let Some(r) = resolved.get(&field.node) else {
            continue;
        };
        if r.mapped.is_enumerated || r.mapped.is_union() {
            names.push(r.mapped.native_type.clone());
        }
        names.extend(
            r.subtypes
                .iter()
                .filter(|s| s.mapped.is_enumerated)
                .map(|s| s.mapped.native_type.clone()),
        );
    }
    names
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::test_support::{init_tracing, interfaces_builder, interfaces_tree};
    use ygen_schema::{YangKind, YangType};

    fn generate(config: GeneratorConfig) -> GeneratedCode {
        init_tracing();
        let tree = interfaces_tree();
        Generator::with_config(&tree, config).generate().unwrap()
    }

    #[test]
    fn test_generates_interfaces_model() {
        let code = generate(GeneratorConfig::default());
        assert!(!code.has_errors(), "{}", code.errors);

        let names: Vec<&str> = code.nodes.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["Device", "Interface", "Interface_Subinterface"]);

        let device = &code.nodes["Device"];
        assert!(device.declaration.contains("pub interface: BTreeMap<String, Interface>,"));
        assert!(device.declaration.contains("pub hostname: Option<String>,"));
        assert!(device.methods.contains("pub fn new_interface(&mut self, key: String)"));
        assert!(device.path_api.contains("pub struct DevicePath {"));
        assert!(!device.path_api.contains("DevicePathAny"));
        assert!(device.path_api.contains("pub fn interface_any(&self) -> InterfacePathAny {"));
        assert!(device.path_api.contains("pub fn interface(&self, name: String) -> InterfacePath {"));
        assert!(device.path_api.contains("pub fn hostname(&self) -> HostnamePath {"));

        let interface = &code.nodes["Interface"];
        assert!(interface.declaration.contains("pub r#type: E_OcIf_InterfaceType,"));
        assert!(interface.declaration.contains("pub oper_status: E_OcIf_Interface_OperStatus,"));
        assert!(interface.declaration.contains("pub mtu: Option<u16>,"));
        assert!(interface.methods.contains("impl KeyedEntry for Interface {"));
        assert!(interface.methods.contains("type Key = String;"));
        assert!(interface.path_api.contains("pub struct Interface_MtuPathAny {"));
        assert!(interface.path_api.contains("PathElem::new(\"config\"),"));

        assert!(code.enums.contains_key("E_OcIf_Interface_OperStatus"));
        assert!(code.enums.contains_key("E_OcIf_InterfaceType"));
        assert!(code.unions.is_empty());
    }

    #[test]
    fn test_output_is_deterministic() {
        let tree = interfaces_tree();
        let first = Generator::new(&tree).generate().unwrap().render();
        for _ in 0..10 {
            let again = Generator::new(&tree).generate().unwrap().render();
            assert_eq!(first, again);
        }
    }

    #[test]
    fn test_render_order_and_header() {
        let rendered = generate(GeneratorConfig::default()).render();
        assert!(rendered.starts_with("// Generated by ygen. Do not edit.\n"));
        let enum_at = rendered.find("pub enum E_OcIf_InterfaceType").unwrap();
        let struct_at = rendered.find("pub struct Device {").unwrap();
        assert!(enum_at < struct_at);
    }

    #[test]
    fn test_user_ordered_list_helpers() {
        let mut b = interfaces_builder();
        b.ordered_by_user("/oc-if/interfaces/interface");
        let tree = b.build().unwrap();
        let code = Generator::new(&tree).generate().unwrap();
        let device = &code.nodes["Device"];
        assert!(device.declaration.contains("pub interface: OrderedMap<String, Interface>,"));
        for helper in ["append_interface", "append_new_interface", "get_interface", "delete_interface"] {
            assert!(device.methods.contains(&format!("pub fn {helper}(")), "{helper}");
        }
    }

    #[test]
    fn test_binary_key_is_reported_once() {
        let mut b = interfaces_builder();
        b.list("/oc-sys", "blob")
            .leaf("/oc-sys/blob", "data", YangType::new(YangKind::Binary))
            .directory("/oc-sys/blob")
            .keys("/oc-sys/blob", &["data"])
            .field("/oc-sys/blob", "/oc-sys/blob/data", &["data"])
            .field("/device", "/oc-sys/blob", &["blob"]);
        let tree = b.build().unwrap();
        let code = Generator::new(&tree).generate().unwrap();

        let unsupported: Vec<_> = code.errors.of_kind(ErrorKind::UnsupportedConstruct).collect();
        assert_eq!(unsupported.len(), 1);
        assert!(unsupported[0].to_string().contains("/oc-sys/blob"));
        assert!(!code.nodes.contains_key("Blob"));
        assert!(!code.nodes["Device"].declaration.contains("pub blob:"));
        assert!(code.nodes.contains_key("Interface"));
        assert!(code.nodes.contains_key("Interface_Subinterface"));
    }

    #[test]
    fn test_bad_default_withholds_only_its_directory() {
        let mut b = interfaces_builder();
        b.leaf_default(
            "/oc-if/interfaces/interface/subinterfaces/subinterface/config/description",
            "x",
        );
        b.leaf(
            "/oc-if/interfaces/interface/subinterfaces/subinterface/config",
            "vlan",
            YangType::new(YangKind::Uint8),
        )
        .leaf_default(
            "/oc-if/interfaces/interface/subinterfaces/subinterface/config/vlan",
            "0b1",
        )
        .field(
            "/oc-if/interfaces/interface/subinterfaces/subinterface",
            "/oc-if/interfaces/interface/subinterfaces/subinterface/config/vlan",
            &["config/vlan"],
        );
        let tree = b.build().unwrap();
        let code = Generator::new(&tree).generate().unwrap();

        assert_eq!(code.errors.len(), 1);
        assert_eq!(code.errors.of_kind(ErrorKind::ValueConversion).count(), 1);
        assert!(!code.nodes.contains_key("Interface_Subinterface"));
        assert!(code.nodes.contains_key("Interface"));
        assert!(!code.nodes["Interface"].declaration.contains("subinterface"));
    }

    #[test]
    fn test_withheld_directory_types_are_not_emitted() {
        let sub = "/oc-if/interfaces/interface/subinterfaces/subinterface";
        let config = "/oc-if/interfaces/interface/subinterfaces/subinterface/config";
        let mut b = interfaces_builder();
        b.leaf(config, "tagging", YangType::enumeration(["TAGGED", "UNTAGGED"]))
            .field(sub, &format!("{config}/tagging"), &["config/tagging"])
            .leaf(
                config,
                "label",
                YangType::union(vec![
                    YangType::new(YangKind::Uint32),
                    YangType::new(YangKind::String),
                ]),
            )
            .field(sub, &format!("{config}/label"), &["config/label"])
            .leaf(config, "vlan", YangType::new(YangKind::Uint8))
            .leaf_default(&format!("{config}/vlan"), "0b1")
            .field(sub, &format!("{config}/vlan"), &["config/vlan"]);
        let tree = b.build().unwrap();
        let code = Generator::new(&tree).generate().unwrap();

        assert_eq!(code.errors.len(), 1);
        assert!(!code.nodes.contains_key("Interface_Subinterface"));
        assert!(!code.enums.values().any(|e| e.contains("UNTAGGED")));
        assert!(code.unions.is_empty());
        assert!(code.enums.contains_key("E_OcIf_Interface_OperStatus"));
        assert!(!code.render().contains("Tagging"));
    }

    #[test]
    fn test_keyless_list_is_unreachable() {
        let mut b = interfaces_builder();
        b.list("/oc-sys", "log")
            .leaf("/oc-sys/log", "line", YangType::new(YangKind::String))
            .directory("/oc-sys/log")
            .field("/oc-sys/log", "/oc-sys/log/line", &["line"])
            .field("/device", "/oc-sys/log", &["log"]);
        let tree = b.build().unwrap();
        let code = Generator::new(&tree).generate().unwrap();

        assert!(!code.has_errors());
        let log = &code.nodes["Log"];
        assert!(log.path_api.is_empty());
        assert!(code.nodes["Device"].declaration.contains("pub log: Vec<Log>,"));
        assert!(!code.nodes["Device"].path_api.contains("fn log"));
        assert_eq!(code.metadata["/oc-sys/log"].path_type_name, None);
    }

    #[test]
    fn test_builder_api_for_subinterfaces() {
        let code = generate(GeneratorConfig::default().list_builder_key_threshold(1));
        let interface = &code.nodes["Interface"];
        assert!(interface.path_api.contains("pub fn subinterface_any(&self) -> Interface_SubinterfacePathAny {"));
        assert!(!interface.path_api.contains("pub fn subinterface(&self, index"));
        let sub = &code.nodes["Interface_Subinterface"];
        assert!(sub.path_api.contains("pub fn with_index(&mut self, index: u32) -> &mut Self {"));
    }

    #[test]
    fn test_getters_and_defaults() {
        let code = generate(GeneratorConfig::default().generate_getters(true));
        let interface = &code.nodes["Interface"];
        assert!(interface.methods.contains("pub fn get_mtu(&self) -> u16 {"));
        assert!(interface.methods.contains("unwrap_or_else(|| 1500)"));
        assert!(interface.methods.contains("self.enabled = Some(true);"));
        assert!(interface.methods.contains("pub fn populate_defaults(&mut self) {"));
        assert!(code.nodes["Device"].methods.contains("child.populate_defaults();"));
    }

    #[test]
    fn test_metadata_index() {
        let code = generate(GeneratorConfig::default());
        let mtu = &code.metadata["/oc-if/interfaces/interface/config/mtu"];
        assert_eq!(mtu.path_type_name.as_deref(), Some("Interface_MtuPath"));
        assert_eq!(mtu.target_type_name, "u16");
        assert!(mtu.is_leaf && mtu.is_scalar && mtu.has_default);
        assert_eq!(mtu.yang_type_name.as_deref(), Some("uint16"));

        let status = &code.metadata["/oc-if/interfaces/interface/state/oper-status"];
        assert!(!status.is_scalar);

        let interface = &code.metadata["/oc-if/interfaces/interface"];
        assert_eq!(interface.target_type_name, "Interface");
        assert_eq!(interface.path_type_name.as_deref(), Some("InterfacePath"));

        let json = serde_json::to_string(mtu).unwrap();
        let back: NodeMetadata = serde_json::from_str(&json).unwrap();
        assert_eq!(&back, mtu);
    }

    #[test]
    fn test_inconsistent_ir_aborts() {
        let mut tree = interfaces_tree();
        tree.nodes.remove("/oc-sys/hostname");
        let err = Generator::new(&tree).generate().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::SchemaInconsistency);
    }
}

//! Path struct code generation.
//!
//! Every reachable directory gets a `<Name>Path` struct and, with wildcard
//! generation on, a `<Name>PathAny` twin. Each leaf gets the same pair under
//! its leaf path name. Accessors on a `…PathAny` always return wildcard
//! children.

use super::EmitContext;
use crate::error::CodegenError;
use crate::paths::{KeyExpr, PathAccessor, PathConstructor};
use ygen_schema::{Directory, FieldKind};

/// Generator for path structs and their accessors.
pub struct PathGenerator<'a> {
    ctx: EmitContext<'a>,
    paths: PathConstructor<'a>,
}

impl<'a> PathGenerator<'a> {
    /// Creates a new path generator.
    #[must_use]
    pub fn new(ctx: EmitContext<'a>) -> Self {
        Self {
            ctx,
            paths: PathConstructor::new(ctx.config),
        }
    }

    /// Generates the path structs of a directory, its leaves, and every
    /// accessor leading to its children.
    ///
    /// # Errors
    /// Returns an error if a name or list plan is missing.
    pub fn generate(&self, dir: &Directory) -> Result<String, CodegenError> {
        let name = self.ctx.directory_name(&dir.path)?;
        let with_any = self.ctx.config.generate_wildcard_paths && !dir.is_fakeroot();
        let mut output = String::new();

        output.push_str(&path_struct(&format!("{name}Path"), &dir.path, dir.is_fakeroot()));
        if dir.is_fakeroot() {
            output.push_str(&format!("impl {name}Path {{\n"));
            output.push_str("    /// Creates the root path.\n");
            output.push_str("    #[must_use]\n");
            output.push_str("    pub fn new() -> Self {\n");
            output.push_str("        Self::default()\n");
            output.push_str("    }\n");
            output.push_str("}\n\n");
        }
        if with_any {
            output.push_str(&path_struct(&format!("{name}PathAny"), &dir.path, false));
        }

        for field in dir.fields.values().filter(|f| f.kind.is_leaf_like()) {
            if let Some(leaf) = self.ctx.names.leaf_path_name(&field.node) {
                output.push_str(&path_struct(&format!("{leaf}Path"), &field.node, false));
                if with_any {
                    output.push_str(&path_struct(&format!("{leaf}PathAny"), &field.node, false));
                }
            }
        }

        output.push_str(&self.generate_accessors(dir, &format!("{name}Path"), false)?);
        if with_any {
            output.push_str(&self.generate_accessors(dir, &format!("{name}PathAny"), true)?);
        }

        if with_any {
            output.push_str(&self.generate_mutators(dir, name)?);
        }
        Ok(output)
    }

    fn generate_accessors(
        &self,
        dir: &Directory,
        receiver: &str,
        any: bool,
    ) -> Result<String, CodegenError> {
        let mut body = String::new();

        for field in dir.fields.values() {
            let ident = self.ctx.field_ident(dir, field)?;
            let (target, api) = match field.kind {
                FieldKind::Leaf | FieldKind::LeafList => {
                    let Some(leaf) = self.ctx.names.leaf_path_name(&field.node) else {
                        continue;
                    };
                    (leaf, self.paths.node_api(ident, field))
                }
                FieldKind::Container => {
                    let Some(child) = self.ctx.child_directory(field) else {
                        continue;
                    };
                    if !self.ctx.is_reachable(&child.path) {
                        continue;
                    }
                    (self.ctx.directory_name(&child.path)?, self.paths.node_api(ident, field))
                }
                FieldKind::List => {
                    let Some(child) = self.ctx.child_directory(field) else {
                        continue;
                    };
                    if !self.ctx.is_reachable(&child.path) {
                        continue;
                    }
                    let plan = self.ctx.lists.get(&child.path).ok_or_else(|| {
                        CodegenError::generation(format!("list {} has no plan", child.path))
                    })?;
                    let Some(api) = self.paths.list_api(ident, field, &plan.keys) else {
                        continue;
                    };
                    (self.ctx.directory_name(&child.path)?, api)
                }
            };

            for accessor in api.accessors() {
                let returned = if any || accessor.wildcard {
                    format!("{target}PathAny")
                } else {
                    format!("{target}Path")
                };
                body.push_str(&accessor_method(accessor, &returned));
            }
        }

        if body.is_empty() {
            return Ok(String::new());
        }
        Ok(format!("impl {receiver} {{\n{body}}}\n\n"))
    }

    /// Generates the `with_<key>` mutators of a builder-style list.
    fn generate_mutators(&self, dir: &Directory, name: &str) -> Result<String, CodegenError> {
        let Some(plan) = self.ctx.lists.get(&dir.path) else {
            return Ok(String::new());
        };
        if plan.keys.is_empty() || !self.paths.uses_builder(plan.keys.len()) {
            return Ok(String::new());
        }

        let mut output = format!("impl {name}PathAny {{\n");
        for mutator in self.paths.mutators(&plan.keys) {
            let param = &mutator.param;
            output.push_str(&format!(
                "    /// Sets the `{}` key of this path.\n",
                param.key
            ));
            output.push_str(&format!(
                "    pub fn {}(&mut self, {}: {}) -> &mut Self {{\n",
                mutator.method, param.ident, param.native_type
            ));
            output.push_str(&format!(
                "        self.node\n            .modify_key({:?}, KeyValue::Value({}.to_string()))\n            .ok();\n",
                param.key, param.ident
            ));
            output.push_str("        self\n");
            output.push_str("    }\n\n");
        }
        output.push_str("}\n\n");
        Ok(output)
    }
}

fn path_struct(name: &str, schema_path: &str, default: bool) -> String {
    let mut output = String::new();
    output.push_str(&format!(
        "/// {name} represents the {schema_path} YANG schema element.\n"
    ));
    output.push_str("#[allow(non_camel_case_types)]\n");
    if default {
        output.push_str("#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]\n");
    } else {
        output.push_str("#[derive(Debug, Clone, PartialEq, Eq, Hash)]\n");
    }
    output.push_str(&format!("pub struct {name} {{\n"));
    output.push_str("    node: PathNode,\n");
    output.push_str("}\n\n");

    output.push_str(&format!("impl AsRef<PathNode> for {name} {{\n"));
    output.push_str("    fn as_ref(&self) -> &PathNode {\n");
    output.push_str("        &self.node\n");
    output.push_str("    }\n");
    output.push_str("}\n\n");
    output
}

fn accessor_method(accessor: &PathAccessor, returned: &str) -> String {
    let mut output = String::new();
    let location = accessor.segments.join("/");
    if accessor.wildcard {
        output.push_str(&format!(
            "    /// Returns the path of `{location}` with wildcard keys.\n"
        ));
    } else {
        output.push_str(&format!("    /// Returns the path of `{location}`.\n"));
    }
    output.push_str("    #[must_use]\n");

    let params: String = accessor
        .params
        .iter()
        .map(|p| format!(", {}: {}", p.ident, p.native_type))
        .collect();
    output.push_str(&format!(
        "    pub fn {}(&self{params}) -> {returned} {{\n",
        accessor.method
    ));
    output.push_str(&format!("        {returned} {{\n"));
    output.push_str("            node: self.node.child([\n");

    let last = accessor.segments.len().saturating_sub(1);
    for (i, segment) in accessor.segments.iter().enumerate() {
        output.push_str(&format!("                PathElem::new({segment:?})"));
        if i == last {
            for (key, value) in &accessor.keys {
                let value = match value {
                    KeyExpr::Param(ident) => format!("KeyValue::Value({ident}.to_string())"),
                    KeyExpr::Wildcard => "KeyValue::Wildcard".to_string(),
                };
                output.push_str(&format!(".with_key({key:?}, {value})"));
            }
        }
        output.push_str(",\n");
    }

    output.push_str("            ]),\n");
    output.push_str("        }\n");
    output.push_str("    }\n\n");
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paths::KeyParam;
    use indexmap::IndexMap;

    #[test]
    fn test_accessor_method_renders_keys() {
        let mut keys = IndexMap::new();
        keys.insert("name".to_string(), KeyExpr::Param("name".to_string()));
        keys.insert("unit".to_string(), KeyExpr::Wildcard);
        let accessor = PathAccessor {
            method: "interface_any_unit".to_string(),
            params: vec![KeyParam {
                key: "name".to_string(),
                ident: "name".to_string(),
                native_type: "String".to_string(),
            }],
            keys,
            segments: vec!["interfaces".to_string(), "interface".to_string()],
            wildcard: true,
        };
        let code = accessor_method(&accessor, "InterfacePathAny");
        assert!(code.contains(
            "pub fn interface_any_unit(&self, name: String) -> InterfacePathAny {"
        ));
        assert!(code.contains("PathElem::new(\"interfaces\"),"));
        assert!(code.contains(
            "PathElem::new(\"interface\").with_key(\"name\", KeyValue::Value(name.to_string())).with_key(\"unit\", KeyValue::Wildcard),"
        ));
        assert!(code.contains("with wildcard keys"));
    }

    #[test]
    fn test_path_struct_root_derives_default() {
        let code = path_struct("DevicePath", "/device", true);
        assert!(code.contains("Hash, Default)]"));
        assert!(code.contains("impl AsRef<PathNode> for DevicePath {"));
        assert!(!path_struct("InterfacePath", "/x", false).contains("Default"));
    }
}

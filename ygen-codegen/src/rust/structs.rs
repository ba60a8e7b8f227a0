//! Directory struct code generation.

use super::EmitContext;
use crate::enums::UNSET_VARIANT;
use crate::error::CodegenError;
use crate::ordered::{ListKey, ListPlan, ListStorage};
use crate::types::MappedType;
use ygen_schema::{Directory, Field, FieldKind};

/// Generated struct text of one directory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StructCode {
    /// Struct and key struct declarations.
    pub declaration: String,
    /// Trait impls and helper methods.
    pub methods: String,
}

/// Generator for directory structs.
pub struct StructGenerator<'a> {
    ctx: EmitContext<'a>,
}

impl<'a> StructGenerator<'a> {
    /// Creates a new struct generator.
    #[must_use]
    pub fn new(ctx: EmitContext<'a>) -> Self {
        Self { ctx }
    }

    /// Generates the struct of a directory.
    ///
    /// # Errors
    /// Returns an error if a name or resolved type is missing.
    pub fn generate(&self, dir: &Directory) -> Result<StructCode, CodegenError> {
        let name = self.ctx.directory_name(&dir.path)?;
        let mut code = StructCode::default();

        code.declaration.push_str(&format!(
            "/// {name} represents the {} YANG schema element.\n",
            dir.path
        ));
        code.declaration.push_str("#[allow(non_camel_case_types)]\n");
        code.declaration
            .push_str("#[derive(Debug, Clone, PartialEq, Default)]\n");
        code.declaration.push_str(&format!("pub struct {name} {{\n"));
        for field in dir.fields.values() {
            let Some(ty) = self.field_type(field)? else {
                continue;
            };
            let ident = self.ctx.field_ident(dir, field)?;
            code.declaration.push_str(&format!("    pub {ident}: {ty},\n"));
        }
        code.declaration.push_str("}\n\n");

        if let Some(plan) = self.ctx.lists.get(&dir.path) {
            if let Some(key_struct) = &plan.key_struct {
                code.declaration
                    .push_str(&self.generate_key_struct(name, key_struct, plan));
            }
            if plan.is_keyed() {
                code.methods.push_str(&self.generate_keyed_entry(name, plan)?);
            }
        }

        let helpers = self.generate_helpers(dir)?;
        if !helpers.is_empty() {
            code.methods.push_str(&format!("impl {name} {{\n"));
            code.methods.push_str(&helpers);
            code.methods.push_str("}\n\n");
        }
        Ok(code)
    }

    /// Returns the Rust type of a field, or `None` if the child is withheld.
    fn field_type(&self, field: &Field) -> Result<Option<String>, CodegenError> {
        Ok(Some(match field.kind {
            FieldKind::Leaf => {
                let mapped = &self.ctx.resolved(field)?.mapped;
                if mapped.is_enumerated {
                    mapped.native_type.clone()
                } else {
                    format!("Option<{}>", mapped.native_type)
                }
            }
            FieldKind::LeafList => format!("Vec<{}>", self.ctx.resolved(field)?.mapped.native_type),
            FieldKind::Container => {
                let Some(child) = self.ctx.child_directory(field) else {
                    return Ok(None);
                };
                format!("Option<{}>", self.ctx.directory_name(&child.path)?)
            }
            FieldKind::List => {
                let Some(child) = self.ctx.child_directory(field) else {
                    return Ok(None);
                };
                let Some(plan) = self.ctx.lists.get(&child.path) else {
                    return Ok(None);
                };
                plan.field_type(self.ctx.directory_name(&child.path)?)
            }
        }))
    }

    fn generate_key_struct(&self, list: &str, key_struct: &str, plan: &ListPlan) -> String {
        let mut output = String::new();
        output.push_str(&format!("/// {key_struct} is the key of a {list} list entry.\n"));
        output.push_str("#[allow(non_camel_case_types)]\n");
        output.push_str("#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]\n");
        output.push_str(&format!("pub struct {key_struct} {{\n"));
        for key in &plan.keys {
            output.push_str(&format!(
                "    pub {}: {},\n",
                key.field_name, key.mapped.native_type
            ));
        }
        output.push_str("}\n\n");
        output
    }

    fn generate_keyed_entry(&self, name: &str, plan: &ListPlan) -> Result<String, CodegenError> {
        let key_type = plan.key_type.as_deref().ok_or_else(|| {
            CodegenError::generation(format!("keyed list {name} has no key type"))
        })?;
        let mut output = String::new();

        output.push_str(&format!("impl KeyedEntry for {name} {{\n"));
        output.push_str(&format!("    type Key = {key_type};\n\n"));

        output.push_str("    fn key(&self) -> Option<Self::Key> {\n");
        match plan.keys.as_slice() {
            [only] if plan.key_struct.is_none() => {
                output.push_str(&format!("        {}\n", read_key(only)));
            }
            keys => {
                output.push_str(&format!("        Some({key_type} {{\n"));
                for key in keys {
                    output.push_str(&format!(
                        "            {}: {}?,\n",
                        key.field_name,
                        read_key(key)
                    ));
                }
                output.push_str("        })\n");
            }
        }
        output.push_str("    }\n\n");

        output.push_str("    fn from_key(key: Self::Key) -> Self {\n");
        output.push_str("        Self {\n");
        match plan.keys.as_slice() {
            [only] if plan.key_struct.is_none() => {
                output.push_str(&format!(
                    "            {}: {},\n",
                    only.field_name,
                    store_key(only, "key")
                ));
            }
            keys => {
                for key in keys {
                    let value = format!("key.{}", key.field_name);
                    output.push_str(&format!(
                        "            {}: {},\n",
                        key.field_name,
                        store_key(key, &value)
                    ));
                }
            }
        }
        output.push_str("            ..Default::default()\n");
        output.push_str("        }\n");
        output.push_str("    }\n");
        output.push_str("}\n\n");
        Ok(output)
    }

    /// Generates list helpers, getters and `populate_defaults`.
    fn generate_helpers(&self, dir: &Directory) -> Result<String, CodegenError> {
        let mut output = String::new();

        for field in dir.fields.values().filter(|f| f.kind == FieldKind::List) {
            let Some(child) = self.ctx.child_directory(field) else {
                continue;
            };
            let Some(plan) = self.ctx.lists.get(&child.path) else {
                continue;
            };
            let Some(key_type) = plan.key_type.as_deref() else {
                continue;
            };
            let ident = self.ctx.field_ident(dir, field)?;
            let child_name = self.ctx.directory_name(&child.path)?;
            output.push_str(&list_helpers(ident, child_name, key_type, plan.storage));
        }

        if self.ctx.config.generate_getters {
            output.push_str(&self.generate_getters(dir)?);
        }
        Ok(output)
    }

    fn generate_getters(&self, dir: &Directory) -> Result<String, CodegenError> {
        let mut getters = String::new();
        let mut populate = String::new();

        for field in dir.fields.values() {
            let ident = self.ctx.field_ident(dir, field)?;
            match field.kind {
                FieldKind::Leaf => {
                    let mapped = &self.ctx.resolved(field)?.mapped;
                    getters.push_str(&leaf_getter(ident, mapped));
                    if let Some(default) = &mapped.default_value {
                        if mapped.is_enumerated {
                            populate.push_str(&format!(
                                "        if self.{ident} == {}::{UNSET_VARIANT} {{\n            self.{ident} = {default};\n        }}\n",
                                mapped.native_type
                            ));
                        } else {
                            populate.push_str(&format!(
                                "        if self.{ident}.is_none() {{\n            self.{ident} = Some({default});\n        }}\n"
                            ));
                        }
                    }
                }
                FieldKind::LeafList => {}
                FieldKind::Container => {
                    if self.ctx.child_directory(field).is_some() {
                        populate.push_str(&format!(
                            "        if let Some(child) = self.{ident}.as_mut() {{\n            child.populate_defaults();\n        }}\n"
                        ));
                    }
                }
                FieldKind::List => {
                    let Some(child) = self.ctx.child_directory(field) else {
                        continue;
                    };
                    let Some(plan) = self.ctx.lists.get(&child.path) else {
                        continue;
                    };
                    populate.push_str(&match plan.storage {
                        ListStorage::OrderedMap => format!(
                            "        for key in self.{ident}.keys() {{\n            if let Some(child) = self.{ident}.get_mut(&key) {{\n                child.populate_defaults();\n            }}\n        }}\n"
                        ),
                        ListStorage::Map => format!(
                            "        for child in self.{ident}.values_mut() {{\n            child.populate_defaults();\n        }}\n"
                        ),
                        ListStorage::Vec => format!(
                            "        for child in self.{ident}.iter_mut() {{\n            child.populate_defaults();\n        }}\n"
                        ),
                    });
                }
            }
        }

        let mut output = getters;
        output.push_str("    /// Sets every unset leaf that has a default, recursively.\n");
        output.push_str("    pub fn populate_defaults(&mut self) {\n");
        output.push_str(&populate);
        output.push_str("    }\n\n");
        Ok(output)
    }
}

/// Expression reading one key field as `Option<Key>`.
fn read_key(key: &ListKey) -> String {
    if key.mapped.is_enumerated {
        format!(
            "(self.{f} != {t}::{UNSET_VARIANT}).then_some(self.{f})",
            f = key.field_name,
            t = key.mapped.native_type
        )
    } else {
        format!("self.{}.clone()", key.field_name)
    }
}

/// Expression storing a key value into its field.
fn store_key(key: &ListKey, value: &str) -> String {
    if key.mapped.is_enumerated {
        value.to_string()
    } else {
        format!("Some({value})")
    }
}

fn list_helpers(ident: &str, child: &str, key_type: &str, storage: ListStorage) -> String {
    let base = crate::names::strip_raw(ident);
    let mut output = String::new();
    match storage {
        ListStorage::OrderedMap => {
            output.push_str(&format!("    /// Appends an entry to the `{base}` list.\n"));
            output.push_str("    ///\n    /// # Errors\n");
            output.push_str("    /// Fails if the key is unset or already present.\n");
            output.push_str(&format!(
                "    pub fn append_{base}(&mut self, value: {child}) -> ygen_core::Result<()> {{\n"
            ));
            output.push_str(&format!("        self.{ident}.append(value)\n"));
            output.push_str("    }\n\n");

            output.push_str(&format!(
                "    /// Appends a new `{base}` entry with the given key.\n"
            ));
            output.push_str("    ///\n    /// # Errors\n");
            output.push_str("    /// Fails if the key is already present.\n");
            output.push_str(&format!(
                "    pub fn append_new_{base}(&mut self, key: {key_type}) -> ygen_core::Result<&mut {child}> {{\n"
            ));
            output.push_str(&format!("        self.{ident}.append_new(key)\n"));
            output.push_str("    }\n\n");
        }
        ListStorage::Map => {
            output.push_str(&format!(
                "    /// Creates a new `{base}` entry with the given key.\n"
            ));
            output.push_str("    ///\n    /// # Errors\n");
            output.push_str("    /// Fails if the key is already present.\n");
            output.push_str(&format!(
                "    pub fn new_{base}(&mut self, key: {key_type}) -> ygen_core::Result<&mut {child}> {{\n"
            ));
            output.push_str(&format!("        if self.{ident}.contains_key(&key) {{\n"));
            output.push_str("            return Err(ygen_core::Error::DuplicateKey {\n");
            output.push_str("                key: format!(\"{key:?}\"),\n");
            output.push_str("            });\n");
            output.push_str("        }\n");
            output.push_str(&format!(
                "        Ok(self.{ident}.entry(key.clone()).or_insert_with(|| {child}::from_key(key)))\n"
            ));
            output.push_str("    }\n\n");
        }
        ListStorage::Vec => return output,
    }

    output.push_str(&format!("    /// Returns the `{base}` entry with the given key.\n"));
    output.push_str("    #[must_use]\n");
    output.push_str(&format!(
        "    pub fn get_{base}(&self, key: &{key_type}) -> Option<&{child}> {{\n"
    ));
    output.push_str(&format!("        self.{ident}.get(key)\n"));
    output.push_str("    }\n\n");

    let remove = if storage == ListStorage::OrderedMap {
        "delete"
    } else {
        "remove"
    };
    output.push_str(&format!(
        "    /// Removes the `{base}` entry with the given key.\n"
    ));
    output.push_str(&format!(
        "    pub fn delete_{base}(&mut self, key: &{key_type}) -> Option<{child}> {{\n"
    ));
    output.push_str(&format!("        self.{ident}.{remove}(key)\n"));
    output.push_str("    }\n\n");
    output
}

fn leaf_getter(ident: &str, mapped: &MappedType) -> String {
    let base = crate::names::strip_raw(ident);
    let ty = &mapped.native_type;
    let fallback = mapped.default_value.as_ref().unwrap_or(&mapped.zero_value);
    let mut output = String::new();
    output.push_str(&format!(
        "    /// Returns `{base}`, or its default or zero value when unset.\n"
    ));
    output.push_str("    #[must_use]\n");
    output.push_str(&format!("    pub fn get_{base}(&self) -> {ty} {{\n"));
    if mapped.is_enumerated {
        output.push_str(&format!(
            "        if self.{ident} == {ty}::{UNSET_VARIANT} {{\n            {fallback}\n        }} else {{\n            self.{ident}\n        }}\n"
        ));
    } else {
        output.push_str(&format!(
            "        self.{ident}.clone().unwrap_or_else(|| {fallback})\n"
        ));
    }
    output.push_str("    }\n\n");
    output
}

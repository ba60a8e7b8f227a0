//! Union type code generation.

use crate::unions::{UnionCatalog, UnionType};
use std::collections::BTreeMap;

/// Natives without `Display`, rendered with `Debug` instead.
const DEBUG_RENDERED: &[&str] = &["Binary", "YangEmpty"];

/// Generator for union type definitions.
pub struct UnionGenerator<'a> {
    catalog: &'a UnionCatalog,
}

impl<'a> UnionGenerator<'a> {
    /// Creates a new union generator.
    #[must_use]
    pub fn new(catalog: &'a UnionCatalog) -> Self {
        Self { catalog }
    }

    /// Generates every union type, keyed by name.
    #[must_use]
    pub fn generate(&self) -> BTreeMap<String, String> {
        self.catalog
            .iter()
            .map(|u| (u.name.clone(), self.generate_union(u)))
            .collect()
    }

    /// Generates one union enum with its conversions.
    #[must_use]
    pub fn generate_union(&self, union: &UnionType) -> String {
        let mut output = String::new();
        let name = &union.name;

        output.push_str(&format!("/// {name} holds one of several member types.\n"));
        output.push_str("#[allow(non_camel_case_types)]\n");
        if union.is_ordered() {
            output.push_str("#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]\n");
        } else {
            output.push_str("#[derive(Debug, Clone, PartialEq)]\n");
        }
        output.push_str(&format!("pub enum {name} {{\n"));
        for variant in &union.variants {
            output.push_str(&format!("    /// A `{}` value.\n", variant.native_type));
            output.push_str(&format!("    {}({}),\n", variant.name, variant.native_type));
        }
        output.push_str("}\n\n");

        for variant in &union.variants {
            output.push_str(&format!("impl From<{}> for {name} {{\n", variant.native_type));
            output.push_str(&format!("    fn from(value: {}) -> Self {{\n", variant.native_type));
            output.push_str(&format!("        Self::{}(value)\n", variant.name));
            output.push_str("    }\n");
            output.push_str("}\n\n");
        }

        output.push_str(&format!("impl std::fmt::Display for {name} {{\n"));
        output.push_str("    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {\n");
        output.push_str("        match self {\n");
        for variant in &union.variants {
            let spec = if DEBUG_RENDERED.contains(&variant.native_type.as_str()) {
                "{v:?}"
            } else {
                "{v}"
            };
            output.push_str(&format!(
                "            Self::{}(v) => write!(f, \"{spec}\"),\n",
                variant.name
            ));
        }
        output.push_str("        }\n");
        output.push_str("    }\n");
        output.push_str("}\n\n");

        output
    }
}

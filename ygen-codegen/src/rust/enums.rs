//! Enumerated type code generation.

use crate::enums::{EnumCatalog, EnumOrigin, EnumeratedType};
use std::collections::BTreeMap;

/// Generator for enumerated type definitions.
pub struct EnumGenerator<'a> {
    catalog: &'a EnumCatalog,
}

impl<'a> EnumGenerator<'a> {
    /// Creates a new enum generator.
    #[must_use]
    pub fn new(catalog: &'a EnumCatalog) -> Self {
        Self { catalog }
    }

    /// Generates every enumerated type, keyed by name.
    #[must_use]
    pub fn generate(&self) -> BTreeMap<String, String> {
        self.catalog
            .iter()
            .map(|e| (e.name.clone(), self.generate_enum(e)))
            .collect()
    }

    /// Generates one enum definition with its name conversions.
    #[must_use]
    pub fn generate_enum(&self, e: &EnumeratedType) -> String {
        let mut output = String::new();
        let name = &e.name;

        let origin = match e.origin {
            EnumOrigin::Enumeration => "the enumeration leaf",
            EnumOrigin::Typedef => "the enumeration typedef",
            EnumOrigin::Identity => "the identities derived from",
        };
        output.push_str(&format!("/// {name} is derived from {origin} `{}`.\n", e.yang_name));
        output.push_str("#[allow(non_camel_case_types)]\n");
        output.push_str(
            "#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]\n",
        );
        output.push_str("#[repr(i64)]\n");
        output.push_str(&format!("pub enum {name} {{\n"));
        for member in &e.members {
            if member.index == 0 {
                output.push_str("    /// No value has been set.\n");
                output.push_str("    #[default]\n");
            } else {
                output.push_str(&format!("    /// `{}`\n", member.yang_name));
            }
            output.push_str(&format!("    {} = {},\n", member.variant, member.index));
        }
        output.push_str("}\n\n");

        output.push_str(&format!("impl {name} {{\n"));
        output.push_str("    /// Returns the YANG name of the value.\n");
        output.push_str("    #[must_use]\n");
        output.push_str("    pub const fn yang_name(&self) -> &'static str {\n");
        output.push_str("        match self {\n");
        for member in &e.members {
            output.push_str(&format!(
                "            Self::{} => {:?},\n",
                member.variant, member.yang_name
            ));
        }
        output.push_str("        }\n");
        output.push_str("    }\n\n");

        output.push_str("    /// Parses a YANG name, with or without a module prefix.\n");
        output.push_str("    #[must_use]\n");
        output.push_str("    pub fn from_yang_name(name: &str) -> Option<Self> {\n");
        output.push_str("        let bare = name.rsplit_once(':').map_or(name, |(_, n)| n);\n");
        output.push_str("        match bare {\n");
        for member in e.values() {
            output.push_str(&format!(
                "            {:?} => Some(Self::{}),\n",
                member.yang_name, member.variant
            ));
        }
        output.push_str("            _ => None,\n");
        output.push_str("        }\n");
        output.push_str("    }\n");
        output.push_str("}\n\n");

        output.push_str(&format!("impl std::fmt::Display for {name} {{\n"));
        output.push_str("    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {\n");
        output.push_str("        f.write_str(self.yang_name())\n");
        output.push_str("    }\n");
        output.push_str("}\n\n");

        output
    }
}

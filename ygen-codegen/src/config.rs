//! Generator configuration.

use serde::{Deserialize, Serialize};

/// Module used to name enums generated from enumeration typedefs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TypedefEnumNaming {
    /// The module that defines the typedef.
    #[default]
    DefiningModule,
    /// The module of the first leaf using the typedef.
    LeafModule,
}

/// How leaves whose union keeps several subtypes are represented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UnionRepresentation {
    /// One enum per union leaf, named after the leaf.
    #[default]
    Wrapper,
    /// One enum per distinct subtype list, shared between leaves.
    Simplified,
}

/// Options of one generation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Elide module roots, config/state containers and list-surrounding
    /// containers from generated names.
    pub compress_paths: bool,
    /// Name of the synthetic root.
    pub fakeroot_name: String,
    /// Share one enum between inline enumerations with the same module and
    /// value names.
    pub dedup_enums: bool,
    /// Drop the module prefix from inline enum names.
    pub shorten_enum_leaf_names: bool,
    /// Naming strategy for typedef enumerations.
    pub typedef_enum_naming: TypedefEnumNaming,
    /// Representation of multi-subtype unions.
    pub union_representation: UnionRepresentation,
    /// Lists with at least this many keys get a builder path API instead of
    /// one accessor per key combination. 0 disables the builder API.
    pub list_builder_key_threshold: usize,
    /// Generate `…PathAny` types and wildcard accessors.
    pub generate_wildcard_paths: bool,
    /// Record no key table when every key of a list is wildcarded.
    pub simplify_wildcard_paths: bool,
    /// Store `ordered-by user` lists as `OrderedMap`.
    pub generate_ordered_maps: bool,
    /// Emit `get_<leaf>()` getters and `populate_defaults()`.
    pub generate_getters: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            compress_paths: true,
            fakeroot_name: "device".to_string(),
            dedup_enums: true,
            shorten_enum_leaf_names: false,
            typedef_enum_naming: TypedefEnumNaming::default(),
            union_representation: UnionRepresentation::default(),
            list_builder_key_threshold: 0,
            generate_wildcard_paths: true,
            simplify_wildcard_paths: false,
            generate_ordered_maps: true,
            generate_getters: false,
        }
    }
}

impl GeneratorConfig {
    /// Creates the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Enables or disables path compression.
    #[must_use]
    pub fn compress_paths(mut self, on: bool) -> Self {
        self.compress_paths = on;
        self
    }

    /// Sets the fakeroot name.
    #[must_use]
    pub fn fakeroot_name(mut self, name: impl Into<String>) -> Self {
        self.fakeroot_name = name.into();
        self
    }

    /// Enables or disables enum deduplication.
    #[must_use]
    pub fn dedup_enums(mut self, on: bool) -> Self {
        self.dedup_enums = on;
        self
    }

    /// Enables or disables enum leaf name shortening.
    #[must_use]
    pub fn shorten_enum_leaf_names(mut self, on: bool) -> Self {
        self.shorten_enum_leaf_names = on;
        self
    }

    /// Sets the typedef enum naming strategy.
    #[must_use]
    pub fn typedef_enum_naming(mut self, naming: TypedefEnumNaming) -> Self {
        self.typedef_enum_naming = naming;
        self
    }

    /// Sets the union representation.
    #[must_use]
    pub fn union_representation(mut self, representation: UnionRepresentation) -> Self {
        self.union_representation = representation;
        self
    }

    /// Sets the builder API key threshold.
    #[must_use]
    pub fn list_builder_key_threshold(mut self, threshold: usize) -> Self {
        self.list_builder_key_threshold = threshold;
        self
    }

    /// Enables or disables wildcard path generation.
    #[must_use]
    pub fn generate_wildcard_paths(mut self, on: bool) -> Self {
        self.generate_wildcard_paths = on;
        self
    }

    /// Enables or disables wildcard path simplification.
    #[must_use]
    pub fn simplify_wildcard_paths(mut self, on: bool) -> Self {
        self.simplify_wildcard_paths = on;
        self
    }

    /// Enables or disables ordered maps for `ordered-by user` lists.
    #[must_use]
    pub fn generate_ordered_maps(mut self, on: bool) -> Self {
        self.generate_ordered_maps = on;
        self
    }

    /// Enables or disables getter generation.
    #[must_use]
    pub fn generate_getters(mut self, on: bool) -> Self {
        self.generate_getters = on;
        self
    }
}

//! Path API planning.
//!
//! A [`PathConstructor`] decides which path accessors a directory exposes for
//! each child. Containers and leaves get a single accessor. Keyed lists get
//! one accessor per key combination, or a wildcard constructor plus one
//! mutator per key once the key count reaches the builder threshold.

use crate::config::GeneratorConfig;
use crate::names::{compose_ident, strip_raw};
use crate::ordered::ListKey;
use indexmap::IndexMap;
use ygen_schema::Field;

/// Returns every subset of `0..n` as a strictly increasing index list.
///
/// Entry 0 is the empty set and the last entry is `0..n`. Each step appends
/// a copy of all existing entries extended with the next index, so
/// `combinations(2)` is `[[], [0], [1], [0, 1]]`.
#[must_use]
pub fn combinations(n: usize) -> Vec<Vec<usize>> {
    let mut out: Vec<Vec<usize>> = vec![Vec::new()];
    for i in 0..n {
        let extended: Vec<Vec<usize>> = out
            .iter()
            .map(|entry| {
                let mut next = entry.clone();
                next.push(i);
                next
            })
            .collect();
        out.extend(extended);
    }
    out
}

/// Value of one key in a constructed path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyExpr {
    /// Taken from the named method parameter.
    Param(String),
    /// Any value.
    Wildcard,
}

/// A key parameter of an accessor or mutator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyParam {
    /// Schema key name.
    pub key: String,
    /// Parameter identifier.
    pub ident: String,
    /// Parameter type.
    pub native_type: String,
}

impl From<&ListKey> for KeyParam {
    fn from(key: &ListKey) -> Self {
        Self {
            key: key.name.clone(),
            ident: key.field_name.clone(),
            native_type: key.mapped.native_type.clone(),
        }
    }
}

/// One accessor method returning a child path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathAccessor {
    /// Method identifier.
    pub method: String,
    /// Parameters in key order.
    pub params: Vec<KeyParam>,
    /// Key name to value, in key order.
    pub keys: IndexMap<String, KeyExpr>,
    /// Schema-relative path segments from the parent, without prefixes.
    pub segments: Vec<String>,
    /// True if the returned path contains a wildcard.
    pub wildcard: bool,
}

/// A `with_<key>` mutator of a builder-style list path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyMutator {
    /// Method identifier.
    pub method: String,
    /// The key it rewrites.
    pub param: KeyParam,
}

/// Path API of one child.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathApi {
    /// One accessor per key combination, or the single accessor of a
    /// container or leaf.
    Accessors(Vec<PathAccessor>),
    /// A wildcard constructor plus one mutator per key.
    Builder {
        /// Constructor returning an all-wildcard path.
        constructor: PathAccessor,
        /// Key mutators in key order.
        mutators: Vec<KeyMutator>,
    },
}

impl PathApi {
    /// Returns the accessor methods in declaration order.
    pub fn accessors(&self) -> impl Iterator<Item = &PathAccessor> {
        match self {
            Self::Accessors(list) => list.iter(),
            Self::Builder { constructor, .. } => std::slice::from_ref(constructor).iter(),
        }
    }
}

/// Plans path accessors under a configuration.
#[derive(Debug, Clone, Copy)]
pub struct PathConstructor<'a> {
    config: &'a GeneratorConfig,
}

impl<'a> PathConstructor<'a> {
    /// Creates a constructor.
    #[must_use]
    pub fn new(config: &'a GeneratorConfig) -> Self {
        Self { config }
    }

    /// Returns true if a list with `key_count` keys uses the builder API.
    #[must_use]
    pub fn uses_builder(&self, key_count: usize) -> bool {
        let threshold = self.config.list_builder_key_threshold;
        self.config.generate_wildcard_paths && threshold != 0 && key_count >= threshold
    }

    /// Plans the accessor of a container, leaf or leaf-list child.
    #[must_use]
    pub fn node_api(&self, ident: &str, field: &Field) -> PathApi {
        PathApi::Accessors(vec![PathAccessor {
            method: ident.to_string(),
            params: Vec::new(),
            keys: IndexMap::new(),
            segments: relative_segments(field),
            wildcard: false,
        }])
    }

    /// Plans the API of a list child. Keyless lists have none.
    #[must_use]
    pub fn list_api(&self, ident: &str, field: &Field, keys: &[ListKey]) -> Option<PathApi> {
        if keys.is_empty() {
            return None;
        }
        let segments = relative_segments(field);

        if !self.config.generate_wildcard_paths {
            return Some(PathApi::Accessors(vec![accessor(
                ident.to_string(),
                keys,
                &(0..keys.len()).collect::<Vec<_>>(),
                segments,
            )]));
        }

        if self.uses_builder(keys.len()) {
            let constructor = accessor(compose_ident("", ident, "_any"), keys, &[], segments);
            return Some(PathApi::Builder {
                constructor,
                mutators: self.mutators(keys),
            });
        }

        let accessors = combinations(keys.len())
            .into_iter()
            .map(|combination| {
                let method = if combination.len() == keys.len() {
                    ident.to_string()
                } else if combination.is_empty() {
                    compose_ident("", ident, "_any")
                } else {
                    let suffix: String = keys
                        .iter()
                        .enumerate()
                        .filter(|(i, _)| !combination.contains(i))
                        .map(|(_, k)| format!("_any_{}", strip_raw(&k.field_name)))
                        .collect();
                    compose_ident("", ident, &suffix)
                };
                let mut planned = accessor(method, keys, &combination, segments.clone());
                if combination.is_empty() && self.config.simplify_wildcard_paths {
                    planned.keys.clear();
                }
                planned
            })
            .collect();
        Some(PathApi::Accessors(accessors))
    }

    /// Plans one `with_<key>` mutator per key.
    #[must_use]
    pub fn mutators(&self, keys: &[ListKey]) -> Vec<KeyMutator> {
        keys.iter()
            .map(|key| KeyMutator {
                method: compose_ident("with_", &key.field_name, ""),
                param: KeyParam::from(key),
            })
            .collect()
    }
}

/// Builds an accessor binding the keys at `given` and wildcarding the rest.
fn accessor(method: String, keys: &[ListKey], given: &[usize], segments: Vec<String>) -> PathAccessor {
    let mut params = Vec::new();
    let mut table = IndexMap::new();
    for (i, key) in keys.iter().enumerate() {
        if given.contains(&i) {
            let param = KeyParam::from(key);
            table.insert(key.name.clone(), KeyExpr::Param(param.ident.clone()));
            params.push(param);
        } else {
            table.insert(key.name.clone(), KeyExpr::Wildcard);
        }
    }
    PathAccessor {
        method,
        params,
        wildcard: given.len() < keys.len(),
        keys: table,
        segments,
    }
}

/// Splits the longest path alias of a field into prefix-free segments.
#[must_use]
pub fn relative_segments(field: &Field) -> Vec<String> {
    field
        .longest_path()
        .unwrap_or(field.name.as_str())
        .split('/')
        .filter(|s| !s.is_empty())
        .map(|s| s.rsplit_once(':').map_or(s, |(_, name)| name).to_string())
        .collect()
}

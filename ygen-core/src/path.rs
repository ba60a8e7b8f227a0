//! Schema paths with wildcard-capable list keys.
//!
//! Generated path structs wrap a [`PathNode`]. Constructors fill keys with
//! concrete values or [`KeyValue::Wildcard`]; builder methods rewrite a single
//! key in place with [`PathNode::modify_key`].

use crate::error::{Error, Result};
use indexmap::IndexMap;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Rendering of a wildcarded key value.
pub const WILDCARD: &str = "*";

/// Value of one list key inside a path element.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum KeyValue {
    /// Matches any key value.
    Wildcard,
    /// A concrete key value in its canonical string form.
    Value(String),
}

impl KeyValue {
    /// Returns true if the value is a wildcard.
    #[must_use]
    pub const fn is_wildcard(&self) -> bool {
        matches!(self, Self::Wildcard)
    }
}

impl fmt::Display for KeyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Wildcard => f.write_str(WILDCARD),
            Self::Value(v) => f.write_str(v),
        }
    }
}

/// One element of a schema path, with its list keys in schema order.
#[derive(Debug, Clone)]
pub struct PathElem {
    /// Schema node name.
    pub name: String,
    keys: IndexMap<String, KeyValue>,
}

// Key order is part of a path's identity.
impl PartialEq for PathElem {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.keys.len() == other.keys.len()
            && self.keys.iter().eq(other.keys.iter())
    }
}

impl Eq for PathElem {}

impl Hash for PathElem {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
        self.keys.len().hash(state);
        for (key, value) in &self.keys {
            key.hash(state);
            value.hash(state);
        }
    }
}

impl PathElem {
    /// Creates an element without keys.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            keys: IndexMap::new(),
        }
    }

    /// Adds a key in schema order.
    #[must_use]
    pub fn with_key(mut self, key: impl Into<String>, value: KeyValue) -> Self {
        self.keys.insert(key.into(), value);
        self
    }

    /// Returns the value of `key`.
    #[must_use]
    pub fn key(&self, key: &str) -> Option<&KeyValue> {
        self.keys.get(key)
    }

    /// Returns the keys in schema order.
    pub fn keys(&self) -> impl Iterator<Item = (&str, &KeyValue)> {
        self.keys.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Returns true if any key is wildcarded.
    #[must_use]
    pub fn has_wildcard(&self) -> bool {
        self.keys.values().any(KeyValue::is_wildcard)
    }
}

impl fmt::Display for PathElem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        for (key, value) in &self.keys {
            write!(f, "[{key}={value}]")?;
        }
        Ok(())
    }
}

/// A path from the root of a generated model to one node.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct PathNode {
    elems: Vec<PathElem>,
}

impl PathNode {
    /// Creates the root path.
    #[must_use]
    pub fn root() -> Self {
        Self::default()
    }

    /// Returns a child path extended with `elems`.
    #[must_use]
    pub fn child(&self, elems: impl IntoIterator<Item = PathElem>) -> Self {
        let mut next = self.clone();
        next.elems.extend(elems);
        next
    }

    /// Rewrites one key of the last element in place.
    ///
    /// # Errors
    /// Returns [`Error::EmptyPath`] on the root path and
    /// [`Error::UnknownPathKey`] if the last element has no such key.
    pub fn modify_key(&mut self, key: &str, value: KeyValue) -> Result<()> {
        let elem = self.elems.last_mut().ok_or(Error::EmptyPath)?;
        let Some(slot) = elem.keys.get_mut(key) else {
            return Err(Error::UnknownPathKey {
                element: elem.name.clone(),
                key: key.to_string(),
            });
        };
        *slot = value;
        Ok(())
    }

    /// Returns the path elements.
    #[must_use]
    pub fn elems(&self) -> &[PathElem] {
        &self.elems
    }

    /// Returns true if any element carries a wildcard key.
    #[must_use]
    pub fn is_wildcard(&self) -> bool {
        self.elems.iter().any(PathElem::has_wildcard)
    }
}

impl fmt::Display for PathNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.elems.is_empty() {
            return f.write_str("/");
        }
        for elem in &self.elems {
            write!(f, "/{elem}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn interface_any() -> PathNode {
        PathNode::root().child([
            PathElem::new("interfaces"),
            PathElem::new("interface").with_key("name", KeyValue::Wildcard),
        ])
    }

    #[test]
    fn test_display_wildcard_path() {
        assert_eq!(interface_any().to_string(), "/interfaces/interface[name=*]");
        assert!(interface_any().is_wildcard());
        assert_eq!(PathNode::root().to_string(), "/");
    }

    #[test]
    fn test_modify_key_in_place() {
        let mut path = interface_any();
        path.modify_key("name", KeyValue::Value("eth0".to_string()))
            .unwrap();
        assert_eq!(path.to_string(), "/interfaces/interface[name=eth0]");
        assert!(!path.is_wildcard());
    }

    #[test]
    fn test_modify_unknown_key() {
        let mut path = interface_any();
        let err = path
            .modify_key("id", KeyValue::Value("1".to_string()))
            .unwrap_err();
        assert!(matches!(err, Error::UnknownPathKey { .. }));

        let mut root = PathNode::root();
        assert_eq!(
            root.modify_key("name", KeyValue::Wildcard),
            Err(Error::EmptyPath)
        );
    }

    #[test]
    fn test_key_order_preserved() {
        let elem = PathElem::new("neighbor")
            .with_key("afi", KeyValue::Wildcard)
            .with_key("address", KeyValue::Value("10.0.0.1".to_string()));
        let names: Vec<_> = elem.keys().map(|(k, _)| k).collect();
        assert_eq!(names, vec!["afi", "address"]);
        assert_eq!(elem.to_string(), "neighbor[afi=*][address=10.0.0.1]");
    }

    #[test]
    fn test_key_order_is_part_of_identity() {
        let forward = PathElem::new("neighbor")
            .with_key("afi", KeyValue::Wildcard)
            .with_key("address", KeyValue::Wildcard);
        let backward = PathElem::new("neighbor")
            .with_key("address", KeyValue::Wildcard)
            .with_key("afi", KeyValue::Wildcard);
        assert_ne!(forward, backward);

        let mut path = PathNode::root().child([forward.clone()]);
        path.modify_key("afi", KeyValue::Value("ipv4".to_string()))
            .unwrap();
        let names: Vec<_> = path.elems()[0].keys().map(|(k, _)| k).collect();
        assert_eq!(names, vec!["afi", "address"]);
        assert_eq!(path.elems()[0].key("afi"), Some(&KeyValue::Value("ipv4".to_string())));
    }
}

//! Marker types for YANG built-ins without a natural Rust counterpart.
//!
//! `empty` and `binary` leaves get dedicated types so that a generated model
//! can tell them apart from a `boolean` leaf or a leaf-list of `uint8`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Value of a YANG `empty` leaf: `true` when the leaf is present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct YangEmpty(pub bool);

impl YangEmpty {
    /// Returns true if the leaf is present.
    #[must_use]
    pub const fn is_set(&self) -> bool {
        self.0
    }
}

/// Value of a YANG `binary` leaf.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct Binary(pub Vec<u8>);

impl Binary {
    /// Returns the raw bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Returns the number of bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if no bytes are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<u8>> for Binary {
    fn from(value: Vec<u8>) -> Self {
        Self(value)
    }
}

impl From<&[u8]> for Binary {
    fn from(value: &[u8]) -> Self {
        Self(value.to_vec())
    }
}

/// Placeholder for leaves whose YANG type has no typed mapping
/// (`bits`, `instance-identifier`, unknown built-ins).
///
/// The lexical value is kept as-is.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct Untyped(pub String);

impl Untyped {
    /// Returns the lexical value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Untyped {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for Untyped {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_yang_empty_default_unset() {
        assert!(!YangEmpty::default().is_set());
        assert!(YangEmpty(true).is_set());
    }

    #[test]
    fn test_binary_is_not_a_plain_vec() {
        let bin = Binary::from(&[1u8, 2, 3][..]);
        assert_eq!(bin.len(), 3);
        assert_eq!(bin.as_bytes(), &[1, 2, 3]);
        assert!(Binary::default().is_empty());
    }

    #[test]
    fn test_untyped_keeps_lexical_value() {
        let value = Untyped::from("flag-a flag-b");
        assert_eq!(value.as_str(), "flag-a flag-b");
        assert_eq!(value.to_string(), "flag-a flag-b");
    }

    #[test]
    fn test_marker_serde() {
        let json = serde_json::to_string(&YangEmpty(true)).unwrap();
        assert_eq!(json, "true");
        let back: Binary = serde_json::from_str("[7,8]").unwrap();
        assert_eq!(back, Binary(vec![7, 8]));
    }
}

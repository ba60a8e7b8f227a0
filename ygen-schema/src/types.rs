//! YANG type records.
//!
//! A [`YangType`] describes the type of a leaf as the front end resolved it:
//! the built-in kind, the typedef name when the type is derived, and every
//! restriction needed to map the type and validate default values.

use serde::{Deserialize, Serialize};

/// YANG built-in type kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum YangKind {
    /// Signed 8-bit integer.
    Int8,
    /// Signed 16-bit integer.
    Int16,
    /// Signed 32-bit integer.
    Int32,
    /// Signed 64-bit integer.
    Int64,
    /// Unsigned 8-bit integer.
    Uint8,
    /// Unsigned 16-bit integer.
    Uint16,
    /// Unsigned 32-bit integer.
    Uint32,
    /// Unsigned 64-bit integer.
    Uint64,
    /// Boolean.
    Boolean,
    /// String.
    String,
    /// Fixed-point decimal number.
    Decimal64,
    /// Leaf without a value.
    Empty,
    /// Base64 encoded binary data.
    Binary,
    /// Enumeration.
    Enumeration,
    /// Reference to an identity derived from a base identity.
    Identityref,
    /// Reference to another leaf.
    Leafref,
    /// Union of member types.
    Union,
    /// Set of named bits.
    Bits,
    /// Instance identifier.
    InstanceIdentifier,
    /// Anything the front end could not classify.
    Unknown,
}

impl YangKind {
    /// Parses a kind from its YANG built-in type name.
    #[must_use]
    pub fn from_yang_name(name: &str) -> Option<Self> {
        Some(match name {
            "int8" => Self::Int8,
            "int16" => Self::Int16,
            "int32" => Self::Int32,
            "int64" => Self::Int64,
            "uint8" => Self::Uint8,
            "uint16" => Self::Uint16,
            "uint32" => Self::Uint32,
            "uint64" => Self::Uint64,
            "boolean" => Self::Boolean,
            "string" => Self::String,
            "decimal64" => Self::Decimal64,
            "empty" => Self::Empty,
            "binary" => Self::Binary,
            "enumeration" => Self::Enumeration,
            "identityref" => Self::Identityref,
            "leafref" => Self::Leafref,
            "union" => Self::Union,
            "bits" => Self::Bits,
            "instance-identifier" => Self::InstanceIdentifier,
            _ => return None,
        })
    }

    /// Returns the YANG built-in type name.
    #[must_use]
    pub const fn yang_name(&self) -> &'static str {
        match self {
            Self::Int8 => "int8",
            Self::Int16 => "int16",
            Self::Int32 => "int32",
            Self::Int64 => "int64",
            Self::Uint8 => "uint8",
            Self::Uint16 => "uint16",
            Self::Uint32 => "uint32",
            Self::Uint64 => "uint64",
            Self::Boolean => "boolean",
            Self::String => "string",
            Self::Decimal64 => "decimal64",
            Self::Empty => "empty",
            Self::Binary => "binary",
            Self::Enumeration => "enumeration",
            Self::Identityref => "identityref",
            Self::Leafref => "leafref",
            Self::Union => "union",
            Self::Bits => "bits",
            Self::InstanceIdentifier => "instance-identifier",
            Self::Unknown => "unknown",
        }
    }

    /// Returns the inclusive value bounds of an integer kind.
    #[must_use]
    pub const fn int_bounds(&self) -> Option<(i128, i128)> {
        match self {
            Self::Int8 => Some((i8::MIN as i128, i8::MAX as i128)),
            Self::Int16 => Some((i16::MIN as i128, i16::MAX as i128)),
            Self::Int32 => Some((i32::MIN as i128, i32::MAX as i128)),
            Self::Int64 => Some((i64::MIN as i128, i64::MAX as i128)),
            Self::Uint8 => Some((0, u8::MAX as i128)),
            Self::Uint16 => Some((0, u16::MAX as i128)),
            Self::Uint32 => Some((0, u32::MAX as i128)),
            Self::Uint64 => Some((0, u64::MAX as i128)),
            _ => None,
        }
    }

    /// Returns true for the integer kinds.
    #[must_use]
    pub const fn is_integer(&self) -> bool {
        self.int_bounds().is_some()
    }
}

/// One interval of a `range` restriction, kept in lexical form.
///
/// `None` bounds stand for `min`/`max` of the base type.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Range {
    /// Lower bound.
    pub min: Option<String>,
    /// Upper bound.
    pub max: Option<String>,
}

impl Range {
    /// Creates a range from lexical bounds.
    #[must_use]
    pub fn new(min: Option<&str>, max: Option<&str>) -> Self {
        Self {
            min: min.map(str::to_string),
            max: max.map(str::to_string),
        }
    }
}

/// One interval of a `length` restriction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LengthRange {
    /// Minimum length.
    pub min: u64,
    /// Maximum length, `None` for unbounded.
    pub max: Option<u64>,
}

impl LengthRange {
    /// Returns true if `len` lies within the interval.
    #[must_use]
    pub fn contains(&self, len: u64) -> bool {
        len >= self.min && self.max.is_none_or(|max| len <= max)
    }
}

/// One member of an enumeration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumValue {
    /// YANG enum name.
    pub name: String,
    /// Explicit `value` statement, if any.
    #[serde(default)]
    pub value: Option<i64>,
}

impl EnumValue {
    /// Creates an enum member without an explicit value.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: None,
        }
    }
}

/// An identity derived from a base identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityValue {
    /// Identity name.
    pub name: String,
    /// Module defining the identity.
    pub module: String,
}

/// A base identity and every identity derived from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Base identity name.
    pub name: String,
    /// Module defining the base identity.
    pub module: String,
    /// Derived identities.
    #[serde(default)]
    pub values: Vec<IdentityValue>,
}

impl Identity {
    /// Creates a base identity.
    #[must_use]
    pub fn new(name: impl Into<String>, module: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            module: module.into(),
            values: Vec::new(),
        }
    }

    /// Adds a derived identity.
    #[must_use]
    pub fn with_value(mut self, name: impl Into<String>, module: impl Into<String>) -> Self {
        self.values.push(IdentityValue {
            name: name.into(),
            module: module.into(),
        });
        self
    }
}

/// Type of a leaf or leaf-list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YangType {
    /// Type name as written: a built-in name or a typedef name.
    pub name: String,
    /// Built-in kind the type is derived from.
    pub kind: YangKind,
    /// Module defining the typedef.
    #[serde(default)]
    pub module: Option<String>,
    /// Default declared on the typedef.
    #[serde(default)]
    pub default: Option<String>,
    /// `range` restriction intervals.
    #[serde(default)]
    pub ranges: Vec<Range>,
    /// `length` restriction intervals.
    #[serde(default)]
    pub lengths: Vec<LengthRange>,
    /// `pattern` restrictions, all of which must match.
    #[serde(default)]
    pub patterns: Vec<String>,
    /// `fraction-digits` of a decimal64.
    #[serde(default)]
    pub fraction_digits: Option<u8>,
    /// Members of an enumeration.
    #[serde(default)]
    pub enum_values: Vec<EnumValue>,
    /// Base identity of an identityref.
    #[serde(default)]
    pub identity: Option<Identity>,
    /// Target path of a leafref.
    #[serde(default)]
    pub path: Option<String>,
    /// Member types of a union, in declaration order.
    #[serde(default)]
    pub union_types: Vec<YangType>,
}

impl YangType {
    /// Creates an unrestricted built-in type.
    #[must_use]
    pub fn new(kind: YangKind) -> Self {
        Self {
            name: kind.yang_name().to_string(),
            kind,
            module: None,
            default: None,
            ranges: Vec::new(),
            lengths: Vec::new(),
            patterns: Vec::new(),
            fraction_digits: None,
            enum_values: Vec::new(),
            identity: None,
            path: None,
            union_types: Vec::new(),
        }
    }

    /// Creates an enumeration with the given member names.
    #[must_use]
    pub fn enumeration<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut ty = Self::new(YangKind::Enumeration);
        ty.enum_values = names.into_iter().map(EnumValue::new).collect();
        ty
    }

    /// Creates an identityref to the given base identity.
    #[must_use]
    pub fn identityref(identity: Identity) -> Self {
        let mut ty = Self::new(YangKind::Identityref);
        ty.identity = Some(identity);
        ty
    }

    /// Creates a leafref to the given path.
    #[must_use]
    pub fn leafref(path: impl Into<String>) -> Self {
        let mut ty = Self::new(YangKind::Leafref);
        ty.path = Some(path.into());
        ty
    }

    /// Creates a union of the given member types.
    #[must_use]
    pub fn union(members: Vec<YangType>) -> Self {
        let mut ty = Self::new(YangKind::Union);
        ty.union_types = members;
        ty
    }

    /// Marks the type as a typedef defined in `module`.
    #[must_use]
    pub fn typedef(mut self, name: impl Into<String>, module: impl Into<String>) -> Self {
        self.name = name.into();
        self.module = Some(module.into());
        self
    }

    /// Sets the typedef default.
    #[must_use]
    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.default = Some(default.into());
        self
    }

    /// Adds a range interval.
    #[must_use]
    pub fn with_range(mut self, min: Option<&str>, max: Option<&str>) -> Self {
        self.ranges.push(Range::new(min, max));
        self
    }

    /// Adds a length interval.
    #[must_use]
    pub fn with_length(mut self, min: u64, max: Option<u64>) -> Self {
        self.lengths.push(LengthRange { min, max });
        self
    }

    /// Adds a pattern.
    #[must_use]
    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.patterns.push(pattern.into());
        self
    }

    /// Sets the fraction digits.
    #[must_use]
    pub fn with_fraction_digits(mut self, digits: u8) -> Self {
        self.fraction_digits = Some(digits);
        self
    }

    /// Returns true if the type is a typedef rather than a built-in.
    #[must_use]
    pub fn is_typedef(&self) -> bool {
        YangKind::from_yang_name(&self.name).is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_name_round_trip() {
        for kind in [
            YangKind::Int8,
            YangKind::Uint64,
            YangKind::Decimal64,
            YangKind::Identityref,
            YangKind::InstanceIdentifier,
        ] {
            assert_eq!(YangKind::from_yang_name(kind.yang_name()), Some(kind));
        }
        assert_eq!(YangKind::from_yang_name("counter64"), None);
    }

    #[test]
    fn test_int_bounds() {
        assert_eq!(YangKind::Uint8.int_bounds(), Some((0, 255)));
        assert_eq!(YangKind::Int16.int_bounds(), Some((-32768, 32767)));
        assert!(YangKind::String.int_bounds().is_none());
        assert!(YangKind::Uint64.is_integer());
    }

    #[test]
    fn test_typedef_detection() {
        assert!(!YangType::new(YangKind::String).is_typedef());
        let ty = YangType::new(YangKind::Uint64).typedef("counter64", "ietf-yang-types");
        assert!(ty.is_typedef());
        assert_eq!(ty.module.as_deref(), Some("ietf-yang-types"));
    }

    #[test]
    fn test_length_range_contains() {
        let range = LengthRange { min: 1, max: Some(3) };
        assert!(range.contains(1));
        assert!(range.contains(3));
        assert!(!range.contains(0));
        assert!(LengthRange { min: 2, max: None }.contains(1000));
    }

    #[test]
    fn test_kind_serde_is_kebab_case() {
        let json = serde_json::to_string(&YangKind::InstanceIdentifier).unwrap();
        assert_eq!(json, "\"instance-identifier\"");
    }
}

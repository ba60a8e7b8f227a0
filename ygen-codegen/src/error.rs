//! Error types for code generation.

use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Classification of a generation error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ErrorKind {
    /// The IR references a path, field or key it does not contain.
    /// Aborts the whole run.
    SchemaInconsistency,
    /// A schema shape that is deliberately unsupported, such as a binary
    /// list key.
    UnsupportedConstruct,
    /// A default value does not parse or validate against its type.
    ValueConversion,
    /// A generated identifier could not be made unique.
    NamingConflict,
    /// A leafref target is missing, a reference chain is cyclic or too deep,
    /// or a type record lacks the information its kind needs.
    TypeResolution,
}

/// Error resolving the type or default of one leaf.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypeError {
    /// A leafref path does not lead to a leaf.
    #[error("leafref '{target}' from '{leaf}' does not resolve to a leaf")]
    LeafrefTarget {
        /// Leaf holding the reference.
        leaf: String,
        /// Referenced path as written.
        target: String,
    },

    /// A leafref chain comes back to a leaf already on the chain.
    #[error("cyclic leafref reference through '{path}'")]
    CyclicReference {
        /// First leaf seen twice.
        path: String,
    },

    /// Resolution went deeper than the allowed bound.
    #[error("type resolution of '{leaf}' exceeds depth {depth}")]
    DepthExceeded {
        /// Leaf being resolved.
        leaf: String,
        /// Depth bound.
        depth: usize,
    },

    /// A type record lacks information its kind requires.
    #[error("{kind} type of '{leaf}' carries no {missing}")]
    IncompleteType {
        /// Leaf being resolved.
        leaf: String,
        /// YANG type kind.
        kind: String,
        /// Missing information.
        missing: String,
    },

    /// A default value does not fit its type.
    #[error("invalid default '{value}' for '{leaf}' of type {type_name}: {reason}")]
    InvalidDefault {
        /// Leaf path.
        leaf: String,
        /// Default as written.
        value: String,
        /// YANG type name.
        type_name: String,
        /// Why the value was rejected.
        reason: String,
    },
}

impl TypeError {
    /// Creates an incomplete type error.
    pub fn incomplete(
        leaf: impl Into<String>,
        kind: impl Into<String>,
        missing: impl Into<String>,
    ) -> Self {
        Self::IncompleteType {
            leaf: leaf.into(),
            kind: kind.into(),
            missing: missing.into(),
        }
    }

    /// Returns the error classification.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidDefault { .. } => ErrorKind::ValueConversion,
            _ => ErrorKind::TypeResolution,
        }
    }
}

/// Error type for code generation operations.
#[derive(Debug, Error)]
pub enum CodegenError {
    /// IR document parsing error.
    #[error("schema parse error: {0}")]
    Parse(#[from] ygen_schema::ParseError),

    /// Inconsistent IR.
    #[error("schema error: {0}")]
    Schema(#[from] ygen_schema::SchemaError),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Type or default resolution failed for one leaf.
    #[error("leaf '{path}': {source}")]
    Type {
        /// Leaf path.
        path: String,
        /// Underlying error.
        #[source]
        source: TypeError,
    },

    /// Lists keyed by a binary type, directly or through a union.
    #[error("lists with binary-typed keys are unsupported: {}", .paths.join(", "))]
    BinaryListKeys {
        /// Paths of every offending list.
        paths: Vec<String>,
    },

    /// No unique identifier could be found.
    #[error("cannot find a unique name for '{name}' after {attempts} attempts")]
    NamingConflict {
        /// Base name.
        name: String,
        /// Number of suffixes tried.
        attempts: usize,
    },

    /// Code generation error.
    #[error("generation error: {message}")]
    Generation {
        /// Error message.
        message: String,
    },
}

impl CodegenError {
    /// Creates a generation error with the given message.
    pub fn generation(message: impl Into<String>) -> Self {
        Self::Generation {
            message: message.into(),
        }
    }

    /// Wraps a type error for the leaf at `path`.
    pub fn type_error(path: impl Into<String>, source: TypeError) -> Self {
        Self::Type {
            path: path.into(),
            source,
        }
    }

    /// Returns the error classification.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Parse(_) | Self::Schema(_) | Self::Io(_) | Self::Generation { .. } => {
                ErrorKind::SchemaInconsistency
            }
            Self::Type { source, .. } => source.kind(),
            Self::BinaryListKeys { .. } => ErrorKind::UnsupportedConstruct,
            Self::NamingConflict { .. } => ErrorKind::NamingConflict,
        }
    }
}

/// Per-node errors collected during one generation run.
#[derive(Debug, Default)]
pub struct ErrorList(Vec<CodegenError>);

impl ErrorList {
    /// Creates an empty list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an error.
    pub fn push(&mut self, error: CodegenError) {
        self.0.push(error);
    }

    /// Returns true if no error was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the number of recorded errors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns the recorded errors in the order they occurred.
    pub fn iter(&self) -> impl Iterator<Item = &CodegenError> {
        self.0.iter()
    }

    /// Returns the recorded errors of one kind.
    pub fn of_kind(&self, kind: ErrorKind) -> impl Iterator<Item = &CodegenError> {
        self.0.iter().filter(move |e| e.kind() == kind)
    }
}

impl fmt::Display for ErrorList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, error) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{error}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ErrorList {}

impl IntoIterator for ErrorList {
    type Item = CodegenError;
    type IntoIter = std::vec::IntoIter<CodegenError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        let err = CodegenError::BinaryListKeys {
            paths: vec!["/m/a".to_string(), "/m/b".to_string()],
        };
        assert_eq!(err.kind(), ErrorKind::UnsupportedConstruct);
        assert_eq!(
            err.to_string(),
            "lists with binary-typed keys are unsupported: /m/a, /m/b"
        );

        let err = CodegenError::type_error(
            "/m/x",
            TypeError::InvalidDefault {
                leaf: "/m/x".to_string(),
                value: "0b1".to_string(),
                type_name: "uint8".to_string(),
                reason: "binary literals are not allowed".to_string(),
            },
        );
        assert_eq!(err.kind(), ErrorKind::ValueConversion);

        let err = CodegenError::from(ygen_schema::SchemaError::unknown_node("/m/y"));
        assert_eq!(err.kind(), ErrorKind::SchemaInconsistency);
    }

    #[test]
    fn test_error_list_display() {
        let mut list = ErrorList::new();
        assert!(list.is_empty());
        list.push(CodegenError::generation("first"));
        list.push(CodegenError::NamingConflict {
            name: "A".to_string(),
            attempts: 3,
        });
        assert_eq!(list.len(), 2);
        assert_eq!(list.of_kind(ErrorKind::NamingConflict).count(), 1);
        assert_eq!(
            list.to_string(),
            "generation error: first; cannot find a unique name for 'A' after 3 attempts"
        );
    }
}

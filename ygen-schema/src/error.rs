//! Error types for IR loading and validation.

use thiserror::Error;

/// Error type for loading an IR document.
#[derive(Debug, Error)]
pub enum ParseError {
    /// JSON decoding error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Error type for an inconsistent IR: a path, field or key is referenced but
/// absent from the provided maps.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// Schema node not found in the arena.
    #[error("schema node '{path}' not found")]
    UnknownNode {
        /// Node path.
        path: String,
    },

    /// A node names a parent that is not in the arena.
    #[error("parent '{parent}' of schema node '{path}' not found")]
    UnknownParent {
        /// Node path.
        path: String,
        /// Missing parent path.
        parent: String,
    },

    /// A node path was added twice.
    #[error("duplicate schema node '{path}'")]
    DuplicateNode {
        /// Node path.
        path: String,
    },

    /// Directory not found.
    #[error("directory '{path}' referenced by '{referenced_by}' not found")]
    UnknownDirectory {
        /// Directory path.
        path: String,
        /// Referencing directory or field.
        referenced_by: String,
    },

    /// Field not found in a directory.
    #[error("field '{field}' not found in directory '{directory}'")]
    UnknownField {
        /// Directory path.
        directory: String,
        /// Field name.
        field: String,
    },

    /// List key not found among the directory's leaf fields.
    #[error("list key '{key}' of '{directory}' is not a leaf field")]
    UnknownKey {
        /// Directory path.
        directory: String,
        /// Key name.
        key: String,
    },

    /// Field kind disagrees with the schema node it points at.
    #[error("field '{field}' in '{directory}' is a {declared} but node '{node}' is a {actual}")]
    FieldKindMismatch {
        /// Directory path.
        directory: String,
        /// Field name.
        field: String,
        /// Schema node path.
        node: String,
        /// Declared field kind.
        declared: String,
        /// Actual node kind.
        actual: String,
    },

    /// A leaf or leaf-list node carries no type.
    #[error("leaf '{path}' has no type")]
    MissingLeafType {
        /// Leaf path.
        path: String,
    },

    /// Validation error.
    #[error("validation error: {message}")]
    Validation {
        /// Error message.
        message: String,
    },
}

impl SchemaError {
    /// Creates an unknown node error.
    pub fn unknown_node(path: impl Into<String>) -> Self {
        Self::UnknownNode { path: path.into() }
    }

    /// Creates an unknown directory error.
    pub fn unknown_directory(path: impl Into<String>, referenced_by: impl Into<String>) -> Self {
        Self::UnknownDirectory {
            path: path.into(),
            referenced_by: referenced_by.into(),
        }
    }

    /// Creates a validation error with the given message.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }
}

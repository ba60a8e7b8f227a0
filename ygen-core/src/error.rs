//! Error types for ygen runtime operations.

use thiserror::Error;

/// Core error type for operations on generated models.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// An element with the same key is already present in an ordered list.
    #[error("duplicate key {key} in ordered list")]
    DuplicateKey {
        /// Debug rendering of the duplicate key.
        key: String,
    },

    /// An element was appended while one of its key fields was unset.
    #[error("cannot append element with unset key field(s)")]
    MissingKey,

    /// A path element has no key with the given name.
    #[error("path element '{element}' has no key '{key}'")]
    UnknownPathKey {
        /// Name of the path element.
        element: String,
        /// Requested key name.
        key: String,
    },

    /// The path has no elements to operate on.
    #[error("path is empty")]
    EmptyPath,
}

/// Result type alias for ygen core operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::DuplicateKey {
            key: "\"eth0\"".to_string(),
        };
        assert_eq!(err.to_string(), "duplicate key \"eth0\" in ordered list");

        let err = Error::UnknownPathKey {
            element: "interface".to_string(),
            key: "id".to_string(),
        };
        assert!(err.to_string().contains("no key 'id'"));
    }
}

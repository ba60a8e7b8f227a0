//! # ygen Core
//!
//! Runtime types shared by every model generated from a YANG schema.
//!
//! This crate provides:
//! - Marker types for YANG `empty`, `binary` and untyped leaves
//! - An insertion-ordered, key-addressed collection for `ordered-by user` lists
//! - Path nodes with wildcard-capable list keys used by generated path APIs
//! - Error types for collection and path operations

pub mod error;
pub mod ordered_map;
pub mod path;
pub mod types;

pub use error::{Error, Result};
pub use ordered_map::{KeyedEntry, OptionalOrderedMap, OrderedMap};
pub use path::{KeyValue, PathElem, PathNode, WILDCARD};
pub use types::{Binary, Untyped, YangEmpty};

//! Error types for document building and rendering.

use crate::value::Kind;
use thiserror::Error;

/// Errors that can occur while building or rendering a document.
#[derive(Error, Debug)]
pub enum ConfError {
    /// A path segment needed to descend into a map but found something else.
    #[error("{path}: expected map, found {found}")]
    ExpectedMap { path: String, found: Kind },

    /// A bracketed segment needed an array but found something else.
    #[error("{path}: expected array, found {found}")]
    ExpectedArray { path: String, found: Kind },

    /// The same terminal path was defined twice.
    #[error("{path}: duplicate key/value, already {existing}, cannot also be {incoming}")]
    DuplicateKey {
        path: String,
        existing: Kind,
        incoming: Kind,
    },

    /// A bracket held something other than a non-negative integer.
    #[error("found non-number {token:?} in array index of {path}")]
    NonNumericIndex { path: String, token: String },

    /// A bracketed index beyond [`MAX_INDEX`](crate::path::MAX_INDEX).
    #[error("array index {index} in {path} exceeds the limit of {max}")]
    IndexTooLarge {
        path: String,
        index: String,
        max: usize,
    },

    /// TOML arrays must hold a single element type.
    #[error("TOML arrays can't have mixed data types: {path}")]
    MixedArray { path: String },

    /// TOML has no way to spell null.
    #[error("TOML has no null type: {path}")]
    UnsupportedNull { path: String },

    /// The requested output format is not one of json, yaml, toml.
    #[error("unknown output format '{0}' (expected json, yaml, or toml)")]
    UnknownFormat(String),

    /// A key/value pair could not be applied to the document.
    #[error("failed parsing {key}={value}")]
    Pair {
        key: String,
        value: String,
        #[source]
        source: Box<ConfError>,
    },

    /// serde_json refused the document.
    #[error("JSON encode error: {0}")]
    Json(#[from] serde_json::Error),

    /// serde_yaml refused the document.
    #[error("YAML encode error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Convenience alias used throughout env2conf-core.
pub type Result<T> = std::result::Result<T, ConfError>;

impl ConfError {
    /// The innermost error, looking through `Pair` wrappers.
    pub fn root_cause(&self) -> &ConfError {
        match self {
            ConfError::Pair { source, .. } => source.root_cause(),
            other => other,
        }
    }
}

//! Error types for the loader framework

use nodal_value::ValueError;
use thiserror::Error;

/// Result type for loader operations
pub type Result<T> = std::result::Result<T, LoaderError>;

/// Errors that can occur while moving node state in or out of a handler
#[derive(Debug, Error)]
pub enum LoaderError {
    /// A stored value does not convert to the property's type
    #[error("property '{property}' has an incompatible stored value: {source}")]
    PropertyTypeMismatch {
        property: String,
        #[source]
        source: ValueError,
    },

    /// A property value read from a node has no external representation
    #[error("property '{property}' cannot be stored: {source}")]
    Unrepresentable {
        property: String,
        #[source]
        source: ValueError,
    },

    /// Class name not found in the registry
    #[error("unknown node kind '{0}'")]
    UnknownNodeKind(String),

    /// A loader was handed a node of another kind
    #[error("loader '{loader}' cannot handle a node of type '{found}'")]
    InvalidDowncast {
        loader: &'static str,
        found: &'static str,
    },

    /// Class name registered twice
    #[error("node kind '{0}' is already registered")]
    DuplicateNodeKind(String),

    /// No loader produces nodes of this concrete type
    #[error("no loader registered for node type '{0}'")]
    UnregisteredNodeType(&'static str),

    /// Scene file written by a newer format version
    #[error("unsupported scene format version {found} (newest supported is {supported})")]
    UnsupportedVersion { found: u32, supported: u32 },

    /// Invalid configuration
    #[error("invalid configuration: {0}")]
    Config(String),

    /// JSON encode/decode error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl LoaderError {
    /// Create a property type mismatch error
    pub fn property_mismatch(property: impl Into<String>, source: ValueError) -> Self {
        LoaderError::PropertyTypeMismatch {
            property: property.into(),
            source,
        }
    }

    /// Name of the property a per-property failure refers to
    pub fn property_name(&self) -> Option<&str> {
        match self {
            LoaderError::PropertyTypeMismatch { property, .. } | LoaderError::Unrepresentable { property, .. } => {
                Some(property)
            }
            _ => None,
        }
    }

    /// True for failures scoped to a single property
    pub fn is_property_error(&self) -> bool {
        matches!(
            self,
            LoaderError::PropertyTypeMismatch { .. } | LoaderError::Unrepresentable { .. }
        )
    }
}

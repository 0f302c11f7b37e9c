//! Error taxonomy
//!
//! Every failure is reported to the caller immediately; nothing here is
//! retried or swallowed.

use domkit_dom::{DomError, SelectorError, StorageError};

/// Result type for helper operations
pub type Result<T> = std::result::Result<T, Error>;

/// Helper errors
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Selector, attribute, data key or node absent
    #[error("not found: {0}")]
    NotFound(String),

    /// Wrong shape or value passed in
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Persisted store content is not valid JSON or is not a mapping
    #[error("corrupt data in store {name:?}: {reason}")]
    CorruptData {
        name: String,
        reason: String,
        #[source]
        source: Option<serde_json::Error>,
    },

    /// Sibling-relative insertion against a root or detached node
    #[error("node has no parent")]
    NoParent,

    /// Host storage failed to persist
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl Error {
    pub(crate) fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound(what.into())
    }

    pub(crate) fn invalid(what: impl Into<String>) -> Self {
        Self::InvalidArgument(what.into())
    }

    pub(crate) fn corrupt(name: &str, reason: impl Into<String>, source: Option<serde_json::Error>) -> Self {
        Self::CorruptData {
            name: name.to_string(),
            reason: reason.into(),
            source,
        }
    }

    /// Whether this is a `NotFound`
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// Whether this is a `CorruptData`
    pub fn is_corrupt(&self) -> bool {
        matches!(self, Self::CorruptData { .. })
    }
}

impl From<SelectorError> for Error {
    fn from(err: SelectorError) -> Self {
        Self::InvalidArgument(err.to_string())
    }
}

impl From<DomError> for Error {
    fn from(err: DomError) -> Self {
        match err {
            DomError::NotFound(id) => Self::NotFound(format!("node {id}")),
            DomError::NotAChild { .. } => Self::NoParent,
            other => Self::InvalidArgument(other.to_string()),
        }
    }
}

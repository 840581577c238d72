//! Error types for graph construction and ordering.

use crate::sorter::SortError;

/// Errors from dependency graph operations.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum GraphError {
    /// The merge hierarchy contains a cycle. The chain lists the documents
    /// along the cycle, ending where it started.
    #[error("cyclic dependency: {}", .cycle.join(" -> "))]
    CyclicDependency {
        /// The documents forming the cycle, in visitation order.
        cycle: Vec<String>,
    },

    /// A dependency edge points at a document that was never registered.
    #[error("document '{from}' depends on unregistered document '{to}'")]
    UnknownDependency {
        /// The document holding the dangling edge.
        from: String,
        /// The missing dependency.
        to: String,
    },

    /// Attempted to register the same document twice.
    #[error("document already registered: {0}")]
    DuplicateDocument(String),
}

impl From<SortError<String>> for GraphError {
    fn from(err: SortError<String>) -> Self {
        match err {
            SortError::Cycle { chain } => Self::CyclicDependency { cycle: chain },
            SortError::UnknownKey { from, key } => Self::UnknownDependency { from, to: key },
        }
    }
}

/// Result alias for graph operations.
pub type GraphResult<T> = Result<T, GraphError>;

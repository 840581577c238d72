//! The merge run's error taxonomy.
//!
//! Every variant is a structural or input error: none are retried (the input
//! is static, retrying cannot change its validity) and none are downgraded.
//! Each carries the path, key, or prefix needed to diagnose the failure
//! without a debugger; turning that into user-facing text and an exit code is
//! the CLI's job.

use std::path::PathBuf;

use rdmerge_graph::GraphError;

/// Unified error type for a merge run. Any variant aborts the whole run.
#[derive(Debug, thiserror::Error)]
pub enum MergeError {
    /// The project root does not exist or is not a directory.
    #[error("project path does not exist: {}", .path.display())]
    InvalidProjectPath {
        /// The path that was supplied.
        path: PathBuf,
    },

    /// A referenced dictionary file (entry or nested) is absent on disk.
    #[error("source dictionary not found: {path}")]
    SourceNotFound {
        /// Project-relative path of the missing dictionary.
        path: String,
    },

    /// A file could not be parsed as a XAML document.
    #[error("malformed document '{path}': {reason}")]
    MalformedDocument {
        /// Project-relative path of the offending file.
        path: String,
        /// The parser's diagnostic.
        reason: String,
    },

    /// A `Source` reference could not be resolved to a project-relative path.
    #[error("cannot resolve dictionary reference '{reference}': {reason}")]
    InvalidReference {
        /// The raw reference as written in the markup.
        reference: String,
        /// Why it could not be resolved.
        reason: String,
    },

    /// The same namespace prefix is bound to two different URIs.
    #[error(
        "namespace prefix '{prefix}' has two different definitions ('{existing}' and '{conflicting}')"
    )]
    NamespaceConflict {
        /// The conflicting prefix.
        prefix: String,
        /// The URI the prefix was first bound to.
        existing: String,
        /// The URI the later document tried to bind.
        conflicting: String,
    },

    /// Cyclic or dangling dependency structure.
    #[error(transparent)]
    Graph(#[from] GraphError),

    /// A dictionary entry has no explicit or inferable resource key.
    #[error("resource <{element}> in '{path}' has no derivable key")]
    MissingResourceKey {
        /// Project-relative path of the contributing document.
        path: String,
        /// Qualified name of the keyless element.
        element: String,
    },

    /// Two documents contribute the same resource key.
    #[error("key '{key}' exists both in '{first}' and '{second}'")]
    DuplicateResourceKey {
        /// The duplicated key.
        key: String,
        /// Document that contributed the key first.
        first: String,
        /// Document that tried to contribute it again.
        second: String,
    },

    /// An underlying filesystem operation failed.
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        /// The path being read or written.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },
}

/// Result alias for merge operations.
pub type MergeResult<T> = Result<T, MergeError>;

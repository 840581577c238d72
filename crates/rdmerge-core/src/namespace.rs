//! Cross-document namespace prefix bookkeeping.
//!
//! The merged output keeps every source document's prefixes as written, so
//! one prefix bound to two different URIs cannot be represented. Conflicts
//! abort the run; no renaming or aliasing is attempted.

use std::collections::HashMap;

use rdmerge_xaml::Attribute;

use crate::error::{MergeError, MergeResult};

/// Prefix -> first-seen namespace URI, accumulated in document discovery
/// order. The default declaration registers under the key `xmlns`.
#[derive(Debug, Default)]
pub struct NamespaceRegistry {
    bindings: HashMap<String, String>,
}

impl NamespaceRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct prefixes seen.
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Returns `true` if no prefixes have been registered.
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// The URI a prefix is bound to, if seen.
    pub fn uri(&self, prefix: &str) -> Option<&str> {
        self.bindings.get(prefix).map(String::as_str)
    }

    /// Scan a document's root attributes for namespace declarations.
    ///
    /// A new prefix is recorded; a re-declaration with the same URI is a
    /// no-op; a re-declaration with a different URI fails with
    /// [`MergeError::NamespaceConflict`].
    pub fn register_document(&mut self, attributes: &[Attribute]) -> MergeResult<()> {
        for attr in attributes.iter().filter(|a| a.name.is_xmlns()) {
            let prefix = attr.name.local.as_str();
            match self.bindings.get(prefix) {
                None => {
                    self.bindings.insert(prefix.to_string(), attr.value.clone());
                }
                Some(existing) if existing == &attr.value => {}
                Some(existing) => {
                    return Err(MergeError::NamespaceConflict {
                        prefix: prefix.to_string(),
                        existing: existing.clone(),
                        conflicting: attr.value.clone(),
                    });
                }
            }
        }
        Ok(())
    }
}

//! Insertion-ordered collection of discovered dictionaries.

use std::collections::HashMap;

use tracing::debug;

use crate::error::{GraphError, GraphResult};
use crate::node::ResourceDocument;
use crate::sorter::topological_sort;

/// All dictionaries reachable from the entry document, keyed by their
/// project-relative path.
///
/// Documents are kept in first-visit order. That order is what breaks
/// topological ties deterministically, so it must not depend on hash-map
/// iteration.
#[derive(Debug, Default)]
pub struct DependencyGraph {
    documents: Vec<ResourceDocument>,
    index: HashMap<String, usize>,
}

impl DependencyGraph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of registered documents.
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Returns `true` if no documents are registered.
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Returns `true` if a document with this source path is registered.
    pub fn contains(&self, source: &str) -> bool {
        self.index.contains_key(source)
    }

    /// Register a document. Fails if its source path is already present.
    pub fn insert(&mut self, document: ResourceDocument) -> GraphResult<()> {
        if self.index.contains_key(&document.source) {
            return Err(GraphError::DuplicateDocument(document.source));
        }
        debug!(source = %document.source, entries = document.entries.len(), "registered dictionary");
        self.index
            .insert(document.source.clone(), self.documents.len());
        self.documents.push(document);
        Ok(())
    }

    /// Look up a document by source path.
    pub fn get(&self, source: &str) -> Option<&ResourceDocument> {
        self.index.get(source).map(|&i| &self.documents[i])
    }

    /// Record a dependency edge from `source` onto `dependency`.
    ///
    /// Edges are recorded per reference site, so revisiting an already
    /// registered document still adds the edge — that is what makes a cycle
    /// representable for the sorter to reject.
    pub fn add_dependency(&mut self, source: &str, dependency: impl Into<String>) -> GraphResult<()> {
        let Some(&i) = self.index.get(source) else {
            return Err(GraphError::UnknownDependency {
                from: source.to_string(),
                to: dependency.into(),
            });
        };
        let dependency = dependency.into();
        debug!(source = %source, dependency = %dependency, "recorded merge reference");
        self.documents[i].dependencies.push(dependency);
        Ok(())
    }

    /// Documents in first-visit order.
    pub fn iter(&self) -> impl Iterator<Item = &ResourceDocument> {
        self.documents.iter()
    }

    /// Documents in dependency-before-dependent order.
    ///
    /// Fails with [`GraphError::CyclicDependency`] when the merge hierarchy
    /// loops back on itself; no partial ordering is returned.
    pub fn sorted(&self) -> GraphResult<Vec<&ResourceDocument>> {
        Ok(topological_sort(
            &self.documents,
            |doc| doc.source.clone(),
            |doc| doc.dependencies.as_slice(),
        )?)
    }
}

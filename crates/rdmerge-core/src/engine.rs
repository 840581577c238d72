//! Flattening the graph into a single dictionary.
//!
//! Documents are merged in dependency-before-dependent order, mirroring
//! "base styles defined first": a merged-in dictionary's attributes and
//! entries land before the document that merges it, and the entry document's
//! root attributes win any overlap.

use std::collections::HashMap;

use tracing::debug;

use rdmerge_graph::DependencyGraph;
use rdmerge_xaml::{resource_key, Element, QName, RESOURCE_DICTIONARY};

use crate::error::{MergeError, MergeResult};

/// The flattened dictionary produced by a merge run.
#[derive(Debug)]
pub struct MergedOutput {
    /// The output root: one `ResourceDictionary` holding every entry.
    pub root: Element,
    /// Number of resource entries merged in.
    pub resources: usize,
}

/// Resource key -> contributing document, scoped to one merge run. Exists
/// for duplicate detection and the diagnostics that come with it.
#[derive(Debug, Default)]
struct KeyRegistry {
    claims: HashMap<String, String>,
}

impl KeyRegistry {
    fn claim(&mut self, key: String, source: &str) -> MergeResult<()> {
        if let Some(first) = self.claims.get(&key) {
            return Err(MergeError::DuplicateResourceKey {
                key,
                first: first.clone(),
                second: source.to_string(),
            });
        }
        self.claims.insert(key, source.to_string());
        Ok(())
    }
}

/// Merge every document in `graph` into one dictionary rooted at the entry
/// document's default namespace.
///
/// Fails without observable partial output: the returned tree is built in
/// memory and only handed to the output writer on success.
pub fn merge_documents(graph: &DependencyGraph, entry: &str) -> MergeResult<MergedOutput> {
    let ordered = graph.sorted()?;
    let entry_document = graph.get(entry).ok_or_else(|| MergeError::SourceNotFound {
        path: entry.to_string(),
    })?;

    let default_namespace = entry_document.default_namespace();
    let mut root = Element::new(match default_namespace {
        Some(ns) => QName::in_namespace(RESOURCE_DICTIONARY, ns),
        None => QName::local(RESOURCE_DICTIONARY),
    });
    if let Some(ns) = default_namespace {
        root.set_attribute(QName::xmlns(None), ns);
    }

    let mut keys = KeyRegistry::default();
    let mut resources = 0usize;

    for document in ordered {
        for attr in &document.attributes {
            // Last writer wins; dependency order makes that the dependent
            // document, with the entry document last.
            root.set_attribute(attr.name.clone(), attr.value.clone());
        }

        for element in &document.entries {
            let key = resource_key(element).ok_or_else(|| MergeError::MissingResourceKey {
                path: document.source.clone(),
                element: element.name.to_string(),
            })?;
            keys.claim(key, &document.source)?;
            root.push_element(element.clone());
            resources += 1;
        }
        debug!(
            source = %document.source,
            entries = document.entries.len(),
            "merged dictionary"
        );
    }

    Ok(MergedOutput { root, resources })
}

//! The per-dictionary graph node.

use rdmerge_xaml::{Attribute, Element, RESOURCE_DICTIONARY};

/// One resource dictionary file as a node in the dependency graph.
///
/// Immutable once discovery finishes, except [`dependencies`], which the
/// graph builder appends to as it scans merge references. The same document
/// may be referenced from many places but is registered exactly once; every
/// reference site still records its own dependency edge.
///
/// [`dependencies`]: ResourceDocument::dependencies
#[derive(Clone, Debug)]
pub struct ResourceDocument {
    /// Path relative to the project root, with forward slashes. Identity.
    pub source: String,
    /// Root-element attributes in document order, xmlns declarations included.
    pub attributes: Vec<Attribute>,
    /// Top-level entries: child elements that are not dictionary machinery.
    pub entries: Vec<Element>,
    /// Relative paths of dictionaries this one merges in, one per reference
    /// site, in declaration order.
    pub dependencies: Vec<String>,
}

impl ResourceDocument {
    /// Build a node from a parsed document root.
    ///
    /// Entries are the root's child elements whose local name does not start
    /// with `ResourceDictionary` — that prefix match excludes nested
    /// dictionaries and the `ResourceDictionary.MergedDictionaries` wrapper
    /// alike. The dependency list starts empty; the builder fills it.
    pub fn from_root(source: impl Into<String>, root: &Element) -> Self {
        let entries = root
            .child_elements()
            .filter(|el| !el.name.local.starts_with(RESOURCE_DICTIONARY))
            .cloned()
            .collect();

        Self {
            source: source.into(),
            attributes: root.attributes.clone(),
            entries,
            dependencies: Vec::new(),
        }
    }

    /// The default namespace of this document's root, if declared.
    pub fn default_namespace(&self) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.name.is_xmlns() && a.name.prefix.is_none())
            .map(|a| a.value.as_str())
    }
}

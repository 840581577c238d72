//! Recursive discovery of the merge hierarchy.
//!
//! Starting from the entry dictionary, every `<ResourceDictionary
//! Source="..."/>` reference found anywhere beneath a document's root is
//! resolved and followed depth-first. Each document registers once; each
//! reference site records its own dependency edge, including edges that
//! close a cycle — the sorter, not discovery, rejects those.

use tracing::debug;

use rdmerge_graph::{DependencyGraph, ResourceDocument};
use rdmerge_xaml::{Element, RESOURCE_DICTIONARY};

use crate::error::{MergeError, MergeResult};
use crate::namespace::NamespaceRegistry;
use crate::resolve::resolve_reference;
use crate::store::DocumentStore;

/// Discover every dictionary reachable from `entry`, returning the populated
/// graph and the namespace registry accumulated along the way.
pub fn build_graph(
    store: &mut DocumentStore,
    project_name: &str,
    entry: &str,
) -> MergeResult<(DependencyGraph, NamespaceRegistry)> {
    let mut builder = GraphBuilder {
        store,
        project_name,
        graph: DependencyGraph::new(),
        namespaces: NamespaceRegistry::new(),
    };
    builder.discover(entry)?;
    debug!(
        documents = builder.graph.len(),
        entry = %entry,
        "dependency graph complete"
    );
    Ok((builder.graph, builder.namespaces))
}

struct GraphBuilder<'a> {
    store: &'a mut DocumentStore,
    project_name: &'a str,
    graph: DependencyGraph,
    namespaces: NamespaceRegistry,
}

impl GraphBuilder<'_> {
    fn discover(&mut self, relative: &str) -> MergeResult<()> {
        let root = self.store.load(relative)?;

        // Already registered: the caller recorded the edge that led here, so
        // stopping keeps recursion bounded while leaving cycles representable.
        if self.graph.contains(relative) {
            return Ok(());
        }

        let document = ResourceDocument::from_root(relative, &root);
        self.namespaces.register_document(&document.attributes)?;
        self.graph.insert(document)?;

        let referencing = self.store.absolute_path(relative);
        for raw in merge_references(relative, &root)? {
            let dependency = resolve_reference(
                self.project_name,
                self.store.project_root(),
                &referencing,
                &raw,
            )?;
            // Record the edge before recursing: a reference back into the
            // current path must survive as a back edge for cycle detection.
            self.graph.add_dependency(relative, dependency.clone())?;
            self.discover(&dependency)?;
        }
        Ok(())
    }
}

/// The raw `Source` values of every merge reference beneath `root`, in
/// document order.
fn merge_references(relative: &str, root: &Element) -> MergeResult<Vec<String>> {
    let default_ns = root.name.namespace.as_deref();
    let mut sources = Vec::new();
    for element in root.descendants() {
        if element.name.local != RESOURCE_DICTIONARY
            || element.name.namespace.as_deref() != default_ns
        {
            continue;
        }
        match element.attribute("Source") {
            Some(source) => sources.push(source.to_string()),
            None => {
                return Err(MergeError::InvalidReference {
                    reference: format!("<{RESOURCE_DICTIONARY}> in '{relative}'"),
                    reason: "nested dictionary has no Source attribute".to_string(),
                })
            }
        }
    }
    Ok(sources)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn project(files: &[(&str, &str)]) -> (tempfile::TempDir, DocumentStore) {
        let dir = tempfile::tempdir().unwrap();
        for (name, content) in files {
            let path = dir.path().join(name);
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).unwrap();
            }
            fs::write(path, content).unwrap();
        }
        let store = DocumentStore::new(dir.path().to_path_buf());
        (dir, store)
    }

    fn dictionary(merges: &[&str], body: &str) -> String {
        let refs: String = merges
            .iter()
            .map(|m| format!("<ResourceDictionary Source=\"{m}\" />"))
            .collect();
        format!(
            "<ResourceDictionary xmlns=\"urn:presentation\" xmlns:x=\"urn:xaml\">\
             <ResourceDictionary.MergedDictionaries>{refs}</ResourceDictionary.MergedDictionaries>\
             {body}</ResourceDictionary>"
        )
    }

    #[test]
    fn discovers_the_whole_hierarchy_depth_first() {
        let (_dir, mut store) = project(&[
            ("Bundle.xaml", &dictionary(&["Colors.xaml", "Buttons.xaml"], "")),
            ("Colors.xaml", &dictionary(&[], "<Color x:Key=\"C\">Red</Color>")),
            ("Buttons.xaml", &dictionary(&[], "<Style TargetType=\"Button\" />")),
        ]);
        let (graph, _) = build_graph(&mut store, "App", "Bundle.xaml").unwrap();

        assert_eq!(graph.len(), 3);
        let bundle = graph.get("Bundle.xaml").unwrap();
        assert_eq!(bundle.dependencies, ["Colors.xaml", "Buttons.xaml"]);

        let order: Vec<&str> = graph.iter().map(|d| d.source.as_str()).collect();
        assert_eq!(order, ["Bundle.xaml", "Colors.xaml", "Buttons.xaml"]);
    }

    #[test]
    fn shared_dependency_registers_once_with_all_edges() {
        let (_dir, mut store) = project(&[
            ("App.xaml", &dictionary(&["Theme1.xaml", "Theme2.xaml"], "")),
            ("Theme1.xaml", &dictionary(&["Base.xaml"], "")),
            ("Theme2.xaml", &dictionary(&["Base.xaml"], "")),
            ("Base.xaml", &dictionary(&[], "<Style TargetType=\"Button\" />")),
        ]);
        let (graph, _) = build_graph(&mut store, "App", "App.xaml").unwrap();

        assert_eq!(graph.len(), 4);
        assert_eq!(graph.get("Theme1.xaml").unwrap().dependencies, ["Base.xaml"]);
        assert_eq!(graph.get("Theme2.xaml").unwrap().dependencies, ["Base.xaml"]);
        // Base parsed exactly once despite two reference sites.
        assert_eq!(store.len(), 4);
    }

    #[test]
    fn mutual_references_terminate_and_keep_the_back_edge() {
        let (_dir, mut store) = project(&[
            ("A.xaml", &dictionary(&["B.xaml"], "")),
            ("B.xaml", &dictionary(&["A.xaml"], "")),
        ]);
        let (graph, _) = build_graph(&mut store, "App", "A.xaml").unwrap();

        assert_eq!(graph.get("A.xaml").unwrap().dependencies, ["B.xaml"]);
        assert_eq!(graph.get("B.xaml").unwrap().dependencies, ["A.xaml"]);
        assert!(graph.sorted().is_err());
    }

    #[test]
    fn conflicting_prefix_across_documents_aborts() {
        let (_dir, mut store) = project(&[
            (
                "A.xaml",
                "<ResourceDictionary xmlns=\"urn:p\" xmlns:c=\"clr-namespace:One\">\
                 <ResourceDictionary.MergedDictionaries>\
                 <ResourceDictionary Source=\"B.xaml\" />\
                 </ResourceDictionary.MergedDictionaries></ResourceDictionary>",
            ),
            (
                "B.xaml",
                "<ResourceDictionary xmlns=\"urn:p\" xmlns:c=\"clr-namespace:Two\" />",
            ),
        ]);
        let err = build_graph(&mut store, "App", "A.xaml").unwrap_err();
        assert!(matches!(
            err,
            MergeError::NamespaceConflict { prefix, .. } if prefix == "c"
        ));
    }

    #[test]
    fn nested_dictionary_without_source_is_invalid() {
        let (_dir, mut store) = project(&[(
            "A.xaml",
            "<ResourceDictionary xmlns=\"urn:p\">\
             <ResourceDictionary.MergedDictionaries>\
             <ResourceDictionary />\
             </ResourceDictionary.MergedDictionaries></ResourceDictionary>",
        )]);
        assert!(matches!(
            build_graph(&mut store, "App", "A.xaml"),
            Err(MergeError::InvalidReference { .. })
        ));
    }

    #[test]
    fn missing_referenced_file_propagates() {
        let (_dir, mut store) =
            project(&[("A.xaml", &dictionary(&["Ghost.xaml"], ""))]);
        assert!(matches!(
            build_graph(&mut store, "App", "A.xaml"),
            Err(MergeError::SourceNotFound { path }) if path == "Ghost.xaml"
        ));
    }
}

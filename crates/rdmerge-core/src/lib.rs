//! Dependency-aware merging of WPF resource dictionary hierarchies.
//!
//! A root dictionary pulls in further dictionaries through
//! `<ResourceDictionary Source="..."/>` merge references, which in turn may
//! reference more. [`merge_resources`] flattens that graph into a single
//! dictionary: every resource exactly once, dependencies before dependents,
//! duplicate keys and conflicting namespace prefixes rejected, and output
//! written only when its bytes actually change.
//!
//! All state (document cache, namespace registry, key registry) lives for
//! one invocation and is passed explicitly; calling [`merge_resources`]
//! twice with different project roots is safe.
//!
//! # Pipeline
//!
//! entry path → [`builder::build_graph`] (via [`store::DocumentStore`] and
//! [`resolve`]) → topological order → [`engine::merge_documents`] →
//! [`output::write_if_changed`].

pub mod builder;
pub mod engine;
pub mod error;
pub mod namespace;
pub mod output;
pub mod resolve;
pub mod store;

use std::path::{Path, PathBuf};

use tracing::{debug, info};

pub use engine::MergedOutput;
pub use error::{MergeError, MergeResult};
pub use namespace::NamespaceRegistry;
pub use store::DocumentStore;

/// What a completed merge run did.
#[derive(Debug)]
pub struct MergeReport {
    /// `false` when the target already held the exact output bytes.
    pub written: bool,
    /// Number of dictionaries in the merge hierarchy.
    pub documents: usize,
    /// Number of resource entries in the output.
    pub resources: usize,
    /// Absolute path of the output file.
    pub target: PathBuf,
}

/// Merge the dictionary hierarchy rooted at `source_relative` into a single
/// dictionary at `target_relative`, both relative to `project_path`.
///
/// `project_name` is only used to strip `/{name};component/` segments from
/// pack references; it defaults to the project directory's own name.
pub fn merge_resources(
    project_path: &Path,
    project_name: Option<&str>,
    source_relative: &str,
    target_relative: &str,
) -> MergeResult<MergeReport> {
    if !project_path.is_dir() {
        return Err(MergeError::InvalidProjectPath {
            path: project_path.to_path_buf(),
        });
    }
    let project_root = project_path
        .canonicalize()
        .map_err(|source| MergeError::Io {
            path: project_path.to_path_buf(),
            source,
        })?;

    let project_name = match project_name {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => project_root
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default(),
    };

    let source = resolve::normalize_relative(source_relative);
    let target = resolve::normalize_relative(target_relative);
    debug!(
        project = %project_name,
        root = %project_root.display(),
        source = %source,
        target = %target,
        "starting merge run"
    );

    let mut store = DocumentStore::new(project_root.clone());
    let (graph, _namespaces) = builder::build_graph(&mut store, &project_name, &source)?;
    let merged = engine::merge_documents(&graph, &source)?;

    let target_path = project_root.join(&target);
    let written = output::write_if_changed(&merged.root, &target_path)?;

    info!(
        documents = graph.len(),
        resources = merged.resources,
        written,
        target = %target_path.display(),
        "merge run complete"
    );
    Ok(MergeReport {
        written,
        documents: graph.len(),
        resources: merged.resources,
        target: target_path,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const PRESENTATION: &str = "http://schemas.microsoft.com/winfx/2006/xaml/presentation";
    const XAML: &str = "http://schemas.microsoft.com/winfx/2006/xaml";

    fn dictionary(merges: &[&str], body: &str) -> String {
        let refs: String = merges
            .iter()
            .map(|m| format!("<ResourceDictionary Source=\"{m}\" />"))
            .collect();
        let merged = if refs.is_empty() {
            String::new()
        } else {
            format!(
                "<ResourceDictionary.MergedDictionaries>{refs}</ResourceDictionary.MergedDictionaries>"
            )
        };
        format!(
            "<ResourceDictionary xmlns=\"{PRESENTATION}\" xmlns:x=\"{XAML}\">{merged}{body}</ResourceDictionary>"
        )
    }

    fn project(files: &[(&str, &str)]) -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        for (name, content) in files {
            let path = dir.path().join(name);
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).unwrap();
            }
            fs::write(path, content).unwrap();
        }
        dir
    }

    #[test]
    fn merges_a_hierarchy_end_to_end() {
        let dir = project(&[
            (
                "Bundle.xaml",
                &dictionary(
                    &["Colors.xaml", "Buttons.xaml"],
                    "<SolidColorBrush x:Key=\"Own\">Black</SolidColorBrush>",
                ),
            ),
            (
                "Colors.xaml",
                &dictionary(&[], "<Color x:Key=\"Accent\">#FF3399FF</Color>"),
            ),
            (
                "Buttons.xaml",
                &dictionary(&[], "<Style TargetType=\"{x:Type Button}\" />"),
            ),
        ]);

        let report =
            merge_resources(dir.path(), Some("App"), "Bundle.xaml", "Bundle.Merged.xaml").unwrap();
        assert!(report.written);
        assert_eq!(report.documents, 3);
        assert_eq!(report.resources, 3);

        let merged = fs::read_to_string(dir.path().join("Bundle.Merged.xaml")).unwrap();
        // Dependencies' entries come first, in declaration order.
        let accent = merged.find("x:Key=\"Accent\"").unwrap();
        let button = merged.find("TargetType=\"{x:Type Button}\"").unwrap();
        let own = merged.find("x:Key=\"Own\"").unwrap();
        assert!(accent < button && button < own);
        assert!(merged.contains(&format!("xmlns=\"{PRESENTATION}\"")));
    }

    #[test]
    fn second_run_with_unchanged_input_writes_nothing() {
        let dir = project(&[(
            "App.xaml",
            &dictionary(&[], "<Color x:Key=\"A\">Red</Color>"),
        )]);

        let first = merge_resources(dir.path(), None, "App.xaml", "Out.xaml").unwrap();
        assert!(first.written);
        let bytes = fs::read(dir.path().join("Out.xaml")).unwrap();

        let second = merge_resources(dir.path(), None, "App.xaml", "Out.xaml").unwrap();
        assert!(!second.written);
        assert_eq!(fs::read(dir.path().join("Out.xaml")).unwrap(), bytes);
    }

    #[test]
    fn diamond_hierarchy_emits_shared_entries_once() {
        let dir = project(&[
            ("App.xaml", &dictionary(&["Theme1.xaml", "Theme2.xaml"], "")),
            ("Theme1.xaml", &dictionary(&["Base.xaml"], "")),
            ("Theme2.xaml", &dictionary(&["Base.xaml"], "")),
            (
                "Base.xaml",
                &dictionary(&[], "<Style TargetType=\"Button\" />"),
            ),
        ]);

        let report = merge_resources(dir.path(), None, "App.xaml", "Out.xaml").unwrap();
        assert_eq!(report.documents, 4);
        assert_eq!(report.resources, 1);
        let merged = fs::read_to_string(dir.path().join("Out.xaml")).unwrap();
        assert_eq!(merged.matches("TargetType=\"Button\"").count(), 1);
    }

    #[test]
    fn mutual_merge_is_a_cycle_error() {
        let dir = project(&[
            ("A.xaml", &dictionary(&["B.xaml"], "")),
            ("B.xaml", &dictionary(&["A.xaml"], "")),
        ]);
        let err = merge_resources(dir.path(), None, "A.xaml", "Out.xaml").unwrap_err();
        assert!(matches!(err, MergeError::Graph(_)));
        assert!(!dir.path().join("Out.xaml").exists());
    }

    #[test]
    fn duplicate_keys_across_documents_fail() {
        let dir = project(&[
            (
                "A.xaml",
                &dictionary(&["B.xaml"], "<Style TargetType=\"Button\" />"),
            ),
            (
                "B.xaml",
                &dictionary(&[], "<Style TargetType=\"{x:Type Button}\" />"),
            ),
        ]);
        let err = merge_resources(dir.path(), None, "A.xaml", "Out.xaml").unwrap_err();
        assert!(matches!(
            err,
            MergeError::DuplicateResourceKey { key, .. } if key == "Button"
        ));
    }

    #[test]
    fn missing_project_path_is_rejected() {
        let err = merge_resources(
            Path::new("/definitely/not/here"),
            None,
            "A.xaml",
            "Out.xaml",
        )
        .unwrap_err();
        assert!(matches!(err, MergeError::InvalidProjectPath { .. }));
    }

    #[test]
    fn references_in_subdirectories_resolve() {
        let dir = project(&[
            ("App.xaml", &dictionary(&["Themes/Dark.xaml"], "")),
            (
                "Themes/Dark.xaml",
                &dictionary(&["../Colors.xaml"], "<Color x:Key=\"Bg\">Black</Color>"),
            ),
            (
                "Colors.xaml",
                &dictionary(&[], "<Color x:Key=\"Fg\">White</Color>"),
            ),
        ]);

        let report = merge_resources(dir.path(), None, "App.xaml", "Out.xaml").unwrap();
        assert_eq!(report.documents, 3);
        assert_eq!(report.resources, 2);
    }
}

//! Resolution of in-markup dictionary references.
//!
//! A `Source` attribute may hold a plain relative path, a pack URI
//! (`pack://application:,,,/Theme/Colors.xaml`), or a component reference
//! (`/MyApp;component/Theme/Colors.xaml`). All of them resolve to a path
//! relative to the project root. Pure string and path work; no I/O.

use std::path::{Component, Path, PathBuf};

use crate::error::{MergeError, MergeResult};

/// Packaging-URI prefix used by application-scoped pack references.
pub const PACK_APPLICATION_PREFIX: &str = "pack://application:,,,";

/// Resolve a raw `Source` reference against the document that contains it.
///
/// After stripping the pack prefix and a `/{project_name};component/`
/// segment, a fragment that still starts with `/` is project-root relative;
/// anything else resolves against the referencing document's directory. The
/// result is re-expressed relative to `project_root`, forward-slashed.
pub fn resolve_reference(
    project_name: &str,
    project_root: &Path,
    referencing_document: &Path,
    reference: &str,
) -> MergeResult<String> {
    let invalid = |reason: &str| MergeError::InvalidReference {
        reference: reference.to_string(),
        reason: reason.to_string(),
    };

    let trimmed = reference.trim();
    if trimmed.is_empty() {
        return Err(invalid("reference is empty"));
    }

    let mut fragment = trimmed
        .strip_prefix(PACK_APPLICATION_PREFIX)
        .unwrap_or(trimmed)
        .replace('\\', "/");
    if fragment.contains("://") {
        return Err(invalid("unsupported URI scheme"));
    }

    // `/MyApp;component/Theme/A.xaml` -> `Theme/A.xaml`.
    let component_segment = format!("/{project_name};component/");
    if let Some(pos) = fragment.find(&component_segment) {
        fragment.replace_range(..pos + component_segment.len(), "");
    }

    let absolute = if let Some(root_relative) = fragment.strip_prefix('/') {
        project_root.join(root_relative)
    } else {
        let base = referencing_document
            .parent()
            .ok_or_else(|| invalid("referencing document has no parent directory"))?;
        base.join(&fragment)
    };

    let normalized = normalize(&absolute);
    let relative = normalized
        .strip_prefix(project_root)
        .map_err(|_| invalid("reference escapes the project root"))?;

    let key = relative_key(relative);
    if key.is_empty() {
        return Err(invalid("reference does not name a file"));
    }
    Ok(key)
}

/// Normalize a user-supplied relative path into the graph's key form:
/// forward slashes, no `.` or `..` segments.
pub fn normalize_relative(path: &str) -> String {
    relative_key(&normalize(Path::new(&path.replace('\\', "/"))))
}

/// Lexically resolve `.` and `..` components without touching the
/// filesystem. `..` at the start (nothing left to pop) is dropped, which
/// keeps the result inside whatever it is later joined to.
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other),
        }
    }
    out
}

fn relative_key(path: &Path) -> String {
    let parts: Vec<&str> = path
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => part.to_str(),
            _ => None,
        })
        .collect();
    parts.join("/")
}

//! Memoized loading of dictionary documents.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::debug;

use rdmerge_xaml::{parse_document, Element};

use crate::error::{MergeError, MergeResult};

/// Loads and parses dictionary files, each physical file at most once.
///
/// The cache is keyed by project-relative path and scoped to this instance.
/// A store is built fresh per merge invocation and passed explicitly —
/// reusing one across invocations with different project roots would serve
/// stale documents.
#[derive(Debug)]
pub struct DocumentStore {
    project_root: PathBuf,
    cache: HashMap<String, Arc<Element>>,
}

impl DocumentStore {
    /// Create a store rooted at the (already validated) project directory.
    pub fn new(project_root: PathBuf) -> Self {
        Self {
            project_root,
            cache: HashMap::new(),
        }
    }

    /// The project root this store reads under.
    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    /// Absolute path of a project-relative dictionary path.
    pub fn absolute_path(&self, relative: &str) -> PathBuf {
        self.project_root.join(relative)
    }

    /// Number of distinct documents parsed so far.
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    /// Returns `true` if nothing has been loaded yet.
    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    /// Load the document at `relative`, parsing it on first request and
    /// returning the cached tree afterwards.
    pub fn load(&mut self, relative: &str) -> MergeResult<Arc<Element>> {
        if let Some(document) = self.cache.get(relative) {
            return Ok(Arc::clone(document));
        }

        let absolute = self.absolute_path(relative);
        if !absolute.is_file() {
            return Err(MergeError::SourceNotFound {
                path: relative.to_string(),
            });
        }

        let text = fs::read_to_string(&absolute).map_err(|source| MergeError::Io {
            path: absolute.clone(),
            source,
        })?;
        let root = parse_document(&text).map_err(|err| MergeError::MalformedDocument {
            path: relative.to_string(),
            reason: err.to_string(),
        })?;

        debug!(path = %relative, "parsed dictionary");
        let document = Arc::new(root);
        self.cache.insert(relative.to_string(), Arc::clone(&document));
        Ok(document)
    }
}

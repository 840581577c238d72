//! Idempotent output writing.
//!
//! The merged tree serializes to the same bytes on every run with identical
//! input, so comparing against the existing target file tells us whether
//! anything actually changed. Skipping the no-op write keeps the target's
//! timestamp stable, which matters when this tool runs on every build.

use std::fs;
use std::io;
use std::path::Path;

use tracing::debug;

use rdmerge_xaml::{to_bytes, Element};

use crate::error::{MergeError, MergeResult};

/// Serialize `root` and write it to `target` unless the file already holds
/// exactly those bytes. Returns `true` when a write happened.
pub fn write_if_changed(root: &Element, target: &Path) -> MergeResult<bool> {
    let rendered = to_bytes(root);

    match fs::read(target) {
        Ok(existing) if existing == rendered => {
            debug!(target = %target.display(), "output unchanged, skipping write");
            return Ok(false);
        }
        Ok(_) => {}
        Err(err) if err.kind() == io::ErrorKind::NotFound => {}
        Err(source) => {
            return Err(MergeError::Io {
                path: target.to_path_buf(),
                source,
            })
        }
    }

    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent).map_err(|source| MergeError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    fs::write(target, &rendered).map_err(|source| MergeError::Io {
        path: target.to_path_buf(),
        source,
    })?;
    debug!(target = %target.display(), bytes = rendered.len(), "wrote merged dictionary");
    Ok(true)
}

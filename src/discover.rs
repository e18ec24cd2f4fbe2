//! Source file discovery.
//!
//! Walks a project root, pruning excluded directories and keeping files
//! whose extension is on the whitelist. Any walk error aborts discovery.

use ignore::WalkBuilder;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

use crate::config::DepGraphConfig;
use crate::error::{DepGraphError, Result};

/// Canonicalize a project root, rejecting anything that is not a directory.
pub fn canonical_root(root: &Path) -> Result<PathBuf> {
    let canonical = fs::canonicalize(root).map_err(|source| DepGraphError::RootNotFound {
        path: root.to_path_buf(),
        source,
    })?;
    if !canonical.is_dir() {
        return Err(DepGraphError::RootNotDirectory(canonical));
    }
    Ok(canonical)
}

/// Enumerates eligible source files under a root.
#[derive(Debug, Clone)]
pub struct FileDiscoverer {
    config: Arc<DepGraphConfig>,
}

impl FileDiscoverer {
    pub fn new(config: &DepGraphConfig) -> Self {
        Self {
            config: Arc::new(config.clone()),
        }
    }

    /// Walk `root` and return every eligible file, sorted by path.
    ///
    /// `root` should already be canonical; returned paths are joined onto
    /// it without following symlinks, so they are canonical too.
    pub fn discover(&self, root: &Path) -> Result<Vec<PathBuf>> {
        let config = Arc::clone(&self.config);
        let walker = WalkBuilder::new(root)
            .standard_filters(false)
            .follow_links(false)
            .sort_by_file_name(|a, b| a.cmp(b))
            .filter_entry(move |entry| {
                // The root itself is never pruned, whatever its name.
                if entry.depth() == 0 {
                    return true;
                }
                let is_dir = entry.file_type().is_some_and(|ft| ft.is_dir());
                !(is_dir && entry.file_name().to_str().is_some_and(|n| config.is_excluded_dir(n)))
            })
            .build();

        let mut files = Vec::new();
        for entry in walker {
            let entry = entry?;
            if !entry.file_type().is_some_and(|ft| ft.is_file()) {
                continue;
            }
            if self.is_eligible(entry.path()) {
                files.push(entry.into_path());
            }
        }

        debug!(root = %root.display(), files = files.len(), "discovery complete");
        Ok(files)
    }

    fn is_eligible(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| self.config.is_source_extension(ext))
    }
}

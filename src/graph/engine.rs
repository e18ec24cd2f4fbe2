//! The queryable dependency graph snapshot.
//!
//! A `DependencyGraph` is immutable once built. `build` constructs a
//! complete new graph and swaps it in; nothing from the previous build
//! is reused, and a failed build leaves the previous snapshot untouched.

use std::path::{Component, Path, PathBuf};
use tracing::info;

use super::builder::build_graph;
use super::store::GraphStore;
use super::types::{BuildStats, FileNode};
use crate::config::DepGraphConfig;
use crate::error::Result;

/// A whole-project module dependency graph, keyed by canonical path.
#[derive(Debug, Clone, Default)]
pub struct DependencyGraph {
    root: PathBuf,
    store: GraphStore,
    config: DepGraphConfig,
    stats: BuildStats,
}

impl DependencyGraph {
    /// An empty graph with default configuration; call [`build`](Self::build).
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: DepGraphConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub(crate) fn from_parts(
        root: PathBuf,
        store: GraphStore,
        config: DepGraphConfig,
        stats: BuildStats,
    ) -> Self {
        Self {
            root,
            store,
            config,
            stats,
        }
    }

    /// Rebuild from `root`, replacing the current snapshot on success.
    pub fn build(&mut self, root: &Path) -> Result<BuildStats> {
        let fresh = build_graph(root, &self.config)?;
        if !self.root.as_os_str().is_empty() {
            info!(previous = %self.root.display(), "replacing previous graph");
        }
        *self = fresh;
        Ok(self.stats)
    }

    /// The canonical root, empty before the first build.
    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config(&self) -> &DepGraphConfig {
        &self.config
    }

    pub fn stats(&self) -> BuildStats {
        self.stats
    }

    pub fn store(&self) -> &GraphStore {
        &self.store
    }

    pub fn node(&self, path: &Path) -> Option<&FileNode> {
        self.store.get(path)
    }

    /// Nodes in discovery order.
    pub fn nodes(&self) -> impl Iterator<Item = &FileNode> {
        self.store.nodes()
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// `path` relative to the root, `/`-separated.
    pub fn relative(&self, path: &Path) -> String {
        let rel = path.strip_prefix(&self.root).unwrap_or(path);
        rel.components()
            .filter_map(|c| match c {
                Component::Normal(part) => Some(part.to_string_lossy()),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join("/")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_new_graph_is_empty() {
        let graph = DependencyGraph::new();
        assert!(graph.is_empty());
        assert_eq!(graph.root(), Path::new(""));
        assert_eq!(graph.stats(), BuildStats::default());
    }

    #[test]
    fn test_build_replaces_snapshot() {
        let first = tempfile::tempdir().unwrap();
        fs::write(first.path().join("a.ts"), "").unwrap();
        fs::write(first.path().join("b.ts"), "").unwrap();
        let second = tempfile::tempdir().unwrap();
        fs::write(second.path().join("c.js"), "").unwrap();

        let mut graph = DependencyGraph::new();
        assert_eq!(graph.build(first.path()).unwrap().node_count, 2);
        assert_eq!(graph.build(second.path()).unwrap().node_count, 1);
        assert_eq!(graph.len(), 1);
        assert!(graph.node(&graph.root().join("a.ts")).is_none());
    }

    #[test]
    fn test_failed_build_keeps_previous() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.ts"), "").unwrap();

        let mut graph = DependencyGraph::new();
        graph.build(dir.path()).unwrap();
        assert!(graph.build(&dir.path().join("missing")).is_err());
        assert_eq!(graph.len(), 1);
    }

    #[test]
    fn test_build_keeps_config() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.ts"), "").unwrap();
        fs::write(dir.path().join("b.js"), "").unwrap();
        let config = DepGraphConfig {
            extensions: vec!["ts".to_string()],
            ..DepGraphConfig::default()
        };

        let mut graph = DependencyGraph::with_config(config.clone());
        assert_eq!(graph.build(dir.path()).unwrap().total_files, 1);
        assert_eq!(graph.config(), &config);
    }

    #[test]
    fn test_relative() {
        let graph = DependencyGraph::from_parts(
            PathBuf::from("/repo"),
            GraphStore::new(),
            DepGraphConfig::default(),
            BuildStats::default(),
        );
        assert_eq!(graph.relative(Path::new("/repo/src/a.ts")), "src/a.ts");
    }
}

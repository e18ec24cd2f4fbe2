//! Node storage and symmetric edge bookkeeping.

use indexmap::IndexMap;
use petgraph::algo::tarjan_scc;
use petgraph::graph::{DiGraph, NodeIndex};
use std::path::{Path, PathBuf};
use tracing::debug;

use super::types::{ExportedSymbol, FileNode};

/// Owns every file node of one build, keyed by canonical path.
///
/// Nodes only come from [`GraphStore::init_node`]; recording an edge
/// never creates one, so `imports`/`imported_by` always stay symmetric.
#[derive(Debug, Clone, Default)]
pub struct GraphStore {
    nodes: IndexMap<PathBuf, FileNode>,
}

impl GraphStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: IndexMap::with_capacity(capacity),
        }
    }

    // ─── Node Operations ────────────────────────────────────────

    /// Create an empty node for a discovered file. Idempotent.
    pub fn init_node(&mut self, path: PathBuf) {
        self.nodes
            .entry(path.clone())
            .or_insert_with(|| FileNode::new(path));
    }

    /// Attach the exported symbols found for a file.
    pub fn set_symbols(&mut self, path: &Path, symbols: Vec<ExportedSymbol>) {
        if let Some(node) = self.nodes.get_mut(path) {
            node.symbols = symbols;
        }
    }

    // ─── Edge Operations ────────────────────────────────────────

    /// Record `from` importing `to` on both endpoints.
    ///
    /// Returns `true` if the edge is new. Duplicate edges and edges with
    /// an unknown endpoint are ignored.
    pub fn record_edge(&mut self, from: &Path, to: &Path) -> bool {
        if !self.nodes.contains_key(from) || !self.nodes.contains_key(to) {
            debug!(from = %from.display(), to = %to.display(), "edge endpoint not in graph");
            return false;
        }
        let added = self
            .nodes
            .get_mut(from)
            .is_some_and(|node| node.imports.insert(to.to_path_buf()));
        if let Some(node) = self.nodes.get_mut(to) {
            node.imported_by.insert(from.to_path_buf());
        }
        added
    }

    // ─── Queries ────────────────────────────────────────────────

    pub fn get(&self, path: &Path) -> Option<&FileNode> {
        self.nodes.get(path)
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.nodes.contains_key(path)
    }

    /// Nodes in discovery order.
    pub fn nodes(&self) -> impl Iterator<Item = &FileNode> {
        self.nodes.values()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn edge_count(&self) -> usize {
        self.nodes.values().map(|n| n.imports.len()).sum()
    }

    /// Groups of files that import each other, directly or transitively.
    ///
    /// Each group is sorted, and groups are sorted by their first path.
    /// A file importing itself forms a group of one.
    pub fn cycles(&self) -> Vec<Vec<PathBuf>> {
        let mut graph: DiGraph<usize, ()> = DiGraph::with_capacity(self.nodes.len(), 0);
        let indices: Vec<NodeIndex> = (0..self.nodes.len()).map(|i| graph.add_node(i)).collect();
        for (i, node) in self.nodes.values().enumerate() {
            for target in &node.imports {
                if let Some(j) = self.nodes.get_index_of(target) {
                    graph.add_edge(indices[i], indices[j], ());
                }
            }
        }

        let mut groups: Vec<Vec<PathBuf>> = tarjan_scc(&graph)
            .into_iter()
            .filter(|component| {
                component.len() > 1 || graph.contains_edge(component[0], component[0])
            })
            .map(|component| {
                let mut paths: Vec<PathBuf> = component
                    .into_iter()
                    .filter_map(|idx| self.nodes.get_index(graph[idx]).map(|(p, _)| p.clone()))
                    .collect();
                paths.sort();
                paths
            })
            .collect();
        groups.sort();
        groups
    }
}

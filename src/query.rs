//! Query layer over a finished [`DependencyGraph`].
//!
//! Every path in a response is root-relative and `/`-separated.

use path_clean::PathClean;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{DepGraphError, Result};
use crate::graph::{DependencyGraph, ExportedSymbol, FileNode};

/// Imports, importers and exports of one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Relationships {
    pub path: String,
    pub imports: Vec<String>,
    pub imported_by: Vec<String>,
    pub symbols: Vec<ExportedSymbol>,
}

/// A file and its inbound degree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedFile {
    pub path: String,
    pub imported_by_count: usize,
}

/// Overview of the whole graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub root: String,
    pub file_count: usize,
    pub edge_count: usize,
    pub most_imported: Vec<RankedFile>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CyclesResponse {
    pub count: usize,
    pub cycles: Vec<Vec<String>>,
}

/// Look up one file's relationships.
///
/// `file_path` is resolved against the root; an exact match wins. Otherwise
/// the query is matched as a trailing sequence of path components. A query
/// matching several files is an [`DepGraphError::AmbiguousPath`] error,
/// while a query matching nothing is `Ok(None)`.
pub fn get_relationships(graph: &DependencyGraph, file_path: &str) -> Result<Option<Relationships>> {
    match find_node(graph, file_path)? {
        Some(node) => Ok(Some(relationships(graph, node))),
        None => Ok(None),
    }
}

fn find_node<'g>(graph: &'g DependencyGraph, file_path: &str) -> Result<Option<&'g FileNode>> {
    if graph.is_empty() || file_path.trim().is_empty() {
        return Ok(None);
    }

    let query = PathBuf::from(file_path.trim()).clean();
    if let Some(node) = graph.node(&graph.root().join(&query).clean()) {
        return Ok(Some(node));
    }
    if query.is_absolute() || query == Path::new(".") {
        return Ok(None);
    }

    let mut matches: Vec<&FileNode> = graph
        .nodes()
        .filter(|node| node.path.ends_with(&query))
        .collect();
    matches.sort_by(|a, b| a.path.cmp(&b.path));

    match matches.len() {
        0 => Ok(None),
        1 => Ok(matches.pop()),
        _ => Err(DepGraphError::AmbiguousPath {
            query: file_path.to_string(),
            candidates: matches.iter().map(|n| graph.relative(&n.path)).collect(),
        }),
    }
}

fn relationships(graph: &DependencyGraph, node: &FileNode) -> Relationships {
    Relationships {
        path: graph.relative(&node.path),
        imports: node.imports.iter().map(|p| graph.relative(p)).collect(),
        imported_by: node.imported_by.iter().map(|p| graph.relative(p)).collect(),
        symbols: node.symbols.clone(),
    }
}

/// File count plus the most-imported files.
///
/// Ranked by inbound degree descending, ties by path ascending; the list
/// length comes from the graph's `summary_limit`.
pub fn get_summary(graph: &DependencyGraph) -> Summary {
    let mut ranked: Vec<&FileNode> = graph.nodes().collect();
    ranked.sort_by(|a, b| {
        b.inbound_degree()
            .cmp(&a.inbound_degree())
            .then_with(|| a.path.cmp(&b.path))
    });

    Summary {
        root: graph.root().display().to_string(),
        file_count: graph.len(),
        edge_count: graph.store().edge_count(),
        most_imported: ranked
            .into_iter()
            .take(graph.config().summary_limit)
            .map(|node| RankedFile {
                path: graph.relative(&node.path),
                imported_by_count: node.inbound_degree(),
            })
            .collect(),
    }
}

/// Groups of files that import each other.
pub fn dependency_cycles(graph: &DependencyGraph) -> CyclesResponse {
    let cycles: Vec<Vec<String>> = graph
        .store()
        .cycles()
        .into_iter()
        .map(|group| group.iter().map(|p| graph.relative(p)).collect())
        .collect();
    CyclesResponse {
        count: cycles.len(),
        cycles,
    }
}

//! Scans a project root and assembles its dependency graph.
//!
//! Two phases: discovery creates one empty node per file, then every file
//! is analyzed and its references resolved into edges. Analysis runs on the
//! rayon pool when enabled; results are collected in discovery order and
//! edges are recorded sequentially, so `imports` order does not depend on
//! scheduling.

use rayon::prelude::*;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use super::engine::DependencyGraph;
use super::store::GraphStore;
use super::types::{BuildStats, ExportedSymbol};
use crate::config::DepGraphConfig;
use crate::discover::{canonical_root, FileDiscoverer};
use crate::error::Result;
use crate::parser::analyze_file;
use crate::resolve::PathResolver;

/// Per-file result of analysis plus resolution.
#[derive(Debug, Default)]
struct FileOutcome {
    symbols: Vec<ExportedSymbol>,
    targets: Vec<PathBuf>,
    unresolved: usize,
    failed: bool,
}

/// Build a dependency graph from every eligible file under `root`.
///
/// Fails only if the root cannot be canonicalized or walked. Files that
/// cannot be read or parsed are logged and kept as edge-free nodes.
pub fn build_graph(root: &Path, config: &DepGraphConfig) -> Result<DependencyGraph> {
    let root = canonical_root(root)?;
    info!(root = %root.display(), "building dependency graph");

    let files = FileDiscoverer::new(config).discover(&root)?;

    // Phase 1: one empty node per discovered file.
    let mut store = GraphStore::with_capacity(files.len());
    for file in &files {
        store.init_node(file.clone());
    }

    // Phase 2: analyze and resolve.
    let known: HashSet<PathBuf> = files.iter().cloned().collect();
    let resolver = PathResolver::new(&root, &known);
    let outcomes: Vec<FileOutcome> = if config.parallel {
        files
            .par_iter()
            .map(|file| analyze_and_resolve(file, &resolver))
            .collect()
    } else {
        files
            .iter()
            .map(|file| analyze_and_resolve(file, &resolver))
            .collect()
    };

    let mut stats = BuildStats {
        total_files: files.len(),
        ..BuildStats::default()
    };
    for (file, outcome) in files.iter().zip(outcomes) {
        stats.unresolved_count += outcome.unresolved;
        if outcome.failed {
            stats.failed_files += 1;
        }
        store.set_symbols(file, outcome.symbols);
        for target in &outcome.targets {
            store.record_edge(file, target);
        }
    }
    stats.node_count = store.len();
    stats.edge_count = store.edge_count();

    info!(
        files = stats.total_files,
        edges = stats.edge_count,
        unresolved = stats.unresolved_count,
        failed = stats.failed_files,
        "dependency graph built"
    );

    Ok(DependencyGraph::from_parts(root, store, config.clone(), stats))
}

fn analyze_and_resolve(file: &Path, resolver: &PathResolver<'_>) -> FileOutcome {
    let analysis = match analyze_file(file) {
        Ok(analysis) => analysis,
        Err(e) => {
            warn!(file = %file.display(), error = %e, "skipping file that failed analysis");
            return FileOutcome {
                failed: true,
                ..FileOutcome::default()
            };
        }
    };

    let origin_dir = file.parent().unwrap_or(file);
    let mut outcome = FileOutcome {
        symbols: analysis.symbols,
        ..FileOutcome::default()
    };
    for reference in &analysis.references {
        match resolver.resolve(origin_dir, &reference.specifier) {
            Some(target) => outcome.targets.push(target),
            None => {
                debug!(
                    file = %file.display(),
                    specifier = %reference.specifier,
                    kind = %reference.kind,
                    line = reference.line,
                    "unresolved reference"
                );
                outcome.unresolved += 1;
            }
        }
    }
    outcome
}

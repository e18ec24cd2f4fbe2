//! # depgraph
//!
//! Static module dependency graph for JavaScript and TypeScript projects.
//!
//! depgraph discovers source files under a project root, extracts each
//! file's imports, re-exports, dynamic imports, `require` calls and
//! exported symbols from its syntax tree, resolves every specifier to a
//! file inside the project, and assembles a bidirectional graph that can
//! be queried by path.
//!
//! ## Key Features
//!
//! - **Syntax-aware**: references inside comments and strings are ignored
//! - **Symmetric**: every import edge is mirrored in `imported_by`
//! - **Snapshot rebuilds**: each build replaces the whole graph
//! - **Partial-failure tolerant**: one broken file never stops a build
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use depgraph::{get_relationships, get_summary, DependencyGraph};
//! use std::path::Path;
//!
//! let mut graph = DependencyGraph::new();
//! let stats = graph.build(Path::new("."))?;
//! println!("{} files", stats.node_count);
//!
//! if let Some(rel) = get_relationships(&graph, "src/index.ts")? {
//!     println!("imports: {:?}", rel.imports);
//! }
//! println!("{:?}", get_summary(&graph).most_imported);
//! # Ok::<(), depgraph::DepGraphError>(())
//! ```

pub mod cli;
pub mod config;
pub mod discover;
pub mod error;
pub mod graph;
pub mod mcp;
pub mod parser;
pub mod query;
pub mod resolve;

// Re-exports for convenience
pub use config::DepGraphConfig;
pub use error::{DepGraphError, Result};

pub use graph::{
    build_graph, BuildStats, DependencyGraph, ExportedSymbol, FileNode, SymbolKind,
};
pub use parser::{analyze, SourceLanguage};
pub use query::{
    dependency_cycles, get_relationships, get_summary, CyclesResponse, RankedFile,
    Relationships, Summary,
};
pub use resolve::PathResolver;

//! File nodes, the symmetric edge store and the graph builder.

pub mod builder;
pub mod engine;
pub mod store;
pub mod types;

pub use builder::build_graph;
pub use engine::DependencyGraph;
pub use store::GraphStore;
pub use types::{
    BuildStats, ExportedSymbol, FileAnalysis, FileNode, RawReference, ReferenceKind, SymbolKind,
};

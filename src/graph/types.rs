//! Core types for the dependency graph.
//!
//! Defines file nodes, exported symbols, and the intermediate records
//! produced by source analysis before they are resolved into edges.

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// The kind of an exported symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SymbolKind {
    /// An exported function or generator declaration.
    Function,
    /// An exported class declaration.
    Class,
    /// One identifier bound by an exported `const`/`let`/`var`.
    Variable,
}

impl fmt::Display for SymbolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SymbolKind::Function => write!(f, "function"),
            SymbolKind::Class => write!(f, "class"),
            SymbolKind::Variable => write!(f, "variable"),
        }
    }
}

/// A symbol exported by a file, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportedSymbol {
    pub kind: SymbolKind,
    pub name: String,
}

impl ExportedSymbol {
    pub fn new(kind: SymbolKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
        }
    }
}

/// The syntactic shape a module reference was found in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReferenceKind {
    /// `import … from '<specifier>'`
    Import,
    /// `export … from '<specifier>'`
    ReExport,
    /// `import('<specifier>')`
    DynamicImport,
    /// `require('<specifier>')`
    Require,
}

impl fmt::Display for ReferenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReferenceKind::Import => write!(f, "import"),
            ReferenceKind::ReExport => write!(f, "re_export"),
            ReferenceKind::DynamicImport => write!(f, "dynamic_import"),
            ReferenceKind::Require => write!(f, "require"),
        }
    }
}

/// A module specifier as written in source, before resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawReference {
    /// The literal specifier text (quotes stripped).
    pub specifier: String,
    pub kind: ReferenceKind,
    /// Line of the reference (1-indexed).
    pub line: usize,
}

/// Everything extracted from one source file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileAnalysis {
    /// References in source order; duplicates allowed.
    pub references: Vec<RawReference>,
    /// Exported symbols in declaration order.
    pub symbols: Vec<ExportedSymbol>,
}

impl FileAnalysis {
    pub fn specifiers(&self) -> impl Iterator<Item = &str> {
        self.references.iter().map(|r| r.specifier.as_str())
    }
}

/// One discovered file in the graph.
///
/// `imports` and `imported_by` are insertion-ordered sets of canonical paths.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileNode {
    pub path: PathBuf,
    pub imports: IndexSet<PathBuf>,
    pub imported_by: IndexSet<PathBuf>,
    pub symbols: Vec<ExportedSymbol>,
}

impl FileNode {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            imports: IndexSet::new(),
            imported_by: IndexSet::new(),
            symbols: Vec::new(),
        }
    }

    /// Inbound degree: how many files import this one.
    pub fn inbound_degree(&self) -> usize {
        self.imported_by.len()
    }
}

/// Outcome of a full build.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildStats {
    /// Nodes in the finished graph.
    pub node_count: usize,
    /// Files produced by discovery.
    pub total_files: usize,
    /// Distinct import edges.
    pub edge_count: usize,
    /// References that matched no discovered file.
    pub unresolved_count: usize,
    /// Files whose read or parse failed; they stay edge-free.
    pub failed_files: usize,
}

//! Error types for depgraph.

use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by the dependency graph.
///
/// Only discovery failures abort a build. Per-file read and parse
/// failures are logged and absorbed by the builder.
#[derive(Debug, Error)]
pub enum DepGraphError {
    #[error("project root not found: {path}: {source}")]
    RootNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("project root is not a directory: {0}")]
    RootNotDirectory(PathBuf),

    #[error("directory walk failed: {0}")]
    Walk(#[from] ignore::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("unsupported language for file: {0}")]
    UnsupportedLanguage(PathBuf),

    #[error("failed to parse {0}")]
    Parse(PathBuf),

    #[error("grammar error: {0}")]
    Grammar(#[from] tree_sitter::LanguageError),

    #[error("'{query}' matches {} files: {}", candidates.len(), candidates.join(", "))]
    AmbiguousPath {
        query: String,
        candidates: Vec<String>,
    },

    #[error("invalid config: {0}")]
    Config(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, DepGraphError>;

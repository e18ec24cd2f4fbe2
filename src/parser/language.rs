//! Language detection and tree-sitter grammar loading.

use serde::{Deserialize, Serialize};
use std::path::Path;
use tree_sitter::Language;

/// How a discovered file is treated by the analyzer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SourceLanguage {
    JavaScript,
    TypeScript,
    Tsx,
    /// Data file: a valid import target, never parsed.
    Json,
}

impl SourceLanguage {
    /// Detect language from file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?;
        match ext {
            "js" | "mjs" | "cjs" | "jsx" => Some(SourceLanguage::JavaScript),
            "ts" | "mts" | "cts" => Some(SourceLanguage::TypeScript),
            "tsx" => Some(SourceLanguage::Tsx),
            "json" => Some(SourceLanguage::Json),
            _ => None,
        }
    }

    /// Get the tree-sitter grammar, or `None` for data files.
    pub fn tree_sitter_language(&self) -> Option<Language> {
        match self {
            SourceLanguage::JavaScript => Some(tree_sitter_javascript::LANGUAGE.into()),
            SourceLanguage::TypeScript => {
                Some(tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into())
            }
            SourceLanguage::Tsx => Some(tree_sitter_typescript::LANGUAGE_TSX.into()),
            SourceLanguage::Json => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            SourceLanguage::JavaScript => "JavaScript",
            SourceLanguage::TypeScript => "TypeScript",
            SourceLanguage::Tsx => "TSX",
            SourceLanguage::Json => "JSON",
        }
    }
}

//! Source analysis: tree-sitter parsing plus reference/export extraction.

pub mod javascript;
pub mod language;
pub mod syntax;

pub use language::SourceLanguage;
pub use syntax::SyntaxKind;

use std::fs;
use std::path::Path;
use tracing::debug;
use tree_sitter::Parser;

use crate::error::{DepGraphError, Result};
use crate::graph::types::FileAnalysis;

/// Parse `source` and extract its raw module references and exported symbols.
///
/// Data files (JSON) analyze to an empty result.
pub fn analyze(path: &Path, source: &str) -> Result<FileAnalysis> {
    let language = SourceLanguage::from_path(path)
        .ok_or_else(|| DepGraphError::UnsupportedLanguage(path.to_path_buf()))?;
    let Some(grammar) = language.tree_sitter_language() else {
        return Ok(FileAnalysis::default());
    };

    let mut parser = Parser::new();
    parser.set_language(&grammar)?;
    let Some(tree) = parser.parse(source, None) else {
        debug!(file = %path.display(), language = language.name(), "parser produced no tree");
        return Err(DepGraphError::Parse(path.to_path_buf()));
    };

    Ok(javascript::extract(tree.root_node(), source.as_bytes()))
}

/// Read a file from disk and analyze it.
pub fn analyze_file(path: &Path) -> Result<FileAnalysis> {
    let source = fs::read_to_string(path)?;
    analyze(path, &source)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::types::{ExportedSymbol, ReferenceKind, SymbolKind};
    use std::path::PathBuf;

    fn specifiers(path: &str, source: &str) -> Vec<String> {
        analyze(&PathBuf::from(path), source)
            .unwrap()
            .specifiers()
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn test_static_imports() {
        let source = r#"
import { useState } from 'react';
import axios from "axios";
import './side-effect';
import * as utils from './utils';
"#;
        assert_eq!(
            specifiers("a.js", source),
            vec!["react", "axios", "./side-effect", "./utils"]
        );
    }

    #[test]
    fn test_re_exports() {
        let source = r#"
export * from './all';
export { a, b as c } from './named';
export { local };
"#;
        let analysis = analyze(&PathBuf::from("a.ts"), source).unwrap();
        let specs: Vec<&str> = analysis.specifiers().collect();
        assert_eq!(specs, vec!["./all", "./named"]);
        assert!(analysis
            .references
            .iter()
            .all(|r| r.kind == ReferenceKind::ReExport));
    }

    #[test]
    fn test_dynamic_import_and_require() {
        let source = r#"
const lazy = () => import('./lazy');
const fs = require('fs');
function load() {
    return require('./config.json');
}
const computed = require(name);
const tpl = import(`./tpl`);
"#;
        let analysis = analyze(&PathBuf::from("a.js"), source).unwrap();
        let refs: Vec<(&str, ReferenceKind)> = analysis
            .references
            .iter()
            .map(|r| (r.specifier.as_str(), r.kind))
            .collect();
        assert_eq!(
            refs,
            vec![
                ("./lazy", ReferenceKind::DynamicImport),
                ("fs", ReferenceKind::Require),
                ("./config.json", ReferenceKind::Require),
            ]
        );
    }

    #[test]
    fn test_comments_and_strings_are_ignored() {
        let source = r#"
// import { x } from './old';
/* require('./older') */
const s = "import { y } from './fake'";
const t = 'require("./fake2")';
import { y } from './real';
"#;
        assert_eq!(specifiers("a.ts", source), vec!["./real"]);
    }

    #[test]
    fn test_typescript_import_require() {
        let source = "import fs = require('./fs-shim');\nimport type { T } from './types';\n";
        assert_eq!(specifiers("a.ts", source), vec!["./fs-shim", "./types"]);
    }

    #[test]
    fn test_duplicates_are_kept() {
        let source = "import a from './a';\nimport { b } from './a';\n";
        assert_eq!(specifiers("x.js", source), vec!["./a", "./a"]);
    }

    #[test]
    fn test_exported_symbols_in_order() {
        let source = r#"
export function alpha() {}
function hidden() {}
export class Beta {}
export const one = 1, two = 2;
export let { three, four: renamed, five = 5 } = obj;
export var [six, ...rest] = arr;
const notExported = 0;
"#;
        let analysis = analyze(&PathBuf::from("a.js"), source).unwrap();
        assert_eq!(
            analysis.symbols,
            vec![
                ExportedSymbol::new(SymbolKind::Function, "alpha"),
                ExportedSymbol::new(SymbolKind::Class, "Beta"),
                ExportedSymbol::new(SymbolKind::Variable, "one"),
                ExportedSymbol::new(SymbolKind::Variable, "two"),
                ExportedSymbol::new(SymbolKind::Variable, "three"),
                ExportedSymbol::new(SymbolKind::Variable, "renamed"),
                ExportedSymbol::new(SymbolKind::Variable, "five"),
                ExportedSymbol::new(SymbolKind::Variable, "six"),
                ExportedSymbol::new(SymbolKind::Variable, "rest"),
            ]
        );
    }

    #[test]
    fn test_typescript_exports() {
        let source = r#"
export interface Shape { area(): number }
export abstract class Base {}
export class Circle extends Base implements Shape { area() { return 1; } }
export const PI: number = 3.14;
export function* ids(): Generator<number> { yield 1; }
"#;
        let analysis = analyze(&PathBuf::from("shapes.ts"), source).unwrap();
        assert_eq!(
            analysis.symbols,
            vec![
                ExportedSymbol::new(SymbolKind::Class, "Base"),
                ExportedSymbol::new(SymbolKind::Class, "Circle"),
                ExportedSymbol::new(SymbolKind::Variable, "PI"),
                ExportedSymbol::new(SymbolKind::Function, "ids"),
            ]
        );
    }

    #[test]
    fn test_exported_initializer_is_walked() {
        let source = "export const config = require('./config');\n";
        let analysis = analyze(&PathBuf::from("a.js"), source).unwrap();
        assert_eq!(analysis.specifiers().collect::<Vec<_>>(), vec!["./config"]);
        assert_eq!(
            analysis.symbols,
            vec![ExportedSymbol::new(SymbolKind::Variable, "config")]
        );
    }

    #[test]
    fn test_tsx_component() {
        let source = r#"
import React from 'react';
import { Button } from './Button';
export function App() { return <Button label="import('./nope')" />; }
"#;
        let analysis = analyze(&PathBuf::from("App.tsx"), source).unwrap();
        assert_eq!(
            analysis.specifiers().collect::<Vec<_>>(),
            vec!["react", "./Button"]
        );
        assert_eq!(analysis.symbols.len(), 1);
    }

    #[test]
    fn test_reference_lines() {
        let source = "\n\nimport a from './a';\n";
        let analysis = analyze(&PathBuf::from("x.js"), source).unwrap();
        assert_eq!(analysis.references[0].line, 3);
    }

    #[test]
    fn test_json_is_empty() {
        let analysis = analyze(&PathBuf::from("data.json"), "{\"import\": \"./x\"}").unwrap();
        assert_eq!(analysis, FileAnalysis::default());
    }

    #[test]
    fn test_empty_source() {
        let analysis = analyze(&PathBuf::from("empty.ts"), "").unwrap();
        assert!(analysis.references.is_empty());
        assert!(analysis.symbols.is_empty());
    }

    #[test]
    fn test_malformed_syntax_is_tolerated() {
        let source = "import { a } from './a';\nconst x = (;\n";
        let analysis = analyze(&PathBuf::from("bad.js"), source).unwrap();
        assert_eq!(analysis.specifiers().collect::<Vec<_>>(), vec!["./a"]);
    }

    #[test]
    fn test_unsupported_language() {
        let result = analyze(&PathBuf::from("main.py"), "import os");
        assert!(matches!(
            result.unwrap_err(),
            DepGraphError::UnsupportedLanguage(_)
        ));
    }

    #[test]
    fn test_analyze_missing_file_is_io_error() {
        let result = analyze_file(&PathBuf::from("/definitely/not/here.ts"));
        assert!(matches!(result.unwrap_err(), DepGraphError::Io(_)));
    }
}

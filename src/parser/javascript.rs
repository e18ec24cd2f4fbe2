//! Reference and export extraction for JavaScript/TypeScript trees.
//!
//! Walks the syntax tree rather than the text, so specifiers that only
//! appear inside comments or string literals are never picked up.

use tree_sitter::Node;

use super::syntax::SyntaxKind;
use crate::graph::types::{ExportedSymbol, FileAnalysis, RawReference, ReferenceKind, SymbolKind};

/// Extract module references and exported symbols from a parsed file.
pub fn extract(root: Node, source: &[u8]) -> FileAnalysis {
    let mut analysis = FileAnalysis::default();

    // Pre-order walk with an explicit stack; children are pushed in
    // reverse so nodes pop in source order.
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        let kind = SyntaxKind::of(node.kind());
        match kind {
            SyntaxKind::ImportDecl => {
                if let Some(specifier) = import_source(node, source) {
                    push_reference(&mut analysis, specifier, ReferenceKind::Import, node);
                }
                continue;
            }
            SyntaxKind::ExportDecl => {
                if let Some(specifier) = node
                    .child_by_field_name("source")
                    .and_then(|s| string_value(s, source))
                {
                    push_reference(&mut analysis, specifier, ReferenceKind::ReExport, node);
                }
                if let Some(declaration) = node.child_by_field_name("declaration") {
                    exported_symbols(declaration, source, &mut analysis.symbols);
                }
            }
            SyntaxKind::CallExpr => {
                if let Some((specifier, ref_kind)) = module_call(node, source) {
                    push_reference(&mut analysis, specifier, ref_kind, node);
                }
            }
            SyntaxKind::StringLiteral | SyntaxKind::Comment => {}
            SyntaxKind::FunctionDecl
            | SyntaxKind::ClassDecl
            | SyntaxKind::VariableDecl
            | SyntaxKind::Other => {}
        }

        if kind.is_opaque() {
            continue;
        }
        let mut cursor = node.walk();
        let children: Vec<Node> = node.children(&mut cursor).collect();
        stack.extend(children.into_iter().rev());
    }

    analysis
}

fn push_reference(analysis: &mut FileAnalysis, specifier: String, kind: ReferenceKind, node: Node) {
    analysis.references.push(RawReference {
        specifier,
        kind,
        line: node.start_position().row + 1,
    });
}

/// The `source` of an import, including TypeScript's `import x = require('y')`.
fn import_source(node: Node, source: &[u8]) -> Option<String> {
    if let Some(s) = node.child_by_field_name("source") {
        return string_value(s, source);
    }
    let mut cursor = node.walk();
    let clause = node
        .named_children(&mut cursor)
        .find(|c| c.kind() == "import_require_clause")?;
    string_value(clause.child_by_field_name("source")?, source)
}

/// Recognize `import('x')` and `require('x')` with a literal first argument.
fn module_call(node: Node, source: &[u8]) -> Option<(String, ReferenceKind)> {
    let function = node.child_by_field_name("function")?;
    let kind = match function.kind() {
        "import" => ReferenceKind::DynamicImport,
        "identifier" if function.utf8_text(source).ok()? == "require" => ReferenceKind::Require,
        _ => return None,
    };

    let args = node.child_by_field_name("arguments")?;
    if args.kind() != "arguments" {
        return None;
    }
    let mut cursor = args.walk();
    let first = args
        .named_children(&mut cursor)
        .find(|c| SyntaxKind::of(c.kind()) != SyntaxKind::Comment)?;
    match SyntaxKind::of(first.kind()) {
        SyntaxKind::StringLiteral => Some((string_value(first, source)?, kind)),
        _ => None,
    }
}

/// Text of a string literal without its quotes.
fn string_value(node: Node, source: &[u8]) -> Option<String> {
    if SyntaxKind::of(node.kind()) != SyntaxKind::StringLiteral {
        return None;
    }
    let text = node.utf8_text(source).ok()?;
    if text.len() < 2 {
        return None;
    }
    text.get(1..text.len() - 1).map(str::to_string)
}

fn exported_symbols(declaration: Node, source: &[u8], out: &mut Vec<ExportedSymbol>) {
    match SyntaxKind::of(declaration.kind()) {
        SyntaxKind::FunctionDecl => {
            if let Some(name) = field_text(declaration, "name", source) {
                out.push(ExportedSymbol::new(SymbolKind::Function, name));
            }
        }
        SyntaxKind::ClassDecl => {
            if let Some(name) = field_text(declaration, "name", source) {
                out.push(ExportedSymbol::new(SymbolKind::Class, name));
            }
        }
        SyntaxKind::VariableDecl => {
            let mut cursor = declaration.walk();
            for declarator in declaration.named_children(&mut cursor) {
                if declarator.kind() != "variable_declarator" {
                    continue;
                }
                let Some(name) = declarator.child_by_field_name("name") else {
                    continue;
                };
                let mut names = Vec::new();
                pattern_names(name, source, &mut names);
                out.extend(
                    names
                        .into_iter()
                        .map(|n| ExportedSymbol::new(SymbolKind::Variable, n)),
                );
            }
        }
        SyntaxKind::ImportDecl
        | SyntaxKind::ExportDecl
        | SyntaxKind::CallExpr
        | SyntaxKind::StringLiteral
        | SyntaxKind::Comment
        | SyntaxKind::Other => {}
    }
}

/// Identifiers bound by a declarator name, including destructuring.
fn pattern_names(node: Node, source: &[u8], out: &mut Vec<String>) {
    match node.kind() {
        "identifier" | "shorthand_property_identifier_pattern" => {
            if let Ok(text) = node.utf8_text(source) {
                out.push(text.to_string());
            }
        }
        "pair_pattern" => {
            if let Some(value) = node.child_by_field_name("value") {
                pattern_names(value, source, out);
            }
        }
        "assignment_pattern" | "object_assignment_pattern" => {
            if let Some(left) = node.child_by_field_name("left") {
                pattern_names(left, source, out);
            }
        }
        "object_pattern" | "array_pattern" | "rest_pattern" => {
            let mut cursor = node.walk();
            let children: Vec<Node> = node.named_children(&mut cursor).collect();
            for child in children {
                pattern_names(child, source, out);
            }
        }
        _ => {}
    }
}

fn field_text(node: Node, field: &str, source: &[u8]) -> Option<String> {
    node.child_by_field_name(field)?
        .utf8_text(source)
        .ok()
        .map(str::to_string)
}

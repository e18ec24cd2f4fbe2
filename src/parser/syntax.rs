//! The closed set of syntax-node categories the analyzer reacts to.

/// Node categories recognized while walking a JS/TS syntax tree.
///
/// Every tree-sitter node kind maps to exactly one variant, so the
/// walker's `match` is exhaustive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyntaxKind {
    /// `import_statement`
    ImportDecl,
    /// `export_statement`
    ExportDecl,
    /// `call_expression`
    CallExpr,
    /// `string`
    StringLiteral,
    /// `comment`
    Comment,
    /// `function_declaration`, `generator_function_declaration`
    FunctionDecl,
    /// `class_declaration`, `abstract_class_declaration`
    ClassDecl,
    /// `lexical_declaration`, `variable_declaration`
    VariableDecl,
    /// Anything else; walked through transparently.
    Other,
}

impl SyntaxKind {
    pub fn of(kind: &str) -> Self {
        match kind {
            "import_statement" => SyntaxKind::ImportDecl,
            "export_statement" => SyntaxKind::ExportDecl,
            "call_expression" => SyntaxKind::CallExpr,
            "string" => SyntaxKind::StringLiteral,
            "comment" => SyntaxKind::Comment,
            "function_declaration" | "generator_function_declaration" => {
                SyntaxKind::FunctionDecl
            }
            "class_declaration" | "abstract_class_declaration" => SyntaxKind::ClassDecl,
            "lexical_declaration" | "variable_declaration" => SyntaxKind::VariableDecl,
            _ => SyntaxKind::Other,
        }
    }

    /// Leaf categories never contain references worth descending into.
    pub fn is_opaque(&self) -> bool {
        matches!(self, SyntaxKind::StringLiteral | SyntaxKind::Comment)
    }
}

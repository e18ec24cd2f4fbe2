//! MCP tools: schemas and dispatch onto builds and queries.

use serde_json::{json, Value};
use std::path::{Path, PathBuf};
use std::sync::RwLock;
use tracing::{info, warn};

use super::types::{ToolDefinition, ToolsCallResult};
use crate::config::DepGraphConfig;
use crate::graph::{build_graph, DependencyGraph};
use crate::query::{dependency_cycles, get_relationships, get_summary};

/// Return the list of all available tools with their JSON schemas.
pub fn list_tools() -> Vec<ToolDefinition> {
    vec![
        ToolDefinition {
            name: "depgraph_build",
            description: "Rebuild the module dependency graph from a project root. \
                Discovers JS/TS source files, parses imports, re-exports, dynamic \
                imports and require() calls, and resolves them to project files.",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "root": {
                        "type": "string",
                        "description": "Project root (default: the server's project root)"
                    }
                }
            }),
        },
        ToolDefinition {
            name: "depgraph_relationships",
            description: "Show what a file imports, which files import it, and the \
                functions, classes and variables it exports.",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "file": {
                        "type": "string",
                        "description": "Root-relative path, or an unambiguous path suffix (e.g. 'src/utils.ts')"
                    }
                },
                "required": ["file"]
            }),
        },
        ToolDefinition {
            name: "depgraph_summary",
            description: "File count, edge count, and the most-imported files of the \
                current graph.",
            input_schema: json!({
                "type": "object",
                "properties": {}
            }),
        },
        ToolDefinition {
            name: "depgraph_cycles",
            description: "List groups of files that import each other (circular dependencies).",
            input_schema: json!({
                "type": "object",
                "properties": {}
            }),
        },
    ]
}

/// Dispatch a tool call to the appropriate handler.
///
/// `default_root` is used by `depgraph_build` when no root is given.
pub fn call_tool(
    graph: &RwLock<DependencyGraph>,
    default_root: &Path,
    name: &str,
    arguments: &Value,
) -> ToolsCallResult {
    match name {
        "depgraph_build" => handle_build(graph, default_root, arguments),
        "depgraph_relationships" => with_graph(graph, |g| handle_relationships(g, arguments)),
        "depgraph_summary" => with_graph(graph, |g| ToolsCallResult::json(&get_summary(g))),
        "depgraph_cycles" => with_graph(graph, |g| ToolsCallResult::json(&dependency_cycles(g))),
        _ => ToolsCallResult::error(format!("Unknown tool: {}", name)),
    }
}

fn with_graph(
    graph: &RwLock<DependencyGraph>,
    f: impl FnOnce(&DependencyGraph) -> ToolsCallResult,
) -> ToolsCallResult {
    match graph.read() {
        Ok(guard) => f(&guard),
        Err(e) => ToolsCallResult::error(format!("Graph lock error: {}", e)),
    }
}

fn handle_build(
    graph: &RwLock<DependencyGraph>,
    default_root: &Path,
    args: &Value,
) -> ToolsCallResult {
    let root = args
        .get("root")
        .and_then(|v| v.as_str())
        .map(PathBuf::from)
        .unwrap_or_else(|| default_root.to_path_buf());

    // Build outside the lock; readers keep the old snapshot meanwhile.
    let config = DepGraphConfig::load_for_root(&root);
    let fresh = match build_graph(&root, &config) {
        Ok(g) => g,
        Err(e) => {
            warn!(root = %root.display(), error = %e, "build failed");
            return ToolsCallResult::error(format!("Build failed: {}", e));
        }
    };
    let stats = fresh.stats();

    match graph.write() {
        Ok(mut guard) => {
            *guard = fresh;
            info!(nodes = stats.node_count, "graph replaced");
            ToolsCallResult::json(&stats)
        }
        Err(e) => ToolsCallResult::error(format!("Graph lock error: {}", e)),
    }
}

fn handle_relationships(graph: &DependencyGraph, args: &Value) -> ToolsCallResult {
    let file = match args.get("file").and_then(|v| v.as_str()) {
        Some(f) => f,
        None => return ToolsCallResult::error("Missing required parameter: file".to_string()),
    };

    match get_relationships(graph, file) {
        Ok(Some(rel)) => ToolsCallResult::json(&rel),
        Ok(None) => ToolsCallResult::error(format!("File not found in graph: {}", file)),
        Err(e) => ToolsCallResult::error(e.to_string()),
    }
}

//! depgraph MCP server: dependency graph tools over stdio.
//!
//! Runs a JSON-RPC 2.0 server over STDIO that exposes the dependency graph
//! through the Model Context Protocol (MCP).
//!
//! Usage:
//!   depgraph-mcp [project_root]
//!
//! If no project root is given, uses the current working directory. The
//! graph is built once at startup; the `depgraph_build` tool rebuilds it.

use std::path::PathBuf;

use depgraph::mcp::server::{self, ServerState};
use depgraph::{build_graph, DepGraphConfig, DependencyGraph};
use tracing::{info, warn};

fn main() {
    // Tracing goes to stderr; stdout carries the protocol.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let project_root = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")));

    info!(root = %project_root.display(), "depgraph MCP server starting");

    let config = DepGraphConfig::load_for_root(&project_root);
    let graph = match build_graph(&project_root, &config) {
        Ok(graph) => graph,
        Err(e) => {
            warn!(error = %e, "initial build failed, starting with an empty graph");
            DependencyGraph::with_config(config)
        }
    };

    let state = ServerState::new(graph, project_root);
    info!("MCP server ready, waiting for requests on stdin");
    server::run(&state);
}

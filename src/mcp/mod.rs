//! MCP (Model Context Protocol) server module.
//!
//! Provides a JSON-RPC 2.0 over STDIO interface for AI agents to build
//! and query the dependency graph.

pub mod server;
pub mod tools;
pub mod types;

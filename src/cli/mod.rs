//! Command-line interface definition for depgraph.
//!
//! Commands:
//! - build: index a project and print build statistics
//! - deps <file>: imports, importers and exports of one file
//! - summary: file count and most-imported files
//! - cycles: circular import groups

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "depgraph")]
#[command(about = "Module dependency graph for JavaScript and TypeScript projects")]
#[command(version)]
pub struct Cli {
    /// Project root directory (default: current directory)
    #[arg(short, long, default_value = ".")]
    pub root: PathBuf,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    /// Analyze files on a single thread
    #[arg(long, global = true)]
    pub sequential: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build the graph and print statistics
    Build,

    /// Show what a file imports, what imports it, and what it exports
    Deps {
        /// Root-relative path or unambiguous path suffix
        file: String,
    },

    /// Show file count and the most-imported files
    Summary,

    /// List groups of files that import each other
    Cycles,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_deps() {
        let cli = Cli::parse_from(["depgraph", "-r", "web", "deps", "src/app.ts", "--json"]);
        assert_eq!(cli.root, PathBuf::from("web"));
        assert!(cli.json);
        assert!(matches!(cli.command, Commands::Deps { ref file } if file == "src/app.ts"));
    }
}

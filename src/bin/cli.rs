//! depgraph CLI - module dependency graph for JS/TS projects.
//!
//! Usage:
//!   depgraph build                 # Build and print statistics
//!   depgraph deps <file>           # Imports / importers / exports of a file
//!   depgraph summary               # Most-imported files
//!   depgraph cycles                # Circular import groups
//!   depgraph --json summary        # Any command as JSON

use anyhow::{bail, Result};
use clap::Parser;
use serde::Serialize;

use depgraph::cli::{Cli, Commands};
use depgraph::{
    build_graph, dependency_cycles, get_relationships, get_summary, DepGraphConfig,
};

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut config = DepGraphConfig::load_for_root(&cli.root);
    if cli.sequential {
        config.parallel = false;
    }
    let graph = build_graph(&cli.root, &config)?;

    match cli.command {
        Commands::Build => {
            let stats = graph.stats();
            if cli.json {
                return print_json(&stats);
            }
            println!("Built graph for {}", graph.root().display());
            println!("  Files:      {}", stats.total_files);
            println!("  Nodes:      {}", stats.node_count);
            println!("  Edges:      {}", stats.edge_count);
            println!("  Unresolved: {}", stats.unresolved_count);
            if stats.failed_files > 0 {
                println!("  Failed:     {}", stats.failed_files);
            }
        }

        Commands::Deps { file } => {
            let Some(rel) = get_relationships(&graph, &file)? else {
                bail!("file not found in graph: {}", file);
            };
            if cli.json {
                return print_json(&rel);
            }
            println!("{}", rel.path);
            println!();
            print_list("Imports", &rel.imports);
            print_list("Imported by", &rel.imported_by);
            println!("Exports ({}):", rel.symbols.len());
            for symbol in &rel.symbols {
                println!("  {} ({})", symbol.name, symbol.kind);
            }
        }

        Commands::Summary => {
            let summary = get_summary(&graph);
            if cli.json {
                return print_json(&summary);
            }
            println!("Root:  {}", summary.root);
            println!("Files: {}", summary.file_count);
            println!("Edges: {}", summary.edge_count);
            println!();
            println!("Most imported:");
            for entry in &summary.most_imported {
                println!("  {:>4}  {}", entry.imported_by_count, entry.path);
            }
        }

        Commands::Cycles => {
            let response = dependency_cycles(&graph);
            if cli.json {
                return print_json(&response);
            }
            if response.cycles.is_empty() {
                println!("No circular imports");
                return Ok(());
            }
            println!("{} circular import group(s):", response.count);
            for (i, group) in response.cycles.iter().enumerate() {
                println!("  {}. {}", i + 1, group.join(" <-> "));
            }
        }
    }

    Ok(())
}

fn print_list(title: &str, items: &[String]) {
    println!("{} ({}):", title, items.len());
    for item in items {
        println!("  {}", item);
    }
    println!();
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

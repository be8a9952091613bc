//! Rosetta CLI: inspect how identifiers resolve and how types route.
//!
//! Usage:
//!   rosetta resolve <identifier> [--hint type]
//!   rosetta plan <source> <dest> [--separate]
//!   rosetta candidates <identifier> <concept>
//!   rosetta graph
//!
//! Operations are never executed here; the CLI only plans.

use clap::{Parser, Subcommand};
use rosetta::{CanonicalContext, Rosetta, RouterConfig, Thing};
use std::path::PathBuf;
use tracing::Level;

#[derive(Parser)]
#[command(
    name = "rosetta",
    version,
    about = "Type-translation router for biomedical identifiers"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// Router configuration (YAML or JSON); defaults to the bundled one
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Canonical-context JSON document overriding curie and vocabulary
    #[arg(long, global = true)]
    context: Option<PathBuf>,
    /// Log at DEBUG level
    #[arg(long, short, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve an identifier (or a type hint) to its concrete type
    Resolve {
        /// Identifier, e.g. DOID:2841
        identifier: String,
        /// Type hint taking precedence over the curie prefix
        #[arg(long)]
        hint: Option<String>,
    },
    /// Plan the operation chain between two types
    Plan {
        source: String,
        dest: String,
        /// Print each shortest path separately instead of one flat chain
        #[arg(long)]
        separate: bool,
    },
    /// List candidate translations of an identifier into a concept
    Candidates {
        identifier: String,
        /// Concept code, e.g. D or G
        concept: String,
    },
    /// Print every transition in the graph
    Graph,
}

fn load_router(config: Option<PathBuf>, context: Option<PathBuf>) -> Result<Rosetta, String> {
    let config = match config {
        Some(path) => RouterConfig::from_path(&path),
        None => RouterConfig::bundled(),
    }
    .map_err(|e| format!("Failed to load configuration: {}", e))?;

    let context = match context {
        Some(path) => CanonicalContext::from_path(&path)
            .map_err(|e| format!("Failed to load canonical context: {}", e))?,
        None => CanonicalContext::empty(),
    };

    Rosetta::builder(config)
        .canonical_context(context)
        .allow_unresolved_operations()
        .build()
        .map_err(|e| format!("Failed to build router: {}", e))
}

fn cmd_resolve(rosetta: &Rosetta, identifier: &str, hint: Option<&str>) -> i32 {
    match rosetta.guess_type(Some(identifier), hint) {
        Some(type_name) => {
            println!("{}", type_name);
            0
        }
        None => {
            eprintln!("Error: could not resolve a type for '{}'", identifier);
            1
        }
    }
}

fn cmd_plan(rosetta: &Rosetta, source: &str, dest: &str, separate: bool) -> i32 {
    if separate {
        let paths = rosetta.transition_paths(source, dest);
        if paths.is_empty() {
            eprintln!("No path from '{}' to '{}'", source, dest);
            return 1;
        }
        for (i, path) in paths.iter().enumerate() {
            let nodes: Vec<&str> = path.nodes.iter().map(|n| n.as_str()).collect();
            println!("path {}: {}", i + 1, nodes.join(" -> "));
            for op in &path.operations {
                println!("  {}", op);
            }
        }
        return 0;
    }

    let chain = rosetta.get_transitions(source, dest);
    if chain.is_empty() {
        eprintln!("No path from '{}' to '{}'", source, dest);
        return 1;
    }
    for op in chain {
        println!("{}", op);
    }
    0
}

fn cmd_candidates(rosetta: &Rosetta, identifier: &str, concept: &str) -> i32 {
    let candidates = rosetta.candidate_translations(&Thing::new(identifier), concept);
    if candidates.is_empty() {
        println!("No candidate translations.");
        return 0;
    }
    for candidate in candidates {
        let chain = rosetta.get_transitions(candidate.source_type.as_str(), candidate.dest_type.as_str());
        println!("{}  [{} step(s)]", candidate.description, chain.len());
    }
    0
}

fn cmd_graph(rosetta: &Rosetta) -> i32 {
    let graph = rosetta.graph();
    println!("{} nodes, {} edges", graph.node_count(), graph.edge_count());
    println!("{}", "-".repeat(72));
    for edge in graph.edges() {
        println!("{}", edge);
    }
    0
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::WARN })
        .with_writer(std::io::stderr)
        .init();

    let rosetta = match load_router(cli.config, cli.context) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let code = match cli.command {
        Commands::Resolve { identifier, hint } => cmd_resolve(&rosetta, &identifier, hint.as_deref()),
        Commands::Plan { source, dest, separate } => cmd_plan(&rosetta, &source, &dest, separate),
        Commands::Candidates { identifier, concept } => cmd_candidates(&rosetta, &identifier, &concept),
        Commands::Graph => cmd_graph(&rosetta),
    };
    std::process::exit(code);
}
